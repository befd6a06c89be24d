use super::*;

fn valid_settings() -> Settings {
    Settings {
        num_runs: 5,
        confidence: ConfidenceLevel::new(99).unwrap(),
        sleep_seconds: 0,
        sequential: false,
        commands: vec![BenchCommand {
            argv: vec!["true".to_string()],
            ..Default::default()
        }],
    }
}

#[test]
fn test_valid_settings_pass() {
    assert!(valid_settings().check().is_ok());
}

#[test]
fn test_zero_runs_rejected() {
    let mut settings = valid_settings();
    settings.num_runs = 0;

    assert!(settings.check().is_err());
}

#[test]
fn test_no_commands_rejected() {
    let mut settings = valid_settings();
    settings.commands.clear();

    assert!(settings.check().is_err());
}

#[test]
fn test_command_invariants_are_propagated() {
    let mut settings = valid_settings();
    settings.commands[0].quiet_stdout = true;
    settings.commands[0].output = Some("cat".to_string());

    assert!(settings.check().is_err());
}
