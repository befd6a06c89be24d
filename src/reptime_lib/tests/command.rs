use super::*;

fn full_command() -> BenchCommand {
    BenchCommand {
        argv: vec!["sort".to_string(), "-n".to_string()],
        pre: Some("rm -f /tmp/out.%n".to_string()),
        input: Some("gen_input %n".to_string()),
        output: Some("tee /tmp/out.%n".to_string()),
        replace: Some("%n".to_string()),
        quiet_stdout: false,
        quiet_stderr: false,
    }
}

#[test]
fn test_resolve_substitutes_one_based_run_number() {
    let resolved = full_command().resolve(0);

    assert_eq!(resolved.pre.unwrap(), "rm -f /tmp/out.1");
    assert_eq!(resolved.input.unwrap(), "gen_input 1");
    assert_eq!(resolved.output.unwrap(), "tee /tmp/out.1");

    let resolved = full_command().resolve(6);
    assert_eq!(resolved.input.unwrap(), "gen_input 7");
}

#[test]
fn test_resolve_replaces_every_occurrence() {
    let command = BenchCommand {
        argv: vec!["true".to_string()],
        input: Some("echo @N @N@N".to_string()),
        replace: Some("@N".to_string()),
        ..Default::default()
    };

    assert_eq!(command.resolve(2).input.unwrap(), "echo 3 33");
}

#[test]
fn test_resolve_without_token_passes_through() {
    let command = BenchCommand {
        argv: vec!["true".to_string()],
        input: Some("echo %n".to_string()),
        ..Default::default()
    };

    assert_eq!(command.resolve(4).input.unwrap(), "echo %n");
    assert!(command.resolve(4).pre.is_none());
}

#[test]
fn test_program_and_args() {
    let command = full_command();

    assert_eq!(command.program(), "sort");
    assert_eq!(command.args(), &["-n".to_string()]);
}

#[test]
fn test_check_rejects_empty_argv() {
    let command = BenchCommand::default();

    assert!(command.check().is_err());
}

#[test]
fn test_check_rejects_quiet_with_output() {
    let command = BenchCommand {
        argv: vec!["true".to_string()],
        output: Some("cat".to_string()),
        quiet_stdout: true,
        ..Default::default()
    };

    assert!(command.check().is_err());
}

#[test]
fn test_check_accepts_quiet_stderr_with_output() {
    // Only stdout suppression conflicts with an output sink.
    let command = BenchCommand {
        argv: vec!["true".to_string()],
        output: Some("cat".to_string()),
        quiet_stderr: true,
        ..Default::default()
    };

    assert!(command.check().is_ok());
}

#[test]
fn test_display_plain_command() {
    let command = BenchCommand {
        argv: vec!["ls".to_string(), "-l".to_string()],
        ..Default::default()
    };

    assert_eq!(format!("{command}"), "ls -l");
}

#[test]
fn test_display_quotes_arguments_with_spaces() {
    let command = BenchCommand {
        argv: vec!["echo".to_string(), "two words".to_string()],
        ..Default::default()
    };

    assert_eq!(format!("{command}"), "echo \"two words\"");
}

#[test]
fn test_display_includes_helper_options() {
    let command = full_command();

    assert_eq!(
        format!("{command}"),
        "-I %n -i \"gen_input %n\" -r \"rm -f /tmp/out.%n\" -o \"tee /tmp/out.%n\" sort -n"
    );
}

#[test]
fn test_display_quiet_flags() {
    let mut command = BenchCommand {
        argv: vec!["true".to_string()],
        quiet_stdout: true,
        ..Default::default()
    };

    assert_eq!(format!("{command}"), "-q true");

    command.quiet_stderr = true;
    assert_eq!(format!("{command}"), "-qq true");
}
