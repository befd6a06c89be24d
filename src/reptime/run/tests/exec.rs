#![cfg(unix)]

use reptime_lib::error::CommandFailed;

use super::*;

fn simple(argv: &[&str]) -> BenchCommand {
    BenchCommand {
        argv: argv.iter().map(|a| a.to_string()).collect(),
        ..Default::default()
    }
}

#[test]
fn test_successful_run_is_measured() {
    let measurement = execute_run(&simple(&["true"]), 0).unwrap();

    assert_eq!(measurement.exit_code, 0);
    assert!(measurement.wall > std::time::Duration::ZERO);
    assert!(measurement.rusage.is_some());
}

#[test]
fn test_failing_command_aborts() {
    let err = execute_run(&simple(&["false"]), 0).unwrap_err();

    let failed = err.downcast_ref::<CommandFailed>().unwrap();
    assert_eq!(failed.code, 1);
}

#[test]
fn test_missing_program_fails_to_spawn() {
    let err = execute_run(&simple(&["reptime-test-no-such-program"]), 0).unwrap_err();

    // A spawn failure is not a command failure, there is no exit code.
    assert!(err.downcast_ref::<CommandFailed>().is_none());
}

#[test]
fn test_failing_pre_command_aborts() {
    let command = BenchCommand {
        argv: vec!["true".to_string()],
        pre: Some("exit 3".to_string()),
        ..Default::default()
    };

    let err = execute_run(&command, 0).unwrap_err();

    let failed = err.downcast_ref::<CommandFailed>().unwrap();
    assert_eq!(failed.code, 3);
    assert_eq!(failed.what, "exit 3");
}

#[test]
fn test_input_is_piped_into_the_timed_command() {
    // cat copies the captured input to the capture file, the sink checks it.
    let command = BenchCommand {
        argv: vec!["cat".to_string()],
        input: Some("echo hello".to_string()),
        output: Some("grep -q hello".to_string()),
        ..Default::default()
    };

    assert!(execute_run(&command, 0).is_ok());
}

#[test]
fn test_failing_output_sink_aborts() {
    let command = BenchCommand {
        argv: vec!["echo".to_string(), "sample".to_string()],
        output: Some("grep -q absent".to_string()),
        ..Default::default()
    };

    let err = execute_run(&command, 0).unwrap_err();

    let failed = err.downcast_ref::<CommandFailed>().unwrap();
    assert_eq!(failed.what, "grep -q absent");
}

#[test]
fn test_replace_token_reaches_helper_commands() {
    let command = BenchCommand {
        argv: vec!["cat".to_string()],
        input: Some("echo %n".to_string()),
        output: Some("grep -qx %n".to_string()),
        replace: Some("%n".to_string()),
        ..Default::default()
    };

    // Run index 2 resolves to the run number 3 on both sides.
    assert!(execute_run(&command, 2).is_ok());
}

#[test]
fn test_without_token_helpers_are_verbatim() {
    let command = BenchCommand {
        argv: vec!["cat".to_string()],
        input: Some("echo %n".to_string()),
        output: Some("grep -qx 3".to_string()),
        ..Default::default()
    };

    // The literal %n never matches the expected run number.
    assert!(execute_run(&command, 2).is_err());
}
