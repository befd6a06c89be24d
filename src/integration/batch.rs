use std::fs;

use crate::init;
use crate::reptime;
use crate::stderr_of;
use crate::stdout_of;

#[test]
fn test_batch_mode_benchmarks_every_line() {
    let env = init();
    let batch = env.temp_dir.path().join("commands");

    fs::write(&batch, "# two harmless commands\ntrue\n-q echo hello\n").unwrap();

    let output = reptime!(env;
        "-b", batch.to_str().unwrap(), "-n", "2", "-s", "0"; "batch mode");
    let report = stderr_of(&output);

    assert!(report.contains("1: true"));
    assert!(report.contains("2: -q echo hello"));
    // The echo is quiet per its batch line.
    assert!(!stdout_of(&output).contains("hello"));
}

#[test]
fn test_batch_mode_rejects_liketime() {
    let env = init();
    let batch = env.temp_dir.path().join("commands");

    fs::write(&batch, "true\n").unwrap();

    let output = reptime!(env; "-b", batch.to_str().unwrap(), "-f", "liketime");

    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("liketime"));
}

#[test]
fn test_missing_batch_file_is_fatal() {
    let env = init();

    let output = reptime!(env; "-b", "does-not-exist");

    assert!(!output.status.success());
}

#[test]
fn test_batch_parse_errors_name_the_line() {
    let env = init();
    let batch = env.temp_dir.path().join("commands");

    fs::write(&batch, "true\n-z true\n").unwrap();

    let output = reptime!(env; "-b", batch.to_str().unwrap());

    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("line 2"));
}

#[test]
fn test_batch_per_line_helpers() {
    let env = init();
    let batch = env.temp_dir.path().join("commands");

    fs::write(
        &batch,
        "-I @N -i 'echo @N' -o 'grep -qx @N' cat\n-r 'true' true\n",
    )
    .unwrap();

    reptime!(env;
        "-b", batch.to_str().unwrap(), "-n", "2", "-s", "0"; "batch helpers");
}
