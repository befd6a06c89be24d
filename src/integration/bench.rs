use std::fs;

use crate::init;
use crate::reptime;
use crate::stderr_of;
use crate::stdout_of;

/// The parsed statistics row of one report metric.
struct Row {
    mean: f64,
    min: f64,
    median: f64,
    max: f64,
}

/// Parse a `real 1.000+/-0.0010 0.001 0.999 1.000 1.001` report row.
fn parse_row(report: &str, label: &str) -> Row {
    let line = report
        .lines()
        .find(|l| l.starts_with(label))
        .unwrap_or_else(|| panic!("no {label} row in:\n{report}"));

    let fields: Vec<&str> = line.split_whitespace().collect();
    assert_eq!(fields.len(), 6, "unexpected row shape: {line}");

    let (mean, _ci) = fields[1].split_once("+/-").unwrap();

    Row {
        mean: mean.parse().unwrap(),
        min: fields[3].parse().unwrap(),
        median: fields[4].parse().unwrap(),
        max: fields[5].parse().unwrap(),
    }
}

#[test]
fn test_version() {
    let env = init();

    let output = reptime!(env; "--version"; "--version");

    assert!(stdout_of(&output).contains("reptime"));
}

#[test]
fn test_trivial_benchmark_is_consistent() {
    let env = init();

    let output = reptime!(env; "-n", "5", "-c", "90", "-s", "0", "true"; "trivial benchmark");
    let report = stderr_of(&output);

    assert!(report.contains("===> reptime results"));
    assert!(report.contains("1: true"));

    for label in ["real", "user", "sys"] {
        let row = parse_row(&report, label);

        assert!(row.min <= row.median, "min > median in the {label} row");
        assert!(row.median <= row.max, "median > max in the {label} row");
        assert!(
            row.min <= row.mean && row.mean <= row.max,
            "mean outside [min, max] in the {label} row"
        );
    }
}

#[test]
fn test_rusage_format_adds_resource_rows() {
    let env = init();

    let output = reptime!(env; "-n", "2", "-s", "0", "-f", "rusage", "true"; "rusage format");
    let report = stderr_of(&output);

    for label in ["maxrss", "minflt", "nvcsw", "nivcsw"] {
        assert!(report.contains(label), "missing the {label} row");
    }
}

#[test]
fn test_liketime_format() {
    let env = init();

    let output = reptime!(env; "-f", "liketime", "-s", "0", "true"; "liketime format");
    let report = stderr_of(&output);

    assert!(report.contains("real"));
    assert!(report.contains("user"));
    assert!(report.contains("sys"));
    assert!(!report.contains("===>"));
}

#[test]
fn test_failing_pre_command_aborts_before_any_run() {
    let env = init();
    let marker = env.temp_dir.path().join("marker");

    let output = reptime!(env;
        "-s", "0", "-r", "exit 1", "touch", marker.to_str().unwrap());

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    // The pre-command failed, so the timed command never ran.
    assert!(!marker.exists());
}

#[test]
fn test_failing_benchmarked_command_aborts() {
    let env = init();

    let output = reptime!(env; "-s", "0", "false");

    assert!(!output.status.success());
}

#[test]
fn test_exit_status_is_propagated() {
    let env = init();

    let output = reptime!(env; "-s", "0", "sh", "-c", "exit 7");

    assert_eq!(output.status.code(), Some(7));
}

#[test]
fn test_quiet_suppresses_the_commands_stdout() {
    let env = init();

    let noisy = reptime!(env; "-s", "0", "echo", "chatter"; "echo");
    assert!(stdout_of(&noisy).contains("chatter"));

    let quiet = reptime!(env; "-s", "0", "-q", "echo", "chatter"; "quiet echo");
    assert!(!stdout_of(&quiet).contains("chatter"));
}

#[test]
fn test_export_csv_has_one_row_per_run() {
    let env = init();
    let csv_path = env.temp_dir.path().join("runs.csv");

    reptime!(env;
        "-n", "3", "-s", "0", "--export-csv", csv_path.to_str().unwrap(), "true";
        "csv export");

    let contents = fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();

    // A header plus one row per run.
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("command,run,wall_secs"));
    assert!(lines[1].starts_with("true,1,"));
    assert!(lines[3].starts_with("true,3,"));
}

#[test]
fn test_helper_commands_and_replace_token() {
    let env = init();

    // Every run feeds its own 1-based number through cat and checks it on
    // the other side.
    reptime!(env;
        "-n", "3", "-s", "0", "-I", "@N", "-i", "echo @N", "-o", "grep -qx @N", "cat";
        "helper plumbing");
}

#[test]
fn test_failing_output_sink_aborts() {
    let env = init();

    let output = reptime!(env;
        "-s", "0", "-i", "echo hay", "-o", "grep -q needle", "cat");

    assert!(!output.status.success());
}

#[test]
fn test_sequential_scheduling() {
    let env = init();

    reptime!(env; "-n", "2", "-s", "0", "--sequential", "true"; "sequential");
}
