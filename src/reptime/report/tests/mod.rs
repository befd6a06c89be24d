use std::time::Duration;

use reptime_lib::command::BenchCommand;
use reptime_lib::measurement::Measurement;
use reptime_lib::measurement::Rusage;
use reptime_lib::stats::ConfidenceLevel;

use super::*;

fn rusage(millis: u64, maxrss: usize) -> Rusage {
    Rusage {
        utime: Duration::from_millis(millis),
        stime: Duration::from_millis(millis / 2),
        maxrss,
        minflt: 10,
        majflt: 0,
        nswap: 0,
        inblock: 0,
        oublock: 0,
        msgsnd: 0,
        msgrcv: 0,
        nsignals: 0,
        nvcsw: 1,
        nivcsw: 1,
    }
}

fn fixture(num_runs: usize, walls_millis: &[u64]) -> (Settings, SampleStore) {
    let settings = Settings {
        num_runs,
        confidence: ConfidenceLevel::new(95).unwrap(),
        sleep_seconds: 0,
        sequential: true,
        commands: vec![BenchCommand {
            argv: vec!["work".to_string()],
            ..Default::default()
        }],
    };

    let mut store = SampleStore::new(1, num_runs);
    for (run, wall) in walls_millis.iter().enumerate() {
        store
            .record(
                0,
                run,
                Measurement {
                    wall: Duration::from_millis(*wall),
                    exit_code: 0,
                    rusage: Some(rusage(*wall / 2, 1000 + run * 100)),
                },
            )
            .unwrap();
    }

    (settings, store)
}

fn render_summary(settings: &Settings, store: &SampleStore, with_rusage: bool) -> String {
    let mut out = Vec::new();
    summary(&mut out, settings, store, with_rusage).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_summary_lists_every_command() {
    let (mut settings, _) = fixture(1, &[100]);
    settings.commands.push(BenchCommand {
        argv: vec!["other".to_string()],
        ..Default::default()
    });

    let mut store = SampleStore::new(2, 1);
    for command in 0..2 {
        store
            .record(
                command,
                0,
                Measurement {
                    wall: Duration::from_millis(100),
                    exit_code: 0,
                    rusage: Some(rusage(50, 1000)),
                },
            )
            .unwrap();
    }

    let rendered = render_summary(&settings, &store, false);

    assert!(rendered.contains("===> reptime results"));
    assert!(rendered.contains("1: work"));
    assert!(rendered.contains("2: other"));
}

#[test]
fn test_summary_has_time_rows_with_statistics() {
    let (settings, store) = fixture(3, &[1000, 2000, 3000]);

    let rendered = render_summary(&settings, &store, false);

    assert!(rendered.contains("Mean"));
    assert!(rendered.contains("Std.Dev."));
    assert!(rendered.contains("Median"));
    // Wall times 1s, 2s, 3s: mean 2, min 1, median 2, max 3.
    assert!(rendered.contains("real"));
    assert!(rendered.contains("2.000+/-"));
    assert!(rendered.contains("1.000"));
    assert!(rendered.contains("3.000"));
}

#[test]
fn test_summary_without_rusage_rows() {
    let (settings, store) = fixture(2, &[100, 200]);

    let rendered = render_summary(&settings, &store, false);

    assert!(rendered.contains("user"));
    assert!(rendered.contains("sys"));
    assert!(!rendered.contains("maxrss"));
    assert!(!rendered.contains("nvcsw"));
}

#[test]
fn test_summary_with_rusage_rows() {
    let (settings, store) = fixture(2, &[100, 200]);

    let rendered = render_summary(&settings, &store, true);

    for label in [
        "maxrss", "minflt", "majflt", "nswap", "inblock", "oublock", "msgsnd", "msgrcv",
        "nsignals", "nvcsw", "nivcsw",
    ] {
        assert!(rendered.contains(label), "missing the {label} row");
    }

    // maxrss samples are 1000 and 1100.
    assert!(rendered.contains("1050"));
}

#[test]
fn test_like_time_reports_mean_times() {
    let (settings, store) = fixture(2, &[1000, 3000]);

    let mut out = Vec::new();
    like_time(&mut out, &settings, &store).unwrap();
    let rendered = String::from_utf8(out).unwrap();

    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "");
    assert!(lines[1].starts_with("real"));
    assert!(lines[2].starts_with("user"));
    assert!(lines[3].starts_with("sys"));

    // Mean wall time of 1s and 3s.
    assert!(lines[1].contains("2.00"));
}

#[test]
fn test_like_time_rejects_multiple_commands() {
    let (mut settings, store) = fixture(1, &[100]);
    settings.commands.push(BenchCommand {
        argv: vec!["other".to_string()],
        ..Default::default()
    });

    let mut out = Vec::new();
    assert!(like_time(&mut out, &settings, &store).is_err());
}
