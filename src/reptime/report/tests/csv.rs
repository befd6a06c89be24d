use std::time::Duration;

use reptime_lib::command::BenchCommand;
use reptime_lib::measurement::Measurement;
use reptime_lib::measurement::Rusage;
use reptime_lib::stats::ConfidenceLevel;
use tempdir::TempDir;

use super::*;

fn fixture() -> (Settings, SampleStore) {
    let settings = Settings {
        num_runs: 2,
        confidence: ConfidenceLevel::new(99).unwrap(),
        sleep_seconds: 0,
        sequential: true,
        commands: vec![BenchCommand {
            argv: vec!["true".to_string()],
            ..Default::default()
        }],
    };

    let mut store = SampleStore::new(1, 2);
    for run in 0..2 {
        store
            .record(
                0,
                run,
                Measurement {
                    wall: Duration::from_millis(500 * (run as u64 + 1)),
                    exit_code: 0,
                    rusage: Some(Rusage {
                        utime: Duration::from_millis(100),
                        stime: Duration::from_millis(50),
                        maxrss: 2048,
                        minflt: 5,
                        majflt: 0,
                        nswap: 0,
                        inblock: 0,
                        oublock: 0,
                        msgsnd: 0,
                        msgrcv: 0,
                        nsignals: 0,
                        nvcsw: 2,
                        nivcsw: 1,
                    }),
                },
            )
            .unwrap();
    }

    (settings, store)
}

#[test]
fn test_export_writes_one_row_per_run() {
    let tmp_dir = TempDir::new("reptime-csv").unwrap();
    let path = tmp_dir.path().join("runs.csv");
    let (settings, store) = fixture();

    export_runs(&path, &settings, &store).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();

    let headers = reader.headers().unwrap().clone();
    assert_eq!(&headers[0], "command");
    assert_eq!(&headers[1], "run");
    assert_eq!(&headers[2], "wall_secs");
    assert_eq!(&headers[6], "maxrss");

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);

    assert_eq!(&rows[0][0], "true");
    assert_eq!(&rows[0][1], "1");
    assert_eq!(&rows[0][2], "0.5");
    assert_eq!(&rows[1][1], "2");
    assert_eq!(&rows[1][2], "1.0");
    assert_eq!(&rows[0][6], "2048");

    assert!(tmp_dir.close().is_ok());
}

#[test]
fn test_export_requires_a_complete_store() {
    let tmp_dir = TempDir::new("reptime-csv").unwrap();
    let path = tmp_dir.path().join("runs.csv");
    let (settings, _) = fixture();

    let incomplete = SampleStore::new(1, 2);

    assert!(export_runs(&path, &settings, &incomplete).is_err());
    assert!(tmp_dir.close().is_ok());
}

#[test]
fn test_export_to_an_invalid_path_fails() {
    let tmp_dir = TempDir::new("reptime-csv").unwrap();
    let path = tmp_dir.path().join("");
    let (settings, store) = fixture();

    assert!(export_runs(&path, &settings, &store).is_err());
    assert!(tmp_dir.close().is_ok());
}
