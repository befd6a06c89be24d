//! # Integration tests for the command line of `reptime`.
//! The tests in this module drive the built binary end to end: argument
//! handling, batch files, execution, helper commands and report output.
//! They spawn real child processes and therefore assume a unix-like
//! environment with `sh` and the usual core utilities available.
//!
//! ## Test Plan
//!
//! + [x] Test `reptime --version`.
//! + [x] Test benchmarking a trivial command.
//! + [x] Test the fatal paths (pre-command, benchmarked command, sink).
//! + [x] Test the helper-command plumbing and the replace token.
//! + [x] Test batch file mode.
//! + [x] Test the CSV export.

#![cfg(unix)]

mod batch;
mod bench;

use std::path::PathBuf;
use std::process::Output;

use tempdir::TempDir;

/// The testing environment passed to individual #[test](s)
struct TestEnv {
    reptime_path: PathBuf,
    temp_dir: TempDir,
}

fn init() -> TestEnv {
    let reptime_path = PathBuf::from(env!("CARGO_BIN_EXE_reptime"));
    assert!(
        reptime_path.exists(),
        "\nTest setup couldn't find the reptime executable.
    Please ensure that `reptime` is built before running integration tests.
    [Expected to find it at: {:?}]\n",
        reptime_path
    );

    // CARGO_TARGET_TMPDIR means you can debug by looking in the ./target
    // folder instead of wherever the system tempdir decided to dump.
    let temp_dir = TempDir::new_in(env!("CARGO_TARGET_TMPDIR"), "reptime-tests").unwrap();

    TestEnv {
        reptime_path,
        temp_dir,
    }
}

/// Run the built binary with the given arguments.
#[macro_export]
macro_rules! reptime {
    ($env:expr; $($arg:expr),*) => {
        {
            std::process::Command::new(&$env.reptime_path)
                .args([$($arg),*])
                .output()
                .unwrap()
        }
    };
    ($env:expr; $($arg:expr),*; $msg:expr) => {
        {
            let out = std::process::Command::new(&$env.reptime_path)
                .args([$($arg),*])
                .output()
                .unwrap();
            if !out.status.success() {
                panic!(
                    "reptime {} failed: {}",
                    $msg,
                    String::from_utf8(out.stderr).unwrap()
                );
            } else {
                out
            }
        }
    };
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).unwrap()
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}
