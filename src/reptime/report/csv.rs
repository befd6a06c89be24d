use std::path::Path;

use anyhow::Context;
use anyhow::Result;
use csv::Writer;
use reptime_lib::bailc;
use reptime_lib::ctx;
use reptime_lib::samples::SampleStore;
use reptime_lib::settings::Settings;
use serde::Serialize;

/// One exported row: the raw measured values of a single run.
///
/// The rusage columns are empty on platforms without accounting.
#[derive(Serialize, Debug)]
struct RunRow<'c> {
    command: &'c str,
    run: usize,
    wall_secs: f64,
    exit_code: i32,
    utime_secs: Option<f64>,
    stime_secs: Option<f64>,
    maxrss: Option<usize>,
    minflt: Option<usize>,
    majflt: Option<usize>,
    nswap: Option<usize>,
    inblock: Option<usize>,
    oublock: Option<usize>,
    msgsnd: Option<usize>,
    msgrcv: Option<usize>,
    nsignals: Option<usize>,
    nvcsw: Option<usize>,
    nivcsw: Option<usize>,
}

/// Write one CSV row per (command, run) with the raw measurements.
pub fn export_runs(path: &Path, settings: &Settings, store: &SampleStore) -> Result<()> {
    let mut writer = Writer::from_path(path).with_context(ctx!(
        "Could not create the CSV file {path:?}", ;
        "Ensure that the directory exists and is writable",
    ))?;

    for (index, command) in settings.commands.iter().enumerate() {
        let rendered = command.to_string();

        for run in 0..store.num_runs() {
            let Some(measurement) = store.get(index, run) else {
                bailc!(
                    "Run {run} of command {index} has not been measured", ;
                    "The export is only written after a full benchmark", ;
                    "",
                );
            };

            let rusage = measurement.rusage;

            writer
                .serialize(RunRow {
                    command: &rendered,
                    run: run + 1,
                    wall_secs: measurement.wall.as_secs_f64(),
                    exit_code: measurement.exit_code,
                    utime_secs: rusage.map(|r| r.utime.as_secs_f64()),
                    stime_secs: rusage.map(|r| r.stime.as_secs_f64()),
                    maxrss: rusage.map(|r| r.maxrss),
                    minflt: rusage.map(|r| r.minflt),
                    majflt: rusage.map(|r| r.majflt),
                    nswap: rusage.map(|r| r.nswap),
                    inblock: rusage.map(|r| r.inblock),
                    oublock: rusage.map(|r| r.oublock),
                    msgsnd: rusage.map(|r| r.msgsnd),
                    msgrcv: rusage.map(|r| r.msgrcv),
                    nsignals: rusage.map(|r| r.nsignals),
                    nvcsw: rusage.map(|r| r.nvcsw),
                    nivcsw: rusage.map(|r| r.nivcsw),
                })
                .with_context(ctx!(
                    "Could not write run {run} of command {index} to {path:?}", ;
                    "",
                ))?;
        }
    }

    writer.flush().with_context(ctx!(
        "Could not flush the CSV file {path:?}", ;
        "",
    ))?;

    Ok(())
}

#[cfg(test)]
#[path = "tests/csv.rs"]
mod tests;
