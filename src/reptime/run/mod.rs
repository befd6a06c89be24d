/// The order in which (command, run) pairs are executed.
pub mod schedule;

/// Execution and measurement of a single run.
pub mod exec;

/// Reaping children together with their resource usage on unix.
mod measurement_unix;

use std::thread;
use std::time::Duration;

use anyhow::Result;
use indicatif::MultiProgress;
use log::debug;
use log::trace;
use rand::Rng;
use reptime_lib::samples::SampleStore;
use reptime_lib::settings::Settings;

use self::exec::execute_run;
use self::schedule::Schedule;
use crate::cli::printing::generate_progress_bar;

/// Execute the full (command × run) matrix described by `settings`.
///
/// Runs are strictly serialized, one child at a time, so that they never
/// contend with each other for resources. The returned store holds exactly
/// `num_runs` measurements for every command.
pub fn perform_runs(settings: &Settings, progress: &MultiProgress) -> Result<SampleStore> {
    let mut store = SampleStore::new(settings.commands.len(), settings.num_runs);
    let total = settings.commands.len() * settings.num_runs;

    let bar = progress.add(generate_progress_bar(total as u64)?);

    let schedule = Schedule::new(
        settings.commands.len(),
        settings.num_runs,
        settings.sequential,
        rand::rng(),
    );

    let mut executed = 0;
    for (command_index, run_index) in schedule {
        let command = &settings.commands[command_index];

        debug!("Executing run {} of: {command}", run_index + 1);

        let measurement = execute_run(command, run_index)?;
        store.record(command_index, run_index, measurement)?;

        executed += 1;
        bar.inc(1);

        // Never sleep after the last run of the whole session.
        if executed < total && settings.sleep_seconds > 0 {
            let pause = Duration::from_secs_f64(
                rand::rng().random_range(0.0..settings.sleep_seconds as f64),
            );
            trace!("Sleeping {pause:?} before the next run");
            thread::sleep(pause);
        }
    }

    bar.finish();
    progress.remove(&bar);

    Ok(store)
}
