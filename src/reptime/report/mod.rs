/// Raw per-run CSV export.
pub mod csv;

use std::io::Write;

use anyhow::Context;
use anyhow::Result;
use reptime_lib::bailc;
use reptime_lib::constants::PRIMARY_STYLE;
use reptime_lib::samples::Metric;
use reptime_lib::samples::SampleStore;
use reptime_lib::settings::Settings;
use reptime_lib::stats;
use reptime_lib::stats::Summary;

use crate::cli::printing::format_table;

/// Render the tabular report for every command.
///
/// The report goes to the diagnostic stream so that it stays separable
/// from whatever the benchmarked commands print themselves. Passing
/// `with_rusage` appends one row per resource-usage field to each table.
pub fn summary<W: Write>(
    w: &mut W,
    settings: &Settings,
    store: &SampleStore,
    with_rusage: bool,
) -> Result<()> {
    writeln!(w, "{}===> reptime results{:#}", PRIMARY_STYLE, PRIMARY_STYLE)?;

    for (index, command) in settings.commands.iter().enumerate() {
        if index > 0 {
            writeln!(w)?;
        }
        writeln!(w, "{}: {command}", index + 1)?;

        let mut rows = vec![vec![
            String::new(),
            "Mean".to_string(),
            "Std.Dev.".to_string(),
            "Min".to_string(),
            "Median".to_string(),
            "Max".to_string(),
        ]];

        for metric in [Metric::WallTime, Metric::UserTime, Metric::SystemTime] {
            rows.push(time_row(store, index, metric, settings)?);
        }

        if with_rusage {
            for metric in Metric::RUSAGE {
                rows.push(rusage_row(store, index, metric, settings)?);
            }
        }

        writeln!(w, "{}", format_table(rows))?;
    }

    Ok(())
}

/// One table row for a seconds-valued metric.
fn time_row(
    store: &SampleStore,
    command: usize,
    metric: Metric,
    settings: &Settings,
) -> Result<Vec<String>> {
    let samples = store.metric(command, metric)?;
    let summary = Summary::of(&samples, settings.confidence)?;

    Ok(vec![
        metric.name().to_string(),
        format!("{:.3}+/-{:.4}", summary.mean, summary.ci),
        format!("{:.3}", summary.std_dev),
        format!("{:.3}", summary.min),
        format!("{:.3}", summary.median),
        format!("{:.3}", summary.max),
    ])
}

/// One table row for an integer-valued rusage metric.
fn rusage_row(
    store: &SampleStore,
    command: usize,
    metric: Metric,
    settings: &Settings,
) -> Result<Vec<String>> {
    let samples = store.metric(command, metric)?;
    let summary = Summary::of(&samples, settings.confidence)?;

    Ok(vec![
        metric.name().to_string(),
        format!("{:.0}", summary.mean),
        format!("{:.0}", summary.std_dev),
        format!("{:.0}", summary.min),
        format!("{:.0}", summary.median),
        format!("{:.0}", summary.max),
    ])
}

/// Render the /usr/bin/time-like report: mean real, user and system time
/// of the single benchmarked command.
pub fn like_time<W: Write>(w: &mut W, settings: &Settings, store: &SampleStore) -> Result<()> {
    if settings.commands.len() != 1 {
        bailc!(
            "The liketime report covers exactly one command", ;
            "This benchmark ran {} commands", settings.commands.len();
            "Use the normal or rusage format instead",
        );
    }

    let real = stats::mean(&store.metric(0, Metric::WallTime)?);
    let user = stats::mean(&store.metric(0, Metric::UserTime)?);
    let sys = stats::mean(&store.metric(0, Metric::SystemTime)?);

    writeln!(w)?;
    writeln!(w, "real {real:9.2}")?;
    writeln!(w, "user {user:9.2}")?;
    writeln!(w, "sys  {sys:9.2}")?;

    Ok(())
}

#[cfg(test)]
#[path = "tests/mod.rs"]
mod tests;
