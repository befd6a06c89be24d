use std::io::stderr;
use std::process::exit;

use anyhow::anyhow;
use anyhow::Context;
use anyhow::Result;
use chrono::Local;
use clap::CommandFactory;
use clap::FromArgMatches;
use colog::default_builder;
use colog::formatter;
use indicatif::MultiProgress;
use indicatif_log_bridge::LogWrapper;
use log::debug;
use log::info;
use log::LevelFilter;
use reptime_lib::batch::parse_batch;
use reptime_lib::command::BenchCommand;
use reptime_lib::constants::ERROR_STYLE;
use reptime_lib::ctx;
use reptime_lib::error::CommandFailed;
use reptime_lib::settings::Settings;
use reptime_lib::stats::ConfidenceLevel;

use super::def::Cli;
use super::def::FormatStyle;
use super::log::LogTokens;
use super::printing::get_styles;
use crate::report;
use crate::run::perform_runs;

/// This function parses the command that reptime was run with.
pub fn parse_command() {
    let styled = Cli::command().styles(get_styles()).get_matches();

    // This unwrap will print the error if the command is wrong.
    let command = Cli::from_arg_matches(&styled).unwrap();

    if let Err(e) = process_command(&command) {
        eprintln!("{}error:{:#} {}", ERROR_STYLE, ERROR_STYLE, e.root_cause());
        eprint!("{}", e);

        // A failed child's exit status becomes our own.
        let code = match e.downcast_ref::<CommandFailed>() {
            Some(failed) if failed.code != 0 => failed.code,
            _ => 1,
        };
        exit(code);
    }
}

/// CLAP has parsed the command, now we process it.
pub fn process_command(cmd: &Cli) -> Result<()> {
    let progress = setup_logging(cmd)?;

    let settings = build_settings(cmd)?;

    debug!(
        "Benchmarking {} command(s), {} run(s) each, starting at {}",
        settings.commands.len(),
        settings.num_runs,
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );

    let store = perform_runs(&settings, &progress)?;

    if let Some(path) = &cmd.export_csv {
        report::csv::export_runs(path, &settings, &store)?;
        info!("Raw measurements written to {path:?}");
    }

    match cmd.format {
        FormatStyle::LikeTime => report::like_time(&mut stderr(), &settings, &store)?,
        FormatStyle::Normal => report::summary(&mut stderr(), &settings, &store, false)?,
        FormatStyle::Rusage => report::summary(&mut stderr(), &settings, &store, true)?,
    }

    Ok(())
}

/// Build the immutable [`Settings`] value consumed by every later stage.
pub fn build_settings(cmd: &Cli) -> Result<Settings> {
    let commands = if let Some(batch) = &cmd.batch {
        if cmd.format == FormatStyle::LikeTime {
            return Err(anyhow!("Can't use batch file mode with -f liketime")).with_context(ctx!(
                "The liketime report covers exactly one command", ;
                "Use the normal or rusage format for batch files",
            ));
        }

        parse_batch(batch)?
    } else {
        vec![BenchCommand {
            argv: cmd.command.clone(),
            pre: cmd.pre.clone(),
            input: cmd.input.clone(),
            output: cmd.output.clone(),
            replace: cmd.replace.clone(),
            quiet_stdout: cmd.quiet >= 1,
            quiet_stderr: cmd.quiet >= 2,
        }]
    };

    let settings = Settings {
        num_runs: cmd.runs as usize,
        confidence: ConfidenceLevel::new(cmd.confidence)?,
        sleep_seconds: cmd.sleep,
        sequential: cmd.sequential,
        commands,
    };

    settings.check()?;

    Ok(settings)
}

/// Sets up the logging for the application.
fn setup_logging(cmd: &Cli) -> Result<MultiProgress> {
    let mut log_build = default_builder();
    log_build.format(formatter(LogTokens));

    let bar = MultiProgress::new();

    if cmd.verbose == 0 {
        log_build.filter(None, LevelFilter::Info);
    } else if cmd.verbose == 1 {
        log_build.filter(None, LevelFilter::Debug);
    } else {
        log_build.filter(None, LevelFilter::Trace);
    }

    LogWrapper::new(bar.clone(), log_build.build())
        .try_init()
        .with_context(ctx!(
            "Failed to initialize the command line interface", ;
            "Make sure you are using a supported terminal",
        ))?;

    Ok(bar)
}

#[cfg(test)]
#[path = "tests/process.rs"]
mod tests;
