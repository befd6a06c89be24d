use std::fs::File;
use std::io::Seek;
use std::io::SeekFrom;
use std::process::Command;
use std::process::Stdio;
use std::time::Instant;

use anyhow::Context;
use anyhow::Result;
use reptime_lib::command::BenchCommand;
use reptime_lib::ctx;
use reptime_lib::error::CommandFailed;
use reptime_lib::measurement::Measurement;
use reptime_lib::measurement::Rusage;
use tempfile::tempfile;

#[cfg(unix)]
use super::measurement_unix::WaitRusage;

/// Execute one timed run of `command`.
///
/// The helper commands run strictly outside the timed interval: the
/// interval covers nothing but spawning the benchmarked process and
/// blocking until it is reaped. Any failure, of a helper or of the
/// benchmarked command itself, aborts the whole benchmark.
pub fn execute_run(command: &BenchCommand, run_index: usize) -> Result<Measurement> {
    let helpers = command.resolve(run_index);

    if let Some(pre) = &helpers.pre {
        run_pre_command(pre)?;
    }

    let stdin = match &helpers.input {
        Some(input) => Stdio::from(capture_input(input)?),
        None => Stdio::inherit(),
    };

    // The stdout of the benchmarked command goes to a capture file for the
    // sink, to /dev/null when suppressed, or straight through.
    let mut captured_output = None;
    let stdout = if helpers.output.is_some() {
        let file = tempfile().with_context(ctx!(
            "Could not create a temporary file for the output of {command}", ;
            "Ensure that the system temporary directory is writable",
        ))?;

        let writer = file.try_clone().with_context(ctx!(
            "Could not duplicate the output capture handle for {command}", ;
            "",
        ))?;
        captured_output = Some(file);

        Stdio::from(writer)
    } else if command.quiet_stdout {
        Stdio::null()
    } else {
        Stdio::inherit()
    };

    let stderr = if command.quiet_stderr {
        Stdio::null()
    } else {
        Stdio::inherit()
    };

    let mut target = Command::new(command.program());
    target.args(command.args()).stdin(stdin).stdout(stdout).stderr(stderr);

    // Nothing but the spawn and the wait may happen between the two time
    // readings, otherwise the overhead is attributed to the command.
    let start = Instant::now();
    let child = target.spawn().with_context(ctx!(
        "Could not start {command}", ;
        "Ensure that the program exists and is executable",
    ))?;
    let (exit_code, rusage) = wait_measured(child)?;
    let wall = start.elapsed();

    if exit_code != 0 {
        return Err(CommandFailed {
            what: command.to_string(),
            code: exit_code,
        })
        .with_context(ctx!(
            "The benchmarked command failed on run {}", run_index + 1;
            "Statistics are only reported over fully successful benchmarks",
        ));
    }

    if let (Some(output), Some(file)) = (&helpers.output, captured_output) {
        drain_into_sink(output, file)?;
    }

    Ok(Measurement {
        wall,
        exit_code,
        rusage,
    })
}

/// Block until the child exits, collecting its exit code and rusage.
#[cfg(unix)]
fn wait_measured(mut child: std::process::Child) -> Result<(i32, Option<Rusage>)> {
    let (code, rusage) = child.wait_rusage()?;
    Ok((code, rusage))
}

/// Block until the child exits; this platform reports no rusage.
#[cfg(not(unix))]
fn wait_measured(mut child: std::process::Child) -> Result<(i32, Option<Rusage>)> {
    let status = child.wait().with_context(ctx!(
        "Could not wait for the child process", ;
        "",
    ))?;
    let code = status
        .code()
        .context("Failed to retrieve the exit code")?;

    Ok((code, None))
}

/// Run the pre-command in a sub-shell, aborting on a non-zero exit.
fn run_pre_command(pre: &str) -> Result<()> {
    let status = Command::new("sh")
        .arg("-c")
        .arg(pre)
        .status()
        .with_context(ctx!(
            "Could not run the pre-command '{pre}'", ;
            "Ensure that 'sh' is available on this system",
        ))?;

    if !status.success() {
        return Err(CommandFailed {
            what: pre.to_string(),
            code: status.code().unwrap_or(1),
        })
        .with_context(ctx!(
            "Exiting because the pre-command failed", ;
            "Fix '{pre}' or drop the -r option",
        ));
    }

    Ok(())
}

/// Run the input command and capture its full output into an unlinked
/// temporary file, rewound and ready to serve as the timed command's stdin.
///
/// The capture completes before timing starts, so producing the input never
/// pollutes the measured interval.
fn capture_input(input: &str) -> Result<File> {
    let mut file = tempfile().with_context(ctx!(
        "Could not create a temporary file for the output of '{input}'", ;
        "Ensure that the system temporary directory is writable",
    ))?;

    let writer = file.try_clone().with_context(ctx!(
        "Could not duplicate the input capture handle for '{input}'", ;
        "",
    ))?;

    let status = Command::new("sh")
        .arg("-c")
        .arg(input)
        .stdout(Stdio::from(writer))
        .status()
        .with_context(ctx!(
            "Could not run the input command '{input}'", ;
            "Ensure that 'sh' is available on this system",
        ))?;

    if !status.success() {
        return Err(CommandFailed {
            what: input.to_string(),
            code: status.code().unwrap_or(1),
        })
        .with_context(ctx!(
            "Exiting because the input command failed", ;
            "Fix '{input}' or drop the -i option",
        ));
    }

    file.seek(SeekFrom::Start(0)).with_context(ctx!(
        "Could not rewind the captured output of '{input}'", ;
        "",
    ))?;

    Ok(file)
}

/// Feed the captured output of the timed command to the sink command and
/// check the sink's exit status.
fn drain_into_sink(output_command: &str, mut captured: File) -> Result<()> {
    captured.seek(SeekFrom::Start(0)).with_context(ctx!(
        "Could not rewind the captured output for '{output_command}'", ;
        "",
    ))?;

    let status = Command::new("sh")
        .arg("-c")
        .arg(output_command)
        .stdin(Stdio::from(captured))
        .status()
        .with_context(ctx!(
            "Could not run the output command '{output_command}'", ;
            "Ensure that 'sh' is available on this system",
        ))?;

    if !status.success() {
        return Err(CommandFailed {
            what: output_command.to_string(),
            code: status.code().unwrap_or(1),
        })
        .with_context(ctx!(
            "Exiting because the output command failed", ;
            "Fix '{output_command}' or drop the -o option",
        ));
    }

    Ok(())
}

#[cfg(test)]
#[path = "tests/exec.rs"]
mod tests;
