use anyhow::Context;
use anyhow::Result;

use crate::bailc;
use crate::command::BenchCommand;
use crate::stats::ConfidenceLevel;

/// The immutable configuration of one benchmarking session.
///
/// Constructed once by the CLI layer and passed by reference to every
/// stage; there is no global state.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// How many times each command is run.
    pub num_runs: usize,

    /// The confidence level for the reported intervals.
    pub confidence: ConfidenceLevel,

    /// Upper bound, in whole seconds, for the random sleep between runs.
    ///
    /// Zero disables the inter-run sleeps entirely.
    pub sleep_seconds: u64,

    /// Execute the (command, run) matrix in listed order instead of the
    /// default randomized order.
    pub sequential: bool,

    /// The commands to benchmark.
    pub commands: Vec<BenchCommand>,
}

impl Settings {
    /// Verify the cross-field invariants the argument parsers cannot
    /// express.
    pub fn check(&self) -> Result<()> {
        if self.num_runs == 0 {
            bailc!(
                "'num runs' out of range", ;
                "Each command has to run at least once", ;
                "",
            );
        }

        if self.commands.is_empty() {
            bailc!(
                "Missing command", ;
                "There is nothing to benchmark", ;
                "Specify a command or a non-empty batch file",
            );
        }

        for command in &self.commands {
            command.check()?;
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/settings.rs"]
mod tests;
