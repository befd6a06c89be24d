use std::fmt::Display;

use anyhow::Context;
use anyhow::Result;

use crate::bailc;

/// One command to benchmark, together with its helper commands.
///
/// Immutable once constructed. The helper command strings may contain the
/// `replace` token; [`BenchCommand::resolve`] substitutes it with the
/// 1-based run number before a run starts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BenchCommand {
    /// The argument vector of the benchmarked command, program first.
    pub argv: Vec<String>,

    /// Shell command run before each timed run; a failure aborts.
    pub pre: Option<String>,

    /// Shell command whose output becomes the timed command's stdin.
    pub input: Option<String>,

    /// Shell command fed the timed command's stdout after the run.
    pub output: Option<String>,

    /// Token replaced with the 1-based run number in helper commands.
    pub replace: Option<String>,

    /// Suppress the timed command's stdout.
    pub quiet_stdout: bool,

    /// Suppress the timed command's stderr.
    pub quiet_stderr: bool,
}

/// The helper commands of a [`BenchCommand`] with the placeholder token
/// substituted for one specific run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedHelpers {
    /// The pre-command to run before the timed interval.
    pub pre: Option<String>,

    /// The command producing the timed command's stdin.
    pub input: Option<String>,

    /// The command consuming the timed command's stdout.
    pub output: Option<String>,
}

impl BenchCommand {
    /// The program that will be spawned.
    ///
    /// Valid only after [`BenchCommand::check`] has passed.
    pub fn program(&self) -> &str {
        &self.argv[0]
    }

    /// The arguments passed to the program.
    pub fn args(&self) -> &[String] {
        &self.argv[1..]
    }

    /// Verify the invariants that the CLI and batch layers cannot express.
    pub fn check(&self) -> Result<()> {
        if self.argv.is_empty() {
            bailc!(
                "Missing command", ;
                "A command specification has an empty argument vector", ;
                "Provide the program to benchmark and its arguments",
            );
        }

        if self.quiet_stdout && self.output.is_some() {
            bailc!(
                "-q and -o are mutually exclusive", ;
                "The stdout of {self} is both suppressed and piped to '{}'",
                  self.output.as_deref().unwrap_or_default();
                "Drop either the quiet flag or the output command",
            );
        }

        Ok(())
    }

    /// Substitute the replace token with the 1-based run number in every
    /// helper command string.
    ///
    /// Without a token configured the helpers are passed through verbatim.
    pub fn resolve(&self, run_index: usize) -> ResolvedHelpers {
        let substitute = |command: &Option<String>| match (&self.replace, command) {
            (Some(token), Some(cmd)) => Some(cmd.replace(token, &(run_index + 1).to_string())),
            (None, cmd) => cmd.clone(),
            (_, None) => None,
        };

        ResolvedHelpers {
            pre: substitute(&self.pre),
            input: substitute(&self.input),
            output: substitute(&self.output),
        }
    }
}

impl Display for BenchCommand {
    /// Pretty-print the command the way the user would have specified it.
    ///
    /// Quoting is semi-sensible at best since the exact rules are shell
    /// dependent.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(token) = &self.replace {
            write!(f, "-I {} ", quote_arg(token))?;
        }

        if let Some(input) = &self.input {
            write!(f, "-i {} ", quote_arg(input))?;
        }

        if let Some(pre) = &self.pre {
            write!(f, "-r {} ", quote_arg(pre))?;
        }

        if let Some(output) = &self.output {
            write!(f, "-o {} ", quote_arg(output))?;
        }

        if self.quiet_stderr {
            write!(f, "-qq ")?;
        } else if self.quiet_stdout {
            write!(f, "-q ")?;
        }

        for (idx, arg) in self.argv.iter().enumerate() {
            if idx > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", quote_arg(arg))?;
        }

        Ok(())
    }
}

/// Quote an argument for display if it contains whitespace.
fn quote_arg(arg: &str) -> String {
    if arg.contains(' ') {
        format!("\"{}\"", arg.replace('"', "\\\""))
    } else {
        arg.to_string()
    }
}

#[cfg(test)]
#[path = "tests/command.rs"]
mod tests;
