use std::path::PathBuf;

use clap::ArgAction;
use clap::Parser;
use clap::ValueEnum;

/// Structure of the main command (reptime).
#[allow(unused)]
#[derive(Parser, Debug)]
#[command(
    name = "reptime",
    version,
    about = "Times commands over repeated runs and reports summary statistics",
    disable_help_subcommand = true
)]
pub struct Cli {
    /// The command to benchmark, with its arguments.
    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true,
        required_unless_present = "batch",
        conflicts_with = "batch"
    )]
    pub command: Vec<String>,

    /// How many times to run each command.
    #[arg(
        short = 'n',
        long = "runs",
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub runs: u32,

    /// The confidence level, in percent, for the reported intervals.
    #[arg(
        short,
        long,
        default_value_t = 99,
        value_parser = clap::value_parser!(u8).range(1..=99)
    )]
    pub confidence: u8,

    /// The report rendering.
    #[arg(short, long, value_enum, default_value_t = FormatStyle::Normal)]
    pub format: FormatStyle,

    /// Token replaced with the 1-based run number in -i/-o/-r commands.
    #[arg(short = 'I', long = "replace", value_name = "TOKEN")]
    pub replace: Option<String>,

    /// Command whose output is fed to the timed command's stdin.
    #[arg(short, long, value_name = "CMD")]
    pub input: Option<String>,

    /// Command that the timed command's stdout is piped into.
    #[arg(short, long, value_name = "CMD", conflicts_with = "quiet")]
    pub output: Option<String>,

    /// Command run before each timed run; a failure aborts the benchmark.
    #[arg(short = 'r', long = "pre", value_name = "CMD")]
    pub pre: Option<String>,

    /// Suppress the timed command's stdout; repeat to also suppress stderr.
    #[arg(short, long, action = ArgAction::Count)]
    pub quiet: u8,

    /// Upper bound, in seconds, for the random sleep between runs (0 disables).
    #[arg(short, long, default_value_t = 3)]
    pub sleep: u64,

    /// Read the commands to benchmark from a batch file.
    #[arg(
        short,
        long,
        value_name = "FILE",
        conflicts_with_all = ["replace", "input", "output", "pre", "quiet"]
    )]
    pub batch: Option<PathBuf>,

    /// Execute the runs in listed order instead of a randomized order.
    #[arg(long)]
    pub sequential: bool,

    /// Write the raw per-run measurements to a CSV file.
    #[arg(long, value_name = "PATH")]
    pub export_csv: Option<PathBuf>,

    /// Verbose mode, displays debug info. For even more try: -vv.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// The available report renderings.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatStyle {
    /// A /usr/bin/time-like mean-only report; needs exactly one command.
    #[value(name = "liketime")]
    LikeTime,

    /// Mean, stddev, min, median and max for wall, user and system time.
    Normal,

    /// The normal table plus every resource-usage field.
    Rusage,
}
