//! The main CLI entry-point of the `reptime` utility.

/// The command line interface and relevant structures.
pub mod cli;

/// The execution engine: scheduling and measuring runs.
pub mod run;

/// Rendering of benchmark reports and raw exports.
pub mod report;

/// This function parses command-line arguments, executes the benchmark
/// and renders the report.
fn main() {
    cli::process::parse_command();
}
