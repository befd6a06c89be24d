/// Definitions of the command line arguments.
pub mod def;

/// Styling of the log output.
pub mod log;

/// Printing helpers for the terminal.
pub mod printing;

/// Processing of the parsed command line.
pub mod process;
