//! The architecture of our codebase, shared between the benchmark engine
//! and the CLI.

/// The error handling for `reptime`.
pub mod error;

/// Constant values.
pub mod constants;

/// A command under benchmark and its helper commands.
pub mod command;

/// Parsing of batch files listing multiple commands.
pub mod batch;

/// The immutable settings of one benchmarking session.
pub mod settings;

/// The measured quantities of a single run.
pub mod measurement;

/// The write-once store of per-run measurements.
pub mod samples;

/// Summary statistics over sample sets.
pub mod stats;

/// Critical values of the t and normal distributions.
pub mod critical;
