//! Two-tailed critical values of Student's t distribution and of the
//! standard normal distribution.
//!
//! The tables are reference data, generated once by `build.rs` and included
//! here as static arrays; the lookups below never compute a value. Row
//! `level - 1` corresponds to a confidence level of `level` percent and,
//! for the t table, column `df - 1` to `df` degrees of freedom.

use crate::stats::ConfidenceLevel;

include!(concat!(env!("OUT_DIR"), "/critical_values.rs"));

/// Degrees of freedom covered by the t table.
pub const MAX_DF: usize = 29;

/// The two-tailed t critical value for `level` percent confidence at `df`
/// degrees of freedom.
///
/// # Panics
///
/// Panics when `df` is outside `1..=MAX_DF`; larger samples must use
/// [`z_value`].
pub fn t_value(level: ConfidenceLevel, df: usize) -> f64 {
    assert!(
        (1..=MAX_DF).contains(&df),
        "the t table covers 1 to {MAX_DF} degrees of freedom, got {df}"
    );

    T_CRITICAL[usize::from(level.percent()) - 1][df - 1]
}

/// The two-tailed Z critical value for `level` percent confidence.
pub fn z_value(level: ConfidenceLevel) -> f64 {
    Z_CRITICAL[usize::from(level.percent()) - 1]
}

#[cfg(test)]
#[path = "tests/critical.rs"]
mod tests;
