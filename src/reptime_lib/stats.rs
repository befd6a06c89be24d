use anyhow::Context;
use anyhow::Result;
use serde::Deserialize;
use serde::Serialize;

use crate::bailc;
use crate::critical;

/// Sample sizes below this use Student's t distribution; from here on the
/// normal approximation is used.
pub const SMALL_SAMPLE_LIMIT: usize = 30;

/// An integer confidence percentage in `[1, 99]`.
///
/// Selects a row of the critical-value tables in [`crate::critical`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(try_from = "u8", into = "u8")]
pub struct ConfidenceLevel(u8);

impl ConfidenceLevel {
    /// A validated confidence level.
    pub fn new(percent: u8) -> Result<Self> {
        if !(1..=99).contains(&percent) {
            bailc!(
                "'level' out of range", ;
                "The confidence level is {percent} but has to be in [1, 99]", ;
                "",
            );
        }

        Ok(Self(percent))
    }

    /// The level as an integer percentage.
    pub fn percent(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for ConfidenceLevel {
    type Error = anyhow::Error;

    fn try_from(percent: u8) -> Result<Self> {
        Self::new(percent)
    }
}

impl From<ConfidenceLevel> for u8 {
    fn from(level: ConfidenceLevel) -> u8 {
        level.0
    }
}

/// The arithmetic mean of `values`.
///
/// Defined for sample sizes of at least one.
pub fn mean(values: &[f64]) -> f64 {
    debug_assert!(!values.is_empty());

    values.iter().sum::<f64>() / values.len() as f64
}

/// The population standard deviation of `values`, normalized by `n`.
pub fn std_dev(values: &[f64]) -> f64 {
    let mean = mean(values);
    let spread = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>();

    (spread / values.len() as f64).sqrt()
}

/// The median of `values`, compared by numeric value.
///
/// For even sample sizes this is the average of the two central elements.
pub fn median(values: &[f64]) -> f64 {
    debug_assert!(!values.is_empty());

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    }
}

/// The half-width of the confidence interval around the mean of `values`.
///
/// The true mean lies within `mean ± half-width` at the given confidence
/// level. Samples smaller than [`SMALL_SAMPLE_LIMIT`] use Student's t
/// distribution with `n - 1` degrees of freedom; larger ones the normal
/// approximation. A single-element sample has a zero-width interval.
pub fn confidence_interval(values: &[f64], level: ConfidenceLevel) -> f64 {
    let n = values.len();

    if n < 2 {
        return 0.0;
    }

    let critical = if n < SMALL_SAMPLE_LIMIT {
        critical::t_value(level, n - 1)
    } else {
        critical::z_value(level)
    };

    critical * std_dev(values) / (n as f64).sqrt()
}

/// Summary statistics of one sample set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    /// Arithmetic mean of the samples.
    pub mean: f64,

    /// Half-width of the confidence interval around the mean.
    pub ci: f64,

    /// Population standard deviation.
    pub std_dev: f64,

    /// Smallest sample.
    pub min: f64,

    /// Median sample.
    pub median: f64,

    /// Largest sample.
    pub max: f64,
}

impl Summary {
    /// Summarize a sample set at the given confidence level.
    pub fn of(values: &[f64], level: ConfidenceLevel) -> Result<Self> {
        if values.is_empty() {
            bailc!(
                "Cannot summarize an empty sample set", ;
                "Statistics are defined for at least one sample", ;
                "",
            );
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        Ok(Summary {
            mean: mean(values),
            ci: confidence_interval(values, level),
            std_dev: std_dev(values),
            min: sorted[0],
            median: median(&sorted),
            max: sorted[sorted.len() - 1],
        })
    }
}

#[cfg(test)]
#[path = "tests/stats.rs"]
mod tests;
