use std::collections::BTreeMap;

use anyhow::Context;
use anyhow::Result;

use crate::bailc;
use crate::measurement::Measurement;

/// The write-once store of measurements, keyed by command and run index.
///
/// Every `(command, run)` slot is filled exactly once by the execution
/// engine; sample sets can only be extracted once all runs of a command
/// have completed. This replaces per-command parallel arrays of times and
/// rusages with a single keyed association.
#[derive(Debug, Clone)]
pub struct SampleStore {
    /// How many commands the store covers.
    num_commands: usize,

    /// How many runs each command accumulates.
    num_runs: usize,

    /// The measurements recorded so far.
    samples: BTreeMap<(usize, usize), Measurement>,
}

impl SampleStore {
    /// A store expecting `num_runs` measurements for each of
    /// `num_commands` commands.
    pub fn new(num_commands: usize, num_runs: usize) -> Self {
        Self {
            num_commands,
            num_runs,
            samples: BTreeMap::new(),
        }
    }

    /// How many runs each command accumulates.
    pub fn num_runs(&self) -> usize {
        self.num_runs
    }

    /// How many commands the store covers.
    pub fn num_commands(&self) -> usize {
        self.num_commands
    }

    /// Record the measurement of one run.
    ///
    /// Each slot can be written exactly once.
    pub fn record(&mut self, command: usize, run: usize, measurement: Measurement) -> Result<()> {
        if command >= self.num_commands || run >= self.num_runs {
            let commands = self.num_commands;
            let runs = self.num_runs;
            bailc!(
                "Measurement slot ({command}, {run}) is out of range", ;
                "The store covers {commands} commands with {runs} runs each", ;
                "",
            );
        }

        if self.samples.contains_key(&(command, run)) {
            bailc!(
                "Run {run} of command {command} was measured twice", ;
                "Every (command, run) pair must be executed exactly once", ;
                "",
            );
        }

        self.samples.insert((command, run), measurement);

        Ok(())
    }

    /// The measurement of one run, if it has been recorded.
    pub fn get(&self, command: usize, run: usize) -> Option<&Measurement> {
        self.samples.get(&(command, run))
    }

    /// Run indices of `command` that have not been measured yet.
    pub fn remaining(&self, command: usize) -> Vec<usize> {
        (0..self.num_runs)
            .filter(|run| !self.samples.contains_key(&(command, *run)))
            .collect()
    }

    /// True once every run of `command` has been measured.
    pub fn is_complete(&self, command: usize) -> bool {
        self.remaining(command).is_empty()
    }

    /// The sample set of `metric` over all runs of `command`.
    ///
    /// Statistics are only meaningful over full sample sets, so this fails
    /// while any run of the command is still missing.
    pub fn metric(&self, command: usize, metric: Metric) -> Result<Vec<f64>> {
        let mut values = Vec::with_capacity(self.num_runs);

        for run in 0..self.num_runs {
            let Some(measurement) = self.samples.get(&(command, run)) else {
                bailc!(
                    "Run {run} of command {command} has not been measured", ;
                    "Sample sets can only be read once all runs completed", ;
                    "",
                );
            };

            values.push(metric.extract(measurement)?);
        }

        Ok(values)
    }
}

/// A single numeric quantity extracted from a [`Measurement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    /// Elapsed wall-clock seconds.
    WallTime,
    /// User CPU seconds.
    UserTime,
    /// System CPU seconds.
    SystemTime,
    /// Maximum resident set size.
    MaxRss,
    /// Soft page faults.
    MinorFaults,
    /// Hard page faults.
    MajorFaults,
    /// Swaps.
    Swaps,
    /// Block input operations.
    BlockReads,
    /// Block output operations.
    BlockWrites,
    /// IPC messages sent.
    MessagesSent,
    /// IPC messages received.
    MessagesReceived,
    /// Signals received.
    Signals,
    /// Voluntary context switches.
    VoluntaryContextSwitches,
    /// Involuntary context switches.
    InvoluntaryContextSwitches,
}

impl Metric {
    /// The integer rusage metrics, in report order.
    pub const RUSAGE: [Metric; 11] = [
        Metric::MaxRss,
        Metric::MinorFaults,
        Metric::MajorFaults,
        Metric::Swaps,
        Metric::BlockReads,
        Metric::BlockWrites,
        Metric::MessagesSent,
        Metric::MessagesReceived,
        Metric::Signals,
        Metric::VoluntaryContextSwitches,
        Metric::InvoluntaryContextSwitches,
    ];

    /// The row label used in reports.
    pub fn name(self) -> &'static str {
        match self {
            Metric::WallTime => "real",
            Metric::UserTime => "user",
            Metric::SystemTime => "sys",
            Metric::MaxRss => "maxrss",
            Metric::MinorFaults => "minflt",
            Metric::MajorFaults => "majflt",
            Metric::Swaps => "nswap",
            Metric::BlockReads => "inblock",
            Metric::BlockWrites => "oublock",
            Metric::MessagesSent => "msgsnd",
            Metric::MessagesReceived => "msgrcv",
            Metric::Signals => "nsignals",
            Metric::VoluntaryContextSwitches => "nvcsw",
            Metric::InvoluntaryContextSwitches => "nivcsw",
        }
    }

    /// Extract this metric from one measurement.
    ///
    /// All metrics except the wall time come from the rusage snapshot,
    /// which not every platform reports.
    pub fn extract(self, measurement: &Measurement) -> Result<f64> {
        if self == Metric::WallTime {
            return Ok(measurement.wall.as_secs_f64());
        }

        let Some(rusage) = measurement.rusage else {
            bailc!(
                "No resource usage was captured for this run", ;
                "The {} metric needs the rusage snapshot", self.name();
                "Resource usage accounting needs a unix target",
            );
        };

        Ok(match self {
            Metric::WallTime => unreachable!(),
            Metric::UserTime => rusage.utime.as_secs_f64(),
            Metric::SystemTime => rusage.stime.as_secs_f64(),
            Metric::MaxRss => rusage.maxrss as f64,
            Metric::MinorFaults => rusage.minflt as f64,
            Metric::MajorFaults => rusage.majflt as f64,
            Metric::Swaps => rusage.nswap as f64,
            Metric::BlockReads => rusage.inblock as f64,
            Metric::BlockWrites => rusage.oublock as f64,
            Metric::MessagesSent => rusage.msgsnd as f64,
            Metric::MessagesReceived => rusage.msgrcv as f64,
            Metric::Signals => rusage.nsignals as f64,
            Metric::VoluntaryContextSwitches => rusage.nvcsw as f64,
            Metric::InvoluntaryContextSwitches => rusage.nivcsw as f64,
        })
    }
}

#[cfg(test)]
#[path = "tests/samples.rs"]
mod tests;
