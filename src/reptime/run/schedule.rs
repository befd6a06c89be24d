use rand::Rng;

/// The order in which the (command, run) matrix is executed.
///
/// The randomized order repeatedly picks a uniformly random command that
/// still has runs left, then a uniformly random remaining run index for it.
/// Interleaving the commands this way keeps thermal, cache and OS-scheduler
/// drift from correlating with any single command or with its position in
/// the session. The sequential order executes command 0 run 0..n, command 1
/// run 0..n, and so on.
///
/// Every pair is yielded exactly once.
#[derive(Debug)]
pub struct Schedule<R: Rng> {
    rng: R,
    sequential: bool,

    /// Remaining run indices, per command.
    remaining: Vec<Vec<usize>>,

    /// Commands that still have runs left, as indices into `remaining`.
    unfinished: Vec<usize>,
}

impl<R: Rng> Schedule<R> {
    /// A schedule over `num_commands * num_runs` pairs.
    pub fn new(num_commands: usize, num_runs: usize, sequential: bool, rng: R) -> Self {
        let unfinished = if num_runs == 0 {
            Vec::new()
        } else {
            (0..num_commands).collect()
        };

        Self {
            rng,
            sequential,
            remaining: (0..num_commands).map(|_| (0..num_runs).collect()).collect(),
            unfinished,
        }
    }
}

impl<R: Rng> Iterator for Schedule<R> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<(usize, usize)> {
        if self.unfinished.is_empty() {
            return None;
        }

        let slot = if self.sequential {
            0
        } else {
            self.rng.random_range(0..self.unfinished.len())
        };
        let command = self.unfinished[slot];

        let runs = &mut self.remaining[command];
        let pick = if self.sequential {
            0
        } else {
            self.rng.random_range(0..runs.len())
        };
        let run = runs.remove(pick);

        if runs.is_empty() {
            self.unfinished.remove(slot);
        }

        Some((command, run))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.remaining.iter().map(Vec::len).sum();
        (left, Some(left))
    }
}

#[cfg(test)]
#[path = "tests/schedule.rs"]
mod tests;
