//! Step-limit policy for forward and reverse runs.

use std::fmt;

/// Cap on how many migrations a single run may process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepLimit {
    /// Process every candidate
    #[default]
    Unbounded,
    /// Process at most this many migrations
    Count(usize),
}

impl StepLimit {
    /// Build a limit from the `--steps` / `--step` command-line pair.
    ///
    /// The single-step flag always yields exactly one step. Otherwise a
    /// negative count means unbounded and any other count is taken as is.
    pub fn from_args(steps: i64, single: bool) -> Self {
        if single {
            return StepLimit::Count(1);
        }
        match usize::try_from(steps) {
            Ok(n) => StepLimit::Count(n),
            Err(_) => StepLimit::Unbounded,
        }
    }

    /// Number of items out of `available` this limit lets through.
    pub fn cap(&self, available: usize) -> usize {
        match self {
            StepLimit::Unbounded => available,
            StepLimit::Count(n) => available.min(*n),
        }
    }

    /// The first items of `items` allowed by this limit (forward order).
    pub fn head<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[..self.cap(items.len())]
    }

    /// The last items of `items` allowed by this limit (reverse workflow).
    pub fn tail<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[items.len() - self.cap(items.len())..]
    }
}

impl fmt::Display for StepLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepLimit::Unbounded => f.write_str("all"),
            StepLimit::Count(n) => write!(f, "{n}"),
        }
    }
}
