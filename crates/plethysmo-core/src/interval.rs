//! Half-open sample-index intervals

use serde::{Deserialize, Serialize};
use std::fmt;

/// A `[start, end)` span of sample indices
///
/// Produced by segmentation, read-only afterwards. Always satisfies
/// `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub start: usize,
    pub end: usize,
}

impl Interval {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start < end, "interval [{start}, {end}) is empty");
        Self { start, end }
    }

    /// Number of samples covered
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Length in seconds for a sampling period `dt`
    pub fn duration(&self, dt: f64) -> f64 {
        self.len() as f64 * dt
    }

    /// Time gap in seconds between the end of `self` and the start of `next`
    ///
    /// Negative when `next` starts before `self` ends.
    pub fn gap_to(&self, next: &Interval, dt: f64) -> f64 {
        (next.start as f64 - self.end as f64) * dt
    }

    /// `[start·dt, end·dt]` in seconds, as displayed by interval lists
    pub fn to_seconds(&self, dt: f64) -> (f64, f64) {
        (self.start as f64 * dt, self.end as f64 * dt)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}
