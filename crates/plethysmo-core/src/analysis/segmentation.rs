//! Threshold-scoped segmentation
//!
//! Finds runs of consecutive samples that stay inside an amplitude band for
//! longer than a minimum duration. One forward pass per scope: each sample
//! is visited at most once.

use crate::interval::Interval;

/// Where and under which amplitude band to search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanWindow {
    /// First sample index scanned
    pub lo: usize,
    /// One past the last sample index scanned
    pub hi: usize,
    /// Lower amplitude bound (inclusive)
    pub amin: f64,
    /// Upper amplitude bound (inclusive)
    pub amax: f64,
}

impl ScanWindow {
    fn contains(&self, sample: f64) -> bool {
        sample >= self.amin && sample <= self.amax
    }
}

/// Behaviour switches for [`Segmenter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SegmentationOptions {
    /// Keep a run that is still in band when the window ends, closing it at
    /// the window end. Off by default: only runs that leave the band count.
    pub keep_open_runs: bool,
}

/// Run detector for one recording
///
/// # Example
/// ```
/// use plethysmo_core::analysis::segmentation::{ScanWindow, Segmenter};
/// use plethysmo_core::Interval;
///
/// let samples = [-1.0, -1.0, -1.0, 1.0, 1.0, 1.0, 1.0, -1.0, -1.0, -1.0];
/// let segmenter = Segmenter::new(1.0, 2.0);
/// let window = ScanWindow { lo: 0, hi: 9, amin: -1.0, amax: -0.5 };
///
/// // [7, 9) is still in band at the window end and is dropped
/// assert_eq!(segmenter.scan(&samples, &window), vec![Interval::new(0, 3)]);
/// ```
#[derive(Debug, Clone)]
pub struct Segmenter {
    /// Sampling period in seconds
    dt: f64,
    /// Runs must last strictly longer than this (seconds)
    min_duration: f64,
    options: SegmentationOptions,
}

impl Segmenter {
    pub fn new(dt: f64, min_duration: f64) -> Self {
        Self {
            dt,
            min_duration,
            options: SegmentationOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SegmentationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> SegmentationOptions {
        self.options
    }

    /// Candidate intervals inside `window`, in ascending order
    ///
    /// The window end is clamped to `samples.len()`. An empty window yields
    /// no candidates.
    pub fn scan(&self, samples: &[f64], window: &ScanWindow) -> Vec<Interval> {
        let hi = window.hi.min(samples.len());
        let mut candidates = Vec::new();
        let mut outer = window.lo;

        while outer < hi {
            if !window.contains(samples[outer]) {
                outer += 1;
                continue;
            }

            let start = outer;
            let mut inner = start;
            while inner < hi && window.contains(samples[inner]) {
                inner += 1;
            }

            let closed = inner < hi;
            if (closed || self.options.keep_open_runs) && self.is_long_enough(start, inner) {
                candidates.push(Interval::new(start, inner));
            }

            // samples[inner] is out of band (or the window is exhausted)
            outer = inner;
        }

        tracing::debug!(
            lo = window.lo,
            hi,
            amin = window.amin,
            amax = window.amax,
            candidates = candidates.len(),
            "Scope scanned"
        );

        candidates
    }

    fn is_long_enough(&self, start: usize, stop: usize) -> bool {
        (stop - start) as f64 * self.dt > self.min_duration
    }
}
