//! Valid-interval search
//!
//! This module contains the analysis pipeline:
//! - Threshold-scoped run detection ([`segmentation`])
//! - Exclusion and separation filtering ([`filter`])
//! - Per-interval integral and period estimation ([`statistics`])
//!
//! [`search_valid_intervals`] chains the first two over every scope. It is a
//! pure function of its inputs: same signal, regions, and parameters give
//! the same result.

pub mod filter;
pub mod segmentation;
pub mod statistics;

use crate::interval::Interval;
use crate::params::{ParameterSet, ThresholdSource};
use crate::region::{IndexSpan, RegionSet};
use crate::signal::SignalStore;
use filter::IntervalFilter;
use segmentation::{ScanWindow, SegmentationOptions, Segmenter};
use statistics::IntervalStatistics;

/// Scope name used for results in the global-threshold mode
pub const GLOBAL_SCOPE: &str = "signal";

/// Accepted intervals per scope, in scope insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidIntervals {
    entries: Vec<(String, Vec<Interval>)>,
}

impl ValidIntervals {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, name: &str, intervals: Vec<Interval>) {
        self.entries.push((name.to_string(), intervals));
    }

    /// Intervals of one scope
    pub fn get(&self, name: &str) -> Option<&[Interval]> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, intervals)| intervals.as_slice())
    }

    pub(crate) fn remove(&mut self, name: &str) -> Option<Vec<Interval>> {
        let index = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(index).1)
    }

    /// `(scope name, intervals)` in scope insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Interval])> {
        self.entries
            .iter()
            .map(|(n, intervals)| (n.as_str(), intervals.as_slice()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Number of scopes with an entry (possibly empty)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of accepted intervals over all scopes
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, intervals)| intervals.len()).sum()
    }
}

/// Statistics for the intervals of one scope
#[derive(Debug, Clone, PartialEq)]
pub struct ScopeStatistics {
    pub scope: String,
    pub intervals: Vec<IntervalStatistics>,
}

/// Segment and filter every scope
///
/// With [`ThresholdSource::PerRegion`] each scope region is scanned over its
/// own time window and amplitude band. With [`ThresholdSource::Global`] the
/// whole buffer is scanned once with the global band and the result is
/// reported under [`GLOBAL_SCOPE`]. Exclusion regions and the parameter
/// set's exclusion zones are applied to every scope.
pub fn search_valid_intervals(
    store: &SignalStore,
    scopes: &RegionSet,
    exclusions: &RegionSet,
    params: &ParameterSet,
    options: SegmentationOptions,
) -> ValidIntervals {
    let dt = store.dt();
    let len = store.len();
    let samples = store.samples();

    let segmenter = Segmenter::new(dt, params.signal_duration()).with_options(options);
    let filter = IntervalFilter::new(
        dt,
        params.signal_separation(),
        exclusion_spans(exclusions, params, dt, len),
    );

    let mut result = ValidIntervals::new();
    match params.threshold_source() {
        ThresholdSource::PerRegion => {
            for (name, region) in scopes.iter() {
                let span = region.index_span(dt, len);
                let (amin, amax) = region.amplitude_band();
                let window = ScanWindow {
                    lo: span.lo,
                    hi: span.hi,
                    amin,
                    amax,
                };
                let accepted = filter.apply(segmenter.scan(samples, &window));
                tracing::debug!(scope = name, accepted = accepted.len(), "Scope filtered");
                result.push(name, accepted);
            }
        }
        ThresholdSource::Global { min, max } => {
            let window = ScanWindow {
                lo: 0,
                hi: len,
                amin: min,
                amax: max,
            };
            let accepted = filter.apply(segmenter.scan(samples, &window));
            result.push(GLOBAL_SCOPE, accepted);
        }
    }
    result
}

/// Statistics for every accepted interval, grouped by scope
pub fn compute_statistics(store: &SignalStore, intervals: &ValidIntervals) -> Vec<ScopeStatistics> {
    intervals
        .iter()
        .map(|(name, list)| ScopeStatistics {
            scope: name.to_string(),
            intervals: list
                .iter()
                .map(|&interval| {
                    statistics::interval_statistics(store.samples(), store.dt(), interval)
                })
                .collect(),
        })
        .collect()
}

fn exclusion_spans(
    exclusions: &RegionSet,
    params: &ParameterSet,
    dt: f64,
    len: usize,
) -> Vec<IndexSpan> {
    exclusions
        .regions()
        .map(|region| region.index_span(dt, len))
        .chain(
            params
                .exclusion_zones()
                .iter()
                .map(|&(t0, t1)| IndexSpan::from_times(t0, t1, dt, len)),
        )
        .collect()
}
