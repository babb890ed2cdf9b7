//! Exclusion and separation filtering of candidate intervals
//!
//! Two passes, always in this order:
//! 1. drop every candidate touching an exclusion window (no clipping)
//! 2. greedy forward thinning so kept intervals are at least the minimum
//!    separation apart

use crate::interval::Interval;
use crate::region::IndexSpan;

/// Post-segmentation filter for one scope's candidates
#[derive(Debug, Clone)]
pub struct IntervalFilter {
    /// Sampling period in seconds
    dt: f64,
    /// Minimum gap between kept intervals in seconds
    min_separation: f64,
    /// Exclusion windows in sample indices, inclusive on both ends
    exclusions: Vec<IndexSpan>,
}

impl IntervalFilter {
    pub fn new(dt: f64, min_separation: f64, exclusions: Vec<IndexSpan>) -> Self {
        Self {
            dt,
            min_separation,
            exclusions,
        }
    }

    /// Run both passes over ascending candidates
    pub fn apply(&self, candidates: Vec<Interval>) -> Vec<Interval> {
        let surviving = self.remove_excluded(candidates);
        self.enforce_separation(surviving)
    }

    /// Drop candidates overlapping any exclusion window
    pub fn remove_excluded(&self, candidates: Vec<Interval>) -> Vec<Interval> {
        candidates
            .into_iter()
            .filter(|candidate| {
                let hit = self
                    .exclusions
                    .iter()
                    .find(|zone| candidate.end >= zone.lo && candidate.start <= zone.hi);
                if let Some(zone) = hit {
                    tracing::debug!(
                        interval = %candidate,
                        zone_lo = zone.lo,
                        zone_hi = zone.hi,
                        "Interval dropped by exclusion zone"
                    );
                }
                hit.is_none()
            })
            .collect()
    }

    /// Keep the first interval, then each one starting at least
    /// `min_separation` seconds after the end of the last kept one
    ///
    /// Rejected intervals are dropped, not merged; the next candidate is
    /// still measured against the same last kept interval.
    pub fn enforce_separation(&self, intervals: Vec<Interval>) -> Vec<Interval> {
        debug_assert!(
            intervals.windows(2).all(|w| w[0].start <= w[1].start),
            "intervals must be sorted by start"
        );

        let mut kept: Vec<Interval> = Vec::with_capacity(intervals.len());
        for candidate in intervals {
            match kept.last() {
                Some(last) if last.gap_to(&candidate, self.dt) < self.min_separation => {
                    tracing::debug!(
                        interval = %candidate,
                        kept = %last,
                        "Interval dropped, too close to previous"
                    );
                }
                _ => kept.push(candidate),
            }
        }
        kept
    }
}
