//! E2E tests for valid-interval search
//!
//! Checks the documented scenarios and the invariants every accepted
//! interval set must satisfy, over a grid of parameters.

use plethysmo::analysis::filter::IntervalFilter;
use plethysmo::analysis::segmentation::{ScanWindow, SegmentationOptions, Segmenter};
use plethysmo::analysis::search_valid_intervals;
use plethysmo::region::IndexSpan;
use plethysmo::{Interval, ParameterSet, Region, RegionSet, SignalStore, GLOBAL_SCOPE};
use std::f64::consts::PI;

/// Respiration-like trace with quiet (apnea-like) stretches
fn trace(n: usize, dt: f64) -> Vec<f64> {
    (0..n)
        .map(|i| {
            let t = i as f64 * dt;
            let breathing = (2.0 * PI * 0.3 * t).sin();
            // Slow envelope: amplitude drops close to zero for part of each minute
            let envelope = 0.5 + 0.5 * (2.0 * PI * t / 60.0).cos();
            breathing * envelope + 0.05 * (2.0 * PI * 1.7 * t).sin()
        })
        .collect()
}

fn scopes() -> RegionSet {
    let mut scopes = RegionSet::new();
    scopes
        .insert("quiet", Region::scope(0.0, 1e6, -0.2, 0.2))
        .unwrap();
    scopes
        .insert("first-minutes", Region::scope(10.0, 200.0, -0.35, 0.35))
        .unwrap();
    scopes
}

fn exclusions() -> RegionSet {
    let mut exclusions = RegionSet::new();
    exclusions
        .insert("movement", Region::exclusion(95.0, 110.0))
        .unwrap();
    exclusions
        .insert("cable", Region::exclusion(250.0, 251.0))
        .unwrap();
    exclusions
}

/// Buffer [0,0,0,1,1,1,1,0,0,0] normalizes to -1/+1; the leading low run
/// closes at index 3 and is kept, the trailing one never closes
#[test]
fn test_scenario_leading_run_kept_trailing_run_open() {
    let store = SignalStore::load(&[0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0], 1.0)
        .unwrap();
    let mut scopes = RegionSet::new();
    scopes
        .insert("low", Region::scope(0.0, 10.0, -1.0, -0.5))
        .unwrap();
    let params = ParameterSet::new(2.0, 0.0).unwrap();

    let result = search_valid_intervals(
        &store,
        &scopes,
        &RegionSet::new(),
        &params,
        SegmentationOptions::default(),
    );
    assert_eq!(result.get("low").unwrap(), &[Interval::new(0, 3)]);

    // A mid-level band sees nothing: samples are exactly -1 or +1
    let mut mid = RegionSet::new();
    mid.insert("mid", Region::scope(0.0, 10.0, -0.5, 0.5)).unwrap();
    let result = search_valid_intervals(
        &store,
        &mid,
        &RegionSet::new(),
        &params,
        SegmentationOptions::default(),
    );
    assert!(result.get("mid").unwrap().is_empty());
}

/// Close successor is dropped, not merged
#[test]
fn test_scenario_separation_drop() {
    let filter = IntervalFilter::new(1.0, 10.0, Vec::new());
    let kept = filter.apply(vec![Interval::new(0, 5), Interval::new(6, 20)]);
    assert_eq!(kept, vec![Interval::new(0, 5)]);
}

/// Partial overlap with an exclusion zone rejects the whole candidate
#[test]
fn test_scenario_exclusion_drop() {
    let filter = IntervalFilter::new(1.0, 0.0, vec![IndexSpan { lo: 15, hi: 25 }]);
    assert!(filter.apply(vec![Interval::new(10, 20)]).is_empty());
}

/// Every accepted interval satisfies duration, separation, and exclusion
/// invariants, for a grid of parameters and both boundary policies
#[test]
fn test_accepted_interval_invariants() {
    let dt = 0.04; // 25 Hz
    let store = SignalStore::load(&trace(25 * 600, dt), dt).unwrap();
    let exclusions = exclusions();
    let spans: Vec<IndexSpan> = exclusions
        .regions()
        .map(|r| r.index_span(dt, store.len()))
        .collect();

    let mut checked = 0;
    for duration in [0.5, 2.0, 5.0] {
        for separation in [0.0, 3.0, 15.0] {
            for keep_open_runs in [false, true] {
                let params = ParameterSet::new(duration, separation).unwrap();
                let result = search_valid_intervals(
                    &store,
                    &scopes(),
                    &exclusions,
                    &params,
                    SegmentationOptions { keep_open_runs },
                );

                for (scope, intervals) in result.iter() {
                    for interval in intervals {
                        assert!(
                            interval.duration(dt) > duration,
                            "{} in '{}' lasts {} s, not > {} s",
                            interval,
                            scope,
                            interval.duration(dt),
                            duration
                        );
                        for zone in &spans {
                            assert!(
                                interval.end < zone.lo || interval.start > zone.hi,
                                "{} in '{}' touches exclusion [{}, {}]",
                                interval,
                                scope,
                                zone.lo,
                                zone.hi
                            );
                        }
                        checked += 1;
                    }
                    for pair in intervals.windows(2) {
                        assert!(
                            pair[0].gap_to(&pair[1], dt) >= separation,
                            "{} and {} in '{}' closer than {} s",
                            pair[0],
                            pair[1],
                            scope,
                            separation
                        );
                    }
                }
            }
        }
    }
    assert!(checked > 0, "parameter grid produced no intervals at all");
}

/// Accepted intervals lie inside their scope's amplitude band
#[test]
fn test_intervals_stay_in_band() {
    let dt = 0.04;
    let store = SignalStore::load(&trace(25 * 300, dt), dt).unwrap();
    let params = ParameterSet::new(1.0, 0.0).unwrap();
    let scopes = scopes();
    let result = search_valid_intervals(
        &store,
        &scopes,
        &RegionSet::new(),
        &params,
        SegmentationOptions::default(),
    );

    for (scope, intervals) in result.iter() {
        let (amin, amax) = scopes.get(scope).unwrap().amplitude_band();
        for interval in intervals {
            let (_, samples) = store.window(interval);
            assert!(
                samples.iter().all(|&s| s >= amin && s <= amax),
                "{} in '{}' leaves the band",
                interval,
                scope
            );
        }
    }
}

/// Re-running the search on unchanged inputs gives identical results
#[test]
fn test_search_is_idempotent() {
    let dt = 0.04;
    let store = SignalStore::load(&trace(25 * 300, dt), dt).unwrap();
    let params = ParameterSet::new(2.0, 5.0)
        .unwrap()
        .with_exclusion_zones(vec![(30.0, 35.0)]);

    let first = search_valid_intervals(
        &store,
        &scopes(),
        &exclusions(),
        &params,
        SegmentationOptions::default(),
    );
    let second = search_valid_intervals(
        &store,
        &scopes(),
        &exclusions(),
        &params,
        SegmentationOptions::default(),
    );
    assert_eq!(first, second);
}

/// The global variant reports one list for the whole signal
#[test]
fn test_global_threshold_variant() {
    let dt = 0.04;
    let store = SignalStore::load(&trace(25 * 300, dt), dt).unwrap();
    let params = ParameterSet::new(2.0, 0.0)
        .unwrap()
        .with_global_thresholds(-0.2, 0.2)
        .unwrap();

    let result = search_valid_intervals(
        &store,
        &scopes(),
        &RegionSet::new(),
        &params,
        SegmentationOptions::default(),
    );
    let names: Vec<&str> = result.names().collect();
    assert_eq!(names, vec![GLOBAL_SCOPE]);

    // Same band as the full-length "quiet" scope, scanned over [0, len)
    let mut quiet = RegionSet::new();
    quiet
        .insert("quiet", Region::scope(0.0, 1e6, -0.2, 0.2))
        .unwrap();
    let per_region = search_valid_intervals(
        &store,
        &quiet,
        &RegionSet::new(),
        &params.clone().with_region_thresholds(),
        SegmentationOptions::default(),
    );
    let global = result.get(GLOBAL_SCOPE).unwrap();
    let scoped = per_region.get("quiet").unwrap();
    // Only a run reaching the very last sample can differ
    assert!(global.len() >= scoped.len());
    assert_eq!(&global[..scoped.len()], scoped);
}

/// Segmentation emits disjoint, ordered candidates in one pass
#[test]
fn test_candidates_disjoint_and_ordered() {
    let dt = 0.04;
    let store = SignalStore::load(&trace(25 * 120, dt), dt).unwrap();
    let window = ScanWindow {
        lo: 0,
        hi: store.len(),
        amin: -0.3,
        amax: 0.3,
    };
    let candidates = Segmenter::new(dt, 0.2).scan(store.samples(), &window);
    assert!(!candidates.is_empty());
    for pair in candidates.windows(2) {
        assert!(pair[0].end < pair[1].start);
    }
}
