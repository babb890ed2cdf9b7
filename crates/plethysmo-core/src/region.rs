//! Rectangular (time, amplitude) regions and their named collections
//!
//! A region is used either as a *scope* (time window plus amplitude band to
//! search within) or as an *exclusion* (time window only). Collections keep
//! insertion order so results iterate deterministically.

use crate::error::RegionError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a region takes part in the interval search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegionKind {
    /// Time window and amplitude band to search within
    Scope,
    /// Time window whose overlapping candidates are discarded
    Exclusion,
}

/// An inclusive span of sample indices `[lo, hi]`
///
/// Scopes read it as the scan window `[lo, hi)`; exclusions test overlap
/// against both ends inclusively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexSpan {
    pub lo: usize,
    pub hi: usize,
}

impl IndexSpan {
    /// Convert a `[t0, t1]` time window to indices for a buffer of `len` samples
    ///
    /// Times are truncated towards zero, then clamped to `[0, len - 1]`.
    pub fn from_times(t0: f64, t1: f64, dt: f64, len: usize) -> Self {
        let last = len.saturating_sub(1);
        Self {
            lo: time_to_index(t0, dt).min(last),
            hi: time_to_index(t1, dt).min(last),
        }
    }
}

fn time_to_index(t: f64, dt: f64) -> usize {
    let index = (t / dt).trunc();
    if index.is_nan() || index <= 0.0 {
        0
    } else {
        // saturating float-to-int cast
        index as usize
    }
}

/// A rectangle in (time, amplitude) space
///
/// Corners are reordered at construction so that `t0 <= t1` and
/// `a0 <= a1` always hold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    kind: RegionKind,
    /// Lower corner `(t0, a0)`
    lower: (f64, f64),
    /// Upper corner `(t1, a1)`
    upper: (f64, f64),
}

impl Region {
    /// Create a region from any two opposite corners
    pub fn new(kind: RegionKind, corner_a: (f64, f64), corner_b: (f64, f64)) -> Self {
        let (t0, t1) = ordered(corner_a.0, corner_b.0);
        let (a0, a1) = ordered(corner_a.1, corner_b.1);
        Self {
            kind,
            lower: (t0, a0),
            upper: (t1, a1),
        }
    }

    /// Scope covering `[t0, t1]` seconds with amplitude band `[a0, a1]`
    pub fn scope(t0: f64, t1: f64, a0: f64, a1: f64) -> Self {
        Self::new(RegionKind::Scope, (t0, a0), (t1, a1))
    }

    /// Exclusion zone covering `[t0, t1]` seconds
    ///
    /// The amplitude extent spans the whole normalized range; it is never
    /// consulted.
    pub fn exclusion(t0: f64, t1: f64) -> Self {
        Self::new(RegionKind::Exclusion, (t0, -1.0), (t1, 1.0))
    }

    pub fn kind(&self) -> RegionKind {
        self.kind
    }

    pub fn lower_corner(&self) -> (f64, f64) {
        self.lower
    }

    pub fn upper_corner(&self) -> (f64, f64) {
        self.upper
    }

    /// Time window `(t0, t1)` in seconds
    pub fn time_window(&self) -> (f64, f64) {
        (self.lower.0, self.upper.0)
    }

    /// Amplitude band `(a0, a1)`
    pub fn amplitude_band(&self) -> (f64, f64) {
        (self.lower.1, self.upper.1)
    }

    /// Time window in sample indices for a buffer of `len` samples
    pub fn index_span(&self, dt: f64, len: usize) -> IndexSpan {
        IndexSpan::from_times(self.lower.0, self.upper.0, dt, len)
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if b < a {
        (b, a)
    } else {
        (a, b)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "from ({:.6},{:.6}) to ({:.6},{:.6})",
            self.lower.0, self.lower.1, self.upper.0, self.upper.1
        )
    }
}

/// Insertion-ordered collection of named regions
#[derive(Debug, Clone, Default)]
pub struct RegionSet {
    entries: Vec<(String, Region)>,
}

impl RegionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a region under a new name
    ///
    /// # Errors
    /// [`RegionError::DuplicateName`] if `name` is taken; the set is unchanged.
    pub fn insert(&mut self, name: &str, region: Region) -> Result<(), RegionError> {
        if self.contains(name) {
            return Err(RegionError::DuplicateName(name.to_string()));
        }
        self.entries.push((name.to_string(), region));
        Ok(())
    }

    /// Remove a region, preserving the order of the others
    ///
    /// # Errors
    /// [`RegionError::UnknownName`] if no region has that name.
    pub fn remove(&mut self, name: &str) -> Result<Region, RegionError> {
        let index = self
            .entries
            .iter()
            .position(|(n, _)| n == name)
            .ok_or_else(|| RegionError::UnknownName(name.to_string()))?;
        Ok(self.entries.remove(index).1)
    }

    pub fn get(&self, name: &str) -> Option<&Region> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, r)| r)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// `(name, region)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Region)> {
        self.entries.iter().map(|(n, r)| (n.as_str(), r))
    }

    /// Regions in insertion order
    pub fn regions(&self) -> impl Iterator<Item = &Region> {
        self.entries.iter().map(|(_, r)| r)
    }
}
