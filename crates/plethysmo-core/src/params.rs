//! Interval-search parameters
//!
//! [`ParameterSet`] is a validated value object: every constructor and
//! [`ParameterSet::apply`] check their inputs and return a new set, so a
//! rejected edit never disturbs the parameters already in use.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Field name for the minimum interval duration (seconds)
pub const DURATION_FIELD: &str = "signal duration";
/// Field name for the minimum separation between intervals (seconds)
pub const SEPARATION_FIELD: &str = "signal separation";
/// Field name for the global lower amplitude threshold
pub const THRESHOLD_MIN_FIELD: &str = "threshold min";
/// Field name for the global upper amplitude threshold
pub const THRESHOLD_MAX_FIELD: &str = "threshold max";
/// Field name for exclusion zones written as `start:end` pairs (seconds)
pub const EXCLUDED_ZONES_FIELD: &str = "excluded zones";

/// Where the amplitude band used by segmentation comes from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum ThresholdSource {
    /// Each scope region carries its own band; one result list per scope
    #[default]
    PerRegion,
    /// One band applied to the whole signal; a single result list
    Global { min: f64, max: f64 },
}

/// Validated interval-search configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    /// Minimum interval duration in seconds (strictly exceeded)
    signal_duration: f64,
    /// Minimum gap between kept intervals in seconds
    signal_separation: f64,
    threshold_source: ThresholdSource,
    /// Extra exclusion windows `(t0, t1)` in seconds, from the text field
    exclusion_zones: Vec<(f64, f64)>,
}

impl ParameterSet {
    /// Per-region thresholds with the given duration and separation
    ///
    /// # Errors
    /// [`ValidationError`] if `signal_duration <= 0`, `signal_separation < 0`,
    /// or either value is not finite.
    pub fn new(signal_duration: f64, signal_separation: f64) -> Result<Self, ValidationError> {
        let signal_duration = check_finite(DURATION_FIELD, signal_duration)?;
        let signal_separation = check_finite(SEPARATION_FIELD, signal_separation)?;
        if signal_duration <= 0.0 {
            return Err(ValidationError::NonPositiveDuration(signal_duration));
        }
        if signal_separation < 0.0 {
            return Err(ValidationError::NegativeSeparation(signal_separation));
        }
        Ok(Self {
            signal_duration,
            signal_separation,
            threshold_source: ThresholdSource::PerRegion,
            exclusion_zones: Vec::new(),
        })
    }

    /// Switch to one global amplitude band for the whole signal
    ///
    /// # Errors
    /// [`ValidationError::ThresholdOrder`] unless `min < max`.
    pub fn with_global_thresholds(mut self, min: f64, max: f64) -> Result<Self, ValidationError> {
        let min = check_finite(THRESHOLD_MIN_FIELD, min)?;
        let max = check_finite(THRESHOLD_MAX_FIELD, max)?;
        if min >= max {
            return Err(ValidationError::ThresholdOrder { min, max });
        }
        self.threshold_source = ThresholdSource::Global { min, max };
        Ok(self)
    }

    /// Go back to per-region thresholds
    pub fn with_region_thresholds(mut self) -> Self {
        self.threshold_source = ThresholdSource::PerRegion;
        self
    }

    /// Replace the text-encoded exclusion zones
    ///
    /// Zones are `(t0, t1)` pairs in seconds; each pair is reordered so that
    /// `t0 <= t1`. Non-finite pairs are dropped.
    pub fn with_exclusion_zones(mut self, zones: Vec<(f64, f64)>) -> Self {
        self.exclusion_zones = zones
            .into_iter()
            .filter(|(a, b)| a.is_finite() && b.is_finite())
            .map(|(a, b)| if b < a { (b, a) } else { (a, b) })
            .collect();
        self
    }

    pub fn signal_duration(&self) -> f64 {
        self.signal_duration
    }

    pub fn signal_separation(&self) -> f64 {
        self.signal_separation
    }

    pub fn threshold_source(&self) -> ThresholdSource {
        self.threshold_source
    }

    pub fn exclusion_zones(&self) -> &[(f64, f64)] {
        &self.exclusion_zones
    }

    /// Ordered `name → value` view, as shown by a parameter form
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            (DURATION_FIELD, self.signal_duration.to_string()),
            (SEPARATION_FIELD, self.signal_separation.to_string()),
        ];
        if let ThresholdSource::Global { min, max } = self.threshold_source {
            fields.push((THRESHOLD_MIN_FIELD, min.to_string()));
            fields.push((THRESHOLD_MAX_FIELD, max.to_string()));
        }
        if !self.exclusion_zones.is_empty() {
            let zones: Vec<String> = self
                .exclusion_zones
                .iter()
                .map(|(a, b)| format!("{}:{}", a, b))
                .collect();
            fields.push((EXCLUDED_ZONES_FIELD, zones.join(", ")));
        }
        fields
    }

    /// Build a new set from text fields, defaulting missing fields to `self`
    ///
    /// Numeric fields must parse to finite numbers. Thresholds switch the set
    /// to [`ThresholdSource::Global`]; when only one of them is given the
    /// other is taken from the current global band. Unknown field names are
    /// ignored. Malformed exclusion-zone entries are skipped, not rejected.
    ///
    /// # Errors
    /// [`ValidationError`] on the first invalid field; `self` is untouched.
    ///
    /// # Example
    /// ```
    /// use plethysmo_core::params::ParameterSet;
    ///
    /// let defaults = ParameterSet::new(5.0, 15.0).unwrap();
    /// let updated = defaults
    ///     .apply([("signal duration", "2.5"), ("excluded zones", "10:20, oops")])
    ///     .unwrap();
    /// assert_eq!(updated.signal_duration(), 2.5);
    /// assert_eq!(updated.signal_separation(), 15.0);
    /// assert_eq!(updated.exclusion_zones(), &[(10.0, 20.0)]);
    ///
    /// assert!(defaults.apply([("signal separation", "abc")]).is_err());
    /// ```
    pub fn apply<'a, I>(&self, fields: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut duration = self.signal_duration;
        let mut separation = self.signal_separation;
        let mut threshold_min = None;
        let mut threshold_max = None;
        let mut zones = None;

        for (name, value) in fields {
            match name.trim() {
                DURATION_FIELD => duration = parse_number(DURATION_FIELD, value)?,
                SEPARATION_FIELD => separation = parse_number(SEPARATION_FIELD, value)?,
                THRESHOLD_MIN_FIELD => {
                    threshold_min = Some(parse_number(THRESHOLD_MIN_FIELD, value)?)
                }
                THRESHOLD_MAX_FIELD => {
                    threshold_max = Some(parse_number(THRESHOLD_MAX_FIELD, value)?)
                }
                EXCLUDED_ZONES_FIELD => zones = Some(parse_exclusion_zones(value)),
                other => tracing::debug!(field = other, "Ignoring unknown parameter field"),
            }
        }

        let mut updated = Self::new(duration, separation)?;
        updated.threshold_source = self.threshold_source;
        updated.exclusion_zones = self.exclusion_zones.clone();

        if threshold_min.is_some() || threshold_max.is_some() {
            let (current_min, current_max) = match self.threshold_source {
                ThresholdSource::Global { min, max } => (Some(min), Some(max)),
                ThresholdSource::PerRegion => (None, None),
            };
            let min = threshold_min
                .or(current_min)
                .ok_or_else(|| ValidationError::MissingField(THRESHOLD_MIN_FIELD.to_string()))?;
            let max = threshold_max
                .or(current_max)
                .ok_or_else(|| ValidationError::MissingField(THRESHOLD_MAX_FIELD.to_string()))?;
            updated = updated.with_global_thresholds(min, max)?;
        }
        if let Some(zones) = zones {
            updated = updated.with_exclusion_zones(zones);
        }

        Ok(updated)
    }
}

fn check_finite(field: &str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NotFinite {
            field: field.to_string(),
            value,
        })
    }
}

fn parse_number(field: &str, value: &str) -> Result<f64, ValidationError> {
    let parsed: f64 = value
        .trim()
        .parse()
        .map_err(|_| ValidationError::NotANumber {
            field: field.to_string(),
            value: value.to_string(),
        })?;
    check_finite(field, parsed)
}

/// Parse `start:end` pairs (seconds) separated by commas, semicolons, or newlines
///
/// Whitespace around numbers is allowed. Entries that do not match are
/// skipped with a debug log.
pub fn parse_exclusion_zones(text: &str) -> Vec<(f64, f64)> {
    let mut zones = Vec::new();
    for entry in text.split([',', ';', '\n']) {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        match parse_zone(entry) {
            Some(zone) => zones.push(zone),
            None => tracing::debug!(entry, "Skipping malformed exclusion zone"),
        }
    }
    zones
}

fn parse_zone(entry: &str) -> Option<(f64, f64)> {
    let (start, end) = entry.split_once(':')?;
    let start: f64 = start.trim().parse().ok()?;
    let end: f64 = end.trim().parse().ok()?;
    if !(start.is_finite() && end.is_finite()) {
        return None;
    }
    Some(if end < start { (end, start) } else { (start, end) })
}
