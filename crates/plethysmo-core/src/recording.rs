//! One loaded recording and its analysis state
//!
//! A [`Recording`] owns the normalized signal, the named scope and exclusion
//! regions drawn by the user, the current parameters, and the last computed
//! interval set. It is the object a host application talks to.
//!
//! Region and parameter edits take `&mut self`, so they can never overlap
//! with an interval update on the same recording.

use crate::analysis::segmentation::SegmentationOptions;
use crate::analysis::{self, ScopeStatistics, ValidIntervals};
use crate::config::EngineConfig;
use crate::error::{LoadError, RegionError, ValidationError};
use crate::interval::Interval;
use crate::params::ParameterSet;
use crate::region::{Region, RegionSet};
use crate::signal::SignalStore;

/// A recording under analysis
#[derive(Debug, Clone)]
pub struct Recording {
    /// Display name (usually the source file name)
    name: String,
    store: SignalStore,
    params: ParameterSet,
    options: SegmentationOptions,
    /// Default `[fmin, fmax]` for [`Self::filtered_signal`]
    band_pass: [f64; 2],
    scopes: RegionSet,
    exclusions: RegionSet,
    valid_intervals: ValidIntervals,
}

impl Recording {
    /// Normalize a raw sample buffer and seed parameters from `config`
    ///
    /// # Arguments
    /// * `name` - Display name of the recording
    /// * `raw_samples` - Samples supplied by the file reader
    /// * `sample_period` - Seconds between two samples
    /// * `config` - Engine defaults
    ///
    /// # Example
    /// ```
    /// use plethysmo_core::{EngineConfig, Recording, Region};
    ///
    /// let raw: Vec<f64> = (0..100).map(|i| if (20..60).contains(&i) { 0.0 } else { 1.0 }).collect();
    /// let mut config = EngineConfig::default();
    /// config.signal_duration = 1.0;
    ///
    /// let mut recording = Recording::load("demo", &raw, 0.1, &config).unwrap();
    /// recording.add_scope("baseline", Region::scope(0.0, 10.0, -1.0, -0.5)).unwrap();
    ///
    /// let intervals = recording.update_valid_intervals();
    /// assert_eq!(intervals.get("baseline").unwrap().len(), 1);
    /// ```
    pub fn load(
        name: &str,
        raw_samples: &[f64],
        sample_period: f64,
        config: &EngineConfig,
    ) -> Result<Self, LoadError> {
        let store = SignalStore::load(raw_samples, sample_period)?;
        Self::from_store(name, store, config)
    }

    /// Wrap an already normalized store
    pub fn from_store(
        name: &str,
        store: SignalStore,
        config: &EngineConfig,
    ) -> Result<Self, LoadError> {
        let params = config.default_parameters()?;
        tracing::info!(
            recording = name,
            samples = store.len(),
            duration_s = store.duration(),
            "Recording loaded"
        );
        Ok(Self {
            name: name.to_string(),
            store,
            params,
            options: config.segmentation_options(),
            band_pass: config.band_pass,
            scopes: RegionSet::new(),
            exclusions: RegionSet::new(),
            valid_intervals: ValidIntervals::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn store(&self) -> &SignalStore {
        &self.store
    }

    pub fn dt(&self) -> f64 {
        self.store.dt()
    }

    pub fn signal(&self) -> &[f64] {
        self.store.samples()
    }

    pub fn times(&self) -> &[f64] {
        self.store.times()
    }

    pub fn frequencies(&self) -> Vec<f64> {
        self.store.frequencies()
    }

    pub fn spectrum(&self) -> Vec<f64> {
        self.store.spectrum()
    }

    /// Signal band-passed with the configured default band
    pub fn filtered_signal(&self) -> Result<Vec<f64>, ValidationError> {
        let [fmin, fmax] = self.band_pass;
        self.store.band_pass(fmin, fmax)
    }

    /// Signal band-passed to `[fmin, fmax]` Hz
    pub fn band_pass(&self, fmin: f64, fmax: f64) -> Result<Vec<f64>, ValidationError> {
        self.store.band_pass(fmin, fmax)
    }

    /// Times and samples of one interval (zoomed view)
    pub fn zoom(&self, interval: &Interval) -> (&[f64], &[f64]) {
        self.store.window(interval)
    }

    pub fn scopes(&self) -> &RegionSet {
        &self.scopes
    }

    pub fn exclusions(&self) -> &RegionSet {
        &self.exclusions
    }

    /// Register a scope region
    ///
    /// The region is used as a scope whatever its [`crate::RegionKind`] tag.
    ///
    /// # Errors
    /// [`RegionError::DuplicateName`]; the recording is unchanged.
    pub fn add_scope(&mut self, name: &str, region: Region) -> Result<(), RegionError> {
        self.scopes.insert(name, region).inspect_err(|e| {
            tracing::info!(recording = %self.name, error = %e, "Scope not added");
        })
    }

    /// Remove a scope region and the intervals computed for it
    ///
    /// # Errors
    /// [`RegionError::UnknownName`]; the recording is unchanged.
    pub fn remove_scope(&mut self, name: &str) -> Result<Region, RegionError> {
        let region = self.scopes.remove(name).inspect_err(|e| {
            tracing::info!(recording = %self.name, error = %e, "Scope not removed");
        })?;
        self.valid_intervals.remove(name);
        Ok(region)
    }

    /// Register an exclusion region
    ///
    /// # Errors
    /// [`RegionError::DuplicateName`]; the recording is unchanged.
    pub fn add_exclusion(&mut self, name: &str, region: Region) -> Result<(), RegionError> {
        self.exclusions.insert(name, region).inspect_err(|e| {
            tracing::info!(recording = %self.name, error = %e, "Exclusion not added");
        })
    }

    /// Remove an exclusion region
    ///
    /// # Errors
    /// [`RegionError::UnknownName`]; the recording is unchanged.
    pub fn remove_exclusion(&mut self, name: &str) -> Result<Region, RegionError> {
        self.exclusions.remove(name).inspect_err(|e| {
            tracing::info!(recording = %self.name, error = %e, "Exclusion not removed");
        })
    }

    pub fn parameters(&self) -> &ParameterSet {
        &self.params
    }

    /// Replace the parameters with an already validated set
    pub fn set_parameters(&mut self, params: ParameterSet) {
        self.params = params;
    }

    /// Apply text fields from a parameter form
    ///
    /// # Errors
    /// [`ValidationError`] on the first invalid field; the previous
    /// parameters stay in place.
    pub fn apply_parameter_fields<'a, I>(&mut self, fields: I) -> Result<(), ValidationError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        match self.params.apply(fields) {
            Ok(params) => {
                self.params = params;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(recording = %self.name, error = %e, "Parameters rejected, keeping previous values");
                Err(e)
            }
        }
    }

    /// Re-run segmentation and filtering over every scope
    ///
    /// The previous result set is replaced only once the new one is
    /// complete.
    pub fn update_valid_intervals(&mut self) -> &ValidIntervals {
        let updated = analysis::search_valid_intervals(
            &self.store,
            &self.scopes,
            &self.exclusions,
            &self.params,
            self.options,
        );
        tracing::info!(
            recording = %self.name,
            scopes = updated.len(),
            intervals = updated.total(),
            "Valid intervals updated"
        );
        self.valid_intervals = updated;
        &self.valid_intervals
    }

    /// Last computed intervals
    pub fn valid_intervals(&self) -> &ValidIntervals {
        &self.valid_intervals
    }

    /// Forget every computed interval
    pub fn reset_valid_intervals(&mut self) {
        self.valid_intervals = ValidIntervals::new();
    }

    /// Integral and period of every current interval, grouped by scope
    pub fn compute_statistics(&self) -> Vec<ScopeStatistics> {
        analysis::compute_statistics(&self.store, &self.valid_intervals)
    }
}
