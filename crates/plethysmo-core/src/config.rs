//! Engine defaults
//!
//! Seeds the parameters of newly loaded recordings and the behaviour
//! switches of the engine. Optionally read from / written to a JSON file;
//! analysis results are never persisted.

use crate::analysis::segmentation::SegmentationOptions;
use crate::error::ValidationError;
use crate::params::ParameterSet;
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_signal_duration() -> f64 {
    crate::DEFAULT_SIGNAL_DURATION
}

fn default_signal_separation() -> f64 {
    crate::DEFAULT_SIGNAL_SEPARATION
}

fn default_band_pass() -> [f64; 2] {
    [2.0, 6.0]
}

/// Engine configuration passed explicitly to every recording
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Minimum interval duration for new recordings (seconds)
    #[serde(default = "default_signal_duration")]
    pub signal_duration: f64,
    /// Minimum separation between intervals for new recordings (seconds)
    #[serde(default = "default_signal_separation")]
    pub signal_separation: f64,
    /// Keep runs still in band at the end of a scope window
    #[serde(default)]
    pub keep_open_runs: bool,
    /// Default `[fmin, fmax]` band for the filtered view (Hz)
    #[serde(default = "default_band_pass")]
    pub band_pass: [f64; 2],
    /// Batch worker threads (0 = one per available CPU)
    #[serde(default)]
    pub workers: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            signal_duration: default_signal_duration(),
            signal_separation: default_signal_separation(),
            keep_open_runs: false,
            band_pass: default_band_pass(),
            workers: 0,
        }
    }
}

impl EngineConfig {
    /// Load config from disk, falling back to defaults on any error
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    tracing::info!(path = %path.display(), "Loaded engine config from disk");
                    config
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to parse engine config, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                tracing::info!(path = %path.display(), "No engine config found, using defaults");
                Self::default()
            }
        }
    }

    /// Save config to disk, creating parent directories if needed
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        tracing::info!(path = %path.display(), "Engine config saved to disk");
        Ok(())
    }

    /// Parameters for a freshly loaded recording (per-region thresholds)
    ///
    /// # Errors
    /// [`ValidationError`] if the configured duration or separation is out
    /// of range (e.g. a hand-edited config file).
    pub fn default_parameters(&self) -> Result<ParameterSet, ValidationError> {
        ParameterSet::new(self.signal_duration, self.signal_separation)
    }

    pub fn segmentation_options(&self) -> SegmentationOptions {
        SegmentationOptions {
            keep_open_runs: self.keep_open_runs,
        }
    }

    /// Effective number of batch workers
    pub fn worker_count(&self) -> usize {
        if self.workers > 0 {
            self.workers
        } else {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        }
    }
}
