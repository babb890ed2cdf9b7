//! Plethysmo Core - Valid-interval detection for plethysmography signals
//!
//! This library finds "valid intervals" in a single-channel respiration
//! signal: spans where the normalized signal stays inside an amplitude band
//! for longer than a minimum duration, away from user-marked exclusion
//! zones and far enough from each other. It also derives per-interval
//! statistics (detrended integral and autocorrelation period).
//!
//! The host application supplies the raw samples, the regions, and the
//! parameters; everything here is synchronous and free of I/O apart from
//! the optional config file.

pub mod analysis;
pub mod batch;
pub mod config;
pub mod error;
pub mod interval;
pub mod params;
pub mod recording;
pub mod region;
pub mod signal;

pub use analysis::statistics::IntervalStatistics;
pub use analysis::{ScopeStatistics, ValidIntervals, GLOBAL_SCOPE};
pub use config::EngineConfig;
pub use error::{LoadError, RegionError, SignalError, ValidationError};
pub use interval::Interval;
pub use params::{ParameterSet, ThresholdSource};
pub use recording::Recording;
pub use region::{Region, RegionKind, RegionSet};
pub use signal::SignalStore;

/// Library version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date, set by build.rs
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Default minimum duration of a valid interval (seconds)
pub const DEFAULT_SIGNAL_DURATION: f64 = 5.0;

/// Default minimum separation between valid intervals (seconds)
pub const DEFAULT_SIGNAL_SEPARATION: f64 = 15.0;
