//! Error taxonomy for the analysis engine
//!
//! Loading a signal can fail fatally ([`SignalError`]). Parameter and region
//! edits are recoverable: the caller gets an error, the previous state is
//! kept. Segmentation, filtering, and statistics never fail once their
//! inputs have been accepted.

use thiserror::Error;

/// Errors raised while building a [`crate::SignalStore`]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SignalError {
    #[error("Invalid signal: {0}")]
    InvalidSignal(String),

    #[error("Degenerate signal: all {len} samples equal {value}, cannot normalize")]
    DegenerateSignal { len: usize, value: f64 },
}

/// Errors raised when a parameter field is rejected at the boundary
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Field '{field}' is not a number: '{value}'")]
    NotANumber { field: String, value: String },

    #[error("Field '{field}' must be finite, got {value}")]
    NotFinite { field: String, value: f64 },

    #[error("Signal duration must be > 0 s, got {0}")]
    NonPositiveDuration(f64),

    #[error("Signal separation must be >= 0 s, got {0}")]
    NegativeSeparation(f64),

    #[error("Field '{0}' is required")]
    MissingField(String),

    #[error("Threshold min ({min}) must be lower than threshold max ({max})")]
    ThresholdOrder { min: f64, max: f64 },

    #[error("Invalid frequency band [{fmin}, {fmax}] Hz")]
    InvalidFrequencyBand { fmin: f64, fmax: f64 },
}

/// Errors raised by named region collections
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegionError {
    #[error("A region named '{0}' already exists")]
    DuplicateName(String),

    #[error("No region named '{0}'")]
    UnknownName(String),
}

/// Errors raised while opening a [`crate::Recording`]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoadError {
    #[error(transparent)]
    Signal(#[from] SignalError),

    #[error("Invalid default parameters: {0}")]
    Parameters(#[from] ValidationError),
}
