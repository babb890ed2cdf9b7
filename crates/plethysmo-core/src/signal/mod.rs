//! Signal storage and spectral processing
//!
//! - Normalized sample buffer with time/frequency axes ([`store`])
//! - FFT, detrending, and autocorrelation helpers ([`spectral`])

pub mod spectral;
pub mod store;

pub use store::SignalStore;
