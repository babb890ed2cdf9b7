//! Plethysmo - valid-interval search for plethysmography recordings
//!
//! This library re-exports the analysis engine from `plethysmo-core` and
//! provides the logging bootstrap used by host applications.

pub use plethysmo_core::{analysis, batch, config, error, interval, params, recording, region, signal};

pub use plethysmo_core::{
    EngineConfig, Interval, IntervalStatistics, LoadError, ParameterSet, Recording, Region,
    RegionError, RegionKind, RegionSet, ScopeStatistics, SignalError, SignalStore,
    ThresholdSource, ValidIntervals, ValidationError, GLOBAL_SCOPE,
};
pub use plethysmo_core::{DEFAULT_SIGNAL_DURATION, DEFAULT_SIGNAL_SEPARATION, VERSION};

/// Install a `tracing` subscriber for the host process
///
/// Honors `RUST_LOG`, with `plethysmo=info` added by default. Returns an
/// error if a global subscriber is already installed.
pub fn init_logging() -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("plethysmo=info".parse()?)
        .add_directive("plethysmo_core=info".parse()?);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {}", e))?;

    tracing::info!("Starting Plethysmo v{}", VERSION);
    Ok(())
}
