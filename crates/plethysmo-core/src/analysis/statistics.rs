//! Per-interval statistics: detrended integral and autocorrelation period

use crate::interval::Interval;
use crate::signal::spectral;
use serde::{Deserialize, Serialize};

/// Mean energy below which a detrended slice is considered flat
const FLAT_ENERGY_EPSILON: f64 = 1e-18;

/// Statistics for one accepted interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntervalStatistics {
    pub interval: Interval,
    /// `sum(detrended) * dt`, a plain Riemann sum
    pub integral: f64,
    /// Dominant period in seconds; `None` when no periodicity is detected
    pub period: Option<f64>,
}

/// Compute the statistics of `interval` over the normalized `samples`
///
/// The interval is clipped to the buffer; an interval lying entirely
/// outside it yields a zero integral and no period.
pub fn interval_statistics(samples: &[f64], dt: f64, interval: Interval) -> IntervalStatistics {
    let end = interval.end.min(samples.len());
    let start = interval.start.min(end);
    let detrended = spectral::detrend(&samples[start..end]);

    let integral = detrended.iter().sum::<f64>() * dt;
    let period = dominant_lag(&detrended).map(|lag| lag as f64 * dt);

    IntervalStatistics {
        interval,
        integral,
        period,
    }
}

/// Lag (in samples) of the highest local maximum of the autocorrelation
///
/// Local maxima are the points where the sign of the first difference
/// drops (rising to flat, rising to falling, or flat to falling).
/// Returns `None` for flat, monotonic, or too short series.
pub fn dominant_lag(detrended: &[f64]) -> Option<usize> {
    let n = detrended.len();
    if n < 3 {
        return None;
    }
    let energy: f64 = detrended.iter().map(|x| x * x).sum();
    if energy / n as f64 <= FLAT_ENERGY_EPSILON {
        return None;
    }

    let acf = spectral::autocorrelation(detrended);
    let slopes: Vec<i8> = acf.windows(2).map(|w| sign(w[1] - w[0])).collect();

    slopes
        .windows(2)
        .enumerate()
        .filter(|(_, s)| s[1] - s[0] < 0)
        .map(|(i, _)| i + 1)
        .fold(None, |best: Option<usize>, lag| match best {
            Some(b) if acf[b] >= acf[lag] => Some(b),
            _ => Some(lag),
        })
}

fn sign(x: f64) -> i8 {
    if x > 0.0 {
        1
    } else if x < 0.0 {
        -1
    } else {
        0
    }
}
