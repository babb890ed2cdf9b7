//! Normalized sample buffer and its spectral views

use super::spectral;
use crate::error::{SignalError, ValidationError};
use crate::interval::Interval;
use rustfft::num_complex::Complex;

/// Owns one recording's normalized samples and time axis
///
/// Samples are rescaled to `[-1, 1]` at construction and never change
/// afterwards. Every accessor is a pure view over that buffer.
///
/// # Example
/// ```
/// use plethysmo_core::SignalStore;
///
/// let store = SignalStore::load(&[2.0, 4.0, 3.0], 0.5).unwrap();
/// assert_eq!(store.samples(), &[-1.0, 1.0, 0.0]);
/// assert_eq!(store.times(), &[0.0, 0.5, 1.0]);
/// ```
#[derive(Debug, Clone)]
pub struct SignalStore {
    /// Sampling period in seconds
    dt: f64,
    /// Samples rescaled to [-1, 1]
    samples: Vec<f64>,
    /// `times[i] = i * dt`
    times: Vec<f64>,
}

impl SignalStore {
    /// Normalize `raw_samples` and build the time axis
    ///
    /// # Arguments
    /// * `raw_samples` - Samples as read from the recording
    /// * `sample_period` - Seconds between two samples
    ///
    /// # Errors
    /// [`SignalError::InvalidSignal`] for an empty buffer, a non-positive
    /// period, or non-finite samples. [`SignalError::DegenerateSignal`]
    /// when all samples are equal.
    pub fn load(raw_samples: &[f64], sample_period: f64) -> Result<Self, SignalError> {
        if !(sample_period.is_finite() && sample_period > 0.0) {
            return Err(SignalError::InvalidSignal(format!(
                "sampling period must be > 0 s, got {}",
                sample_period
            )));
        }
        if raw_samples.is_empty() {
            return Err(SignalError::InvalidSignal("no samples".to_string()));
        }
        if let Some(index) = raw_samples.iter().position(|s| !s.is_finite()) {
            return Err(SignalError::InvalidSignal(format!(
                "sample {} is not finite ({})",
                index, raw_samples[index]
            )));
        }

        let (min, max) = raw_samples
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &s| {
                (lo.min(s), hi.max(s))
            });
        // Spreads beyond f64::MAX are rescaled by half so the range stays finite
        let scale = if (max - min).is_finite() { 1.0 } else { 0.5 };
        let range = max * scale - min * scale;
        if range == 0.0 {
            return Err(SignalError::DegenerateSignal {
                len: raw_samples.len(),
                value: min,
            });
        }

        let samples: Vec<f64> = raw_samples
            .iter()
            .map(|&s| ((s * scale - min * scale) / range - 0.5) * 2.0)
            .collect();
        let times = (0..samples.len()).map(|i| i as f64 * sample_period).collect();

        tracing::info!(
            samples = samples.len(),
            dt = sample_period,
            raw_min = min,
            raw_max = max,
            "Signal loaded and normalized"
        );

        Ok(Self {
            dt: sample_period,
            samples,
            times,
        })
    }

    /// Sampling period in seconds
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Sampling rate in Hz
    pub fn sample_rate(&self) -> f64 {
        1.0 / self.dt
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Recording length in seconds
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 * self.dt
    }

    /// Normalized samples
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Time axis in seconds
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Times and samples covered by one interval (zoomed view)
    ///
    /// The interval is clipped to the buffer.
    pub fn window(&self, interval: &Interval) -> (&[f64], &[f64]) {
        let end = interval.end.min(self.samples.len());
        let start = interval.start.min(end);
        (&self.times[start..end], &self.samples[start..end])
    }

    /// Frequency of each spectrum bin in Hz
    pub fn frequencies(&self) -> Vec<f64> {
        spectral::fft_frequencies(self.samples.len(), self.dt)
    }

    /// Real part of the forward transform of the whole signal
    pub fn spectrum(&self) -> Vec<f64> {
        spectral::forward(&self.samples).iter().map(|c| c.re).collect()
    }

    /// Band-pass filtered reconstruction of the signal
    ///
    /// Components with `|f| < fmin` or `|f| > fmax` are zeroed. `fmax` may
    /// exceed the Nyquist frequency, in which case the upper edge removes
    /// nothing.
    ///
    /// # Errors
    /// [`ValidationError::InvalidFrequencyBand`] when `fmin < 0`,
    /// `fmin > fmax`, or either bound is not finite.
    pub fn band_pass(&self, fmin: f64, fmax: f64) -> Result<Vec<f64>, ValidationError> {
        if !(fmin.is_finite() && fmax.is_finite()) || fmin < 0.0 || fmin > fmax {
            return Err(ValidationError::InvalidFrequencyBand { fmin, fmax });
        }

        let freqs = self.frequencies();
        let mut spectrum = spectral::forward(&self.samples);
        for (bin, f) in spectrum.iter_mut().zip(freqs.iter()) {
            let f = f.abs();
            if f < fmin || f > fmax {
                *bin = Complex::new(0.0, 0.0);
            }
        }

        Ok(spectral::inverse_real(&spectrum))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    fn sine(freq: f64, dt: f64, n: usize) -> Vec<f64> {
        (0..n).map(|i| (2.0 * PI * freq * i as f64 * dt).sin()).collect()
    }

    #[test]
    fn test_normalization_bounds() {
        let store = SignalStore::load(&[10.0, 12.0, 11.0, 20.0, 15.0], 0.1).unwrap();
        let min = store.samples().iter().cloned().fold(f64::INFINITY, f64::min);
        let max = store.samples().iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        assert_abs_diff_eq!(min, -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(max, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(store.samples()[4], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_normalization_survives_extreme_spread() {
        let store = SignalStore::load(&[f64::MAX, -f64::MAX, 0.0], 1.0).unwrap();
        assert!(
            store.samples().iter().all(|s| s.is_finite()),
            "normalized samples must be finite, got {:?}",
            store.samples()
        );
        assert_eq!(store.samples(), &[1.0, -1.0, 0.0]);
    }

    #[test]
    fn test_time_axis() {
        let store = SignalStore::load(&[0.0, 1.0, 0.0, 1.0], 0.25).unwrap();
        assert_eq!(store.times(), &[0.0, 0.25, 0.5, 0.75]);
        assert_abs_diff_eq!(store.duration(), 1.0);
        assert_abs_diff_eq!(store.sample_rate(), 4.0);
    }

    #[test]
    fn test_empty_signal_rejected() {
        let err = SignalStore::load(&[], 0.1).unwrap_err();
        assert!(matches!(err, SignalError::InvalidSignal(_)));
    }

    #[test]
    fn test_non_positive_period_rejected() {
        for dt in [0.0, -0.1, f64::NAN] {
            let err = SignalStore::load(&[0.0, 1.0], dt).unwrap_err();
            assert!(
                matches!(err, SignalError::InvalidSignal(_)),
                "dt = {} should be rejected",
                dt
            );
        }
    }

    #[test]
    fn test_non_finite_sample_rejected() {
        let err = SignalStore::load(&[0.0, f64::INFINITY, 1.0], 0.1).unwrap_err();
        assert!(matches!(err, SignalError::InvalidSignal(_)));
    }

    #[test]
    fn test_flat_signal_is_degenerate() {
        let err = SignalStore::load(&[3.0; 16], 0.1).unwrap_err();
        assert_eq!(err, SignalError::DegenerateSignal { len: 16, value: 3.0 });
    }

    #[test]
    fn test_window_clips_to_buffer() {
        let store = SignalStore::load(&[0.0, 1.0, 2.0, 3.0], 1.0).unwrap();
        let (times, samples) = store.window(&Interval::new(2, 10));
        assert_eq!(times, &[2.0, 3.0]);
        assert_eq!(samples.len(), 2);
    }

    #[test]
    fn test_spectrum_peaks_at_signal_frequency() {
        let dt = 0.01;
        let n = 1000;
        let cosine: Vec<f64> = (0..n).map(|i| (2.0 * PI * 5.0 * i as f64 * dt).cos()).collect();
        let store = SignalStore::load(&cosine, dt).unwrap();
        let spectrum = store.spectrum();
        let freqs = store.frequencies();
        assert_eq!(spectrum.len(), n);

        let peak = (1..n / 2)
            .max_by(|&a, &b| spectrum[a].partial_cmp(&spectrum[b]).unwrap())
            .unwrap();
        assert_abs_diff_eq!(freqs[peak], 5.0, epsilon = 1e-9);
        assert_abs_diff_eq!(spectrum[peak], n as f64 / 2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_band_pass_isolates_component() {
        let dt = 0.01;
        let n = 1000;
        let low = sine(1.0, dt, n);
        let high = sine(20.0, dt, n);
        let mixed: Vec<f64> = low.iter().zip(high.iter()).map(|(a, b)| a + b).collect();
        let store = SignalStore::load(&mixed, dt).unwrap();

        let filtered = store.band_pass(0.5, 5.0).unwrap();
        assert_eq!(filtered.len(), n);

        // Only the 1 Hz component survives; compare against the normalized 1 Hz part
        let min = mixed.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = mixed.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let scale = 2.0 / (max - min);
        for (f, l) in filtered.iter().zip(low.iter()) {
            assert_abs_diff_eq!(*f, l * scale, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_band_pass_above_nyquist_keeps_everything() {
        let store = SignalStore::load(&[0.0, 2.0, 1.0, 3.0, 1.0, 2.0], 1.0).unwrap();
        let filtered = store.band_pass(0.0, 1e6).unwrap();
        for (f, s) in filtered.iter().zip(store.samples().iter()) {
            assert_abs_diff_eq!(*f, *s, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_band_pass_rejects_invalid_band() {
        let store = SignalStore::load(&[0.0, 1.0, 0.5], 1.0).unwrap();
        assert!(store.band_pass(-1.0, 2.0).is_err());
        assert!(store.band_pass(3.0, 2.0).is_err());
        assert!(store.band_pass(0.0, f64::NAN).is_err());
    }
}
