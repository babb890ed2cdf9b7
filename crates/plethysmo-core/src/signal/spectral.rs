//! FFT helpers shared by the signal store and the statistics pass
//!
//! All transforms are unnormalized forward / `1/n`-normalized inverse, so
//! `inverse_real(&forward(x)) == x` up to rounding.

use rustfft::{num_complex::Complex, FftPlanner};

/// Frequency of each FFT bin for a real sequence of length `n` sampled every `dt` seconds
///
/// Bins `0..=(n-1)/2` carry the non-negative frequencies, the rest the
/// negative ones, in the usual FFT output order.
pub fn fft_frequencies(n: usize, dt: f64) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    let scale = 1.0 / (n as f64 * dt);
    let last_positive = (n - 1) / 2;
    (0..n)
        .map(|i| {
            if i <= last_positive {
                i as f64 * scale
            } else {
                (i as f64 - n as f64) * scale
            }
        })
        .collect()
}

/// Forward FFT of a real sequence
pub fn forward(samples: &[f64]) -> Vec<Complex<f64>> {
    let mut buffer: Vec<Complex<f64>> = samples.iter().map(|&x| Complex::new(x, 0.0)).collect();
    if buffer.is_empty() {
        return buffer;
    }
    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(buffer.len());
    fft.process(&mut buffer);
    buffer
}

/// Inverse FFT, keeping only the real part
pub fn inverse_real(spectrum: &[Complex<f64>]) -> Vec<f64> {
    let n = spectrum.len();
    if n == 0 {
        return Vec::new();
    }
    let mut buffer = spectrum.to_vec();
    let mut planner = FftPlanner::new();
    let ifft = planner.plan_fft_inverse(n);
    ifft.process(&mut buffer);

    let norm = 1.0 / n as f64;
    buffer.iter().map(|c| c.re * norm).collect()
}

/// Remove the DC component by zeroing the zero-frequency bin
pub fn detrend(samples: &[f64]) -> Vec<f64> {
    let mut spectrum = forward(samples);
    if let Some(dc) = spectrum.first_mut() {
        *dc = Complex::new(0.0, 0.0);
    }
    inverse_real(&spectrum)
}

/// Linear autocorrelation for lags `0..n`
///
/// Equivalent to the non-negative half of a full (non-circular)
/// correlation of `samples` with itself. Computed through a zero-padded
/// FFT so that no wrap-around term leaks into the result.
pub fn autocorrelation(samples: &[f64]) -> Vec<f64> {
    let n = samples.len();
    if n == 0 {
        return Vec::new();
    }
    let fft_size = (n * 2).next_power_of_two();

    let mut buffer: Vec<Complex<f64>> = samples
        .iter()
        .map(|&x| Complex::new(x, 0.0))
        .chain(std::iter::repeat(Complex::new(0.0, 0.0)))
        .take(fft_size)
        .collect();

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(fft_size);
    fft.process(&mut buffer);

    // |X|^2 is the spectrum of the autocorrelation
    for c in &mut buffer {
        *c = Complex::new(c.norm_sqr(), 0.0);
    }

    let ifft = planner.plan_fft_inverse(fft_size);
    ifft.process(&mut buffer);

    let norm = 1.0 / fft_size as f64;
    buffer.iter().take(n).map(|c| c.re * norm).collect()
}
