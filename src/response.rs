//! Frequency response of designed filters
use num_complex::Complex64;
use rustfft::FftPlanner;

use crate::filter::FilterCoefficients;


/// Complex frequency response `H(e^jw)` at `n` equally spaced frequencies
/// `w = pi * k / n` for `k` in `0..n`, i.e. from DC up to (excluding) Nyquist.
///
/// Both polynomials are zero padded (or time aliased, when longer) to `2n`
/// points and transformed with one FFT each.
pub fn frequency_response(coeffs: &FilterCoefficients, n: usize) -> Vec<Complex64> {
    if n == 0 {
        return Vec::new();
    }
    let size = 2 * n;
    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(size);

    let spectrum = |taps: &[f64]| -> Vec<Complex64> {
        let mut buffer = vec![Complex64::new(0.0, 0.0); size];
        for (i, tap) in taps.iter().enumerate() {
            buffer[i % size].re += *tap;
        }
        fft.process(&mut buffer);
        buffer
    };
    let num = spectrum(coeffs.b());
    let den = spectrum(coeffs.a());

    num.iter()
        .zip(den.iter())
        .take(n)
        .map(|(b, a)| b / a)
        .collect()
}

/// Normalized frequency (fraction of Nyquist) of each point returned by
/// [`frequency_response`].
pub fn frequencies(n: usize) -> Vec<f64> {
    (0..n).map(|k| k as f64 / n as f64).collect()
}

/// Gain of the filter at each of `n` frequencies.
pub fn magnitude(coeffs: &FilterCoefficients, n: usize) -> Vec<f64> {
    frequency_response(coeffs, n)
        .iter()
        .map(|h| h.norm())
        .collect()
}

/// Gain in decibels at each of `n` frequencies.
pub fn magnitude_db(coeffs: &FilterCoefficients, n: usize) -> Vec<f64> {
    magnitude(coeffs, n)
        .iter()
        .map(|g| 20.0 * g.max(f64::MIN_POSITIVE).log10())
        .collect()
}
