//! Butterworth filter design and discrete-time IIR filtering
use std::fmt;
use std::str::FromStr;

use itertools::izip;
use num_complex::Complex64;

use crate::error::Error;
use crate::RealBuffer;

pub mod butterworth;
pub mod iir;
pub mod poly;
pub mod zpk;

/// Defines shared behavior for all filter implementations.
pub trait Filter {
    /// Process a single real sample.
    fn process_one(&mut self, in_samp: f64) -> f64;

    /// Clears any sample history.
    fn reset(&mut self);

    /// Processes a slice of samples.
    /// The default implementation simply calls process_one for each input sample,
    /// which is sufficient for most implementations.
    fn process(&mut self, input: &RealBuffer, output: &mut RealBuffer) {
        assert_eq!(input.len(), output.len());
        for (in_samp, out_samp) in izip!(input.iter(), output.iter_mut()) {
            *out_samp = self.process_one(*in_samp);
        }
    }
}

/// Which band of frequencies a filter lets through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum PassType {
    /// Keeps slow curve shapes, removes high-frequency noise.
    #[default]
    Lowpass,
    /// Keeps fast detail, removes slow drift.
    Highpass,
    /// Keeps only the band between the two cutoffs.
    Bandpass,
}

impl PassType {
    /// Number of coefficients in `a` (and `b`) for a design of the given order.
    pub fn coefficient_len(self, order: usize) -> usize {
        match self {
            PassType::Lowpass | PassType::Highpass => order + 1,
            PassType::Bandpass => 2 * order + 1,
        }
    }
}

impl fmt::Display for PassType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PassType::Lowpass => "lowpass",
            PassType::Highpass => "highpass",
            PassType::Bandpass => "bandpass",
        };
        f.write_str(name)
    }
}

impl FromStr for PassType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lowpass" => Ok(PassType::Lowpass),
            "highpass" => Ok(PassType::Highpass),
            "bandpass" => Ok(PassType::Bandpass),
            other => Err(Error::invalid(format!("unknown pass type '{}'", other))),
        }
    }
}

/// Transfer function coefficients of a digital filter.
///
/// `H(z) = (b[0] + b[1]z^-1 + ... + b[M]z^-M) / (a[0] + a[1]z^-1 + ... + a[M]z^-M)`
///
/// `a` and `b` always have the same length and `a[0]` is 1.
#[derive(Clone, Debug, PartialEq)]
pub struct FilterCoefficients {
    a: Vec<f64>,
    b: Vec<f64>,
}

impl FilterCoefficients {
    /// Builds coefficients from feedback `a` and feedforward `b`, normalizing
    /// both by `a[0]`. The shorter sequence is padded with trailing zeros.
    ///
    /// # Panics
    ///
    /// Panics if `a` is empty or `a[0]` is zero.
    pub fn new(a: &[f64], b: &[f64]) -> FilterCoefficients {
        assert!(!a.is_empty(), "feedback coefficients cannot be empty");
        assert_ne!(a[0], 0.0); // a0 of 0 results in divide by 0

        let len = a.len().max(b.len());
        let a0 = a[0];
        let mut a_norm = vec![0.0; len];
        let mut b_norm = vec![0.0; len];
        for (dst, src) in izip!(a_norm.iter_mut(), a.iter()) {
            *dst = *src / a0;
        }
        for (dst, src) in izip!(b_norm.iter_mut(), b.iter()) {
            *dst = *src / a0;
        }
        FilterCoefficients {
            a: a_norm,
            b: b_norm,
        }
    }

    /// Feedback (denominator) coefficients.
    pub fn a(&self) -> &[f64] {
        &self.a
    }

    /// Feedforward (numerator) coefficients.
    pub fn b(&self) -> &[f64] {
        &self.b
    }

    /// Filter order, the degree of the denominator.
    pub fn order(&self) -> usize {
        self.a.len() - 1
    }

    /// Roots of the denominator polynomial.
    pub fn poles(&self) -> Vec<Complex64> {
        poly::roots(&self.a)
    }

    /// Returns `true` if every pole lies strictly inside the unit circle.
    ///
    /// The poles are found numerically from `a`, so a filter whose poles sit
    /// within about `1e-2` of the unit circle may be misjudged.
    pub fn is_stable(&self) -> bool {
        self.poles().iter().all(|p| p.norm() < 1.0)
    }

    /// Splits into `(a, b)`.
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.a, self.b)
    }
}
