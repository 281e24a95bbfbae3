//! Zero-pole-gain representation and the transforms that carry an analog
//! Butterworth prototype to a digital filter.
//!
//! `H(s) = k * prod(s - zeros[i]) / prod(s - poles[i])`
use std::f64::consts::PI;

use num_complex::Complex64;

use crate::filter::poly;
use crate::filter::FilterCoefficients;

/// Filter described by its zeros, poles and gain.
#[derive(Clone, Debug, PartialEq)]
pub struct Zpk {
    pub zeros: Vec<Complex64>,
    pub poles: Vec<Complex64>,
    pub gain: f64,
}

impl Zpk {
    /// Normalized analog Butterworth lowpass prototype of the given order.
    ///
    /// The poles sit on the left half of the unit circle at angles
    /// `pi/2 + (2k+1)pi/(2 order)`. There are no zeros and the gain is 1.
    pub fn butterworth_prototype(order: usize) -> Zpk {
        let n = order as f64;
        let poles = (0..order)
            .map(|k| {
                let theta = PI / 2.0 + (2.0 * k as f64 + 1.0) * PI / (2.0 * n);
                Complex64::from_polar(1.0, theta)
            })
            .collect();
        Zpk {
            zeros: Vec::new(),
            poles,
            gain: 1.0,
        }
    }

    /// Number of poles in excess of zeros.
    pub fn degree(&self) -> usize {
        self.poles.len().saturating_sub(self.zeros.len())
    }

    /// Moves a unit-cutoff analog lowpass to cutoff `wo` (rad/s).
    pub fn lowpass(self, wo: f64) -> Zpk {
        let degree = self.degree() as i32;
        Zpk {
            zeros: self.zeros.iter().map(|z| *z * wo).collect(),
            poles: self.poles.iter().map(|p| *p * wo).collect(),
            gain: self.gain * wo.powi(degree),
        }
    }

    /// Turns a unit-cutoff analog lowpass into a highpass at `wo` (rad/s).
    pub fn highpass(self, wo: f64) -> Zpk {
        let degree = self.degree();
        let num: Complex64 = self.zeros.iter().map(|z| -*z).product();
        let den: Complex64 = self.poles.iter().map(|p| -*p).product();

        let mut zeros: Vec<Complex64> = self
            .zeros
            .iter()
            .map(|z| Complex64::from(wo) / *z)
            .collect();
        zeros.extend(std::iter::repeat(Complex64::new(0.0, 0.0)).take(degree));
        Zpk {
            zeros,
            poles: self.poles.iter().map(|p| Complex64::from(wo) / *p).collect(),
            gain: self.gain * (num / den).re,
        }
    }

    /// Turns a unit-cutoff analog lowpass into a bandpass centred on `wo`
    /// with bandwidth `bw` (both rad/s). Every pole splits into two.
    pub fn bandpass(self, wo: f64, bw: f64) -> Zpk {
        let degree = self.degree();
        let split = |roots: &[Complex64]| -> Vec<Complex64> {
            let scaled: Vec<Complex64> = roots.iter().map(|r| *r * (bw / 2.0)).collect();
            let upper = scaled.iter().map(|r| *r + (*r * *r - wo * wo).sqrt());
            let lower = scaled.iter().map(|r| *r - (*r * *r - wo * wo).sqrt());
            upper.chain(lower).collect()
        };

        let mut zeros = split(&self.zeros);
        zeros.extend(std::iter::repeat(Complex64::new(0.0, 0.0)).take(degree));
        Zpk {
            zeros,
            poles: split(&self.poles),
            gain: self.gain * bw.powi(degree as i32),
        }
    }

    /// Bilinear transform `s = 2 fs (z - 1) / (z + 1)` to a digital filter.
    ///
    /// Zeros at infinity land on `z = -1` (the Nyquist frequency).
    pub fn bilinear(self, fs: f64) -> Zpk {
        let fs2 = Complex64::new(2.0 * fs, 0.0);
        let degree = self.degree();
        let num: Complex64 = self.zeros.iter().map(|z| fs2 - z).product();
        let den: Complex64 = self.poles.iter().map(|p| fs2 - p).product();

        let mut zeros: Vec<Complex64> =
            self.zeros.iter().map(|z| (fs2 + z) / (fs2 - z)).collect();
        zeros.extend(std::iter::repeat(Complex64::new(-1.0, 0.0)).take(degree));
        Zpk {
            zeros,
            poles: self.poles.iter().map(|p| (fs2 + p) / (fs2 - p)).collect(),
            gain: self.gain * (num / den).re,
        }
    }

    /// Expands zeros and poles into transfer function coefficients.
    pub fn to_coefficients(&self) -> FilterCoefficients {
        let b: Vec<f64> = poly::from_roots(&self.zeros)
            .iter()
            .map(|c| c * self.gain)
            .collect();
        let a = poly::from_roots(&self.poles);
        FilterCoefficients::new(&a, &b)
    }
}
