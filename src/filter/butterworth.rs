//! Digital Butterworth filter design.
//!
//! Designs follow the classic analog route: a normalized Butterworth
//! prototype is moved to the requested band, then mapped to the z-plane with
//! the bilinear transform. Cutoffs are normalized to the Nyquist frequency,
//! so `0.5` is half of Nyquist.
//!
//! The analog design and the digital poles of [`design_zpk`] are stable for
//! every valid input. The transfer function from [`design`] is not always:
//! expanding tightly clustered poles into `a` rounds the coefficients enough
//! to push roots outside the unit circle, and [`crate::apply`] runs `a`
//! directly. Low cutoffs cluster the poles near `z = 1`, and a bandpass
//! doubles the cluster, so roughly:
//!
//! - bandpass of order 4 breaks with the low band edge below about 0.003,
//!   order 5 below about 0.02, orders 6 and 7 below about 0.05, and order 8
//!   is already marginal at 0.05
//! - lowpass and highpass of order 6 and 7 break below about 0.003, order 8
//!   below about 0.01
//!
//! Check [`FilterCoefficients::is_stable`] when designs go near those limits.
use std::f64::consts::PI;

use log::debug;

use crate::error::{Error, Result};
use crate::filter::zpk::Zpk;
use crate::filter::{FilterCoefficients, PassType};

/// Sample rate the analog design is carried out at. With cutoffs normalized
/// to Nyquist, any value works as long as pre-warping and the bilinear
/// transform agree on it.
const DESIGN_RATE: f64 = 2.0;

/// Pre-warps a digital cutoff (fraction of Nyquist) to the analog frequency
/// the bilinear transform maps back onto it.
fn prewarp(cutoff: f64) -> f64 {
    2.0 * DESIGN_RATE * (PI * cutoff / DESIGN_RATE).tan()
}

fn check_cutoff(name: &str, value: f64) -> Result<()> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(Error::invalid(format!(
            "{} cutoff {} must lie strictly between 0 and 1",
            name, value
        )))
    }
}

fn check_parameters(low: f64, high: f64, order: usize, pass_type: PassType) -> Result<()> {
    if order < 1 {
        return Err(Error::invalid("filter order must be at least 1"));
    }
    match pass_type {
        PassType::Lowpass => check_cutoff("high", high),
        PassType::Highpass => check_cutoff("low", low),
        PassType::Bandpass => {
            check_cutoff("low", low)?;
            check_cutoff("high", high)?;
            if low >= high {
                return Err(Error::invalid(format!(
                    "bandpass low cutoff {} must be below high cutoff {}",
                    low, high
                )));
            }
            Ok(())
        }
    }
}

/// Designs a digital Butterworth filter in zero-pole-gain form.
///
/// Takes the same arguments as [`design`].
pub fn design_zpk(low: f64, high: f64, order: usize, pass_type: PassType) -> Result<Zpk> {
    check_parameters(low, high, order, pass_type)?;
    debug!(
        "Designing {} Butterworth, order {}, low {}, high {}",
        pass_type, order, low, high
    );

    let prototype = Zpk::butterworth_prototype(order);
    let analog = match pass_type {
        PassType::Lowpass => prototype.lowpass(prewarp(high)),
        PassType::Highpass => prototype.highpass(prewarp(low)),
        PassType::Bandpass => {
            let w_low = prewarp(low);
            let w_high = prewarp(high);
            prototype.bandpass((w_low * w_high).sqrt(), w_high - w_low)
        }
    };
    Ok(analog.bilinear(DESIGN_RATE))
}

/// Designs a digital Butterworth filter and returns its transfer function.
///
/// The lowpass cutoff is taken from `high` and the highpass cutoff from
/// `low`; the other argument is ignored. A bandpass uses both and needs
/// `low < high`. Every cutoff in use must lie strictly inside `(0, 1)` and
/// `order` must be at least 1, otherwise [`Error::InvalidParameter`] is
/// returned.
///
/// The returned `a` and `b` have `order + 1` entries, or `2 * order + 1`
/// for a bandpass, with `a[0] == 1`.
pub fn design(low: f64, high: f64, order: usize, pass_type: PassType) -> Result<FilterCoefficients> {
    let coeffs = design_zpk(low, high, order, pass_type)?.to_coefficients();
    debug!("a: {:?}", coeffs.a());
    debug!("b: {:?}", coeffs.b());
    Ok(coeffs)
}

/// Lowpass design with a single cutoff.
pub fn lowpass(cutoff: f64, order: usize) -> Result<FilterCoefficients> {
    design(0.0, cutoff, order, PassType::Lowpass)
}

/// Highpass design with a single cutoff.
pub fn highpass(cutoff: f64, order: usize) -> Result<FilterCoefficients> {
    design(cutoff, 0.0, order, PassType::Highpass)
}

/// Bandpass design between `low` and `high`.
pub fn bandpass(low: f64, high: f64, order: usize) -> Result<FilterCoefficients> {
    design(low, high, order, PassType::Bandpass)
}

/// ------------------------------------------------------------------------------------------------
/// Module unit tests
/// ------------------------------------------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn assert_all_close(actual: &[f64], expected: &[f64], tol: f64) {
        assert_eq!(actual.len(), expected.len());
        for (x, y) in actual.iter().zip(expected.iter()) {
            assert_approx_eq!(x, y, tol);
        }
    }

    #[test]
    fn test_lowpass_second_order_reference() {
        // Well-known second order design at a tenth of Nyquist
        let coeffs = lowpass(0.1, 2).unwrap();
        assert_all_close(coeffs.b(), &[0.02008337, 0.04016673, 0.02008337], 1e-7);
        assert_all_close(coeffs.a(), &[1.0, -1.56101808, 0.64135154], 1e-7);
    }

    #[test]
    fn test_highpass_second_order_reference() {
        let coeffs = highpass(0.1, 2).unwrap();
        assert_all_close(coeffs.b(), &[0.80059240, -1.60118481, 0.80059240], 1e-7);
        assert_all_close(coeffs.a(), &[1.0, -1.56101808, 0.64135154], 1e-7);
    }

    #[test]
    fn test_half_band_first_order() {
        // A first order lowpass at half Nyquist is a two-tap average
        let coeffs = lowpass(0.5, 1).unwrap();
        assert_all_close(coeffs.b(), &[0.5, 0.5], 1e-12);
        assert_all_close(coeffs.a(), &[1.0, 0.0], 1e-12);
    }

    #[test]
    fn test_coefficient_lengths() {
        for order in 1..=8 {
            for pass_type in [PassType::Lowpass, PassType::Highpass, PassType::Bandpass] {
                let coeffs = design(0.2, 0.4, order, pass_type).unwrap();
                let expected = pass_type.coefficient_len(order);
                assert_eq!(coeffs.a().len(), expected);
                assert_eq!(coeffs.b().len(), expected);
                assert_approx_eq!(coeffs.a()[0], 1.0, 1e-15);
            }
        }
    }

    #[test]
    fn test_unity_gain_in_passband() {
        // Lowpass passes DC, highpass passes Nyquist
        let lp = lowpass(0.3, 4).unwrap();
        let dc: f64 = lp.b().iter().sum::<f64>() / lp.a().iter().sum::<f64>();
        assert_approx_eq!(dc, 1.0, 1e-10);

        let hp = highpass(0.3, 4).unwrap();
        let alternate = |c: &[f64]| -> f64 {
            c.iter()
                .enumerate()
                .map(|(i, v)| if i % 2 == 0 { *v } else { -*v })
                .sum()
        };
        let nyquist = alternate(hp.b()) / alternate(hp.a());
        assert_approx_eq!(nyquist, 1.0, 1e-10);
        assert_approx_eq!(hp.b().iter().sum::<f64>(), 0.0, 1e-12);
    }

    #[test]
    fn test_digital_poles_are_stable() {
        for order in 1..=8 {
            for &(low, high) in &[(0.05, 0.1), (0.2, 0.4), (0.3, 0.7), (0.6, 0.9)] {
                for pass_type in [PassType::Lowpass, PassType::Highpass, PassType::Bandpass] {
                    let zpk = design_zpk(low, high, order, pass_type).unwrap();
                    assert!(zpk.poles.iter().all(|p| p.norm() < 1.0));
                }
            }
        }
    }

    #[test]
    fn test_denominator_roots_inside_unit_circle() {
        for pass_type in [PassType::Lowpass, PassType::Highpass, PassType::Bandpass] {
            let coeffs = design(0.2, 0.5, 4, pass_type).unwrap();
            assert!(coeffs.is_stable());
        }
    }

    #[test]
    fn test_low_cutoff_bandpass_loses_stability() {
        // The digital poles are fine, the expanded denominator is not
        let zpk = design_zpk(0.01, 0.02, 5, PassType::Bandpass).unwrap();
        assert!(zpk.poles.iter().all(|p| p.norm() < 1.0));
        assert!(!design(0.01, 0.02, 5, PassType::Bandpass).unwrap().is_stable());

        assert!(design(0.05, 0.1, 5, PassType::Bandpass).unwrap().is_stable());
    }

    #[test]
    fn test_unused_cutoff_is_ignored() {
        let a = design(0.0, 0.25, 3, PassType::Lowpass).unwrap();
        let b = design(42.0, 0.25, 3, PassType::Lowpass).unwrap();
        assert_eq!(a, b);

        let c = design(0.25, -1.0, 3, PassType::Highpass).unwrap();
        assert_eq!(c, highpass(0.25, 3).unwrap());
    }

    #[test]
    fn test_deterministic() {
        let first = design(0.15, 0.35, 4, PassType::Bandpass).unwrap();
        let second = design(0.15, 0.35, 4, PassType::Bandpass).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_parameters() {
        let invalid = |r: Result<FilterCoefficients>| matches!(r, Err(Error::InvalidParameter(_)));

        assert!(invalid(design(0.2, 0.4, 0, PassType::Lowpass)));
        assert!(invalid(design(0.5, 0.2, 4, PassType::Bandpass)));
        assert!(invalid(design(0.3, 0.3, 4, PassType::Bandpass)));
        assert!(invalid(design(0.0, 0.4, 4, PassType::Bandpass)));
        assert!(invalid(design(0.2, 1.0, 4, PassType::Bandpass)));
        assert!(invalid(lowpass(0.0, 2)));
        assert!(invalid(lowpass(1.0, 2)));
        assert!(invalid(highpass(-0.1, 2)));
        assert!(invalid(highpass(f64::NAN, 2)));
        assert!(invalid(lowpass(f64::INFINITY, 2)));
    }
}
