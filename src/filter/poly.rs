//! Polynomial helpers for moving between roots and coefficients.
//!
//! Coefficients are stored in descending power order, `c[0]` being the
//! coefficient of the highest power, which is the order transfer functions
//! use for `z^-1` polynomials.
use num_complex::Complex64;

const MAX_ITERATIONS: usize = 1000;
const TOLERANCE: f64 = 1e-14;

/// Expands `prod(x - r)` over `roots` into complex coefficients.
pub fn from_roots_complex(roots: &[Complex64]) -> Vec<Complex64> {
    let mut coeffs = vec![Complex64::new(1.0, 0.0)];
    for root in roots {
        coeffs.push(Complex64::new(0.0, 0.0));
        for i in (1..coeffs.len()).rev() {
            let prev = coeffs[i - 1];
            coeffs[i] -= root * prev;
        }
    }
    coeffs
}

/// Expands `prod(x - r)` into real coefficients.
///
/// Complex roots are expected to come in conjugate pairs, so the imaginary
/// parts of the expansion cancel and are dropped.
pub fn from_roots(roots: &[Complex64]) -> Vec<f64> {
    from_roots_complex(roots).iter().map(|c| c.re).collect()
}

/// Evaluates the polynomial at `x` using Horner's rule.
pub fn eval(coeffs: &[f64], x: Complex64) -> Complex64 {
    coeffs
        .iter()
        .fold(Complex64::new(0.0, 0.0), |acc, c| acc * x + *c)
}

/// Finds all complex roots of a real polynomial with the Durand-Kerner
/// iteration.
///
/// Leading zero coefficients are ignored. A constant polynomial has no roots.
/// Accuracy degrades for tightly clustered roots, which is where very low
/// cutoffs place the poles of a high-order filter.
pub fn roots(coeffs: &[f64]) -> Vec<Complex64> {
    let first = match coeffs.iter().position(|c| *c != 0.0) {
        Some(idx) => idx,
        None => return Vec::new(),
    };
    let lead = coeffs[first];
    let monic: Vec<f64> = coeffs[first..].iter().map(|c| c / lead).collect();
    let degree = monic.len() - 1;
    if degree == 0 {
        return Vec::new();
    }

    let seed = Complex64::new(0.4, 0.9);
    let mut estimates: Vec<Complex64> = (0..degree).map(|k| seed.powu(k as u32)).collect();

    for _ in 0..MAX_ITERATIONS {
        let mut max_step: f64 = 0.0;
        for k in 0..degree {
            let zk = estimates[k];
            let mut denom = Complex64::new(1.0, 0.0);
            for (j, zj) in estimates.iter().enumerate() {
                if j != k {
                    denom *= zk - zj;
                }
            }
            if denom.norm() == 0.0 {
                continue;
            }
            let step = eval(&monic, zk) / denom;
            estimates[k] = zk - step;
            max_step = max_step.max(step.norm());
        }
        if max_step < TOLERANCE {
            break;
        }
    }
    estimates
}

/// ------------------------------------------------------------------------------------------------
/// Module unit tests
/// ------------------------------------------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn sorted_re(mut r: Vec<Complex64>) -> Vec<f64> {
        r.sort_by(|a, b| a.re.partial_cmp(&b.re).unwrap());
        r.iter().map(|c| c.re).collect()
    }

    #[test]
    fn test_from_roots_real() {
        // (x - 1)(x - 2) = x^2 - 3x + 2
        let coeffs = from_roots(&[Complex64::new(1.0, 0.0), Complex64::new(2.0, 0.0)]);
        assert_eq!(coeffs, vec![1.0, -3.0, 2.0]);
    }

    #[test]
    fn test_from_roots_conjugate_pair() {
        // (x - j)(x + j) = x^2 + 1
        let coeffs = from_roots(&[Complex64::new(0.0, 1.0), Complex64::new(0.0, -1.0)]);
        assert_approx_eq!(coeffs[0], 1.0);
        assert_approx_eq!(coeffs[1], 0.0);
        assert_approx_eq!(coeffs[2], 1.0);
    }

    #[test]
    fn test_from_no_roots() {
        assert_eq!(from_roots(&[]), vec![1.0]);
    }

    #[test]
    fn test_roots_of_quadratic() {
        let r = sorted_re(roots(&[1.0, -3.0, 2.0]));
        assert_approx_eq!(r[0], 1.0, 1e-10);
        assert_approx_eq!(r[1], 2.0, 1e-10);
    }

    #[test]
    fn test_roots_complex_pair() {
        let r = roots(&[1.0, 0.0, 1.0]);
        assert_eq!(r.len(), 2);
        for root in r {
            assert_approx_eq!(root.re, 0.0, 1e-10);
            assert_approx_eq!(root.im.abs(), 1.0, 1e-10);
        }
    }

    #[test]
    fn test_roots_ignore_leading_zeros() {
        let r = roots(&[0.0, 2.0, -1.0]);
        assert_eq!(r.len(), 1);
        assert_approx_eq!(r[0].re, 0.5, 1e-12);
        assert!(roots(&[3.0]).is_empty());
        assert!(roots(&[0.0, 0.0]).is_empty());
    }

    #[test]
    fn test_roots_round_trip_through_expansion() {
        let original = [
            Complex64::new(0.5, 0.3),
            Complex64::new(0.5, -0.3),
            Complex64::new(-0.2, 0.0),
        ];
        let found = roots(&from_roots(&original));
        for root in original.iter() {
            let nearest = found
                .iter()
                .map(|f| (f - root).norm())
                .fold(f64::INFINITY, f64::min);
            assert!(nearest < 1e-9);
        }
    }
}
