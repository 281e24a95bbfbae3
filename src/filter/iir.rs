//! Causal IIR filtering of sample sequences
use std::collections::VecDeque;

use itertools::izip;

use crate::filter::{Filter, FilterCoefficients};
use crate::{RealBuffer, SampleSequence};


/// A direct form IIR filter with matching a/b tap lengths.
///
/// Histories start at zero, so the first `order` outputs carry a start-up
/// transient.
#[derive(Clone, Debug)]
pub struct IirFilter {
    x: VecDeque<f64>,
    y: VecDeque<f64>,
    b: Vec<f64>,
    a: Vec<f64>,
}


impl IirFilter {
    /// Returns a new filter running the given coefficients.
    pub fn new(coeffs: &FilterCoefficients) -> IirFilter {
        let taps = coeffs.a().len();

        // Sample histories, newest first
        let x = VecDeque::from(vec![0.0; taps]);
        let y = VecDeque::from(vec![0.0; taps]);

        // Negate a[1..] by the definition of an IIR filter. a[0] is 1.
        let mut a = coeffs.a().to_vec();
        for ai in a.iter_mut().skip(1) {
            *ai = -*ai;
        }

        IirFilter {
            x,
            y,
            b: coeffs.b().to_vec(),
            a,
        }
    }
}

impl Filter for IirFilter {
    /// Process one sample of the input signal and returns one sample of the
    /// output signal.
    fn process_one(&mut self, in_samp: f64) -> f64 {
        // Shift in old values
        self.x.pop_back();
        self.x.push_front(in_samp);
        self.y.pop_back();

        // Compute the filter result
        let mut sum = 0.0;
        for (xi, bi) in izip!(self.x.iter(), self.b.iter()) {
            sum += *xi * *bi;
        }
        for (yi, ai) in izip!(self.y.iter(), self.a[1..].iter()) {
            sum += *yi * *ai;
        }

        // Update y and return the result
        self.y.push_front(sum);
        sum
    }

    fn reset(&mut self) {
        self.x.iter_mut().for_each(|v| *v = 0.0);
        self.y.iter_mut().for_each(|v| *v = 0.0);
    }
}

/// Runs `coeffs` over `samples` from the first sample to the last with zero
/// initial conditions and returns a sequence of the same length.
///
/// `y[n] = b[0]x[n] + ... + b[M]x[n-M] - a[1]y[n-1] - ... - a[M]y[n-M]`
pub fn apply(coeffs: &FilterCoefficients, samples: &RealBuffer) -> SampleSequence {
    let mut filter = IirFilter::new(coeffs);
    let mut output = vec![0.0; samples.len()];
    filter.process(samples, &mut output);
    output
}
