//! Butterworth smoothing for animation curves.
//!
//! The crate designs digital Butterworth IIR filters and runs them over the
//! keyframe values of animation curves. The two building blocks are
//! [`filter::butterworth::design`], which turns an order, a pass type and
//! normalized cutoffs into [`FilterCoefficients`], and [`filter::iir::apply`],
//! which runs those coefficients over one curve.
//!
//! ```
//! use butter::{design, apply, PassType};
//!
//! let coeffs = design(0.0, 0.2, 4, PassType::Lowpass).unwrap();
//! let smoothed = apply(&coeffs, &[1.0, 1.2, 0.9, 1.1, 1.0]);
//! assert_eq!(smoothed.len(), 5);
//! ```
//!
//! Interactive tools keep a [`session::FilterSession`] so that every
//! parameter change re-filters the curves captured when the session began.

pub mod error;
pub mod filter;
pub mod response;
pub mod session;

pub use crate::error::{Error, Result};
pub use crate::filter::butterworth::{design, design_zpk};
pub use crate::filter::iir::{apply, IirFilter};
pub use crate::filter::{Filter, FilterCoefficients, PassType};
pub use crate::session::{CurveSet, FilterSession, FilterSettings, KeyframeCurve, SliderScale};

/// Sample buffer type used throughout the crate.
pub type RealBuffer = [f64];

/// Values of one animation curve, one per key, in time order.
pub type SampleSequence = Vec<f64>;
