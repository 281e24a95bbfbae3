//! Interactive filtering sessions over a set of animation curves.
//!
//! A session captures the key values of every target curve once, when the
//! user starts filtering. Each parameter change then designs a fresh filter
//! and runs it over those captured values, never over the output of an
//! earlier change, so dragging a slider back and forth does not compound the
//! smoothing. Ending the session drops the captured values. The host is
//! expected to wrap the whole session in one undoable transaction.
use std::collections::HashMap;
use std::hash::Hash;

use log::{debug, info, warn};

use crate::error::Result;
use crate::filter::butterworth::design;
use crate::filter::iir::apply;
use crate::filter::PassType;
use crate::SampleSequence;

/// Access to the key values of one animation curve.
pub trait KeyframeCurve {
    fn num_keys(&self) -> usize;

    fn value(&self, index: usize) -> f64;

    fn set_value(&mut self, index: usize, value: f64);

    /// All key values in time order.
    fn key_values(&self) -> SampleSequence {
        (0..self.num_keys()).map(|i| self.value(i)).collect()
    }

    /// Writes `values` back key by key. Values past the last key are ignored.
    fn set_key_values(&mut self, values: &[f64]) {
        let keys = self.num_keys();
        for (i, v) in values.iter().enumerate().take(keys) {
            self.set_value(i, *v);
        }
    }
}

impl KeyframeCurve for Vec<f64> {
    fn num_keys(&self) -> usize {
        self.len()
    }

    fn value(&self, index: usize) -> f64 {
        self[index]
    }

    fn set_value(&mut self, index: usize, value: f64) {
        self[index] = value;
    }
}

/// Maps raw slider positions to normalized cutoff frequencies.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SliderScale {
    /// Multiplier for the minimum slider, which drives the low cutoff.
    pub low: f64,
    /// Multiplier for the maximum slider, which drives the high cutoff.
    pub high: f64,
}

impl Default for SliderScale {
    fn default() -> Self {
        SliderScale {
            low: 1e-5,
            high: 1e-3,
        }
    }
}

impl SliderScale {
    /// Returns the `(low, high)` cutoffs for the two raw slider values.
    pub fn cutoffs(&self, raw_low: f64, raw_high: f64) -> (f64, f64) {
        (raw_low * self.low, raw_high * self.high)
    }
}

/// Settings shared by every change within a session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FilterSettings {
    pub order: usize,
    pub scale: SliderScale,
}

impl Default for FilterSettings {
    fn default() -> Self {
        FilterSettings {
            order: 4,
            scale: SliderScale::default(),
        }
    }
}

/// Key values of a group of curves, captured before any filtering.
///
/// Curves keep the order they were added in. Adding a curve that is already
/// present replaces its values.
#[derive(Clone, Debug)]
pub struct CurveSet<K> {
    curves: Vec<(K, SampleSequence)>,
    index: HashMap<K, usize>,
}

impl<K: Eq + Hash + Clone> CurveSet<K> {
    pub fn new() -> Self {
        CurveSet {
            curves: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Reads the current key values of every curve.
    pub fn capture<'a, C, I>(curves: I) -> Self
    where
        C: KeyframeCurve + 'a,
        I: IntoIterator<Item = (K, &'a C)>,
    {
        curves
            .into_iter()
            .map(|(id, curve)| (id, curve.key_values()))
            .collect()
    }

    pub fn insert(&mut self, id: K, values: SampleSequence) {
        match self.index.get(&id) {
            Some(&slot) => self.curves[slot].1 = values,
            None => {
                self.index.insert(id.clone(), self.curves.len());
                self.curves.push((id, values));
            }
        }
    }

    /// Captured values of one curve.
    pub fn baseline(&self, id: &K) -> Option<&[f64]> {
        self.index
            .get(id)
            .map(|&slot| self.curves[slot].1.as_slice())
    }

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &[f64])> {
        self.curves.iter().map(|(k, v)| (k, v.as_slice()))
    }
}

impl<K: PartialEq> PartialEq for CurveSet<K> {
    fn eq(&self, other: &Self) -> bool {
        self.curves == other.curves
    }
}

impl<K: Eq + Hash + Clone> Default for CurveSet<K> {
    fn default() -> Self {
        CurveSet::new()
    }
}

impl<K: Eq + Hash + Clone> FromIterator<(K, SampleSequence)> for CurveSet<K> {
    fn from_iter<T: IntoIterator<Item = (K, SampleSequence)>>(iter: T) -> Self {
        let mut set = CurveSet::new();
        for (id, values) in iter {
            set.insert(id, values);
        }
        set
    }
}

#[derive(Clone, Debug)]
enum SessionState<K> {
    Idle,
    Recording(CurveSet<K>),
}

/// One interactive filtering session.
///
/// ```
/// use butter::{CurveSet, FilterSession, FilterSettings, PassType};
///
/// let mut session = FilterSession::new(FilterSettings::default());
/// let curves: CurveSet<&str> = vec![("tx", vec![0.0, 1.0, 0.5, 1.5, 1.0])].into_iter().collect();
/// session.begin(curves);
/// let filtered = session.update(0.0, 200.0, PassType::Lowpass).unwrap();
/// assert_eq!(filtered[0].1.len(), 5);
/// session.end();
/// ```
#[derive(Clone, Debug)]
pub struct FilterSession<K> {
    settings: FilterSettings,
    state: SessionState<K>,
}

impl<K: Eq + Hash + Clone> FilterSession<K> {
    pub fn new(settings: FilterSettings) -> Self {
        FilterSession {
            settings,
            state: SessionState::Idle,
        }
    }

    pub fn settings(&self) -> &FilterSettings {
        &self.settings
    }

    pub fn set_order(&mut self, order: usize) {
        self.settings.order = order;
    }

    /// Starts recording with `curves` as the baseline. Starting again while
    /// recording replaces the baseline.
    pub fn begin(&mut self, curves: CurveSet<K>) {
        if self.is_recording() {
            warn!("Filter session restarted, replacing captured curves");
        }
        info!("Filter session started with {} curves", curves.len());
        self.state = SessionState::Recording(curves);
    }

    /// Stops recording and hands back the baseline, if a session was open.
    pub fn end(&mut self) -> Option<CurveSet<K>> {
        match std::mem::replace(&mut self.state, SessionState::Idle) {
            SessionState::Recording(curves) => {
                info!("Filter session ended");
                Some(curves)
            }
            SessionState::Idle => None,
        }
    }

    pub fn is_recording(&self) -> bool {
        matches!(self.state, SessionState::Recording(_))
    }

    pub fn baseline(&self) -> Option<&CurveSet<K>> {
        match &self.state {
            SessionState::Recording(curves) => Some(curves),
            SessionState::Idle => None,
        }
    }

    /// Filters every baseline curve with normalized cutoffs.
    ///
    /// Nothing is designed when there are no curves to filter, so an idle
    /// session returns an empty result even for out-of-range cutoffs.
    /// A design whose denominator fails
    /// [`crate::FilterCoefficients::is_stable`] is still applied, with a
    /// warning logged.
    pub fn filter(
        &self,
        low: f64,
        high: f64,
        pass_type: PassType,
    ) -> Result<Vec<(K, SampleSequence)>> {
        let curves = match &self.state {
            SessionState::Recording(curves) if !curves.is_empty() => curves,
            SessionState::Recording(_) => return Ok(Vec::new()),
            SessionState::Idle => {
                warn!("Filter requested without an open session");
                return Ok(Vec::new());
            }
        };

        let order = self.settings.order;
        let coeffs = design(low, high, order, pass_type)?;
        if !coeffs.is_stable() {
            warn!(
                "Order {} {} filter at low {}, high {} is numerically unstable, output will diverge",
                order, pass_type, low, high
            );
        }
        debug!("Order:    {}", order);
        debug!("Pass:     {}", pass_type);

        let filtered = curves
            .iter()
            .map(|(id, original)| {
                let smoothed = apply(&coeffs, original);
                debug!("Original: {:?}", original);
                debug!("Filtered: {:?}", smoothed);
                (id.clone(), smoothed)
            })
            .collect();
        Ok(filtered)
    }

    /// Filters every baseline curve with cutoffs taken from raw slider
    /// positions through the session's [`SliderScale`].
    pub fn update(
        &self,
        raw_low: f64,
        raw_high: f64,
        pass_type: PassType,
    ) -> Result<Vec<(K, SampleSequence)>> {
        let (low, high) = self.settings.scale.cutoffs(raw_low, raw_high);
        self.filter(low, high, pass_type)
    }

    /// Like [`FilterSession::update`], then writes the results into the
    /// matching entries of `curves`. Returns how many curves were written.
    pub fn update_curves<C: KeyframeCurve>(
        &self,
        curves: &mut HashMap<K, C>,
        raw_low: f64,
        raw_high: f64,
        pass_type: PassType,
    ) -> Result<usize> {
        let mut written = 0;
        for (id, values) in self.update(raw_low, raw_high, pass_type)? {
            match curves.get_mut(&id) {
                Some(curve) => {
                    curve.set_key_values(&values);
                    written += 1;
                }
                None => warn!("Captured curve is no longer available, skipping"),
            }
        }
        Ok(written)
    }
}

impl<K: Eq + Hash + Clone> Default for FilterSession<K> {
    fn default() -> Self {
        FilterSession::new(FilterSettings::default())
    }
}
