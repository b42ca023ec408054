//! Receive front-end
//!
//! Turns a raw capture into one decision value per symbol:
//! - ASK: filtered real envelope, normalized and centered to ±1
//! - PSK/QAM: filtered I/Q, normalized to the unit circle, centered and
//!   rotated by the calibration phase
//! - FSK: instantaneous frequency from the analytic signal, normalized to
//!   [0, 1]

use num_complex::Complex64;
use tracing::{debug, warn};

use crate::config::{
    Calibration, ModemConfig, ModulationOrder, Scheme, FSK_SETTLE_SYMBOLS,
};
use crate::dsp::instantaneous_frequency;
use crate::error::ModemResult;
use crate::pulse_shapes::{self, Butterworth};
use crate::timing::FixedTiming;
use crate::traits::{PulseShape, SymbolTiming};
use crate::utils::{normalize_peak, range_midpoint};

/// Samples at or below this magnitude are dropped for 4-ary phase schemes
const PHASE_GATE: f64 = 0.3;

/// In-block positions probed by the FSK estimator
const FSK_PROBES: [usize; 3] = [10, 20, 40];

/// Receive chain for one scheme and order
#[derive(Debug, Clone)]
pub struct FrontEnd {
    scheme: Scheme,
    order: ModulationOrder,
    timing: FixedTiming,
    filter: Option<Butterworth>,
    calibration: Calibration,
}

impl FrontEnd {
    pub fn new(scheme: Scheme, order: ModulationOrder, config: &ModemConfig) -> ModemResult<Self> {
        config.validate()?;
        scheme.check_order(order)?;

        let profile = scheme.profile();
        let filter = profile
            .rx_filter
            .map(|spec| pulse_shapes::design(&spec, config.sample_rate))
            .transpose()?;

        Ok(Self {
            scheme,
            order,
            timing: FixedTiming::for_profile(&profile, config.sample_rate),
            filter,
            calibration: config.calibration,
        })
    }

    pub fn timing(&self) -> &FixedTiming {
        &self.timing
    }

    /// One decision value per received symbol
    pub fn extract(&self, raw: &[Complex64]) -> Vec<Complex64> {
        if raw.len() < self.timing.samples_per_symbol() {
            warn!(
                samples = raw.len(),
                scheme = %self.scheme,
                "capture shorter than one symbol"
            );
            return Vec::new();
        }

        let values = match self.scheme {
            Scheme::Ask => self.amplitude(&self.decimate(raw)),
            Scheme::Psk | Scheme::Qam => self.phase(&self.decimate(raw)),
            Scheme::Fsk => self.frequency(raw),
        };

        if values.is_empty() {
            warn!(samples = raw.len(), scheme = %self.scheme, "front end dropped every sample");
        } else {
            debug!(
                samples = raw.len(),
                symbols = values.len(),
                scheme = %self.scheme,
                order = %self.order,
                "extracted symbol samples"
            );
        }
        values
    }

    /// Receive filter, then one sample per block at the decision offset
    fn decimate(&self, raw: &[Complex64]) -> Vec<Complex64> {
        let filtered = match &self.filter {
            Some(f) => f.filtfilt_complex(raw),
            None => raw.to_vec(),
        };
        (0..self.timing.decision_count(filtered.len()))
            .map(|k| filtered[self.timing.decision_index(k)])
            .collect()
    }

    fn amplitude(&self, picked: &[Complex64]) -> Vec<Complex64> {
        let mut levels: Vec<f64> = picked.iter().map(|z| z.re).collect();
        normalize_peak(&mut levels);
        if self.calibration.invert_amplitude {
            levels.iter_mut().for_each(|v| *v = -*v);
        }

        let mid = range_midpoint(&levels);
        levels.iter_mut().for_each(|v| *v -= mid);
        normalize_peak(&mut levels);

        levels.into_iter().map(|v| Complex64::new(v, 0.0)).collect()
    }

    fn phase(&self, picked: &[Complex64]) -> Vec<Complex64> {
        let peak = picked.iter().fold(0.0_f64, |m, z| m.max(z.norm()));
        if peak == 0.0 {
            return Vec::new();
        }

        let scaled: Vec<Complex64> = picked.iter().map(|z| z / peak).collect();
        let re: Vec<f64> = scaled.iter().map(|z| z.re).collect();
        let im: Vec<f64> = scaled.iter().map(|z| z.im).collect();
        let center = Complex64::new(range_midpoint(&re), range_midpoint(&im));

        let gate = match self.order {
            ModulationOrder::Quaternary => PHASE_GATE,
            _ => 0.0,
        };
        let rotation = Complex64::from_polar(1.0, self.calibration.phase_rotation);

        scaled
            .into_iter()
            .map(|z| z - center)
            .filter(|z| z.re != 0.0 || z.im != 0.0)
            .filter(|z| z.norm() > gate)
            .map(|z| z * rotation)
            .collect()
    }

    /// Per-block instantaneous frequency, normalized to [0, 1]
    fn frequency(&self, raw: &[Complex64]) -> Vec<Complex64> {
        let rep = self.timing.samples_per_symbol();
        let real: Vec<f64> = raw.iter().map(|z| z.re).collect();
        let inst = instantaneous_frequency(&real, self.timing.sample_rate());

        let settle = FSK_SETTLE_SYMBOLS * rep;
        let Some(track) = inst.get(settle..).filter(|t| t.len() >= rep) else {
            return Vec::new();
        };

        let [a, b, c] = FSK_PROBES.map(|p| p.min(rep - 1));
        let (first, second) = if (track[a] - track[b]).abs() <= (track[b] - track[c]).abs() {
            (a, b)
        } else {
            (b, c)
        };

        let mut freqs: Vec<f64> = track
            .chunks(rep)
            .take_while(|block| block.len() > second)
            .map(|block| ((block[first] + block[second]) / 2.0).trunc())
            .collect();

        let min = freqs.iter().copied().fold(f64::INFINITY, f64::min);
        freqs.iter_mut().for_each(|f| *f -= min);
        normalize_peak(&mut freqs);

        freqs.into_iter().map(|f| Complex64::new(f, 0.0)).collect()
    }
}

/// Extract one decision value per symbol from a raw capture
///
/// # Arguments
/// * `raw` - Received baseband samples
/// * `scheme` - Modulation family
/// * `order` - Modulation order
/// * `config` - Sample rate and receive calibration
pub fn extract_symbol_samples(
    raw: &[Complex64],
    scheme: Scheme,
    order: ModulationOrder,
    config: &ModemConfig,
) -> ModemResult<Vec<Complex64>> {
    Ok(FrontEnd::new(scheme, order, config)?.extract(raw))
}
