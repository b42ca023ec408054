//! FSK tone plan and continuous-phase synthesis
//!
//! `n` tones spaced `Δf` apart, centered on the carrier:
//! `f(sym) = carrier + Δf·sym − n·Δf/2 + Δf/2`.

use num_complex::Complex64;

use super::Nco;
use crate::config::{ModulationOrder, FSK_CARRIER_HZ, FSK_TONE_SPACING_HZ};

/// Symbol → tone frequency plan
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FskTones {
    order: ModulationOrder,
    carrier_hz: f64,
    spacing_hz: f64,
}

impl FskTones {
    pub fn new(order: ModulationOrder, carrier_hz: f64, spacing_hz: f64) -> Self {
        Self {
            order,
            carrier_hz,
            spacing_hz,
        }
    }

    /// 80 kHz carrier, 3 kHz spacing
    pub fn standard(order: ModulationOrder) -> Self {
        Self::new(order, FSK_CARRIER_HZ, FSK_TONE_SPACING_HZ)
    }

    /// Tone frequency of a symbol in Hz
    pub fn frequency(&self, sym: u8) -> f64 {
        let n = self.order.value() as f64;
        self.carrier_hz + self.spacing_hz * sym as f64 - n * self.spacing_hz / 2.0
            + self.spacing_hz / 2.0
    }
}

/// Continuous-phase FSK waveform, `repetition` samples per symbol
///
/// # Arguments
/// * `symbols` - Digits in `[0, n)`
/// * `tones` - Tone plan
/// * `repetition` - Samples per symbol
/// * `sample_rate` - Sample rate in Hz
pub fn fsk_synthesize(
    symbols: &[u8],
    tones: &FskTones,
    repetition: usize,
    sample_rate: f64,
) -> Vec<Complex64> {
    let track = symbols
        .iter()
        .flat_map(|&sym| std::iter::repeat(tones.frequency(sym)).take(repetition));
    Nco::new(0.0, sample_rate).synthesize(track)
}
