//! Carrier oscillator implementations
//!
//! The NCO drives the FSK tone synthesizer, the FM modulator and the
//! passband up-converter.

mod fsk;
mod nco;

pub use fsk::{fsk_synthesize, FskTones};
pub use nco::Nco;

use std::f64::consts::TAU;

use num_complex::Complex64;

/// Up-convert baseband I/Q to a real passband signal
///
/// `I·cos(2πf t) + Q·sin(2πf t)`, with `t = i / sample_rate`.
pub fn upconvert(samples: &[Complex64], carrier_hz: f64, sample_rate: f64) -> Vec<f64> {
    samples
        .iter()
        .enumerate()
        .map(|(i, z)| {
            let (sin, cos) = (TAU * carrier_hz * i as f64 / sample_rate).sin_cos();
            z.re * cos + z.im * sin
        })
        .collect()
}
