//! Pulse shaping and transmit preparation
//!
//! Symbols are held for `repetition` samples, the buffer is closed with
//! one more period of the first sample so a cyclically replayed buffer has
//! no seam, then the edges are softened by a zero-phase Butterworth
//! low-pass and the result is scaled to the DAC full scale.

mod butterworth;

pub use butterworth::{Butterworth, MAX_ORDER};

use num_complex::Complex64;

use crate::config::FilterSpec;
use crate::error::ModemResult;
use crate::traits::PulseShape;

/// Build the Butterworth filter described by a profile entry
pub fn design(spec: &FilterSpec, sample_rate: f64) -> ModemResult<Butterworth> {
    Butterworth::lowpass(spec.order, spec.normalized_cutoff(sample_rate))
}

/// Zero-order hold: every point repeated `repetition` times
pub fn repeat_symbols(points: &[Complex64], repetition: usize) -> Vec<Complex64> {
    points
        .iter()
        .flat_map(|&p| std::iter::repeat(p).take(repetition))
        .collect()
}

/// Append `count` copies of the first sample
pub fn pad_cyclic(samples: &mut Vec<Complex64>, count: usize) {
    if let Some(&first) = samples.first() {
        samples.extend(std::iter::repeat(first).take(count));
    }
}

/// Scale so the larger of `max|Re|` and `max|Im|` equals `full_scale`
pub fn scale_to_full_scale(samples: &mut [Complex64], full_scale: f64) {
    let peak = samples
        .iter()
        .fold(0.0_f64, |m, z| m.max(z.re.abs()).max(z.im.abs()));
    if peak > 0.0 {
        let gain = full_scale / peak;
        samples.iter_mut().for_each(|z| *z *= gain);
    }
}

/// Hold, pad, low-pass and scale a constellation point sequence
///
/// # Arguments
/// * `points` - One baseband point per symbol
/// * `repetition` - Samples per symbol
/// * `filter` - Zero-phase smoothing filter, if any
/// * `full_scale` - Peak output amplitude
///
/// # Returns
/// `(points.len() + 1) * repetition` samples
pub fn shape_and_scale(
    points: &[Complex64],
    repetition: usize,
    filter: Option<&dyn PulseShape>,
    full_scale: f64,
) -> Vec<Complex64> {
    let mut samples = repeat_symbols(points, repetition);
    pad_cyclic(&mut samples, repetition);

    let mut samples = match filter {
        Some(f) => f.filtfilt_complex(&samples),
        None => samples,
    };
    scale_to_full_scale(&mut samples, full_scale);
    samples
}
