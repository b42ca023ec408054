//! Analog AM and FM
//!
//! Transmit side builds complex baseband at DAC full scale. Receive side
//! works on the real part through the analytic signal, then smooths the
//! recovered message with the analog post-filter and trims the filter edges.

use std::f64::consts::TAU;

use num_complex::Complex64;
use tracing::debug;

use crate::carriers::Nco;
use crate::config::{ModemConfig, ANALOG_POST_FILTER, FM_DEVIATION_HZ};
use crate::dsp::{envelope, instantaneous_frequency};
use crate::error::ModemResult;
use crate::pulse_shapes::{self, scale_to_full_scale};
use crate::traits::{Carrier, PulseShape};
use crate::utils::normalize_peak;

/// Samples trimmed from the start of a demodulated message
const TRIM_HEAD: usize = 100;
/// Samples trimmed from the end of an AM message
const AM_TRIM_TAIL: usize = 50;
/// Samples trimmed from the end of an FM message
const FM_TRIM_TAIL: usize = 100;

fn trimmed(values: Vec<f64>, head: usize, tail: usize) -> Vec<f64> {
    if values.len() <= head + tail {
        return Vec::new();
    }
    let end = values.len() - tail;
    values[head..end].to_vec()
}

/// Cosine test message, `amplitude · cos(2π f i / fs)`
pub fn tone(freq_hz: f64, amplitude: f64, len: usize, sample_rate: f64) -> Vec<f64> {
    (0..len)
        .map(|i| amplitude * (TAU * freq_hz * i as f64 / sample_rate).cos())
        .collect()
}

/// Double-sideband full-carrier AM, `(1 + index · m) · e^{j2πf t}`
///
/// # Arguments
/// * `signal` - Message samples, nominally within ±1
/// * `carrier_hz` - Carrier frequency in Hz
/// * `index` - Modulation index (0.5 for 50 %)
/// * `config` - Sample rate and full scale
pub fn am_modulate(
    signal: &[f64],
    carrier_hz: f64,
    index: f64,
    config: &ModemConfig,
) -> ModemResult<Vec<Complex64>> {
    config.validate()?;
    let mut carrier = Nco::new(carrier_hz, config.sample_rate);
    let mut samples: Vec<Complex64> = signal
        .iter()
        .map(|&m| carrier.next() * (1.0 + index * m))
        .collect();
    scale_to_full_scale(&mut samples, config.full_scale);
    Ok(samples)
}

/// Continuous-phase FM at `FM_DEVIATION_HZ` per unit of message
pub fn fm_modulate(signal: &[f64], carrier_hz: f64, config: &ModemConfig) -> ModemResult<Vec<Complex64>> {
    config.validate()?;
    let track = signal.iter().map(|&m| carrier_hz + FM_DEVIATION_HZ * m);
    let mut samples = Nco::new(carrier_hz, config.sample_rate).synthesize(track);
    scale_to_full_scale(&mut samples, config.full_scale);
    Ok(samples)
}

/// Envelope detector
///
/// Returns the recovered message normalized to ±1, with 100 samples cut
/// from the start and 50 from the end.
pub fn am_demodulate(samples: &[Complex64], config: &ModemConfig) -> ModemResult<Vec<f64>> {
    config.validate()?;
    let lpf = pulse_shapes::design(&ANALOG_POST_FILTER, config.sample_rate)?;

    let real: Vec<f64> = samples.iter().map(|z| z.re).collect();
    let mut env = envelope(&real);
    if env.is_empty() {
        return Ok(env);
    }
    let mean = env.iter().sum::<f64>() / env.len() as f64;
    env.iter_mut().for_each(|v| *v -= mean);

    let mut message = lpf.filtfilt(&env);
    normalize_peak(&mut message);
    let message = trimmed(lpf.filtfilt(&message), TRIM_HEAD, AM_TRIM_TAIL);

    debug!(samples = samples.len(), message = message.len(), "AM demodulated");
    Ok(message)
}

/// Frequency discriminator
///
/// Instantaneous frequency minus the carrier, smoothed, trimmed by 100
/// samples at each end and normalized to ±1.
pub fn fm_demodulate(
    samples: &[Complex64],
    carrier_hz: f64,
    config: &ModemConfig,
) -> ModemResult<Vec<f64>> {
    config.validate()?;
    let lpf = pulse_shapes::design(&ANALOG_POST_FILTER, config.sample_rate)?;

    let real: Vec<f64> = samples.iter().map(|z| z.re).collect();
    let deviation: Vec<f64> = instantaneous_frequency(&real, config.sample_rate)
        .into_iter()
        .map(|f| f - carrier_hz)
        .collect();

    let mut message = trimmed(lpf.filtfilt(&deviation), TRIM_HEAD, FM_TRIM_TAIL);
    normalize_peak(&mut message);

    debug!(samples = samples.len(), message = message.len(), "FM demodulated");
    Ok(message)
}
