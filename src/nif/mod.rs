//! NIF interface for Elixir
//!
//! Stateless functions over whole buffers. Scheme and calibration are
//! selected by atom; complex samples cross the boundary as `{re, im}`
//! tuples. Errors come back as `{:error, message}`.

use num_complex::Complex64;
use rustler::{Atom, NifResult};

use crate::analog;
use crate::carriers;
use crate::config::{Calibration, ModemConfig, ModulationOrder, Scheme};
use crate::dsp::{self, Window};
use crate::error::ModemError;
use crate::modem::{Demodulator, Modulator};
use crate::vote::resolve;

mod atoms {
    rustler::atoms! {
        // Schemes
        ask,
        psk,
        fsk,
        qam,
        // Calibrations
        pluto,
        loopback,
    }
}

fn to_term(e: ModemError) -> rustler::Error {
    rustler::Error::Term(Box::new(e.to_string()))
}

fn atom_to_scheme(atom: Atom) -> NifResult<Scheme> {
    if atom == atoms::ask() {
        Ok(Scheme::Ask)
    } else if atom == atoms::psk() {
        Ok(Scheme::Psk)
    } else if atom == atoms::fsk() {
        Ok(Scheme::Fsk)
    } else if atom == atoms::qam() {
        Ok(Scheme::Qam)
    } else {
        Err(rustler::Error::Term(Box::new("unsupported scheme")))
    }
}

fn atom_to_calibration(atom: Atom) -> NifResult<Calibration> {
    if atom == atoms::pluto() {
        Ok(Calibration::pluto())
    } else if atom == atoms::loopback() {
        Ok(Calibration::loopback())
    } else {
        Err(rustler::Error::Term(Box::new("unsupported calibration")))
    }
}

fn modem_args(scheme: Atom, order: u32) -> NifResult<(Scheme, ModulationOrder)> {
    let scheme = atom_to_scheme(scheme)?;
    let order = ModulationOrder::try_from(order).map_err(to_term)?;
    Ok((scheme, order))
}

fn config(sample_rate: f64) -> ModemConfig {
    ModemConfig::default().with_sample_rate(sample_rate)
}

fn to_complex(samples: &[(f64, f64)]) -> Vec<Complex64> {
    samples.iter().map(|&(re, im)| Complex64::new(re, im)).collect()
}

fn to_tuples(samples: &[Complex64]) -> Vec<(f64, f64)> {
    samples.iter().map(|z| (z.re, z.im)).collect()
}

fn build_demodulator(
    scheme: Atom,
    order: u32,
    sample_rate: f64,
    calibration: Atom,
) -> NifResult<Demodulator> {
    let (scheme, order) = modem_args(scheme, order)?;
    let config = config(sample_rate).with_calibration(atom_to_calibration(calibration)?);
    Demodulator::new(scheme, order, config).map_err(to_term)
}

// ============================================================================
// Digital modem
// ============================================================================

/// Frame and modulate ASCII text
///
/// # Arguments
/// * `scheme` - Atom: :ask, :psk, :fsk, :qam
/// * `order` - 2, 4 or 8
/// * `text` - ASCII payload
/// * `sample_rate` - Sample rate in Hz
#[rustler::nif]
pub fn modulate_text(
    scheme: Atom,
    order: u32,
    text: String,
    sample_rate: f64,
) -> NifResult<Vec<(f64, f64)>> {
    let (scheme, order) = modem_args(scheme, order)?;
    let modulator = Modulator::new(scheme, order, config(sample_rate)).map_err(to_term)?;
    let samples = modulator.modulate_text(&text).map_err(to_term)?;
    Ok(to_tuples(&samples))
}

/// Modulate a raw digit stream
#[rustler::nif]
pub fn modulate_symbols(
    scheme: Atom,
    order: u32,
    symbols: Vec<u8>,
    sample_rate: f64,
) -> NifResult<Vec<(f64, f64)>> {
    let (scheme, order) = modem_args(scheme, order)?;
    let modulator = Modulator::new(scheme, order, config(sample_rate)).map_err(to_term)?;
    let samples = modulator.modulate_symbols(&symbols).map_err(to_term)?;
    Ok(to_tuples(&samples))
}

/// Demodulate a capture to `{text, agreement}`
#[rustler::nif(schedule = "DirtyCpu")]
pub fn demodulate_text(
    scheme: Atom,
    order: u32,
    samples: Vec<(f64, f64)>,
    sample_rate: f64,
    calibration: Atom,
) -> NifResult<(String, u32)> {
    let demodulator = build_demodulator(scheme, order, sample_rate, calibration)?;
    let resolved = demodulator.demodulate(&to_complex(&samples));
    Ok((resolved.text, resolved.agreement))
}

/// Decided digit stream of a capture
#[rustler::nif(schedule = "DirtyCpu")]
pub fn demodulate_symbols(
    scheme: Atom,
    order: u32,
    samples: Vec<(f64, f64)>,
    sample_rate: f64,
    calibration: Atom,
) -> NifResult<Vec<u8>> {
    let demodulator = build_demodulator(scheme, order, sample_rate, calibration)?;
    Ok(demodulator.demodulate_symbols(&to_complex(&samples)))
}

/// Majority vote over three candidate strings
#[rustler::nif]
pub fn resolve_candidates(candidates: Vec<String>) -> NifResult<(String, u32)> {
    let candidates: [String; 3] = candidates
        .try_into()
        .map_err(|_| rustler::Error::Term(Box::new("expected exactly three candidates")))?;
    let resolved = resolve(&candidates);
    Ok((resolved.text, resolved.agreement))
}

// ============================================================================
// Analog
// ============================================================================

#[rustler::nif]
pub fn am_modulate(
    signal: Vec<f64>,
    carrier_hz: f64,
    index: f64,
    sample_rate: f64,
) -> NifResult<Vec<(f64, f64)>> {
    let samples = analog::am_modulate(&signal, carrier_hz, index, &config(sample_rate))
        .map_err(to_term)?;
    Ok(to_tuples(&samples))
}

#[rustler::nif]
pub fn fm_modulate(
    signal: Vec<f64>,
    carrier_hz: f64,
    sample_rate: f64,
) -> NifResult<Vec<(f64, f64)>> {
    let samples = analog::fm_modulate(&signal, carrier_hz, &config(sample_rate)).map_err(to_term)?;
    Ok(to_tuples(&samples))
}

#[rustler::nif(schedule = "DirtyCpu")]
pub fn am_demodulate(samples: Vec<(f64, f64)>, sample_rate: f64) -> NifResult<Vec<f64>> {
    analog::am_demodulate(&to_complex(&samples), &config(sample_rate)).map_err(to_term)
}

#[rustler::nif(schedule = "DirtyCpu")]
pub fn fm_demodulate(
    samples: Vec<(f64, f64)>,
    carrier_hz: f64,
    sample_rate: f64,
) -> NifResult<Vec<f64>> {
    analog::fm_demodulate(&to_complex(&samples), carrier_hz, &config(sample_rate)).map_err(to_term)
}

// ============================================================================
// Inspection
// ============================================================================

/// Centered magnitude spectrum as `{frequencies, magnitude_db}`
///
/// # Arguments
/// * `window` - "hann", "hamming" or "none"
#[rustler::nif(schedule = "DirtyCpu")]
pub fn spectrum_db(
    samples: Vec<(f64, f64)>,
    fft_size: usize,
    window: String,
    sample_rate: f64,
) -> NifResult<(Vec<f64>, Vec<f64>)> {
    let window: Window = window.parse().map_err(to_term)?;
    let spectrum = dsp::spectrum_db(&to_complex(&samples), fft_size, window, sample_rate);
    Ok((spectrum.frequencies, spectrum.magnitude_db))
}

/// Real passband signal for a baseband buffer
#[rustler::nif]
pub fn upconvert(samples: Vec<(f64, f64)>, carrier_hz: f64, sample_rate: f64) -> Vec<f64> {
    carriers::upconvert(&to_complex(&samples), carrier_hz, sample_rate)
}
