//! FFT-based signal analysis
//!
//! Analytic-signal estimators used by the FSK, AM and FM receivers, and
//! the spectrum view used to inspect transmit buffers.

mod hilbert;
mod spectrum;

pub use hilbert::{analytic_signal, envelope, instantaneous_frequency, instantaneous_phase, unwrap_phase};
pub use spectrum::{spectrum_db, Spectrum, Window};
