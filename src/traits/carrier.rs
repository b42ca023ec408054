//! Carrier trait - Frequency/phase generation
//!
//! Defines the oscillator used for FSK tones, FM and up-conversion.
//! Pure physics - no modulation awareness.

use num_complex::Complex64;

/// Carrier oscillator trait
///
/// Implementations integrate frequency into phase sample by sample, so a
/// frequency change never produces a phase discontinuity.
pub trait Carrier: Send + Sync {
    /// Advance the phase by one sample and return `exp(j·phase)`
    fn next(&mut self) -> Complex64;

    /// Reset the oscillator phase to zero
    fn reset(&mut self);

    /// Get the current phase (radians)
    fn phase(&self) -> f64;

    /// Get the oscillator frequency in Hz
    fn frequency(&self) -> f64;

    /// Retune; takes effect from the next sample
    fn set_frequency(&mut self, freq_hz: f64);
}
