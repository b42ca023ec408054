//! Numerically Controlled Oscillator (NCO)
//!
//! Integrates frequency into phase one sample at a time. Retuning between
//! samples changes only the slope of the phase, never its value, which is
//! what makes FSK and FM continuous-phase.

use std::f64::consts::TAU;

use num_complex::Complex64;

use crate::traits::Carrier;

/// Numerically Controlled Oscillator
#[derive(Debug, Clone)]
pub struct Nco {
    phase: f64,
    phase_inc: f64,
    freq_hz: f64,
    sample_rate: f64,
}

impl Nco {
    /// Create a new NCO
    ///
    /// # Arguments
    /// * `freq_hz` - Initial frequency in Hz
    /// * `sample_rate` - Sample rate in Hz
    pub fn new(freq_hz: f64, sample_rate: f64) -> Self {
        Self {
            phase: 0.0,
            phase_inc: TAU * freq_hz / sample_rate,
            freq_hz,
            sample_rate,
        }
    }

    /// Run the oscillator over a per-sample frequency track
    ///
    /// Phase after sample `i` is the running sum of `2π·f[0..=i]/fs`.
    pub fn synthesize(&mut self, freqs_hz: impl IntoIterator<Item = f64>) -> Vec<Complex64> {
        freqs_hz
            .into_iter()
            .map(|f| {
                self.set_frequency(f);
                self.next()
            })
            .collect()
    }
}

impl Carrier for Nco {
    fn next(&mut self) -> Complex64 {
        self.phase += self.phase_inc;

        // Keep phase in [0, 2π) for numerical stability
        self.phase = self.phase.rem_euclid(TAU);

        Complex64::from_polar(1.0, self.phase)
    }

    fn reset(&mut self) {
        self.phase = 0.0;
    }

    fn phase(&self) -> f64 {
        self.phase
    }

    fn frequency(&self) -> f64 {
        self.freq_hz
    }

    fn set_frequency(&mut self, freq_hz: f64) {
        self.freq_hz = freq_hz;
        self.phase_inc = TAU * freq_hz / self.sample_rate;
    }
}
