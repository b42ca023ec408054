//! Butterworth low-pass filter
//!
//! Designed as cascaded second-order sections via the bilinear transform
//! with frequency prewarping, and run in Direct Form II Transposed. High
//! orders (15 on the transmit path) stay well conditioned in this form.
//!
//! `filtfilt` runs the cascade forward and backward over an odd-reflected
//! extension of the input, starting each pass from the steady state of the
//! first sample, so the result has zero phase and no start-up transient.

use std::f64::consts::PI;

use num_complex::Complex64;

use crate::error::{ModemError, ModemResult};
use crate::traits::PulseShape;

/// Highest supported design order
pub const MAX_ORDER: usize = 32;

/// Bilinear transform constant for a unit sample rate
const K: f64 = 2.0;

/// One second-order section, `a0` normalized to 1
#[derive(Debug, Clone, Copy, PartialEq)]
struct Section {
    b: [f64; 3],
    a: [f64; 2],
}

impl Section {
    /// Conjugate analog pole pair with the given real part and squared magnitude
    fn from_pole_pair(re: f64, mag2: f64) -> Self {
        let d = K * K - 2.0 * K * re + mag2;
        Self {
            b: [mag2 / d, 2.0 * mag2 / d, mag2 / d],
            a: [2.0 * (mag2 - K * K) / d, (K * K + 2.0 * K * re + mag2) / d],
        }
    }

    /// Single real analog pole at `p` (< 0)
    fn from_real_pole(p: f64) -> Self {
        let alpha = K - p;
        Self {
            b: [-p / alpha, -p / alpha, 0.0],
            a: [-(K + p) / alpha, 0.0],
        }
    }

    fn dc_gain(&self) -> f64 {
        (self.b[0] + self.b[1] + self.b[2]) / (1.0 + self.a[0] + self.a[1])
    }

    /// DF2T state that holds a constant input `x0` at its steady output
    fn steady_state(&self, x0: f64) -> [f64; 2] {
        let y0 = self.dc_gain() * x0;
        [y0 - self.b[0] * x0, self.b[2] * x0 - self.a[1] * y0]
    }

    fn run(&self, signal: &mut [f64], mut state: [f64; 2]) {
        for x in signal.iter_mut() {
            let input = *x;
            let output = self.b[0] * input + state[0];
            state[0] = self.b[1] * input - self.a[0] * output + state[1];
            state[1] = self.b[2] * input - self.a[1] * output;
            *x = output;
        }
    }

    fn response(&self, omega: f64) -> Complex64 {
        let z1 = Complex64::from_polar(1.0, -omega);
        let z2 = z1 * z1;
        let num = self.b[0] + self.b[1] * z1 + self.b[2] * z2;
        let den = 1.0 + self.a[0] * z1 + self.a[1] * z2;
        num / den
    }
}

/// Digital Butterworth low-pass as a cascade of biquads
#[derive(Debug, Clone, PartialEq)]
pub struct Butterworth {
    sections: Vec<Section>,
    order: usize,
    cutoff: f64,
}

impl Butterworth {
    /// Design a low-pass filter
    ///
    /// # Arguments
    /// * `order` - Filter order (1 to 32)
    /// * `cutoff` - -3 dB point as a fraction of Nyquist, in (0, 1)
    pub fn lowpass(order: usize, cutoff: f64) -> ModemResult<Self> {
        if order == 0 || order > MAX_ORDER || !(cutoff > 0.0 && cutoff < 1.0) {
            return Err(ModemError::InvalidFilter { order, cutoff });
        }

        // Prewarped analog cutoff for a unit sample rate
        let wc = K * (PI * cutoff / 2.0).tan();

        let mut sections = Vec::with_capacity(order.div_ceil(2));
        for k in 0..order / 2 {
            let theta = PI * (2 * k + order + 1) as f64 / (2 * order) as f64;
            sections.push(Section::from_pole_pair(wc * theta.cos(), wc * wc));
        }
        if order % 2 == 1 {
            sections.push(Section::from_real_pole(-wc));
        }

        Ok(Self {
            sections,
            order,
            cutoff,
        })
    }

    /// Design from a cutoff in Hz, normalized as `cutoff_hz / sample_rate`
    pub fn from_hz(order: usize, cutoff_hz: f64, sample_rate: f64) -> ModemResult<Self> {
        Self::lowpass(order, cutoff_hz / sample_rate)
    }

    /// Cutoff as a fraction of Nyquist
    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    /// Magnitude response at a frequency given as a fraction of Nyquist
    pub fn magnitude_at(&self, freq: f64) -> f64 {
        let omega = PI * freq;
        self.sections
            .iter()
            .map(|s| s.response(omega))
            .fold(Complex64::new(1.0, 0.0), |acc, h| acc * h)
            .norm()
    }

    /// Run the cascade with every section started at the steady state of `x[0]`
    fn run_settled(&self, signal: &mut [f64]) {
        let Some(&first) = signal.first() else {
            return;
        };
        let mut level = first;
        for section in &self.sections {
            let state = section.steady_state(level);
            section.run(signal, state);
            level *= section.dc_gain();
        }
    }
}

impl PulseShape for Butterworth {
    fn order(&self) -> usize {
        self.order
    }

    fn filter(&self, x: &[f64]) -> Vec<f64> {
        let mut y = x.to_vec();
        for section in &self.sections {
            section.run(&mut y, [0.0; 2]);
        }
        y
    }

    fn filtfilt(&self, x: &[f64]) -> Vec<f64> {
        let n = x.len();
        if n < 2 {
            return x.to_vec();
        }
        let pad = (3 * (self.order + 1)).min(n - 1);
        let first = x[0];
        let last = x[n - 1];

        let mut ext = Vec::with_capacity(n + 2 * pad);
        ext.extend((1..=pad).rev().map(|i| 2.0 * first - x[i]));
        ext.extend_from_slice(x);
        ext.extend((1..=pad).map(|i| 2.0 * last - x[n - 1 - i]));

        self.run_settled(&mut ext);
        ext.reverse();
        self.run_settled(&mut ext);
        ext.reverse();

        ext[pad..pad + n].to_vec()
    }
}
