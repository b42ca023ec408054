//! Hilbert transform via FFT
//!
//! The analytic signal is formed in the frequency domain: DC (and Nyquist
//! for even lengths) kept, positive bins doubled, negative bins zeroed.
//! Working on the whole buffer avoids the group delay of an FIR Hilbert
//! filter, which the receivers could not tolerate at block edges.

use std::f64::consts::{PI, TAU};

use num_complex::Complex64;
use rustfft::FftPlanner;

/// Analytic signal of a real buffer
pub fn analytic_signal(x: &[f64]) -> Vec<Complex64> {
    let n = x.len();
    if n == 0 {
        return Vec::new();
    }

    let mut buf: Vec<Complex64> = x.iter().map(|&v| Complex64::new(v, 0.0)).collect();
    let mut planner = FftPlanner::<f64>::new();
    planner.plan_fft_forward(n).process(&mut buf);

    let half = n / 2;
    let positive_end = if n % 2 == 0 { half } else { half + 1 };
    for z in &mut buf[1..positive_end] {
        *z *= 2.0;
    }
    for z in &mut buf[half + 1..] {
        *z = Complex64::new(0.0, 0.0);
    }

    planner.plan_fft_inverse(n).process(&mut buf);
    let scale = 1.0 / n as f64;
    buf.iter_mut().for_each(|z| *z *= scale);
    buf
}

/// Remove 2π jumps from a wrapped phase sequence
pub fn unwrap_phase(phases: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(phases.len());
    let Some(&first) = phases.first() else {
        return out;
    };
    out.push(first);
    let mut offset = 0.0;
    for w in phases.windows(2) {
        let mut d = w[1] - w[0];
        while d > PI {
            d -= TAU;
            offset -= TAU;
        }
        while d < -PI {
            d += TAU;
            offset += TAU;
        }
        out.push(w[1] + offset);
    }
    out
}

/// Unwrapped instantaneous phase of a real signal
pub fn instantaneous_phase(x: &[f64]) -> Vec<f64> {
    let wrapped: Vec<f64> = analytic_signal(x).iter().map(|z| z.arg()).collect();
    unwrap_phase(&wrapped)
}

/// Instantaneous frequency in Hz (one value per adjacent sample pair)
pub fn instantaneous_frequency(x: &[f64], sample_rate: f64) -> Vec<f64> {
    let scale = sample_rate / TAU;
    instantaneous_phase(x)
        .windows(2)
        .map(|w| (w[1] - w[0]) * scale)
        .collect()
}

/// Instantaneous amplitude of a real signal
pub fn envelope(x: &[f64]) -> Vec<f64> {
    analytic_signal(x).iter().map(|z| z.norm()).collect()
}
