//! Additive White Gaussian Noise generator
//!
//! Uses Box-Muller transform for Gaussian samples.

use std::f64::consts::PI;

use num_complex::Complex64;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// AWGN generator with configurable power
pub struct NoiseGenerator {
    /// Standard deviation (sqrt of noise power)
    std_dev: f64,

    /// Internal RNG
    rng: ChaCha8Rng,

    /// Cached second sample from Box-Muller
    cached: Option<f64>,
}

impl NoiseGenerator {
    /// Real Gaussian source with variance `noise_power`
    pub fn new(noise_power: f64, seed: u64) -> Self {
        Self {
            std_dev: noise_power.max(0.0).sqrt(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            cached: None,
        }
    }

    /// Generate next Gaussian noise sample using Box-Muller transform
    pub fn next_sample(&mut self) -> f64 {
        if let Some(cached) = self.cached.take() {
            return cached * self.std_dev;
        }

        let u1: f64 = self.rng.gen();
        let u2: f64 = self.rng.gen();

        // Avoid log(0)
        let u1 = u1.max(1e-10);

        let r = (-2.0 * u1.ln()).sqrt();
        let theta = 2.0 * PI * u2;

        self.cached = Some(r * theta.sin());

        r * theta.cos() * self.std_dev
    }

    /// Circular complex sample with total power `noise_power`
    /// (half on each rail)
    pub fn next_complex(&mut self) -> Complex64 {
        let re = self.next_sample();
        let im = self.next_sample();
        Complex64::new(re, im) * std::f64::consts::FRAC_1_SQRT_2
    }
}
