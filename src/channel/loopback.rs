//! Simulated SDR loopback
//!
//! An SDR in cyclic-buffer mode replays the transmit buffer forever, so a
//! capture of any length holds several back-to-back copies of the frame.
//! The loopback reproduces that, optionally with a carrier phase offset
//! and AWGN at a given SNR.

use num_complex::Complex64;
use tracing::debug;

use super::NoiseGenerator;
use crate::utils::db_to_power;

/// Loopback channel parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Loopback {
    /// Number of back-to-back copies of the transmit buffer
    pub repeats: usize,
    /// Signal-to-noise ratio in dB; `None` for a noiseless channel
    pub snr_db: Option<f64>,
    /// Carrier phase offset in radians
    pub phase_offset: f64,
    /// Noise seed
    pub seed: u64,
}

impl Loopback {
    /// Noiseless single pass
    pub fn ideal() -> Self {
        Self {
            repeats: 1,
            snr_db: None,
            phase_offset: 0.0,
            seed: 0,
        }
    }

    /// Noiseless cyclic replay
    pub fn cyclic(repeats: usize) -> Self {
        Self {
            repeats,
            ..Self::ideal()
        }
    }

    pub fn with_snr_db(mut self, snr_db: f64) -> Self {
        self.snr_db = Some(snr_db);
        self
    }

    pub fn with_phase_offset(mut self, phase_offset: f64) -> Self {
        self.phase_offset = phase_offset;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Pass a transmit buffer through the channel
    pub fn transmit(&self, samples: &[Complex64]) -> Vec<Complex64> {
        let rotation = Complex64::from_polar(1.0, self.phase_offset);
        let mut out: Vec<Complex64> = samples
            .iter()
            .cycle()
            .take(samples.len() * self.repeats)
            .map(|&z| z * rotation)
            .collect();

        if let Some(snr_db) = self.snr_db {
            if out.is_empty() {
                return out;
            }
            let signal_power = out.iter().map(|z| z.norm_sqr()).sum::<f64>() / out.len() as f64;
            let noise_power = signal_power / db_to_power(snr_db);
            debug!(snr_db, signal_power, noise_power, "adding channel noise");

            let mut noise = NoiseGenerator::new(noise_power, self.seed);
            out.iter_mut().for_each(|z| *z += noise.next_complex());
        }
        out
    }
}

impl Default for Loopback {
    fn default() -> Self {
        Self::ideal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cyclic_copies() {
        let tx: Vec<Complex64> = (0..5).map(|i| Complex64::new(i as f64, 0.0)).collect();
        let rx = Loopback::cyclic(3).transmit(&tx);
        assert_eq!(rx.len(), 15);
        assert_eq!(rx[5], tx[0]);
        assert_eq!(rx[14], tx[4]);
    }

    #[test]
    fn test_phase_offset() {
        let tx = vec![Complex64::new(1.0, 0.0); 4];
        let rx = Loopback::ideal()
            .with_phase_offset(std::f64::consts::FRAC_PI_2)
            .transmit(&tx);
        assert!((rx[0] - Complex64::new(0.0, 1.0)).norm() < 1e-12);
    }

    #[test]
    fn test_snr() {
        let tx = vec![Complex64::new(1.0, 1.0); 20_000];
        let rx = Loopback::ideal().with_snr_db(10.0).with_seed(9).transmit(&tx);
        let noise_power = rx
            .iter()
            .zip(&tx)
            .map(|(r, t)| (r - t).norm_sqr())
            .sum::<f64>()
            / tx.len() as f64;
        // Signal power 2, SNR 10 dB
        assert!((noise_power - 0.2).abs() < 0.02, "Noise power {}", noise_power);
    }

    #[test]
    fn test_empty_buffer() {
        assert!(Loopback::cyclic(4).with_snr_db(0.0).transmit(&[]).is_empty());
    }
}
