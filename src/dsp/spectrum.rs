//! Spectrum display helper
//!
//! Windowed FFT, shifted so DC sits in the middle, in dB.

use std::f64::consts::TAU;
use std::str::FromStr;

use num_complex::Complex64;
use rustfft::FftPlanner;

use crate::error::ModemError;
use crate::utils::linear_to_db;

/// Floor added before the log so empty bins stay finite
const MAGNITUDE_FLOOR: f64 = 1e-12;

/// Analysis window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Window {
    #[default]
    None,
    Hann,
    Hamming,
}

impl Window {
    fn coefficient(self, i: usize, n: usize) -> f64 {
        if n < 2 {
            return 1.0;
        }
        let x = TAU * i as f64 / (n - 1) as f64;
        match self {
            Window::None => 1.0,
            Window::Hann => 0.5 - 0.5 * x.cos(),
            Window::Hamming => 0.54 - 0.46 * x.cos(),
        }
    }
}

impl FromStr for Window {
    type Err = ModemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Window::None),
            "hann" => Ok(Window::Hann),
            "hamming" => Ok(Window::Hamming),
            other => Err(ModemError::InvalidConfig(format!("unknown window '{}'", other))),
        }
    }
}

/// Shifted magnitude spectrum with its frequency axis
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Spectrum {
    /// Bin frequencies in Hz, from `-fs/2` upwards
    pub frequencies: Vec<f64>,
    /// `20·log10 |X|` per bin
    pub magnitude_db: Vec<f64>,
}

impl Spectrum {
    /// Frequency of the strongest bin
    pub fn peak_frequency(&self) -> Option<f64> {
        self.magnitude_db
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| self.frequencies[i])
    }
}

/// Compute the spectrum of a complex buffer
///
/// # Arguments
/// * `samples` - Input, truncated or zero-padded to `fft_size`
/// * `fft_size` - Transform length
/// * `window` - Analysis window applied over the used samples
/// * `sample_rate` - Sample rate in Hz
pub fn spectrum_db(
    samples: &[Complex64],
    fft_size: usize,
    window: Window,
    sample_rate: f64,
) -> Spectrum {
    if fft_size == 0 {
        return Spectrum::default();
    }

    let used = samples.len().min(fft_size);
    let mut buf = vec![Complex64::new(0.0, 0.0); fft_size];
    for (i, (dst, &src)) in buf.iter_mut().zip(samples.iter()).enumerate() {
        *dst = src * window.coefficient(i, used);
    }

    FftPlanner::<f64>::new()
        .plan_fft_forward(fft_size)
        .process(&mut buf);
    buf.rotate_right(fft_size / 2);

    let bin_width = sample_rate / fft_size as f64;
    let offset = (fft_size / 2) as f64;
    Spectrum {
        frequencies: (0..fft_size).map(|j| (j as f64 - offset) * bin_width).collect(),
        magnitude_db: buf
            .iter()
            .map(|z| linear_to_db(z.norm() + MAGNITUDE_FLOOR))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tone(freq: f64, fs: f64, len: usize) -> Vec<Complex64> {
        (0..len)
            .map(|i| Complex64::from_polar(1.0, TAU * freq * i as f64 / fs))
            .collect()
    }

    #[test]
    fn test_frequency_axis() {
        let s = spectrum_db(&tone(0.0, 8.0, 8), 8, Window::None, 8.0);
        assert_eq!(s.frequencies, vec![-4.0, -3.0, -2.0, -1.0, 0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_peak_at_tone() {
        let fs = 600_000.0;
        for freq in [75_000.0, -150_000.0] {
            let s = spectrum_db(&tone(freq, fs, 1024), 1024, Window::Hann, fs);
            let peak = s.peak_frequency().unwrap();
            assert!((peak - freq).abs() <= fs / 1024.0, "Peak {} for tone {}", peak, freq);
        }
    }

    #[test]
    fn test_zero_padding_and_empty() {
        let s = spectrum_db(&tone(1.0, 16.0, 4), 16, Window::Hamming, 16.0);
        assert_eq!(s.magnitude_db.len(), 16);
        assert!(s.magnitude_db.iter().all(|v| v.is_finite()));
        assert_eq!(spectrum_db(&[], 0, Window::None, 1.0), Spectrum::default());
    }

    #[test]
    fn test_window_parse() {
        assert_eq!("hann".parse::<Window>(), Ok(Window::Hann));
        assert_eq!("none".parse::<Window>(), Ok(Window::None));
        assert!("kaiser".parse::<Window>().is_err());
    }
}
