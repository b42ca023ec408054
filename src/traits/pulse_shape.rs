//! PulseShape trait - Spectral shaping of block signals
//!
//! The modem works on whole buffers, so shaping is a zero-phase
//! (forward-backward) filter rather than a streaming convolution.

use num_complex::Complex64;

/// Block low-pass filter trait
///
/// Used on TX to soften symbol transitions and on RX to band-limit the
/// capture before decimation.
pub trait PulseShape: Send + Sync {
    /// Filter order
    fn order(&self) -> usize;

    /// Single causal pass over a real signal
    fn filter(&self, x: &[f64]) -> Vec<f64>;

    /// Zero-phase forward-backward pass over a real signal
    fn filtfilt(&self, x: &[f64]) -> Vec<f64>;

    /// Zero-phase pass over a complex signal (real coefficients, so the
    /// I and Q rails are filtered independently)
    fn filtfilt_complex(&self, x: &[Complex64]) -> Vec<Complex64> {
        let re: Vec<f64> = x.iter().map(|z| z.re).collect();
        let im: Vec<f64> = x.iter().map(|z| z.im).collect();
        self.filtfilt(&re)
            .into_iter()
            .zip(self.filtfilt(&im))
            .map(|(r, i)| Complex64::new(r, i))
            .collect()
    }
}
