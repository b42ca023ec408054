//! Modulator
//!
//! Composes a constellation (or the FSK tone plan), the transmit pulse
//! shaping filter and the symbol timing for one scheme and order. Output is
//! a complex baseband buffer at DAC full scale, ready to be replayed
//! cyclically by the SDR.

use num_complex::Complex64;
use tracing::debug;

use crate::carriers::{fsk_synthesize, FskTones};
use crate::config::{ModemConfig, ModulationOrder, Scheme, SchemeProfile};
use crate::constellations::constellation_for;
use crate::error::{ModemError, ModemResult};
use crate::framing::encode_text;
use crate::pulse_shapes::{self, scale_to_full_scale, shape_and_scale, Butterworth};
use crate::traits::{Constellation, PulseShape};

/// Symbol-to-waveform stage
enum Waveform {
    Points {
        constellation: Box<dyn Constellation>,
        filter: Option<Butterworth>,
    },
    Tones(FskTones),
}

/// Text/symbol modulator for one scheme and order
pub struct Modulator {
    scheme: Scheme,
    order: ModulationOrder,
    config: ModemConfig,
    profile: SchemeProfile,
    waveform: Waveform,
}

impl Modulator {
    /// Create a new modulator
    ///
    /// # Arguments
    /// * `scheme` - Modulation family
    /// * `order` - Modulation order
    /// * `config` - Sample rate and full scale
    pub fn new(scheme: Scheme, order: ModulationOrder, config: ModemConfig) -> ModemResult<Self> {
        config.validate()?;
        scheme.check_order(order)?;

        let profile = scheme.profile();
        let waveform = match scheme {
            Scheme::Fsk => Waveform::Tones(FskTones::standard(order)),
            _ => Waveform::Points {
                constellation: constellation_for(scheme, order)?,
                filter: profile
                    .tx_filter
                    .map(|spec| pulse_shapes::design(&spec, config.sample_rate))
                    .transpose()?,
            },
        };

        Ok(Self {
            scheme,
            order,
            config,
            profile,
            waveform,
        })
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    pub fn order(&self) -> ModulationOrder {
        self.order
    }

    /// Samples per symbol
    pub fn repetition(&self) -> usize {
        self.profile.repetition
    }

    /// Frame and modulate an ASCII message
    pub fn modulate_text(&self, text: &str) -> ModemResult<Vec<Complex64>> {
        let symbols = encode_text(text, self.order)?;
        let samples = self.modulate_symbols(&symbols)?;
        debug!(
            scheme = %self.scheme,
            order = %self.order,
            chars = text.len(),
            symbols = symbols.len(),
            samples = samples.len(),
            "modulated text"
        );
        Ok(samples)
    }

    /// Modulate a raw digit stream
    ///
    /// Point schemes produce `(symbols + 1) · repetition` samples (one
    /// extra period closes the cyclic buffer); FSK produces
    /// `symbols · repetition`.
    pub fn modulate_symbols(&self, symbols: &[u8]) -> ModemResult<Vec<Complex64>> {
        let n = self.order.value();
        if let Some(&symbol) = symbols.iter().find(|&&s| s as u32 >= n) {
            return Err(ModemError::InvalidSymbol { symbol, order: n });
        }

        let rep = self.profile.repetition;
        let samples = match &self.waveform {
            Waveform::Points {
                constellation,
                filter,
            } => {
                let points: Vec<Complex64> =
                    symbols.iter().map(|&s| constellation.symbol_to_iq(s)).collect();
                shape_and_scale(
                    &points,
                    rep,
                    filter.as_ref().map(|f| f as &dyn PulseShape),
                    self.config.full_scale,
                )
            }
            Waveform::Tones(tones) => {
                let mut samples = fsk_synthesize(symbols, tones, rep, self.config.sample_rate);
                scale_to_full_scale(&mut samples, self.config.full_scale);
                samples
            }
        };
        Ok(samples)
    }
}

/// Unit-amplitude continuous-phase FSK on the standard tone plan
///
/// # Arguments
/// * `symbols` - Digits in `[0, order)`
/// * `order` - Modulation order
/// * `repetition` - Samples per symbol
/// * `sample_rate` - Sample rate in Hz
pub fn fsk_modulate(
    symbols: &[u8],
    order: ModulationOrder,
    repetition: usize,
    sample_rate: f64,
) -> Vec<Complex64> {
    fsk_synthesize(symbols, &FskTones::standard(order), repetition, sample_rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn peak(samples: &[Complex64]) -> f64 {
        samples
            .iter()
            .fold(0.0_f64, |m, z| m.max(z.re.abs()).max(z.im.abs()))
    }

    #[test]
    fn test_qam_hi_length_and_scale() {
        let modulator =
            Modulator::new(Scheme::Qam, ModulationOrder::Quaternary, ModemConfig::default()).unwrap();
        let samples = modulator.modulate_text("HI").unwrap();
        // 16 digits plus the closing period, 25 samples each
        assert_eq!(samples.len(), 17 * 25);
        assert!((peak(&samples) - 16384.0).abs() < 1e-6);
    }

    #[test]
    fn test_ask_is_real() {
        let modulator =
            Modulator::new(Scheme::Ask, ModulationOrder::Octal, ModemConfig::default()).unwrap();
        let samples = modulator.modulate_symbols(&[0, 7, 3, 5]).unwrap();
        assert_eq!(samples.len(), 5 * 30);
        assert!(samples.iter().all(|z| z.im == 0.0));
        assert!(samples.iter().all(|z| z.re > 0.0));
    }

    #[test]
    fn test_cyclic_closure() {
        // The closing period repeats the first symbol, so the buffer wraps cleanly
        let modulator =
            Modulator::new(Scheme::Psk, ModulationOrder::Quaternary, ModemConfig::default()).unwrap();
        let samples = modulator.modulate_symbols(&[0, 2, 2, 2, 2, 1]).unwrap();
        let first = samples[0];
        let last = samples[samples.len() - 1];
        assert!((first - last).norm() < 0.1 * 16384.0);
        assert!(first.re > 0.0 && first.im > 0.0);
        assert!(last.re > 0.0 && last.im > 0.0);
    }

    #[test]
    fn test_fsk_no_padding() {
        let modulator =
            Modulator::new(Scheme::Fsk, ModulationOrder::Quaternary, ModemConfig::default()).unwrap();
        let samples = modulator.modulate_symbols(&[0, 1, 2, 3]).unwrap();
        assert_eq!(samples.len(), 4 * 50);
        for z in &samples {
            assert!((z.norm() - 16384.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_fsk_modulate_continuous_phase() {
        let samples = fsk_modulate(&[0, 3, 1, 2, 0, 3], ModulationOrder::Quaternary, 50, 600_000.0);
        for w in samples.windows(2) {
            assert!((w[1] * w[0].conj()).arg().abs() < PI);
        }
    }

    #[test]
    fn test_rejects_invalid_input() {
        let modulator =
            Modulator::new(Scheme::Psk, ModulationOrder::Binary, ModemConfig::default()).unwrap();
        assert_eq!(
            modulator.modulate_symbols(&[0, 1, 2]),
            Err(ModemError::InvalidSymbol { symbol: 2, order: 2 })
        );
        assert!(modulator.modulate_text("naïve").is_err());
        assert!(Modulator::new(Scheme::Qam, ModulationOrder::Binary, ModemConfig::default()).is_err());
    }

    #[test]
    fn test_empty_text_still_framed() {
        let modulator =
            Modulator::new(Scheme::Psk, ModulationOrder::Octal, ModemConfig::default()).unwrap();
        let samples = modulator.modulate_text("").unwrap();
        assert_eq!(samples.len(), (8 + 1) * 25);
    }
}
