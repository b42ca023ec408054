//! Demodulator
//!
//! Symmetric with the Modulator: front-end extraction, per-symbol
//! decision through the same constellation, then frame sync, the
//! three-slot decoder and the majority vote.

use num_complex::Complex64;
use tracing::debug;

use super::front_end::FrontEnd;
use crate::config::{ModemConfig, ModulationOrder, Scheme};
use crate::constellations::constellation_for;
use crate::decision::decide;
use crate::decoder::decode_frames;
use crate::error::ModemResult;
use crate::sync::{find_sync, CANDIDATE_COUNT};
use crate::traits::Constellation;
use crate::vote::{resolve, Resolved};

/// Text/symbol demodulator for one scheme and order
pub struct Demodulator {
    scheme: Scheme,
    order: ModulationOrder,
    front_end: FrontEnd,
    /// `None` for FSK, which decides on frequency bands
    constellation: Option<Box<dyn Constellation>>,
}

impl Demodulator {
    /// Create a new demodulator
    pub fn new(scheme: Scheme, order: ModulationOrder, config: ModemConfig) -> ModemResult<Self> {
        let front_end = FrontEnd::new(scheme, order, &config)?;
        let constellation = match scheme {
            Scheme::Fsk => None,
            _ => Some(constellation_for(scheme, order)?),
        };
        Ok(Self {
            scheme,
            order,
            front_end,
            constellation,
        })
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    pub fn order(&self) -> ModulationOrder {
        self.order
    }

    fn decide(&self, value: Complex64) -> u8 {
        match &self.constellation {
            Some(c) => c.iq_to_symbol(value),
            None => decide(value, self.order, self.scheme),
        }
    }

    /// Decided digit stream of a capture
    pub fn demodulate_symbols(&self, samples: &[Complex64]) -> Vec<u8> {
        self.front_end
            .extract(samples)
            .into_iter()
            .map(|v| self.decide(v))
            .collect()
    }

    /// The three per-slot decodes of a capture, before voting
    pub fn candidates(&self, samples: &[Complex64]) -> [String; CANDIDATE_COUNT] {
        let symbols = self.demodulate_symbols(samples);
        let sync = find_sync(&symbols, self.order);
        decode_frames(&sync)
    }

    /// Demodulate a capture to text
    ///
    /// An empty result text means no reliable decode.
    pub fn demodulate(&self, samples: &[Complex64]) -> Resolved {
        let candidates = self.candidates(samples);
        let resolved = resolve(&candidates);
        debug!(
            scheme = %self.scheme,
            order = %self.order,
            samples = samples.len(),
            ?candidates,
            text = %resolved.text,
            agreement = resolved.agreement,
            "demodulated"
        );
        resolved
    }
}
