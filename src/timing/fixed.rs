//! Fixed symbol timing
//!
//! Simple deterministic decimation for a known repetition factor. No timing
//! recovery: frame alignment is recovered later from the start sentinel.

use crate::config::{SchemeProfile, DECISION_OFFSET};
use crate::traits::SymbolTiming;

/// Fixed symbol timing (deterministic decimation)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedTiming {
    sample_rate: f64,
    samples_per_symbol: usize,
    decision_offset: usize,
}

impl FixedTiming {
    /// Create fixed timing
    ///
    /// # Arguments
    /// * `sample_rate` - Sample rate in Hz
    /// * `samples_per_symbol` - Repetition factor
    /// * `decision_offset` - Sample index within each block used for decisions;
    ///   clamped to the last sample of the block
    pub fn new(sample_rate: f64, samples_per_symbol: usize, decision_offset: usize) -> Self {
        let samples_per_symbol = samples_per_symbol.max(1);
        Self {
            sample_rate,
            samples_per_symbol,
            decision_offset: decision_offset.min(samples_per_symbol - 1),
        }
    }

    /// Timing for a scheme profile
    pub fn for_profile(profile: &SchemeProfile, sample_rate: f64) -> Self {
        Self::new(sample_rate, profile.repetition, profile.decision_offset)
    }

    /// Number of whole or partial symbol blocks in `len` samples whose
    /// decision point lies inside the buffer
    pub fn decision_count(&self, len: usize) -> usize {
        if len <= self.decision_offset {
            return 0;
        }
        (len - self.decision_offset - 1) / self.samples_per_symbol + 1
    }
}

impl Default for FixedTiming {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_SAMPLE_RATE, 25, DECISION_OFFSET)
    }
}

impl SymbolTiming for FixedTiming {
    fn samples_per_symbol(&self) -> usize {
        self.samples_per_symbol
    }

    fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    fn decision_offset(&self) -> usize {
        self.decision_offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Scheme;

    #[test]
    fn test_fixed_timing_qam() {
        let timing = FixedTiming::for_profile(&Scheme::Qam.profile(), 600_000.0);
        assert_eq!(timing.samples_per_symbol(), 25);
        assert_eq!(timing.symbol_rate(), 24_000.0);
        assert_eq!(timing.decision_offset(), 5);
        assert_eq!(timing.decision_index(3), 80);
    }

    #[test]
    fn test_decision_count() {
        let timing = FixedTiming::new(600_000.0, 25, 5);
        assert_eq!(timing.decision_count(0), 0);
        assert_eq!(timing.decision_count(5), 0);
        assert_eq!(timing.decision_count(6), 1);
        assert_eq!(timing.decision_count(425), 17);
        assert_eq!(timing.decision_count(430), 17);
        assert_eq!(timing.decision_count(431), 18);
    }

    #[test]
    fn test_offset_clamped() {
        let timing = FixedTiming::new(600_000.0, 4, 5);
        assert_eq!(timing.decision_offset(), 3);
    }
}
