//! SymbolTiming trait - Sample/symbol rate relationship
//!
//! Defines how many samples per symbol period and where in the period the
//! receiver takes its decision sample.

/// Symbol timing trait
pub trait SymbolTiming: Send + Sync {
    /// Samples per symbol period
    fn samples_per_symbol(&self) -> usize;

    /// Sample rate in Hz
    fn sample_rate(&self) -> f64;

    /// Symbol rate in baud
    fn symbol_rate(&self) -> f64 {
        self.sample_rate() / self.samples_per_symbol() as f64
    }

    /// Sample index within a symbol period where the decision is made
    fn decision_offset(&self) -> usize;

    /// Absolute sample index of the decision point of symbol `k`
    fn decision_index(&self, k: usize) -> usize {
        k * self.samples_per_symbol() + self.decision_offset()
    }
}
