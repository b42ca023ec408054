//! Constellation trait - Symbol ↔ I/Q mapping
//!
//! Defines how symbol indices map to complex baseband points.
//! This trait knows nothing about framing or synchronization.

use num_complex::Complex64;

use crate::config::ModulationOrder;

/// Symbol alphabet mapping trait
///
/// Implementations define the geometry of the constellation diagram
/// (modulator side) and its literal decision regions (demodulator side).
pub trait Constellation: Send + Sync {
    /// Modulation order of this alphabet
    fn order(&self) -> ModulationOrder;

    /// Bits per symbol (log2 of order)
    fn bits_per_symbol(&self) -> usize {
        self.order().value().trailing_zeros() as usize
    }

    /// Map a symbol index to a baseband point
    ///
    /// # Arguments
    /// * `sym` - Symbol index (0 to order-1)
    fn symbol_to_iq(&self, sym: u8) -> Complex64;

    /// Hard decision on a normalized, calibrated receive sample
    ///
    /// # Returns
    /// Symbol index (0 to order-1)
    fn iq_to_symbol(&self, z: Complex64) -> u8;
}
