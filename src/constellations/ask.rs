//! ASK constellation
//!
//! Amplitude `sym/(n-1) + 0.5` on the real axis, so every level is
//! strictly positive and the envelope never crosses zero.

use num_complex::Complex64;

use crate::config::{ModulationOrder, Scheme};
use crate::decision;
use crate::traits::Constellation;

/// Amplitude Shift Keying constellation
#[derive(Debug, Clone, Copy)]
pub struct Ask {
    order: ModulationOrder,
}

impl Ask {
    pub fn new(order: ModulationOrder) -> Self {
        Self { order }
    }
}

impl Constellation for Ask {
    fn order(&self) -> ModulationOrder {
        self.order
    }

    fn symbol_to_iq(&self, sym: u8) -> Complex64 {
        let levels = (self.order.value() - 1) as f64;
        Complex64::new(sym as f64 / levels + 0.5, 0.0)
    }

    /// Expects the front-end output: centered and scaled to ±1
    fn iq_to_symbol(&self, z: Complex64) -> u8 {
        decision::decide(z, self.order, Scheme::Ask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Map a raw level into the centered ±1 range the receiver produces
    fn centered(z: Complex64) -> Complex64 {
        (z - 1.0) * 2.0
    }

    #[test]
    fn test_ask_levels() {
        let ask = Ask::new(ModulationOrder::Quaternary);
        let levels: Vec<f64> = (0..4).map(|s| ask.symbol_to_iq(s).re).collect();
        let expected = [0.5, 0.5 + 1.0 / 3.0, 0.5 + 2.0 / 3.0, 1.5];
        for (got, want) in levels.iter().zip(expected) {
            assert!((got - want).abs() < 1e-12);
        }
        assert!(levels.iter().all(|&l| l > 0.0));
    }

    #[test]
    fn test_ask_roundtrip() {
        for order in [ModulationOrder::Binary, ModulationOrder::Quaternary] {
            let ask = Ask::new(order);
            for sym in 0..order.value() as u8 {
                let recovered = ask.iq_to_symbol(centered(ask.symbol_to_iq(sym)));
                assert_eq!(sym, recovered, "Symbol {} roundtrip failed", sym);
            }
        }
    }

    #[test]
    fn test_ask_order() {
        assert_eq!(Ask::new(ModulationOrder::Octal).bits_per_symbol(), 3);
    }
}
