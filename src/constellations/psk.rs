//! PSK constellation
//!
//! Symbol k sits at phase `k·2π/n`. The 4-PSK points are rotated by 45°
//! so each one is centered in a quadrant. 2-PSK is the pair ±1 on the
//! real axis.

use std::f64::consts::{FRAC_PI_4, TAU};

use num_complex::Complex64;

use crate::config::{ModulationOrder, Scheme};
use crate::decision;
use crate::traits::Constellation;

/// Phase Shift Keying constellation
#[derive(Debug, Clone, Copy)]
pub struct Psk {
    order: ModulationOrder,
}

impl Psk {
    pub fn new(order: ModulationOrder) -> Self {
        Self { order }
    }
}

impl Constellation for Psk {
    fn order(&self) -> ModulationOrder {
        self.order
    }

    fn symbol_to_iq(&self, sym: u8) -> Complex64 {
        match self.order {
            ModulationOrder::Binary => {
                if sym & 1 == 0 {
                    Complex64::new(1.0, 0.0)
                } else {
                    Complex64::new(-1.0, 0.0)
                }
            }
            ModulationOrder::Quaternary => {
                Complex64::from_polar(1.0, (sym % 4) as f64 * TAU / 4.0 + FRAC_PI_4)
            }
            ModulationOrder::Octal => Complex64::from_polar(1.0, (sym % 8) as f64 * TAU / 8.0),
        }
    }

    fn iq_to_symbol(&self, z: Complex64) -> u8 {
        decision::decide(z, self.order, Scheme::Psk)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_psk_roundtrip() {
        for order in [ModulationOrder::Binary, ModulationOrder::Quaternary, ModulationOrder::Octal] {
            let psk = Psk::new(order);
            for sym in 0..order.value() as u8 {
                let z = psk.symbol_to_iq(sym);
                assert_eq!(sym, psk.iq_to_symbol(z), "Order {} symbol {} roundtrip failed", order, sym);
            }
        }
    }

    #[test]
    fn test_bpsk_is_real() {
        let bpsk = Psk::new(ModulationOrder::Binary);
        assert_eq!(bpsk.symbol_to_iq(0), Complex64::new(1.0, 0.0));
        assert_eq!(bpsk.symbol_to_iq(1), Complex64::new(-1.0, 0.0));
    }

    #[test]
    fn test_qpsk_quadrant_centered() {
        let qpsk = Psk::new(ModulationOrder::Quaternary);
        let z = qpsk.symbol_to_iq(0);
        assert!((z.re - z.im).abs() < 1e-12);
        assert!(z.re > 0.0);
    }

    #[test]
    fn test_psk_unit_power() {
        let psk8 = Psk::new(ModulationOrder::Octal);
        for sym in 0..8u8 {
            let power = psk8.symbol_to_iq(sym).norm_sqr();
            assert!((power - 1.0).abs() < 1e-10, "Symbol {} power: {}", sym, power);
        }
    }
}
