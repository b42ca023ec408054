//! QAM constellation
//!
//! Literal lookup table, not a formula:
//! ```text
//! Symbol 0 → +1+1j    Symbol 4 → +3+3j
//! Symbol 1 → -1+1j    Symbol 5 → -3+3j
//! Symbol 2 → -1-1j    Symbol 6 → -3-3j
//! Symbol 3 → +1-1j    Symbol 7 → +3-3j
//! ```
//! 4-QAM uses the inner ring only; 8-QAM adds the outer ring.

use num_complex::Complex64;

use crate::config::{ModulationOrder, Scheme};
use crate::decision;
use crate::error::{ModemError, ModemResult};
use crate::traits::Constellation;

const QAM_POINTS: [(f64, f64); 8] = [
    (1.0, 1.0),
    (-1.0, 1.0),
    (-1.0, -1.0),
    (1.0, -1.0),
    (3.0, 3.0),
    (-3.0, 3.0),
    (-3.0, -3.0),
    (3.0, -3.0),
];

/// Quadrature Amplitude Modulation constellation (orders 4 and 8)
#[derive(Debug, Clone, Copy)]
pub struct Qam {
    order: ModulationOrder,
}

impl Qam {
    pub fn new(order: ModulationOrder) -> ModemResult<Self> {
        Scheme::Qam.check_order(order)?;
        Ok(Self { order })
    }
}

impl Constellation for Qam {
    fn order(&self) -> ModulationOrder {
        self.order
    }

    fn symbol_to_iq(&self, sym: u8) -> Complex64 {
        let (i, q) = QAM_POINTS[sym as usize % self.order.value() as usize];
        Complex64::new(i, q)
    }

    /// Expects the front-end output: scaled so the outer ring has magnitude 1
    fn iq_to_symbol(&self, z: Complex64) -> u8 {
        decision::decide(z, self.order, Scheme::Qam)
    }
}

impl TryFrom<u32> for Qam {
    type Error = ModemError;

    fn try_from(n: u32) -> ModemResult<Self> {
        Qam::new(ModulationOrder::try_from(n)?)
    }
}
