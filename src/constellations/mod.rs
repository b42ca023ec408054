//! Constellation implementations
//!
//! Point constellations for the amplitude/phase families:
//! - ASK (orders 2, 4, 8)
//! - PSK (orders 2, 4, 8)
//! - QAM (orders 4, 8)
//!
//! FSK is tone based and lives in [`crate::carriers`].

mod ask;
mod psk;
mod qam;

pub use ask::Ask;
pub use psk::Psk;
pub use qam::Qam;

use num_complex::Complex64;

use crate::config::{ModulationOrder, Scheme};
use crate::error::{ModemError, ModemResult};
use crate::traits::Constellation;

/// Build the constellation for a scheme
pub fn constellation_for(
    scheme: Scheme,
    order: ModulationOrder,
) -> ModemResult<Box<dyn Constellation>> {
    match scheme {
        Scheme::Ask => Ok(Box::new(Ask::new(order))),
        Scheme::Psk => Ok(Box::new(Psk::new(order))),
        Scheme::Qam => Ok(Box::new(Qam::new(order)?)),
        Scheme::Fsk => Err(ModemError::NotAConstellation(scheme)),
    }
}

/// Map a symbol stream to baseband points, one point per symbol
///
/// # Arguments
/// * `symbols` - Digits in `[0, order)`
/// * `order` - Modulation order
/// * `scheme` - ASK, PSK or QAM
pub fn map_symbols(
    symbols: &[u8],
    order: ModulationOrder,
    scheme: Scheme,
) -> ModemResult<Vec<Complex64>> {
    let constellation = constellation_for(scheme, order)?;
    symbols
        .iter()
        .map(|&sym| {
            if sym as u32 >= order.value() {
                return Err(ModemError::InvalidSymbol {
                    symbol: sym,
                    order: order.value(),
                });
            }
            Ok(constellation.symbol_to_iq(sym))
        })
        .collect()
}
