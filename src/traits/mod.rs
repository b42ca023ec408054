//! Seams between the modem stages
//!
//! Point mapping, smoothing, oscillators and symbol timing each sit behind
//! one trait so the modulator and front end can compose them per scheme.

mod carrier;
mod constellation;
mod pulse_shape;
mod timing;

pub use carrier::Carrier;
pub use constellation::Constellation;
pub use pulse_shape::PulseShape;
pub use timing::SymbolTiming;
