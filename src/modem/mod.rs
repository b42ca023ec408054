//! Core modem implementations
//!
//! Modulator and Demodulator compose the constellation, pulse shaping,
//! carrier and timing stages for one scheme and order. The receive
//! front-end is public on its own so captures can be inspected before
//! decision.

mod demodulator;
mod front_end;
mod modulator;


pub use demodulator::Demodulator;
pub use front_end::{extract_symbol_samples, FrontEnd};
pub use modulator::{fsk_modulate, Modulator};
