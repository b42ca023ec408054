//! TxRx Modem - ASK/PSK/FSK/QAM and AM/FM over an SDR loopback
//!
//! Text is framed between start/stop sentinels, written as base-n digits
//! (n = 2, 4 or 8), mapped to baseband and shaped for a cyclic SDR transmit
//! buffer. The receiver extracts one value per symbol, decides it against
//! fixed tables, finds the frame by correlation and decodes three
//! candidates that are settled by majority vote.
//!
//! Everything is a batch computation over complete buffers. Rust handles
//! samples ↔ text; the SDR driver lives in Elixir behind the NIF surface.

pub mod analog;
pub mod carriers;
pub mod channel;
pub mod config;
pub mod constellations;
pub mod decision;
pub mod decoder;
pub mod dsp;
pub mod error;
pub mod framing;
pub mod modem;
pub mod nif;
pub mod pulse_shapes;
pub mod sync;
pub mod timing;
pub mod traits;
pub mod vote;
mod utils;

// Re-export core types for convenience
pub use carriers::{FskTones, Nco};
pub use channel::{Loopback, NoiseGenerator};
pub use config::{Calibration, FilterSpec, ModemConfig, ModulationOrder, Scheme, SchemeProfile};
pub use constellations::{Ask, Psk, Qam};
pub use error::{ModemError, ModemResult};
pub use modem::{extract_symbol_samples, fsk_modulate, Demodulator, FrontEnd, Modulator};
pub use pulse_shapes::Butterworth;
pub use sync::{find_sync, FrameSync};
pub use timing::FixedTiming;
pub use traits::{Carrier, Constellation, PulseShape, SymbolTiming};
pub use vote::{resolve, Resolved};

rustler::init!("Elixir.TxrxModem.Native");
