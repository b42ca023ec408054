//! Symbol timing implementations
//!
//! Currently only fixed timing (deterministic decimation at a fixed
//! offset into each symbol block).

mod fixed;

pub use fixed::FixedTiming;
