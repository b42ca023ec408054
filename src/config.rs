//! Modem configuration
//!
//! Sample rate, transmit full scale and receive calibration are threaded
//! explicitly through every encode/decode call via [`ModemConfig`]. The
//! per-scheme constants (repetition, filters, decision offset) live in
//! [`SchemeProfile`].

use std::f64::consts::PI;
use std::fmt;

use crate::error::{ModemError, ModemResult};

/// Default SDR sample rate in Hz
pub const DEFAULT_SAMPLE_RATE: f64 = 600_000.0;

/// Default transmit full scale (12-bit DAC with headroom)
pub const DEFAULT_FULL_SCALE: f64 = 16_384.0;

/// Sample index within each symbol block used for the decision
pub const DECISION_OFFSET: usize = 5;

/// FSK centre frequency in Hz
pub const FSK_CARRIER_HZ: f64 = 80_000.0;

/// FSK tone spacing in Hz
pub const FSK_TONE_SPACING_HZ: f64 = 3_000.0;

/// Symbols skipped at the start of an FSK capture while the estimator settles
pub const FSK_SETTLE_SYMBOLS: usize = 2;

/// FM deviation in Hz per unit of input signal
pub const FM_DEVIATION_HZ: f64 = 1_000.0;

/// Post-detection low-pass used by the AM and FM demodulators
pub const ANALOG_POST_FILTER: FilterSpec = FilterSpec {
    order: 7,
    cutoff_hz: 35_000.0,
};

/// Modulation order (number of symbol states)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModulationOrder {
    Binary,
    Quaternary,
    Octal,
}

impl ModulationOrder {
    /// Number of symbol states
    pub fn value(self) -> u32 {
        match self {
            ModulationOrder::Binary => 2,
            ModulationOrder::Quaternary => 4,
            ModulationOrder::Octal => 8,
        }
    }

    /// Base-n digits per character (enough for one byte)
    pub fn digits_per_char(self) -> usize {
        match self {
            ModulationOrder::Binary => 8,
            ModulationOrder::Quaternary | ModulationOrder::Octal => 4,
        }
    }
}

impl TryFrom<u32> for ModulationOrder {
    type Error = ModemError;

    fn try_from(n: u32) -> ModemResult<Self> {
        match n {
            2 => Ok(ModulationOrder::Binary),
            4 => Ok(ModulationOrder::Quaternary),
            8 => Ok(ModulationOrder::Octal),
            other => Err(ModemError::UnsupportedOrder(other)),
        }
    }
}

impl fmt::Display for ModulationOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Digital modulation family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    Ask,
    Psk,
    Fsk,
    Qam,
}

impl Scheme {
    /// Fixed per-scheme transmit/receive constants
    pub fn profile(self) -> SchemeProfile {
        match self {
            Scheme::Ask => SchemeProfile {
                repetition: 30,
                tx_filter: Some(FilterSpec { order: 15, cutoff_hz: 80_000.0 }),
                rx_filter: Some(FilterSpec { order: 15, cutoff_hz: 80_000.0 }),
                decision_offset: DECISION_OFFSET,
            },
            Scheme::Psk => SchemeProfile {
                repetition: 25,
                tx_filter: Some(FilterSpec { order: 15, cutoff_hz: 50_000.0 }),
                rx_filter: Some(FilterSpec { order: 15, cutoff_hz: 80_000.0 }),
                decision_offset: DECISION_OFFSET,
            },
            Scheme::Qam => SchemeProfile {
                repetition: 25,
                tx_filter: Some(FilterSpec { order: 15, cutoff_hz: 50_000.0 }),
                rx_filter: Some(FilterSpec { order: 4, cutoff_hz: 70_000.0 }),
                decision_offset: DECISION_OFFSET,
            },
            Scheme::Fsk => SchemeProfile {
                repetition: 50,
                tx_filter: None,
                rx_filter: None,
                decision_offset: DECISION_OFFSET,
            },
        }
    }

    /// Reject order/scheme pairs that have no constellation
    pub fn check_order(self, order: ModulationOrder) -> ModemResult<()> {
        if self == Scheme::Qam && order == ModulationOrder::Binary {
            return Err(ModemError::UnsupportedScheme {
                scheme: self,
                order: order.value(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Scheme::Ask => "ASK",
            Scheme::Psk => "PSK",
            Scheme::Fsk => "FSK",
            Scheme::Qam => "QAM",
        };
        f.write_str(name)
    }
}

/// Butterworth low-pass parameters
///
/// `cutoff_hz / sample_rate` is used as the cutoff normalized to Nyquist,
/// so the -3 dB point of the resulting filter sits at `cutoff_hz / 2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterSpec {
    pub order: usize,
    pub cutoff_hz: f64,
}

impl FilterSpec {
    /// Cutoff as a fraction of Nyquist for the given sample rate
    pub fn normalized_cutoff(&self, sample_rate: f64) -> f64 {
        self.cutoff_hz / sample_rate
    }
}

/// Per-scheme transmit and receive constants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchemeProfile {
    /// Samples per symbol (zero-order hold length)
    pub repetition: usize,
    /// Zero-phase low-pass applied before scaling, if any
    pub tx_filter: Option<FilterSpec>,
    /// Zero-phase low-pass applied before decimation, if any
    pub rx_filter: Option<FilterSpec>,
    /// Sample index inside each block used for the decision
    pub decision_offset: usize,
}

/// Receive-side calibration of the RF chain
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    /// Rotation applied to PSK/QAM decision samples (radians)
    pub phase_rotation: f64,
    /// Whether the ASK envelope arrives with inverted polarity
    pub invert_amplitude: bool,
}

impl Calibration {
    /// Constants measured on a PlutoSDR TX/RX loop
    pub fn pluto() -> Self {
        Self {
            phase_rotation: PI / 2.0 + PI / 14.0,
            invert_amplitude: true,
        }
    }

    /// Identity calibration for a direct digital loopback
    pub fn loopback() -> Self {
        Self {
            phase_rotation: 0.0,
            invert_amplitude: false,
        }
    }
}

impl Default for Calibration {
    fn default() -> Self {
        Self::pluto()
    }
}

/// Modem-wide configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModemConfig {
    /// Sample rate in Hz
    pub sample_rate: f64,
    /// Peak transmit amplitude after scaling
    pub full_scale: f64,
    /// Receive calibration
    pub calibration: Calibration,
}

impl ModemConfig {
    pub fn with_sample_rate(mut self, sample_rate: f64) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_full_scale(mut self, full_scale: f64) -> Self {
        self.full_scale = full_scale;
        self
    }

    pub fn with_calibration(mut self, calibration: Calibration) -> Self {
        self.calibration = calibration;
        self
    }

    /// Check that rates and scales are usable
    pub fn validate(&self) -> ModemResult<()> {
        if !(self.sample_rate.is_finite() && self.sample_rate > 0.0) {
            return Err(ModemError::InvalidConfig(format!(
                "sample rate must be positive, got {}",
                self.sample_rate
            )));
        }
        if !(self.full_scale.is_finite() && self.full_scale > 0.0) {
            return Err(ModemError::InvalidConfig(format!(
                "full scale must be positive, got {}",
                self.full_scale
            )));
        }
        Ok(())
    }
}

impl Default for ModemConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            full_scale: DEFAULT_FULL_SCALE,
            calibration: Calibration::default(),
        }
    }
}
