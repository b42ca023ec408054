//! Symbol decision regions
//!
//! Literal per-(scheme, order) tables. The boundaries were tuned against a
//! real TX/RX filter chain and are not evenly spaced; they are kept as data
//! so they can be audited and tested on their own.
//!
//! Amplitude tables (ASK, FSK) partition the normalized real value, angular
//! tables (PSK, QAM) partition the sample angle in `[0, 2π)`. The first band
//! whose closed interval holds the value wins, in table order. Values in a
//! guard gap or outside every band go to the nearest band.

use std::f64::consts::{PI, TAU};

use num_complex::Complex64;

use crate::config::{ModulationOrder, Scheme};
use crate::utils::normalize_angle;

/// One decision interval `[lower, upper] → symbol`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub lower: f64,
    pub upper: f64,
    pub symbol: u8,
}

impl Band {
    #[inline]
    pub fn contains(&self, v: f64) -> bool {
        v >= self.lower && v <= self.upper
    }

    /// Distance from `v` to the interval (0 inside)
    #[inline]
    fn distance(&self, v: f64) -> f64 {
        if v < self.lower {
            self.lower - v
        } else if v > self.upper {
            v - self.upper
        } else {
            0.0
        }
    }
}

macro_rules! band {
    ($lo:expr, $hi:expr => $sym:expr) => {
        Band { lower: $lo, upper: $hi, symbol: $sym }
    };
}

// ============================================================================
// ASK (normalized, centered real amplitude)
// ============================================================================

pub const ASK_2: &[Band] = &[
    band!(0.5, 1.1 => 1),
    band!(-1.1, 0.0 => 0),
];

pub const ASK_4: &[Band] = &[
    band!(0.0, 0.5 => 2),
    band!(0.5, 1.1 => 3),
    band!(-0.5, 0.0 => 1),
    band!(-1.1, -0.5 => 0),
];

pub const ASK_8: &[Band] = &[
    band!(-0.72, -0.4 => 1),
    band!(-1.1, -0.72 => 0),
    band!(-0.25, 0.0 => 3),
    band!(-0.4, -0.25 => 2),
    band!(0.25, 0.45 => 5),
    band!(0.0, 0.25 => 4),
    band!(0.75, 1.1 => 7),
    band!(0.45, 0.75 => 6),
];

// ============================================================================
// PSK (angle after calibration rotation)
// ============================================================================

pub const PSK_2: &[Band] = &[
    band!(PI / 2.0, 3.0 * PI / 2.0 => 1),
    band!(0.0, PI / 2.0 => 0),
    band!(3.0 * PI / 2.0, TAU => 0),
];

pub const PSK_4: &[Band] = &[
    band!(0.0, PI / 2.0 => 0),
    band!(PI / 2.0, PI => 1),
    band!(PI, 1.5 * PI => 2),
    band!(1.5 * PI, TAU => 3),
];

/// Sector 1/2 boundary is skewed by 0.09 rad to follow the measured
/// constellation.
pub const PSK_8: &[Band] = &[
    band!(0.0, PI / 8.0 => 0),
    band!(15.0 * PI / 8.0, TAU => 0),
    band!(PI / 8.0, 3.0 * PI / 8.0 + 0.09 => 1),
    band!(3.0 * PI / 8.0 + 0.09, 5.0 * PI / 8.0 => 2),
    band!(5.0 * PI / 8.0, 7.0 * PI / 8.0 => 3),
    band!(7.0 * PI / 8.0, 9.0 * PI / 8.0 => 4),
    band!(9.0 * PI / 8.0, 11.0 * PI / 8.0 => 5),
    band!(11.0 * PI / 8.0, 13.0 * PI / 8.0 => 6),
    band!(13.0 * PI / 8.0, 15.0 * PI / 8.0 => 7),
];

// ============================================================================
// QAM (quadrant sector, plus ring for order 8)
// ============================================================================

pub const QAM_QUADRANTS: &[Band] = PSK_4;

/// Magnitude separating the inner and outer ring of 8-QAM
pub const QAM_RING_THRESHOLD: f64 = 0.5;

// ============================================================================
// FSK (normalized instantaneous frequency in [0, 1])
// ============================================================================

pub const FSK_2: &[Band] = &[
    band!(0.0, 0.5 => 0),
    band!(0.5, 1.0 => 1),
];

pub const FSK_4: &[Band] = &[
    band!(0.0, 0.13 => 0),
    band!(0.13, 0.38 => 1),
    band!(0.38, 0.7 => 2),
    band!(0.7, 1.0 => 3),
];

pub const FSK_8: &[Band] = &[
    band!(0.0, 0.12 => 0),
    band!(0.12, 0.22 => 1),
    band!(0.22, 0.35 => 2),
    band!(0.35, 0.52 => 3),
    band!(0.52, 0.66 => 4),
    band!(0.66, 0.79 => 5),
    band!(0.79, 0.91 => 6),
    band!(0.91, 1.0 => 7),
];

pub fn ask_bands(order: ModulationOrder) -> &'static [Band] {
    match order {
        ModulationOrder::Binary => ASK_2,
        ModulationOrder::Quaternary => ASK_4,
        ModulationOrder::Octal => ASK_8,
    }
}

pub fn psk_sectors(order: ModulationOrder) -> &'static [Band] {
    match order {
        ModulationOrder::Binary => PSK_2,
        ModulationOrder::Quaternary => PSK_4,
        ModulationOrder::Octal => PSK_8,
    }
}

pub fn fsk_bands(order: ModulationOrder) -> &'static [Band] {
    match order {
        ModulationOrder::Binary => FSK_2,
        ModulationOrder::Quaternary => FSK_4,
        ModulationOrder::Octal => FSK_8,
    }
}

/// Look a value up in a band table
pub fn lookup(bands: &[Band], value: f64) -> u8 {
    if let Some(b) = bands.iter().find(|b| b.contains(value)) {
        return b.symbol;
    }
    bands
        .iter()
        .min_by(|a, b| a.distance(value).total_cmp(&b.distance(value)))
        .map_or(0, |b| b.symbol)
}

/// Angle of `z` in `[0, 2π)`
#[inline]
pub fn sector_angle(z: Complex64) -> f64 {
    normalize_angle(z.arg())
}

/// Decide the symbol carried by one front-end output value
///
/// # Arguments
/// * `value` - Front-end output; ASK and FSK use the real part only
/// * `order` - Modulation order
/// * `scheme` - Modulation family
pub fn decide(value: Complex64, order: ModulationOrder, scheme: Scheme) -> u8 {
    match scheme {
        Scheme::Ask => lookup(ask_bands(order), value.re),
        Scheme::Fsk => lookup(fsk_bands(order), value.re),
        Scheme::Psk => lookup(psk_sectors(order), sector_angle(value)),
        Scheme::Qam => match order {
            // 2-QAM degenerates to BPSK
            ModulationOrder::Binary => lookup(PSK_2, sector_angle(value)),
            ModulationOrder::Quaternary => lookup(QAM_QUADRANTS, sector_angle(value)),
            ModulationOrder::Octal => {
                let quadrant = lookup(QAM_QUADRANTS, sector_angle(value));
                if value.norm() < QAM_RING_THRESHOLD {
                    quadrant
                } else {
                    quadrant + 4
                }
            }
        },
    }
}

/// Decide every value of a front-end output stream
pub fn decide_all(values: &[Complex64], order: ModulationOrder, scheme: Scheme) -> Vec<u8> {
    values.iter().map(|&v| decide(v, order, scheme)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORDERS: [ModulationOrder; 3] = [
        ModulationOrder::Binary,
        ModulationOrder::Quaternary,
        ModulationOrder::Octal,
    ];

    fn real(v: f64) -> Complex64 {
        Complex64::new(v, 0.0)
    }

    #[test]
    fn test_ask_tables() {
        let q = ModulationOrder::Quaternary;
        assert_eq!(decide(real(-0.9), q, Scheme::Ask), 0);
        assert_eq!(decide(real(-0.3), q, Scheme::Ask), 1);
        assert_eq!(decide(real(0.3), q, Scheme::Ask), 2);
        assert_eq!(decide(real(0.9), q, Scheme::Ask), 3);

        let o = ModulationOrder::Octal;
        let expected = [(-1.0, 0), (-0.5, 1), (-0.3, 2), (-0.1, 3), (0.1, 4), (0.3, 5), (0.6, 6), (0.9, 7)];
        for (v, sym) in expected {
            assert_eq!(decide(real(v), o, Scheme::Ask), sym, "ASK-8 value {}", v);
        }
    }

    #[test]
    fn test_ask_binary_guard_gap_goes_to_nearest() {
        let b = ModulationOrder::Binary;
        assert_eq!(decide(real(0.9), b, Scheme::Ask), 1);
        assert_eq!(decide(real(-0.9), b, Scheme::Ask), 0);
        // (0, 0.5) is a guard gap
        assert_eq!(decide(real(0.1), b, Scheme::Ask), 0);
        assert_eq!(decide(real(0.4), b, Scheme::Ask), 1);
    }

    #[test]
    fn test_psk8_skewed_boundary() {
        let o = ModulationOrder::Octal;
        let boundary = 3.0 * PI / 8.0 + 0.09;
        let just_below = Complex64::from_polar(1.0, boundary - 0.01);
        let just_above = Complex64::from_polar(1.0, boundary + 0.01);
        assert_eq!(decide(just_below, o, Scheme::Psk), 1);
        assert_eq!(decide(just_above, o, Scheme::Psk), 2);
        // 3π/8 + 0.05 would be sector 2 with even spacing
        assert_eq!(decide(Complex64::from_polar(1.0, 3.0 * PI / 8.0 + 0.05), o, Scheme::Psk), 1);
    }

    #[test]
    fn test_psk_points_decide_to_themselves() {
        for k in 0..8u8 {
            let z = Complex64::from_polar(1.0, k as f64 * PI / 4.0);
            assert_eq!(decide(z, ModulationOrder::Octal, Scheme::Psk), k, "Symbol {} failed", k);
        }
        assert_eq!(decide(real(1.0), ModulationOrder::Binary, Scheme::Psk), 0);
        assert_eq!(decide(real(-1.0), ModulationOrder::Binary, Scheme::Psk), 1);
    }

    #[test]
    fn test_qam8_rings() {
        let o = ModulationOrder::Octal;
        assert_eq!(decide(Complex64::new(0.2, 0.2), o, Scheme::Qam), 0);
        assert_eq!(decide(Complex64::new(0.6, 0.6), o, Scheme::Qam), 4);
        assert_eq!(decide(Complex64::new(-0.2, 0.2), o, Scheme::Qam), 1);
        assert_eq!(decide(Complex64::new(-0.6, -0.6), o, Scheme::Qam), 6);
        assert_eq!(decide(Complex64::new(0.6, -0.6), o, Scheme::Qam), 7);
    }

    #[test]
    fn test_fsk_tables() {
        let e = ModulationOrder::Octal;
        let expected = [(0.05, 0), (0.17, 1), (0.3, 2), (0.45, 3), (0.6, 4), (0.7, 5), (0.85, 6), (0.95, 7)];
        for (v, sym) in expected {
            assert_eq!(decide(real(v), e, Scheme::Fsk), sym, "FSK-8 value {}", v);
        }
        assert_eq!(decide(real(0.0), ModulationOrder::Binary, Scheme::Fsk), 0);
        assert_eq!(decide(real(1.0), ModulationOrder::Binary, Scheme::Fsk), 1);
    }

    #[test]
    fn test_amplitude_tables_complete() {
        for order in ORDERS {
            for scheme in [Scheme::Ask, Scheme::Fsk] {
                for i in 0..=2200 {
                    let v = -1.1 + i as f64 * 0.001;
                    let sym = decide(real(v), order, scheme);
                    assert!((sym as u32) < order.value(), "{} {} value {} -> {}", scheme, order, v, sym);
                }
            }
        }
    }

    #[test]
    fn test_angular_tables_complete() {
        for order in ORDERS {
            for scheme in [Scheme::Psk, Scheme::Qam] {
                for i in 0..3600 {
                    let theta = i as f64 * TAU / 3600.0;
                    for mag in [0.2, 1.0] {
                        let sym = decide(Complex64::from_polar(mag, theta), order, scheme);
                        assert!((sym as u32) < order.value(), "{} {} angle {} -> {}", scheme, order, theta, sym);
                    }
                }
            }
        }
    }

    #[test]
    fn test_nan_does_not_panic() {
        assert_eq!(lookup(FSK_2, f64::NAN), 0);
    }
}
