//! Framing codec
//!
//! Text is carried as fixed-width base-n digit groups, one group per ASCII
//! character, between a start and a stop sentinel. There is no length field
//! and no checksum; integrity comes from the three-way vote on receive.

use crate::config::ModulationOrder;
use crate::error::{ModemError, ModemResult};

/// Sentinel strings and the marker characters the decoder reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sentinels {
    /// Prepended to every frame
    pub start: &'static str,
    /// Appended to every frame
    pub stop: &'static str,
    /// Character that opens a message
    pub start_char: char,
    /// Character that closes a message
    pub stop_char: char,
}

impl Sentinels {
    pub fn for_order(order: ModulationOrder) -> Self {
        match order {
            ModulationOrder::Binary => Sentinels {
                start: "##",
                stop: "~~",
                start_char: '#',
                stop_char: '~',
            },
            ModulationOrder::Quaternary => Sentinels {
                start: "#",
                stop: "~",
                start_char: '#',
                stop_char: '~',
            },
            ModulationOrder::Octal => Sentinels {
                start: "~",
                stop: "/",
                start_char: '~',
                stop_char: '/',
            },
        }
    }
}

/// Convert `value` into exactly `width` base-n digits, most significant first
///
/// Digits above the width are discarded.
pub fn to_base_n(value: u32, order: ModulationOrder, width: usize) -> Vec<u8> {
    let n = order.value();
    let mut digits = vec![0u8; width];
    let mut rest = value;
    for i in (0..width).rev() {
        digits[i] = (rest % n) as u8;
        rest /= n;
    }
    digits
}

/// Positional value of a digit group, `Σ digit[i] · n^(width-1-i)`
pub fn to_decimal(digits: &[u8], order: ModulationOrder) -> u32 {
    let n = order.value();
    digits
        .iter()
        .fold(0u32, |acc, &d| acc.wrapping_mul(n).wrapping_add(d as u32))
}

/// Encode a single ASCII byte as one digit group
pub fn encode_byte(byte: u8, order: ModulationOrder) -> Vec<u8> {
    to_base_n(byte as u32, order, order.digits_per_char())
}

fn encode_str(text: &str, order: ModulationOrder, out: &mut Vec<u8>) -> ModemResult<()> {
    for c in text.chars() {
        if !c.is_ascii() {
            return Err(ModemError::NonAsciiText(c));
        }
        out.extend(encode_byte(c as u8, order));
    }
    Ok(())
}

/// Frame `text` with the sentinels for `order` and encode it to digits
///
/// # Arguments
/// * `text` - ASCII payload
/// * `order` - Modulation order (selects sentinels and group width)
///
/// # Returns
/// Symbol stream of `(start + text + stop).len() * digits_per_char` digits
pub fn encode_text(text: &str, order: ModulationOrder) -> ModemResult<Vec<u8>> {
    let sentinels = Sentinels::for_order(order);
    let frame_len = sentinels.start.len() + text.len() + sentinels.stop.len();
    let mut symbols = Vec::with_capacity(frame_len * order.digits_per_char());

    encode_str(sentinels.start, order, &mut symbols)?;
    encode_str(text, order, &mut symbols)?;
    encode_str(sentinels.stop, order, &mut symbols)?;

    Ok(symbols)
}

/// Digits of the full start sentinel, used as the sync pattern
pub fn start_pattern(order: ModulationOrder) -> Vec<u8> {
    Sentinels::for_order(order)
        .start
        .bytes()
        .flat_map(|b| encode_byte(b, order))
        .collect()
}

/// Digits of the full stop sentinel
pub fn stop_pattern(order: ModulationOrder) -> Vec<u8> {
    Sentinels::for_order(order)
        .stop
        .bytes()
        .flat_map(|b| encode_byte(b, order))
        .collect()
}
