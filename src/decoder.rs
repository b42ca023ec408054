//! Frame decoder
//!
//! Each candidate slot reads fixed-width digit groups from its synchronized
//! start, waits for the start marker, collects characters and stops at the
//! stop marker. A slot that runs out of budget or off the end of the stream
//! yields an empty string. Slots run in sequence: a slot that found its stop
//! marker hands the position right after it to the next slot, so the three
//! slots read back-to-back copies of a cyclically repeated frame.

use tracing::{debug, trace};

use crate::config::ModulationOrder;
use crate::framing::{to_decimal, Sentinels};
use crate::sync::{fix_correlation, FrameSync, CANDIDATE_COUNT};

/// Digit positions a slot may scan before giving up
pub const DECODE_BUDGET: usize = 512;

/// Decoder state while scanning one slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlotState {
    AwaitingStart,
    InMessage,
}

/// How a slot finished
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotOutcome {
    /// Stop marker read; `next` is the digit right after it
    StopFound { text: String, next: usize },
    /// No stop marker within the budget or before the end of the stream
    BudgetExceeded,
}

impl SlotOutcome {
    /// Slot text, empty when the budget ran out
    pub fn text(&self) -> &str {
        match self {
            SlotOutcome::StopFound { text, .. } => text,
            SlotOutcome::BudgetExceeded => "",
        }
    }
}

/// Decode one slot whose start marker is expected at `start`
///
/// Scanning begins one group before `start` (saturating at 0). A stop
/// marker in that first group or in the start group itself is ignored.
pub fn decode_slot(symbols: &[u8], start: usize, order: ModulationOrder) -> SlotOutcome {
    let width = order.digits_per_char();
    let sentinels = Sentinels::for_order(order);
    let origin = start.saturating_sub(width);

    let mut state = SlotState::AwaitingStart;
    let mut text = String::new();
    let mut pos = origin;

    loop {
        if pos - origin >= DECODE_BUDGET || pos + width > symbols.len() {
            trace!(origin, pos, "slot budget exceeded");
            return SlotOutcome::BudgetExceeded;
        }

        let value = to_decimal(&symbols[pos..pos + width], order);
        let c = char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER);

        if c == sentinels.start_char {
            trace!(pos, "start marker");
            state = SlotState::InMessage;
        } else if c == sentinels.stop_char {
            if pos != origin && pos != start {
                trace!(pos, "stop marker");
                let text = match state {
                    SlotState::InMessage => text,
                    SlotState::AwaitingStart => String::new(),
                };
                return SlotOutcome::StopFound {
                    text,
                    next: pos + width,
                };
            }
        } else if state == SlotState::InMessage {
            text.push(c);
        }

        pos += width;
    }
}

/// Decode the three candidate slots of a synchronized stream
pub fn decode_frames(sync: &FrameSync<'_>) -> [String; CANDIDATE_COUNT] {
    let mut texts: [String; CANDIDATE_COUNT] = Default::default();
    let mut raw = sync.candidates[0];

    for slot in 0..CANDIDATE_COUNT {
        let start = fix_correlation(sync.symbols, raw, &sync.pattern);
        let outcome = decode_slot(sync.symbols, start, sync.order);
        debug!(slot, raw, start, ?outcome, "decoded slot");

        raw = match &outcome {
            SlotOutcome::StopFound { next, .. } => *next,
            SlotOutcome::BudgetExceeded => sync
                .candidates
                .get(slot + 1)
                .copied()
                .unwrap_or(raw),
        };
        texts[slot] = outcome.text().to_string();
    }
    texts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framing::encode_text;
    use crate::sync::find_sync;

    fn framed(text: &str, order: ModulationOrder, copies: usize) -> Vec<u8> {
        let frame = encode_text(text, order).unwrap();
        let mut out: Vec<u8> = frame.iter().copied().cycle().take(frame.len() * copies).collect();
        out.push(0);
        out
    }

    #[test]
    fn test_decode_slot_single_frame() {
        let stream = framed("HI", ModulationOrder::Quaternary, 1);
        let outcome = decode_slot(&stream, 0, ModulationOrder::Quaternary);
        assert_eq!(
            outcome,
            SlotOutcome::StopFound {
                text: "HI".to_string(),
                next: 16
            }
        );
    }

    #[test]
    fn test_decode_slot_binary_double_sentinels() {
        let stream = framed("Go", ModulationOrder::Binary, 1);
        let outcome = decode_slot(&stream, 0, ModulationOrder::Binary);
        // First '~' of "~~" closes the frame
        assert_eq!(
            outcome,
            SlotOutcome::StopFound {
                text: "Go".to_string(),
                next: 40
            }
        );
    }

    #[test]
    fn test_decode_slot_ignores_stop_at_origin() {
        // A stop marker right before the start group does not close the slot
        let order = ModulationOrder::Octal;
        let mut stream = crate::framing::encode_byte(b'/', order);
        stream.extend(encode_text("ab", order).unwrap());
        stream.push(0);
        assert_eq!(decode_slot(&stream, 4, order).text(), "ab");
    }

    #[test]
    fn test_decode_slot_stop_before_start_is_empty() {
        let order = ModulationOrder::Quaternary;
        // "A~#B~": stop at group 1 arrives before any start marker
        let mut stream = Vec::new();
        for c in "A~#B~".bytes() {
            stream.extend(crate::framing::encode_byte(c, order));
        }
        let outcome = decode_slot(&stream, 0, order);
        assert_eq!(
            outcome,
            SlotOutcome::StopFound {
                text: String::new(),
                next: 8
            }
        );
    }

    #[test]
    fn test_decode_slot_runs_off_end() {
        let order = ModulationOrder::Quaternary;
        let mut stream = encode_text("HI", order).unwrap();
        stream.truncate(12); // stop marker cut off
        assert_eq!(decode_slot(&stream, 0, order), SlotOutcome::BudgetExceeded);
        assert_eq!(decode_slot(&[], 0, order), SlotOutcome::BudgetExceeded);
    }

    #[test]
    fn test_decode_slot_budget() {
        let order = ModulationOrder::Quaternary;
        let mut stream = crate::framing::encode_byte(b'#', order);
        for _ in 0..200 {
            stream.extend(crate::framing::encode_byte(b'x', order));
        }
        stream.extend(crate::framing::encode_byte(b'~', order));
        assert!(stream.len() > DECODE_BUDGET);
        assert_eq!(decode_slot(&stream, 0, order), SlotOutcome::BudgetExceeded);
    }

    #[test]
    fn test_decode_frames_single_copy() {
        let stream = framed("HI", ModulationOrder::Quaternary, 1);
        let sync = find_sync(&stream, ModulationOrder::Quaternary);
        let texts = decode_frames(&sync);
        assert_eq!(texts, ["HI", "HI", "HI"].map(String::from));
    }

    #[test]
    fn test_decode_frames_octal() {
        let stream = framed("OK", ModulationOrder::Octal, 1);
        let sync = find_sync(&stream, ModulationOrder::Octal);
        assert_eq!(decode_frames(&sync), ["OK", "OK", "OK"].map(String::from));
    }

    #[test]
    fn test_decode_frames_cyclic_copies() {
        // Slots walk forward through back-to-back frames
        let stream = framed("Hello", ModulationOrder::Quaternary, 4);
        let sync = find_sync(&stream, ModulationOrder::Quaternary);
        assert_eq!(
            decode_frames(&sync),
            ["Hello", "Hello", "Hello"].map(String::from)
        );
    }

    #[test]
    fn test_decode_frames_garbage_gives_empty() {
        let stream = vec![1u8; 40];
        let sync = find_sync(&stream, ModulationOrder::Quaternary);
        assert_eq!(decode_frames(&sync), ["", "", ""].map(String::from));
    }
}
