//! Frame synchronization
//!
//! The start sentinel's digit pattern is correlated against the decided
//! symbol stream. The three strongest lags become candidate frame starts,
//! and each is snapped onto an exact copy of the pattern nearby before it
//! is decoded.

use tracing::debug;

use crate::config::ModulationOrder;
use crate::framing::start_pattern;

/// Exact-match search radius around a correlation estimate
pub const FIX_WINDOW: usize = 20;

/// Number of candidate frame starts
pub const CANDIDATE_COUNT: usize = 3;

/// Correlation score of `pattern` against `symbols` at every full-overlap lag
///
/// Lag `k` scores `Σ pattern[j] · symbols[k + j]` for `k` in `0..=len-P`.
pub fn correlate(symbols: &[u8], pattern: &[u8]) -> Vec<f64> {
    if pattern.is_empty() || symbols.len() < pattern.len() {
        return Vec::new();
    }
    symbols
        .windows(pattern.len())
        .map(|w| {
            w.iter()
                .zip(pattern)
                .map(|(&s, &p)| s as f64 * p as f64)
                .sum()
        })
        .collect()
}

/// Indices of the `count` largest scores, strongest first
///
/// Ties go to the earliest index. Missing entries repeat the last one
/// found, and an empty score list gives all zeros.
fn top_lags(scores: &[f64]) -> [usize; CANDIDATE_COUNT] {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    // Stable sort keeps equal scores in index order
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

    let mut lags = [0usize; CANDIDATE_COUNT];
    for (slot, lag) in lags.iter_mut().enumerate() {
        *lag = match order.get(slot).or(order.last()) {
            Some(&idx) => idx,
            None => 0,
        };
    }
    lags
}

/// Decided symbol stream with its start pattern and candidate frame starts
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSync<'a> {
    /// Decided symbols
    pub symbols: &'a [u8],
    /// Digits of the start sentinel
    pub pattern: Vec<u8>,
    /// Modulation order the symbols were decided at
    pub order: ModulationOrder,
    /// Raw correlation peaks, strongest first
    pub candidates: [usize; CANDIDATE_COUNT],
}

/// Locate the three most likely frame starts in a symbol stream
pub fn find_sync(symbols: &[u8], order: ModulationOrder) -> FrameSync<'_> {
    let pattern = start_pattern(order);
    let scores = correlate(symbols, &pattern);
    let candidates = top_lags(&scores);

    debug!(
        symbols = symbols.len(),
        lags = scores.len(),
        ?candidates,
        "frame sync candidates"
    );

    FrameSync {
        symbols,
        pattern,
        order,
        candidates,
    }
}

fn matches_at(symbols: &[u8], pos: usize, pattern: &[u8]) -> bool {
    symbols
        .get(pos..pos + pattern.len())
        .is_some_and(|w| w == pattern)
}

/// Snap a correlation estimate onto an exact copy of the start pattern
///
/// Positions at and after `position` are tried first (offsets `0..20`),
/// then positions before it, farthest first. Without a match the estimate
/// is returned unchanged.
pub fn fix_correlation(symbols: &[u8], position: usize, pattern: &[u8]) -> usize {
    let forward = (0..FIX_WINDOW).map(|k| position + k);
    let back = position.min(FIX_WINDOW);
    let backward = (1..=back).rev().map(|k| position - k);

    forward
        .chain(backward)
        .find(|&pos| matches_at(symbols, pos, pattern))
        .unwrap_or(position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framing::encode_text;

    /// "HI" at n=4 followed by the cyclic pad digit
    fn hi_stream() -> Vec<u8> {
        let mut s = encode_text("HI", ModulationOrder::Quaternary).unwrap();
        s.push(0);
        s
    }

    #[test]
    fn test_correlate_lengths() {
        assert_eq!(correlate(&[1, 2, 3, 4], &[1, 1]).len(), 3);
        assert_eq!(correlate(&[1, 2, 3, 4], &[1, 1, 1, 1]).len(), 1);
        assert!(correlate(&[1, 2], &[1, 1, 1]).is_empty());
        assert!(correlate(&[1, 2], &[]).is_empty());
    }

    #[test]
    fn test_correlate_scores() {
        let scores = correlate(&[0, 2, 0, 3, 1], &[0, 2, 0, 3]);
        assert_eq!(scores, vec![13.0, 3.0]);
    }

    #[test]
    fn test_find_sync_hi() {
        let stream = hi_stream();
        let sync = find_sync(&stream, ModulationOrder::Quaternary);
        assert_eq!(sync.pattern, vec![0, 2, 0, 3]);
        // Scores: lag 0 = 13, lag 12 = 12, lags 10 and 11 = 11
        assert_eq!(sync.candidates, [0, 12, 10]);
    }

    #[test]
    fn test_find_sync_ok_octal() {
        let mut stream = encode_text("OK", ModulationOrder::Octal).unwrap();
        stream.push(0);
        let sync = find_sync(&stream, ModulationOrder::Octal);
        assert_eq!(sync.pattern, vec![0, 1, 7, 6]);
        assert_eq!(sync.candidates, [0, 12, 13]);
    }

    #[test]
    fn test_find_sync_short_stream() {
        let sync = find_sync(&[0, 2, 0, 3], ModulationOrder::Quaternary);
        assert_eq!(sync.candidates, [0, 0, 0]);
        let sync = find_sync(&[1, 2], ModulationOrder::Quaternary);
        assert_eq!(sync.candidates, [0, 0, 0]);
    }

    #[test]
    fn test_top_lags_distinct() {
        assert_eq!(top_lags(&[1.0, 5.0, 5.0, 2.0]), [1, 2, 3]);
        assert_eq!(top_lags(&[-3.0, -1.0, -2.0]), [1, 2, 0]);
        assert_eq!(top_lags(&[4.0, 9.0]), [1, 0, 0]);
    }

    #[test]
    fn test_fix_correlation_forward_first() {
        let pattern = [0, 2, 0, 3];
        let mut stream = vec![1u8; 60];
        stream[20..24].copy_from_slice(&pattern);
        stream[35..39].copy_from_slice(&pattern);
        // Both 20 (back 10) and 35 (forward 5) are in range
        assert_eq!(fix_correlation(&stream, 30, &pattern), 35);
        assert_eq!(fix_correlation(&stream, 36, &pattern), 20);
    }

    #[test]
    fn test_fix_correlation_backward_farthest_first() {
        let pattern = [0, 2, 0, 3];
        let mut stream = vec![1u8; 60];
        stream[2..6].copy_from_slice(&pattern);
        stream[10..14].copy_from_slice(&pattern);
        assert_eq!(fix_correlation(&stream, 16, &pattern), 2);
    }

    #[test]
    fn test_fix_correlation_no_match_keeps_estimate() {
        let stream = vec![1u8; 100];
        assert_eq!(fix_correlation(&stream, 40, &[0, 2, 0, 3]), 40);
        assert_eq!(fix_correlation(&stream, 500, &[0, 2, 0, 3]), 500);
    }

    #[test]
    fn test_fix_correlation_hi_past_end() {
        let stream = hi_stream();
        assert_eq!(fix_correlation(&stream, 16, &[0, 2, 0, 3]), 0);
    }
}
