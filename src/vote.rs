//! Majority vote over the three decoded candidates
//!
//! Empty candidates never count as agreeing with each other, so two failed
//! slots cannot outvote a good one.

use crate::sync::CANDIDATE_COUNT;

/// Vote result
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Resolved {
    /// Agreed text; empty means no reliable decode
    pub text: String,
    /// Number of candidates backing `text` (1 to 3)
    pub agreement: u32,
}

impl Resolved {
    pub fn is_decoded(&self) -> bool {
        !self.text.is_empty()
    }
}

/// Resolve three candidates into one text
pub fn resolve(candidates: &[String; CANDIDATE_COUNT]) -> Resolved {
    let [a, b, c] = candidates;
    let agree = |x: &String, y: &String| !x.is_empty() && x == y;

    let winner = if agree(a, b) {
        Some(a)
    } else if agree(b, c) {
        Some(b)
    } else if agree(a, c) {
        Some(c)
    } else {
        None
    };

    if let Some(text) = winner {
        let agreement = candidates.iter().filter(|x| *x == text).count() as u32;
        return Resolved {
            text: text.clone(),
            agreement,
        };
    }

    let mut non_empty = candidates.iter().filter(|x| !x.is_empty());
    match (non_empty.next(), non_empty.next()) {
        (Some(sole), None) => Resolved {
            text: sole.clone(),
            agreement: 1,
        },
        _ => Resolved {
            text: String::new(),
            agreement: 1,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vote(a: &str, b: &str, c: &str) -> (String, u32) {
        let r = resolve(&[a.to_string(), b.to_string(), c.to_string()]);
        (r.text, r.agreement)
    }

    #[test]
    fn test_two_agree() {
        assert_eq!(vote("abc", "abc", "xyz"), ("abc".to_string(), 2));
        assert_eq!(vote("xyz", "abc", "abc"), ("abc".to_string(), 2));
        assert_eq!(vote("abc", "xyz", "abc"), ("abc".to_string(), 2));
        assert_eq!(vote("abc", "", "abc"), ("abc".to_string(), 2));
    }

    #[test]
    fn test_unanimous() {
        assert_eq!(vote("abc", "abc", "abc"), ("abc".to_string(), 3));
    }

    #[test]
    fn test_sole_survivor() {
        assert_eq!(vote("", "", "xyz"), ("xyz".to_string(), 1));
        assert_eq!(vote("xyz", "", ""), ("xyz".to_string(), 1));
        assert_eq!(vote("", "xyz", ""), ("xyz".to_string(), 1));
    }

    #[test]
    fn test_no_agreement() {
        assert_eq!(vote("abc", "def", "ghi"), (String::new(), 1));
        assert_eq!(vote("abc", "", "ghi"), (String::new(), 1));
        let r = resolve(&Default::default());
        assert_eq!(r, Resolved { text: String::new(), agreement: 1 });
        assert!(!r.is_decoded());
    }
}
