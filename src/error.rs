//! Modem error types
//!
//! Only API-boundary misuse is an error. Sync misses, exhausted decode
//! budgets and failed votes are reported through empty candidate strings.

use thiserror::Error;

use crate::config::Scheme;

/// Result type for modem operations
pub type ModemResult<T> = Result<T, ModemError>;

/// Errors raised while configuring or driving the modem
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModemError {
    /// Modulation order outside {2, 4, 8}
    #[error("unsupported modulation order {0}, expected 2, 4 or 8")]
    UnsupportedOrder(u32),

    /// Scheme does not exist at this order (e.g. 2-QAM)
    #[error("{scheme} is not supported at order {order}")]
    UnsupportedScheme { scheme: Scheme, order: u32 },

    /// Scheme has no point constellation (FSK is tone based)
    #[error("{0} has no point constellation")]
    NotAConstellation(Scheme),

    /// Symbol value outside `[0, order)`
    #[error("symbol {symbol} out of range for order {order}")]
    InvalidSymbol { symbol: u8, order: u32 },

    /// Payload character that has no single-byte code
    #[error("character {0:?} is not ASCII")]
    NonAsciiText(char),

    /// Butterworth design parameters out of range
    #[error("invalid filter: order {order}, normalized cutoff {cutoff}")]
    InvalidFilter { order: usize, cutoff: f64 },

    /// Configuration error
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ModemError::UnsupportedOrder(16).to_string(),
            "unsupported modulation order 16, expected 2, 4 or 8"
        );
        let err = ModemError::UnsupportedScheme {
            scheme: Scheme::Qam,
            order: 2,
        };
        assert_eq!(err.to_string(), "QAM is not supported at order 2");
        assert_eq!(
            ModemError::NonAsciiText('é').to_string(),
            "character 'é' is not ASCII"
        );
    }
}
