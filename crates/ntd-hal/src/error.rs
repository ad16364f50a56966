//! Error types for line and display configuration.

use crate::Pin;

/// Errors raised while building or validating jig hardware descriptions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HalError {
    /// A value outside `0..=9` was offered as a digit.
    #[error("Invalid digit value: {0} (expected 0..=9)")]
    InvalidDigit(u8),

    /// A segment index outside the panel.
    #[error("Invalid segment index: {0}")]
    InvalidSegment(u8),

    /// A multi-bit line was addressed with a bit it does not have.
    #[error("Line {line} has no bit {bit}")]
    InvalidLineBit {
        /// Line family name.
        line: &'static str,
        /// Requested bit.
        bit: u8,
    },

    /// Two lines were mapped onto the same physical pin.
    #[error("Pin {pin} is assigned to both {first} and {second}")]
    DuplicatePin {
        /// The shared pin.
        pin: Pin,
        /// First line using the pin.
        first: String,
        /// Second line using the pin.
        second: String,
    },
}

/// Result type for HAL operations.
pub type HalResult<T> = Result<T, HalError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Line;

    #[test]
    fn test_error_display() {
        assert_eq!(
            HalError::InvalidDigit(12).to_string(),
            "Invalid digit value: 12 (expected 0..=9)"
        );
        let err = HalError::DuplicatePin {
            pin: Pin::analog(4),
            first: Line::Encoder(3).to_string(),
            second: Line::SenseZero.to_string(),
        };
        assert_eq!(err.to_string(), "Pin A4 is assigned to both ENC_3 and SENSE_0");
    }
}
