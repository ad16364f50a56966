//! Digit values and the tagged test-node space built on top of them.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{HalError, HalResult};

/// A numeric nixie digit, always in `0..=9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "u8", into = "u8")
)]
pub struct Digit(u8);

impl Digit {
    /// Digit zero, which the priority encoder cannot report.
    pub const ZERO: Digit = Digit(0);

    /// Highest digit value.
    pub const MAX: u8 = 9;

    /// Create a digit, returning `None` outside `0..=9`.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value <= Self::MAX {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Numeric value of the digit.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Digits swept through the encoder check, `1..=9` in increasing order.
    pub fn sweep() -> impl Iterator<Item = Digit> {
        (1..=Self::MAX).map(Digit)
    }
}

impl TryFrom<u8> for Digit {
    type Error = HalError;

    fn try_from(value: u8) -> HalResult<Self> {
        Self::new(value).ok_or(HalError::InvalidDigit(value))
    }
}

impl From<Digit> for u8 {
    fn from(digit: Digit) -> Self {
        digit.0
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A node of a segment: either a real digit or one of the pseudo-nodes the
/// jig tests alongside them.
///
/// Commanded and observed values of a fault record share this space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Node {
    /// No digit commanded.
    Blank,
    /// A numeric digit.
    Digit(Digit),
    /// The decimal point.
    DecimalPoint,
    /// The high-voltage supply rail.
    HighVoltage,
    /// A priority encoder code (10..=15) with no digit wired to it.
    EncoderCode(u8),
}

impl Node {
    /// The zero digit node.
    pub const ZERO: Node = Node::Digit(Digit::ZERO);

    /// Build a digit node from a raw value.
    #[must_use]
    pub const fn digit(value: u8) -> Option<Node> {
        match Digit::new(value) {
            Some(d) => Some(Node::Digit(d)),
            None => None,
        }
    }

    /// The digit this node represents, if any.
    #[must_use]
    pub const fn as_digit(self) -> Option<Digit> {
        match self {
            Node::Digit(d) => Some(d),
            _ => None,
        }
    }

    /// Whether this is one of the pseudo-nodes (blank, decimal point, HV rail).
    #[must_use]
    pub const fn is_pseudo(self) -> bool {
        matches!(self, Node::Blank | Node::DecimalPoint | Node::HighVoltage)
    }
}

impl From<Digit> for Node {
    fn from(digit: Digit) -> Self {
        Node::Digit(digit)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Blank => write!(f, "BLANK DIGIT"),
            Node::Digit(d) => write!(f, "{d}"),
            Node::DecimalPoint => write!(f, "DECIMAL POINT"),
            Node::HighVoltage => write!(f, "HIGH VOLTAGE CONNECTION"),
            Node::EncoderCode(code) => write!(f, "UNMAPPED ENCODER CODE {code}"),
        }
    }
}
