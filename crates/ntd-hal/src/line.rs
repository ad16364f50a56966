//! Digital lines, logic levels and the physical pin assignment.

use core::fmt;
use core::ops::Not;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{HalError, HalResult};

/// Binary logic level of a digital line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Level {
    /// Logic low.
    #[default]
    Low,
    /// Logic high.
    High,
}

impl Level {
    /// Returns true for [`Level::High`].
    #[must_use]
    pub const fn is_high(self) -> bool {
        matches!(self, Level::High)
    }

    /// Returns true for [`Level::Low`].
    #[must_use]
    pub const fn is_low(self) -> bool {
        matches!(self, Level::Low)
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high { Level::High } else { Level::Low }
    }
}

impl Not for Level {
    type Output = Level;

    fn not(self) -> Level {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

/// Logical digital lines of the jig.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Line {
    /// Segment multiplexer output enable.
    SegmentEnable,
    /// Segment multiplexer select bit (0..=2).
    SegmentSelect(u8),
    /// Priority encoder output bit (0..=3), active-low.
    Encoder(u8),
    /// Dedicated sense line for digit zero, active-low.
    SenseZero,
    /// Dedicated sense line for the decimal point, active-low.
    SenseDecimalPoint,
    /// High-voltage rail presence, high when present.
    SenseHighVoltage,
    /// Status indicator LED.
    StatusLed,
}

impl Line {
    /// Number of segment-select bits.
    pub const SEGMENT_SELECT_BITS: u8 = 3;

    /// Number of priority encoder bits.
    pub const ENCODER_BITS: u8 = 4;

    /// Segment-select line for `bit`.
    ///
    /// # Errors
    ///
    /// Returns [`HalError::InvalidLineBit`] when `bit` is not a select bit.
    pub fn segment_select(bit: u8) -> HalResult<Line> {
        if bit < Self::SEGMENT_SELECT_BITS {
            Ok(Line::SegmentSelect(bit))
        } else {
            Err(HalError::InvalidLineBit { line: "SC", bit })
        }
    }

    /// Encoder line for `bit`.
    ///
    /// # Errors
    ///
    /// Returns [`HalError::InvalidLineBit`] when `bit` is not an encoder bit.
    pub fn encoder(bit: u8) -> HalResult<Line> {
        if bit < Self::ENCODER_BITS {
            Ok(Line::Encoder(bit))
        } else {
            Err(HalError::InvalidLineBit { line: "ENC", bit })
        }
    }

    /// Every valid line, outputs first.
    #[must_use]
    pub fn all() -> Vec<Line> {
        let mut lines = vec![Line::SegmentEnable];
        lines.extend((0..Self::SEGMENT_SELECT_BITS).map(Line::SegmentSelect));
        lines.push(Line::StatusLed);
        lines.extend((0..Self::ENCODER_BITS).map(Line::Encoder));
        lines.extend([
            Line::SenseZero,
            Line::SenseDecimalPoint,
            Line::SenseHighVoltage,
        ]);
        lines
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Line::SegmentEnable => write!(f, "SC_EN"),
            Line::SegmentSelect(bit) => write!(f, "SC_{bit}"),
            Line::Encoder(bit) => write!(f, "ENC_{bit}"),
            Line::SenseZero => write!(f, "SENSE_0"),
            Line::SenseDecimalPoint => write!(f, "SENSE_DP"),
            Line::SenseHighVoltage => write!(f, "SENSE_HV"),
            Line::StatusLed => write!(f, "LED"),
        }
    }
}

/// A physical controller pin.
///
/// Pins `0..=13` are the digital header; `14..=19` are the analog header
/// and are displayed as `A0..A5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct Pin(pub u8);

impl Pin {
    const ANALOG_BASE: u8 = 14;

    /// Digital header pin.
    #[must_use]
    pub const fn digital(n: u8) -> Pin {
        Pin(n)
    }

    /// Analog header pin `An`.
    #[must_use]
    pub const fn analog(n: u8) -> Pin {
        Pin(Self::ANALOG_BASE.saturating_add(n))
    }
}

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.checked_sub(Self::ANALOG_BASE) {
            Some(analog) => write!(f, "A{analog}"),
            None => write!(f, "D{}", self.0),
        }
    }
}

/// Pins used by the nixie display driver's serial interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayPins {
    /// Shift register data.
    pub data: Pin,
    /// Shift register clock.
    pub clock: Pin,
    /// Driver output enable.
    pub output_enable: Pin,
}

impl Default for DisplayPins {
    fn default() -> Self {
        Self {
            data: Pin::digital(8),
            clock: Pin::digital(9),
            output_enable: Pin::digital(10),
        }
    }
}

/// Assignment of every logical [`Line`] to a physical [`Pin`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct PinMap {
    /// Segment multiplexer output enable.
    pub segment_enable: Pin,
    /// Segment select bits, LSB first.
    pub segment_select: [Pin; 3],
    /// Priority encoder bits, LSB first.
    pub encoder: [Pin; 4],
    /// Zero-digit sense.
    pub sense_zero: Pin,
    /// Decimal point sense.
    pub sense_decimal_point: Pin,
    /// High-voltage rail sense.
    pub sense_high_voltage: Pin,
    /// Status LED.
    pub status_led: Pin,
    /// Display driver interface.
    pub display: DisplayPins,
}

impl Default for PinMap {
    fn default() -> Self {
        Self {
            segment_enable: Pin::digital(7),
            segment_select: [Pin::digital(11), Pin::digital(12), Pin::digital(13)],
            encoder: [Pin::analog(0), Pin::analog(1), Pin::analog(2), Pin::analog(3)],
            sense_zero: Pin::analog(4),
            sense_decimal_point: Pin::analog(5),
            sense_high_voltage: Pin::digital(2),
            status_led: Pin::digital(4),
            display: DisplayPins::default(),
        }
    }
}

impl PinMap {
    /// Physical pin for a line, or `None` for a line bit that does not exist.
    #[must_use]
    pub fn pin_for(&self, line: Line) -> Option<Pin> {
        match line {
            Line::SegmentEnable => Some(self.segment_enable),
            Line::SegmentSelect(bit) => self.segment_select.get(usize::from(bit)).copied(),
            Line::Encoder(bit) => self.encoder.get(usize::from(bit)).copied(),
            Line::SenseZero => Some(self.sense_zero),
            Line::SenseDecimalPoint => Some(self.sense_decimal_point),
            Line::SenseHighVoltage => Some(self.sense_high_voltage),
            Line::StatusLed => Some(self.status_led),
        }
    }

    /// All assignments, including the display driver pins.
    #[must_use]
    pub fn assignments(&self) -> Vec<(String, Pin)> {
        let mut out: Vec<(String, Pin)> = Line::all()
            .into_iter()
            .filter_map(|line| self.pin_for(line).map(|pin| (line.to_string(), pin)))
            .collect();
        out.extend([
            ("DATA".to_string(), self.display.data),
            ("CLK".to_string(), self.display.clock),
            ("OE".to_string(), self.display.output_enable),
        ]);
        out
    }

    /// Check that no two lines share a pin.
    ///
    /// # Errors
    ///
    /// Returns [`HalError::DuplicatePin`] for the first collision found.
    pub fn validate(&self) -> HalResult<()> {
        let assignments = self.assignments();
        for (i, (first, pin)) in assignments.iter().enumerate() {
            if let Some((second, _)) = assignments
                .iter()
                .skip(i.saturating_add(1))
                .find(|(_, other)| other == pin)
            {
                return Err(HalError::DuplicatePin {
                    pin: *pin,
                    first: first.clone(),
                    second: second.clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ops() {
        assert_eq!(!Level::High, Level::Low);
        assert_eq!(Level::from(true), Level::High);
        assert!(Level::Low.is_low());
    }

    #[test]
    fn test_line_constructors() {
        assert_eq!(Line::segment_select(2), Ok(Line::SegmentSelect(2)));
        assert!(Line::segment_select(3).is_err());
        assert_eq!(Line::encoder(3), Ok(Line::Encoder(3)));
        assert!(Line::encoder(4).is_err());
    }

    #[test]
    fn test_line_names() {
        assert_eq!(Line::SegmentSelect(1).to_string(), "SC_1");
        assert_eq!(Line::SenseDecimalPoint.to_string(), "SENSE_DP");
        let names: Vec<String> = Line::all().iter().map(ToString::to_string).collect();
        assert_eq!(
            names,
            [
                "SC_EN", "SC_0", "SC_1", "SC_2", "LED", "ENC_0", "ENC_1", "ENC_2", "ENC_3",
                "SENSE_0", "SENSE_DP", "SENSE_HV",
            ]
        );
    }

    #[test]
    fn test_pin_display() {
        assert_eq!(Pin::digital(7).to_string(), "D7");
        assert_eq!(Pin::analog(5).to_string(), "A5");
    }

    #[test]
    fn test_default_pin_map_is_valid() {
        let map = PinMap::default();
        assert_eq!(map.validate(), Ok(()));
        assert_eq!(map.pin_for(Line::Encoder(3)), Some(Pin::analog(3)));
        assert_eq!(map.pin_for(Line::Encoder(4)), None);
    }

    #[test]
    fn test_duplicate_pin_detected() {
        let map = PinMap {
            encoder: [Pin::analog(0), Pin::analog(1), Pin::analog(2), Pin::analog(4)],
            ..PinMap::default()
        };
        assert!(matches!(
            map.validate(),
            Err(HalError::DuplicatePin { pin, .. }) if pin == Pin::analog(4)
        ));
    }
}
