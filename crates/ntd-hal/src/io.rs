//! Collaborator traits the test sequencer drives.
//!
//! The sequencer never touches pins directly: it writes and reads logical
//! [`Line`]s, commands whole display frames, and blocks on settle delays.
//! Real firmware wires these to GPIO, the nixie shift-register driver and a
//! hardware timer; tests use [`SimulatedJig`](crate::SimulatedJig).

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Digit, HalError, HalResult, Level, Line};

/// Number of segments on the board under test.
pub const SEGMENT_COUNT: usize = 6;

/// Raw digital line access.
pub trait DigitalLines {
    /// Drive an output line.
    fn write_line(&mut self, line: Line, level: Level);

    /// Sample a line.
    fn read_line(&mut self, line: Line) -> Level;
}

/// The nixie display driver.
pub trait DisplayDriver {
    /// Command the digits of all segments at once; `None` blanks a segment.
    fn display_digits(&mut self, frame: DisplayFrame);

    /// Switch the decimal point following `segment` on or off, independently
    /// of the digit content.
    fn set_decimal_point(&mut self, segment: u8, on: bool);
}

/// Blocking delay source.
pub trait Delay {
    /// Block for `ms` milliseconds.
    fn delay_ms(&mut self, ms: u32);
}

/// Everything the sequencer needs from the jig in one bound.
pub trait JigHardware: DigitalLines + DisplayDriver + Delay {}

impl<T: DigitalLines + DisplayDriver + Delay> JigHardware for T {}

impl<T: DigitalLines + ?Sized> DigitalLines for &mut T {
    fn write_line(&mut self, line: Line, level: Level) {
        (**self).write_line(line, level);
    }

    fn read_line(&mut self, line: Line) -> Level {
        (**self).read_line(line)
    }
}

impl<T: DisplayDriver + ?Sized> DisplayDriver for &mut T {
    fn display_digits(&mut self, frame: DisplayFrame) {
        (**self).display_digits(frame);
    }

    fn set_decimal_point(&mut self, segment: u8, on: bool) {
        (**self).set_decimal_point(segment, on);
    }
}

impl<T: Delay + ?Sized> Delay for &mut T {
    fn delay_ms(&mut self, ms: u32) {
        (**self).delay_ms(ms);
    }
}

/// Digit content commanded across the whole panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayFrame([Option<Digit>; SEGMENT_COUNT]);

impl DisplayFrame {
    /// All segments blank.
    #[must_use]
    pub const fn blank() -> Self {
        Self([None; SEGMENT_COUNT])
    }

    /// One segment showing `digit`, every other segment blank.
    ///
    /// # Errors
    ///
    /// Returns [`HalError::InvalidSegment`] if `segment` is off the panel.
    pub fn single(segment: u8, digit: Digit) -> HalResult<Self> {
        let mut frame = Self::blank();
        let slot = frame
            .0
            .get_mut(usize::from(segment))
            .ok_or(HalError::InvalidSegment(segment))?;
        *slot = Some(digit);
        Ok(frame)
    }

    /// Digit commanded on `segment`, if any.
    #[must_use]
    pub fn digit_at(&self, segment: u8) -> Option<Digit> {
        self.0.get(usize::from(segment)).copied().flatten()
    }

    /// Whether every segment is blank.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.iter().all(Option::is_none)
    }
}

impl fmt::Display for DisplayFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for slot in &self.0 {
            match slot {
                Some(d) => write!(f, "{d}")?,
                None => write!(f, "_")?,
            }
        }
        Ok(())
    }
}

/// Composes independent line, display and delay collaborators into one
/// [`JigHardware`].
#[derive(Debug)]
pub struct Board<L, D, T> {
    /// Digital line access.
    pub lines: L,
    /// Display driver.
    pub display: D,
    /// Delay source.
    pub timer: T,
}

impl<L, D, T> Board<L, D, T> {
    /// Create a board from its parts.
    pub fn new(lines: L, display: D, timer: T) -> Self {
        Self {
            lines,
            display,
            timer,
        }
    }

    /// Split the board back into its parts.
    pub fn into_parts(self) -> (L, D, T) {
        (self.lines, self.display, self.timer)
    }
}

impl<L: DigitalLines, D, T> DigitalLines for Board<L, D, T> {
    fn write_line(&mut self, line: Line, level: Level) {
        self.lines.write_line(line, level);
    }

    fn read_line(&mut self, line: Line) -> Level {
        self.lines.read_line(line)
    }
}

impl<L, D: DisplayDriver, T> DisplayDriver for Board<L, D, T> {
    fn display_digits(&mut self, frame: DisplayFrame) {
        self.display.display_digits(frame);
    }

    fn set_decimal_point(&mut self, segment: u8, on: bool) {
        self.display.set_decimal_point(segment, on);
    }
}

impl<L, D, T: Delay> Delay for Board<L, D, T> {
    fn delay_ms(&mut self, ms: u32) {
        self.timer.delay_ms(ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct CountingTimer {
        total_ms: u64,
    }

    impl Delay for CountingTimer {
        fn delay_ms(&mut self, ms: u32) {
            self.total_ms = self.total_ms.saturating_add(u64::from(ms));
        }
    }

    #[test]
    fn test_single_frame() -> Result<(), HalError> {
        let five = Digit::try_from(5)?;
        let frame = DisplayFrame::single(2, five)?;
        assert_eq!(frame.digit_at(2), Some(five));
        assert_eq!(frame.digit_at(0), None);
        assert_eq!(frame.to_string(), "__5___");
        assert!(!frame.is_blank());
        Ok(())
    }

    #[test]
    fn test_single_frame_rejects_off_panel_segment() {
        assert_eq!(
            DisplayFrame::single(6, Digit::ZERO),
            Err(HalError::InvalidSegment(6))
        );
    }

    #[test]
    fn test_blank_frame() {
        assert!(DisplayFrame::blank().is_blank());
        assert_eq!(DisplayFrame::blank().to_string(), "______");
    }

    #[test]
    fn test_board_delegates_delay() {
        let mut board = Board::new((), (), CountingTimer::default());
        board.delay_ms(10);
        (&mut board).delay_ms(5);
        let ((), (), timer) = board.into_parts();
        assert_eq!(timer.total_ms, 15);
    }
}
