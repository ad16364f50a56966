//! Distress signalling for fatal halts.

use ntd_hal::{Delay, DigitalLines, Level, Line};
use tracing::trace;

/// Blinks the status LED to tell the operator the jig has stopped.
#[derive(Debug)]
pub struct DistressSignal<'a, H: ?Sized> {
    hw: &'a mut H,
    half_period_ms: u32,
}

impl<'a, H: DigitalLines + Delay + ?Sized> DistressSignal<'a, H> {
    /// Blink with the given on/off half-period.
    pub fn new(hw: &'a mut H, half_period_ms: u32) -> Self {
        Self { hw, half_period_ms }
    }

    /// One full on/off cycle.
    pub fn blink_once(&mut self) {
        self.hw.write_line(Line::StatusLed, Level::High);
        self.hw.delay_ms(self.half_period_ms);
        self.hw.write_line(Line::StatusLed, Level::Low);
        self.hw.delay_ms(self.half_period_ms);
    }

    /// Blink `cycles` times and return.
    pub fn blink(&mut self, cycles: u32) {
        for cycle in 0..cycles {
            trace!(cycle, "distress blink");
            self.blink_once();
        }
    }

    /// Blink until power is removed.
    pub fn run_forever(mut self) -> ! {
        loop {
            self.blink_once();
        }
    }
}
