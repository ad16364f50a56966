//! Software model of the test jig with a board under test.
//!
//! `SimulatedJig` behaves like the real fixture: the segment multiplexer only
//! routes sense lines while its outputs are enabled, the priority encoder
//! reports the highest lit digit, and the decimal point driven "after"
//! segment `n` appears on segment `n + 1`. Board defects are injected as
//! [`InjectedFault`]s.

use tracing::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Delay, DigitalLines, DisplayDriver, DisplayFrame, Level, Line, Node, SEGMENT_COUNT};

/// A defect on the simulated board under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(tag = "fault", rename_all = "snake_case")
)]
pub enum InjectedFault {
    /// `node` never lights on `segment`, even when commanded.
    Open {
        /// Affected segment.
        segment: u8,
        /// Node that stays dark.
        node: Node,
    },
    /// `lights` comes on whenever `when` is the commanded state of `segment`.
    /// A `when` of [`Node::Blank`] fires while nothing is commanded.
    Short {
        /// Affected segment.
        segment: u8,
        /// Commanded state that triggers the short.
        when: Node,
        /// Node that wrongly lights.
        lights: Node,
    },
    /// `node` is lit on `segment` regardless of what is commanded.
    Stuck {
        /// Affected segment.
        segment: u8,
        /// Node that is always lit.
        node: Node,
    },
    /// The high-voltage rail does not reach `segment`.
    NoHighVoltage {
        /// Affected segment.
        segment: u8,
    },
    /// The encoder outputs a fixed raw code while `segment` is selected.
    EncoderStuck {
        /// Affected segment.
        segment: u8,
        /// Raw 4-bit code.
        code: u8,
    },
}

impl InjectedFault {
    fn segment(&self) -> u8 {
        match self {
            InjectedFault::Open { segment, .. }
            | InjectedFault::Short { segment, .. }
            | InjectedFault::Stuck { segment, .. }
            | InjectedFault::NoHighVoltage { segment }
            | InjectedFault::EncoderStuck { segment, .. } => *segment,
        }
    }
}

/// One interaction between the jig firmware and the simulated board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actuation {
    /// A line was driven.
    Write(Line, Level),
    /// A line was sampled.
    Read(Line),
    /// A display frame was commanded.
    Display(DisplayFrame),
    /// A decimal point was switched.
    DecimalPoint {
        /// Segment the decimal point follows.
        segment: u8,
        /// New state.
        on: bool,
    },
    /// A settle delay elapsed.
    Delay(u32),
}

/// Simulated jig and board under test.
#[derive(Debug, Clone, Default)]
pub struct SimulatedJig {
    outputs_enabled: bool,
    select_bits: [Level; 3],
    status_led: Level,
    frame: DisplayFrame,
    decimal_points: [bool; SEGMENT_COUNT],
    faults: Vec<InjectedFault>,
    log: Vec<Actuation>,
    elapsed_ms: u64,
}

impl SimulatedJig {
    /// A jig holding a fault-free board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A jig holding a board with the given defects.
    #[must_use]
    pub fn with_faults(faults: impl IntoIterator<Item = InjectedFault>) -> Self {
        Self {
            faults: faults.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Injected defects.
    #[must_use]
    pub fn faults(&self) -> &[InjectedFault] {
        &self.faults
    }

    /// Every interaction since creation or the last [`clear_log`](Self::clear_log).
    #[must_use]
    pub fn log(&self) -> &[Actuation] {
        &self.log
    }

    /// Forget recorded interactions.
    pub fn clear_log(&mut self) {
        self.log.clear();
    }

    /// Total simulated time spent in delays.
    #[must_use]
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Current status LED level.
    #[must_use]
    pub fn status_led(&self) -> Level {
        self.status_led
    }

    /// Segment currently routed to the sense lines.
    #[must_use]
    pub fn selected_segment(&self) -> Option<u8> {
        if !self.outputs_enabled {
            return None;
        }
        let code = self
            .select_bits
            .iter()
            .enumerate()
            .filter(|(_, level)| level.is_high())
            .fold(0u8, |acc, (bit, _)| acc | (1u8 << bit));
        (usize::from(code) < SEGMENT_COUNT).then_some(code)
    }

    /// Nodes commanded on `segment`; empty means blank.
    fn commanded(&self, segment: u8) -> Vec<Node> {
        let mut nodes = Vec::with_capacity(2);
        if let Some(digit) = self.frame.digit_at(segment) {
            nodes.push(Node::Digit(digit));
        }
        let dp_on = segment
            .checked_sub(1)
            .and_then(|prev| self.decimal_points.get(usize::from(prev)))
            .copied()
            .unwrap_or(false);
        if dp_on {
            nodes.push(Node::DecimalPoint);
        }
        nodes
    }

    /// Nodes physically lit on `segment`.
    fn lit(&self, segment: u8) -> Vec<Node> {
        let commanded = self.commanded(segment);
        let faults = || self.faults.iter().filter(move |f| f.segment() == segment);

        let mut lit: Vec<Node> = commanded
            .iter()
            .copied()
            .filter(|node| {
                !faults().any(|f| matches!(f, InjectedFault::Open { node: open, .. } if open == node))
            })
            .collect();

        for fault in faults() {
            let extra = match *fault {
                InjectedFault::Stuck { node, .. } => Some(node),
                InjectedFault::Short { when, lights, .. } => {
                    let triggered = if when == Node::Blank {
                        commanded.is_empty()
                    } else {
                        commanded.contains(&when)
                    };
                    triggered.then_some(lights)
                }
                _ => None,
            };
            if let Some(node) = extra {
                if !lit.contains(&node) {
                    lit.push(node);
                }
            }
        }
        lit
    }

    fn encoder_code(&self, segment: u8) -> u8 {
        let stuck = self.faults.iter().find_map(|f| match *f {
            InjectedFault::EncoderStuck { segment: s, code } if s == segment => Some(code & 0x0F),
            _ => None,
        });
        stuck.unwrap_or_else(|| {
            self.lit(segment)
                .iter()
                .filter_map(|node| node.as_digit())
                .map(crate::Digit::value)
                .filter(|&v| v > 0)
                .max()
                .unwrap_or(0)
        })
    }

    fn sample(&self, line: Line) -> Level {
        let Some(segment) = self.selected_segment() else {
            // Mux disabled: sense lines float to their pull-ups, HV reads absent.
            return match line {
                Line::SenseHighVoltage => Level::Low,
                Line::SegmentEnable => Level::from(self.outputs_enabled),
                Line::StatusLed => self.status_led,
                _ => Level::High,
            };
        };
        match line {
            Line::SegmentEnable => Level::from(self.outputs_enabled),
            Line::SegmentSelect(bit) => self
                .select_bits
                .get(usize::from(bit))
                .copied()
                .unwrap_or(Level::Low),
            Line::StatusLed => self.status_led,
            Line::Encoder(bit) => {
                let code = self.encoder_code(segment);
                Level::from(bit >= Line::ENCODER_BITS || code & (1u8 << bit) == 0)
            }
            Line::SenseZero => Level::from(!self.lit(segment).contains(&Node::ZERO)),
            Line::SenseDecimalPoint => {
                Level::from(!self.lit(segment).contains(&Node::DecimalPoint))
            }
            Line::SenseHighVoltage => Level::from(!self.faults.iter().any(
                |f| matches!(f, InjectedFault::NoHighVoltage { segment: s } if *s == segment),
            )),
        }
    }
}

impl DigitalLines for SimulatedJig {
    fn write_line(&mut self, line: Line, level: Level) {
        trace!(%line, ?level, "sim write");
        self.log.push(Actuation::Write(line, level));
        match line {
            Line::SegmentEnable => self.outputs_enabled = level.is_high(),
            Line::SegmentSelect(bit) => {
                if let Some(slot) = self.select_bits.get_mut(usize::from(bit)) {
                    *slot = level;
                }
            }
            Line::StatusLed => self.status_led = level,
            // Inputs: writes have no effect on the board.
            _ => {}
        }
    }

    fn read_line(&mut self, line: Line) -> Level {
        self.log.push(Actuation::Read(line));
        let level = self.sample(line);
        trace!(%line, ?level, "sim read");
        level
    }
}

impl DisplayDriver for SimulatedJig {
    fn display_digits(&mut self, frame: DisplayFrame) {
        trace!(%frame, "sim display");
        self.log.push(Actuation::Display(frame));
        self.frame = frame;
    }

    fn set_decimal_point(&mut self, segment: u8, on: bool) {
        self.log.push(Actuation::DecimalPoint { segment, on });
        if let Some(dp) = self.decimal_points.get_mut(usize::from(segment)) {
            *dp = on;
        }
    }
}

impl Delay for SimulatedJig {
    fn delay_ms(&mut self, ms: u32) {
        self.log.push(Actuation::Delay(ms));
        self.elapsed_ms = self.elapsed_ms.saturating_add(u64::from(ms));
    }
}
