//! # ntd-hal
//!
//! Hardware abstraction for the NTD (nixie tube driver) test jig.
//!
//! The jig drives one segment of the board under test at a time through a
//! 3-bit segment-select multiplexer, commands digits through the nixie
//! display driver, and samples the result through a 4-bit active-low
//! priority encoder plus three dedicated sense lines.
//!
//! This crate provides:
//! - [`Digit`] and [`Node`], the value space shared by commanded and observed states
//! - [`Line`], [`Level`] and [`PinMap`] describing the jig's digital lines
//! - [`DigitalLines`], [`DisplayDriver`] and [`Delay`], the collaborator seams
//! - [`Board`], which composes three independent collaborators into one [`JigHardware`]
//! - [`SimulatedJig`], a software board with programmable fault injection
//!
//! ## Line polarity
//!
//! ```text
//! SENSE_0, SENSE_DP     Low  = lit
//! SENSE_HV              High = rail present
//! ENC_0..ENC_3          active-low, code 0 = no digit lit
//! ```
//!
//! ## Example
//!
//! ```rust
//! use ntd_hal::prelude::*;
//!
//! # fn main() -> Result<(), HalError> {
//! let mut jig = SimulatedJig::new();
//! jig.write_line(Line::SegmentEnable, Level::High);
//! jig.display_digits(DisplayFrame::single(0, Digit::ZERO)?);
//! assert_eq!(jig.read_line(Line::SenseZero), Level::Low);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

mod digit;
mod error;
mod io;
mod line;
mod sim;

pub mod prelude;

pub use digit::{Digit, Node};
pub use error::{HalError, HalResult};
pub use io::{Board, Delay, DigitalLines, DisplayDriver, DisplayFrame, JigHardware, SEGMENT_COUNT};
pub use line::{DisplayPins, Level, Line, Pin, PinMap};
pub use sim::{Actuation, InjectedFault, SimulatedJig};
