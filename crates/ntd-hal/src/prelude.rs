//! Prelude for convenient imports.
//!
//! ```rust
//! use ntd_hal::prelude::*;
//! ```

pub use crate::{
    Actuation, Board, Delay, Digit, DigitalLines, DisplayDriver, DisplayFrame, DisplayPins,
    HalError, HalResult, InjectedFault, JigHardware, Level, Line, Node, Pin, PinMap,
    SEGMENT_COUNT, SimulatedJig,
};
