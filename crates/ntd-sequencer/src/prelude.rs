//! Prelude for convenient imports.
//!
//! ```rust
//! use ntd_sequencer::prelude::*;
//! ```

pub use crate::{
    ConfigError, ConfigResult, DiagnosticSession, DistressSignal, RunSummary, SegmentTester,
    SequencerConfig, SequencerConfigBuilder, SessionError, SessionResult,
};
