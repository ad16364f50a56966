//! Segment test sequencer for the NTD test jig.
//!
//! The sequencer walks one segment of the board under test through every
//! node it can display, classifies what the sense lines report and appends
//! OPEN/SHORT findings to the session's [`FaultQueue`](ntd_fault_queue::FaultQueue).
//!
//! # Architecture
//!
//! - [`SegmentTester`]: the per-segment test algorithm
//! - [`DiagnosticSession`]: owns the fault queue and working record, runs the whole panel
//! - [`SequencerConfig`]: settle times, distress blink period and pin map
//! - [`DistressSignal`]: status LED blinking for the fatal halt
//! - [`encoder`]: priority encoder decoding
//!
//! # Failure tiers
//!
//! ```text
//! queue creation fails   ──► fatal: DistressSignal::run_forever
//! record append fails    ──► record dropped and counted, run continues
//! OPEN / SHORT detected  ──► appended to the queue (this is the output)
//! ```
//!
//! # Example
//!
//! ```rust
//! use ntd_hal::{InjectedFault, Node, SimulatedJig};
//! use ntd_sequencer::prelude::*;
//!
//! # fn main() -> Result<(), SessionError> {
//! let mut jig = SimulatedJig::with_faults([InjectedFault::Open { segment: 2, node: Node::ZERO }]);
//! let mut session = DiagnosticSession::new(SequencerConfig::default())?;
//!
//! let summary = session.run_all(&mut jig);
//! assert_eq!(summary.faults_recorded, 1);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

mod config;
mod error;
mod halt;
mod sequencer;
mod session;

pub mod encoder;
pub mod prelude;

pub use config::{SequencerConfig, SequencerConfigBuilder};
pub use error::{ConfigError, ConfigResult, SessionError, SessionResult};
pub use halt::DistressSignal;
pub use sequencer::SegmentTester;
pub use session::{DiagnosticSession, RunSummary};
