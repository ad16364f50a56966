//! Fault reports for the NTD test jig.
//!
//! Renders a [`FaultQueue`](ntd_fault_queue::FaultQueue) as the operator text
//! report ([`TextReport`]) or as a JSON document ([`JsonReport`]). Both walk
//! the queue in insertion order and never modify it.
//!
//! # Example
//!
//! ```rust
//! use ntd_fault_queue::{FaultQueue, FaultRecord};
//! use ntd_hal::Node;
//! use ntd_report::render_text;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut queue = FaultQueue::create()?;
//! let _ = queue.append(&FaultRecord::open(3, Node::DecimalPoint));
//!
//! let text = render_text(&queue);
//! assert!(text.starts_with("Error Type: OPEN\nSegment: 3\n"));
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

mod error;
mod json;
mod text;

pub mod prelude;

pub use error::{ReportError, ReportResult};
pub use json::JsonReport;
pub use text::{DELIMITER, TextReport, render_text, write_record, write_text, write_text_to};
