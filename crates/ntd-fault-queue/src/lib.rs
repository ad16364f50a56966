//! Fault queue for the NTD test jig.
//!
//! An append-only log of [`FaultRecord`]s in detection order. The segment
//! test sequencer is the only writer; report renderers read it through
//! [`FaultQueue::iter`] or [`FaultQueue::for_each`].
//!
//! # Storage policy
//!
//! - Creating the queue is the one allocation the jig cannot survive:
//!   [`FaultQueue::create`] returns [`QueueError::CreationFailed`] and the
//!   caller halts.
//! - Appends that cannot get storage are dropped and counted
//!   ([`AppendOutcome::Dropped`], [`FaultQueue::dropped`]); the run continues.
//!
//! Storage comes from a [`RecordArena`]: [`HeapArena`] for normal use,
//! [`BudgetArena`] to model a fixed memory ceiling, and [`FailingArena`] to
//! refuse chosen allocations.
//!
//! # Example
//!
//! ```rust
//! use ntd_fault_queue::prelude::*;
//! use ntd_hal::Node;
//!
//! # fn main() -> Result<(), QueueError> {
//! let mut queue = FaultQueue::create()?;
//! let _ = queue.append(&FaultRecord::open(2, Node::DecimalPoint));
//! assert_eq!(queue.len(), 1);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

mod arena;
mod error;
mod queue;
mod record;

pub mod prelude;

pub use arena::{AllocError, BudgetArena, FailingArena, HeapArena, INITIAL_CAPACITY, RecordArena};
pub use error::{QueueError, QueueResult};
pub use queue::{AppendOutcome, FaultQueue};
pub use record::{FaultKind, FaultRecord};
