//! Prelude for convenient imports.
//!
//! ```rust
//! use ntd_fault_queue::prelude::*;
//! ```

pub use crate::{
    AllocError, AppendOutcome, BudgetArena, FailingArena, FaultKind, FaultQueue, FaultRecord,
    HeapArena, QueueError, QueueResult, RecordArena,
};
