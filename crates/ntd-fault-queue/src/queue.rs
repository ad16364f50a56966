//! The fault queue.

use tracing::{debug, warn};

use crate::{FaultKind, FaultRecord, HeapArena, QueueError, QueueResult, RecordArena};

/// Result of offering a record to the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum AppendOutcome {
    /// The record was copied to the tail of the queue.
    Stored,
    /// The arena had no room; the record was lost.
    Dropped,
    /// The record carried [`FaultKind::None`] and was ignored.
    Rejected,
}

/// Append-only, insertion-ordered log of fault records.
///
/// Iteration order is detection order. Records are never mutated or
/// removed; the whole queue is released at once by [`destroy`](Self::destroy)
/// or by dropping it.
#[derive(Debug)]
pub struct FaultQueue<A: RecordArena = HeapArena> {
    records: Vec<FaultRecord>,
    arena: A,
    dropped: usize,
}

impl FaultQueue<HeapArena> {
    /// Create an empty queue on the heap.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::CreationFailed`] if the initial allocation fails.
    pub fn create() -> QueueResult<Self> {
        Self::create_in(HeapArena)
    }
}

impl<A: RecordArena> FaultQueue<A> {
    /// Create an empty queue drawing storage from `arena`.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::CreationFailed`] if the arena cannot provide the
    /// queue's initial storage. The jig cannot run without a queue, so callers
    /// treat this as fatal.
    pub fn create_in(mut arena: A) -> QueueResult<Self> {
        let mut records = Vec::new();
        arena
            .reserve_header(&mut records)
            .map_err(QueueError::CreationFailed)?;
        debug!(capacity = records.capacity(), "fault queue created");
        Ok(Self {
            records,
            arena,
            dropped: 0,
        })
    }

    /// Copy `record` onto the tail of the queue.
    ///
    /// Never fails: if the arena is out of room the record is dropped and
    /// counted in [`dropped`](Self::dropped).
    pub fn append(&mut self, record: &FaultRecord) -> AppendOutcome {
        if record.kind == FaultKind::None {
            warn!(segment = record.segment, "ignoring record with no fault kind");
            return AppendOutcome::Rejected;
        }
        match self.arena.reserve_record(&mut self.records) {
            Ok(()) => {
                self.records.push(*record);
                AppendOutcome::Stored
            }
            Err(err) => {
                self.dropped = self.dropped.saturating_add(1);
                warn!(
                    %record,
                    dropped = self.dropped,
                    error = %err,
                    "fault record dropped"
                );
                AppendOutcome::Dropped
            }
        }
    }

    /// Iterate over the records in insertion order.
    ///
    /// Each call starts a fresh traversal from the head.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &FaultRecord> + '_ {
        self.records.iter()
    }

    /// Visit every record in insertion order.
    ///
    /// The visitor may keep the references it is given for as long as the
    /// queue is borrowed.
    pub fn for_each<'s>(&'s self, mut visitor: impl FnMut(&'s FaultRecord)) {
        for record in &self.records {
            visitor(record);
        }
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no record has been stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records lost to allocation failure.
    #[must_use]
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// The arena backing this queue.
    #[must_use]
    pub fn arena(&self) -> &A {
        &self.arena
    }

    /// Release every record and the queue itself, returning how many records
    /// were released.
    pub fn destroy(self) -> usize {
        let released = self.records.len();
        debug!(released, dropped = self.dropped, "fault queue destroyed");
        released
    }
}

impl<'a, A: RecordArena> IntoIterator for &'a FaultQueue<A> {
    type Item = &'a FaultRecord;
    type IntoIter = std::slice::Iter<'a, FaultRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
