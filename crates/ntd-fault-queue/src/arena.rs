//! Storage policies for the fault queue.
//!
//! The jig runs with a few kilobytes of RAM, so the queue asks an arena for
//! room before every append instead of letting the global allocator abort.

use std::collections::BTreeSet;

use crate::FaultRecord;

/// Initial capacity reserved for the queue's backing store.
pub const INITIAL_CAPACITY: usize = 16;

/// The arena could not provide storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("record arena exhausted")]
pub struct AllocError;

/// Source of storage for queued records.
pub trait RecordArena {
    /// Reserve the queue's own bookkeeping storage. Called once by
    /// [`FaultQueue::create_in`](crate::FaultQueue::create_in).
    ///
    /// # Errors
    ///
    /// Returns [`AllocError`] when no storage is available.
    fn reserve_header(&mut self, storage: &mut Vec<FaultRecord>) -> Result<(), AllocError>;

    /// Reserve room for one more record.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError`] when no storage is available.
    fn reserve_record(&mut self, storage: &mut Vec<FaultRecord>) -> Result<(), AllocError>;
}

impl<A: RecordArena + ?Sized> RecordArena for &mut A {
    fn reserve_header(&mut self, storage: &mut Vec<FaultRecord>) -> Result<(), AllocError> {
        (**self).reserve_header(storage)
    }

    fn reserve_record(&mut self, storage: &mut Vec<FaultRecord>) -> Result<(), AllocError> {
        (**self).reserve_record(storage)
    }
}

fn try_reserve(storage: &mut Vec<FaultRecord>, additional: usize) -> Result<(), AllocError> {
    storage.try_reserve(additional).map_err(|_err| AllocError)
}

/// Fallible heap storage.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeapArena;

impl RecordArena for HeapArena {
    fn reserve_header(&mut self, storage: &mut Vec<FaultRecord>) -> Result<(), AllocError> {
        try_reserve(storage, INITIAL_CAPACITY)
    }

    fn reserve_record(&mut self, storage: &mut Vec<FaultRecord>) -> Result<(), AllocError> {
        try_reserve(storage, 1)
    }
}

/// Heap storage capped at a fixed number of records.
#[derive(Debug, Clone, Copy)]
pub struct BudgetArena {
    max_records: usize,
}

impl BudgetArena {
    /// Allow at most `max_records` records.
    #[must_use]
    pub const fn new(max_records: usize) -> Self {
        Self { max_records }
    }
}

impl RecordArena for BudgetArena {
    fn reserve_header(&mut self, storage: &mut Vec<FaultRecord>) -> Result<(), AllocError> {
        try_reserve(storage, INITIAL_CAPACITY.min(self.max_records))
    }

    fn reserve_record(&mut self, storage: &mut Vec<FaultRecord>) -> Result<(), AllocError> {
        if storage.len() >= self.max_records {
            return Err(AllocError);
        }
        try_reserve(storage, 1)
    }
}

/// Heap storage that refuses chosen allocations.
///
/// Append attempts are numbered from 1 in the order they reach the arena.
#[derive(Debug, Clone, Default)]
pub struct FailingArena {
    fail_create: bool,
    fail_appends: BTreeSet<usize>,
    attempts: usize,
}

impl FailingArena {
    /// Refuse the queue's initial allocation.
    #[must_use]
    pub fn on_create() -> Self {
        Self {
            fail_create: true,
            ..Self::default()
        }
    }

    /// Refuse the given append attempts (1-based).
    #[must_use]
    pub fn on_appends(ordinals: impl IntoIterator<Item = usize>) -> Self {
        Self {
            fail_appends: ordinals.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Number of append attempts seen so far.
    #[must_use]
    pub fn attempts(&self) -> usize {
        self.attempts
    }
}

impl RecordArena for FailingArena {
    fn reserve_header(&mut self, storage: &mut Vec<FaultRecord>) -> Result<(), AllocError> {
        if self.fail_create {
            return Err(AllocError);
        }
        HeapArena.reserve_header(storage)
    }

    fn reserve_record(&mut self, storage: &mut Vec<FaultRecord>) -> Result<(), AllocError> {
        self.attempts = self.attempts.saturating_add(1);
        if self.fail_appends.contains(&self.attempts) {
            return Err(AllocError);
        }
        HeapArena.reserve_record(storage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heap_arena_reserves_initial_capacity() {
        let mut storage = Vec::new();
        assert_eq!(HeapArena.reserve_header(&mut storage), Ok(()));
        assert!(storage.capacity() >= INITIAL_CAPACITY);
    }

    #[test]
    fn test_budget_arena_ceiling() {
        let mut arena = BudgetArena::new(1);
        let mut storage = Vec::new();
        assert_eq!(arena.reserve_record(&mut storage), Ok(()));
        storage.push(FaultRecord::working(0));
        assert_eq!(arena.reserve_record(&mut storage), Err(AllocError));
    }

    #[test]
    fn test_failing_arena_counts_attempts() {
        let mut arena = FailingArena::on_appends([2]);
        let mut storage = Vec::new();
        assert_eq!(arena.reserve_header(&mut storage), Ok(()));
        assert_eq!(arena.reserve_record(&mut storage), Ok(()));
        assert_eq!(arena.reserve_record(&mut storage), Err(AllocError));
        assert_eq!(arena.reserve_record(&mut storage), Ok(()));
        assert_eq!(arena.attempts(), 3);
    }

    #[test]
    fn test_failing_arena_on_create() {
        let mut storage = Vec::new();
        assert_eq!(
            FailingArena::on_create().reserve_header(&mut storage),
            Err(AllocError)
        );
    }
}
