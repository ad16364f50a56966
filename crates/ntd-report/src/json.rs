//! Machine-readable JSON report.

use ntd_fault_queue::{FaultQueue, FaultRecord, RecordArena};
use serde::Serialize;

use crate::ReportResult;

/// JSON document describing a fault queue.
///
/// ```json
/// { "faults": [ ... ], "count": 1, "dropped": 0 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsonReport<'q> {
    /// Records in queue order.
    pub faults: Vec<&'q FaultRecord>,
    /// Number of stored records.
    pub count: usize,
    /// Records lost to allocation failure.
    pub dropped: usize,
}

impl<'q> JsonReport<'q> {
    /// Collect `queue` into a report.
    #[must_use]
    pub fn from_queue<A: RecordArena>(queue: &'q FaultQueue<A>) -> Self {
        let mut faults = Vec::with_capacity(queue.len());
        queue.for_each(|record| faults.push(record));
        Self {
            count: faults.len(),
            dropped: queue.dropped(),
            faults,
        }
    }

    /// Pretty-printed JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Json`](crate::ReportError::Json) if serialization fails.
    pub fn to_string_pretty(&self) -> ReportResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// As a `serde_json::Value`, for embedding in a larger document.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Json`](crate::ReportError::Json) if serialization fails.
    pub fn to_value(&self) -> ReportResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}
