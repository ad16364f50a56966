//! Operator text report.
//!
//! Each record renders as a block of four labelled lines followed by a
//! delimiter:
//!
//! ```text
//! Error Type: SHORT
//! Segment: 2
//! Test Node: 5
//! Error Node: 3
//!
//! --------------------------------------------------
//!
//! ```
//!
//! The report ends with a single summary line.

use std::{fmt, io};

use ntd_fault_queue::{FaultQueue, FaultRecord, RecordArena};
use tracing::debug;

use crate::ReportResult;

/// Line separating consecutive records.
pub const DELIMITER: &str = "--------------------------------------------------";

/// Write one record block.
///
/// # Errors
///
/// Propagates the sink's error.
pub fn write_record<W: fmt::Write + ?Sized>(out: &mut W, record: &FaultRecord) -> fmt::Result {
    writeln!(out, "Error Type: {}", record.kind)?;
    writeln!(out, "Segment: {}", record.segment)?;
    writeln!(out, "Test Node: {}", record.commanded)?;
    writeln!(out, "Error Node: {}", record.observed)?;
    writeln!(out)?;
    writeln!(out, "{DELIMITER}")?;
    writeln!(out)
}

/// Text rendering of a fault queue, in queue order.
#[derive(Debug)]
pub struct TextReport<'q, A: RecordArena> {
    queue: &'q FaultQueue<A>,
}

impl<'q, A: RecordArena> TextReport<'q, A> {
    /// Report over `queue`.
    #[must_use]
    pub fn new(queue: &'q FaultQueue<A>) -> Self {
        Self { queue }
    }
}

impl<A: RecordArena> fmt::Display for TextReport<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut result = Ok(());
        self.queue.for_each(|record| {
            if result.is_ok() {
                result = write_record(&mut *f, record);
            }
        });
        result?;

        match (self.queue.len(), self.queue.dropped()) {
            (0, 0) => writeln!(f, "No faults found"),
            (count, dropped) => writeln!(f, "Faults found: {count} (dropped: {dropped})"),
        }
    }
}

/// Render `queue` into a `String`.
#[must_use]
pub fn render_text<A: RecordArena>(queue: &FaultQueue<A>) -> String {
    TextReport::new(queue).to_string()
}

/// Write the text report into any formatting sink.
///
/// # Errors
///
/// Returns [`ReportError::Format`](crate::ReportError::Format) if the sink fails.
pub fn write_text<W: fmt::Write + ?Sized, A: RecordArena>(
    out: &mut W,
    queue: &FaultQueue<A>,
) -> ReportResult<()> {
    write!(out, "{}", TextReport::new(queue))?;
    debug!(records = queue.len(), "text report rendered");
    Ok(())
}

/// Write the text report to a byte stream such as a serial port or stdout.
///
/// # Errors
///
/// Returns [`ReportError::Io`](crate::ReportError::Io) if the stream fails.
pub fn write_text_to<W: io::Write, A: RecordArena>(
    mut writer: W,
    queue: &FaultQueue<A>,
) -> ReportResult<()> {
    write!(writer, "{}", TextReport::new(queue))?;
    writer.flush()?;
    debug!(records = queue.len(), "text report written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ntd_fault_queue::{BudgetArena, QueueResult};
    use ntd_hal::Node;

    #[test]
    fn test_record_block() -> fmt::Result {
        let mut out = String::new();
        write_record(&mut out, &FaultRecord::open(4, Node::HighVoltage))?;
        assert_eq!(
            out,
            format!(
                "Error Type: OPEN\nSegment: 4\nTest Node: HIGH VOLTAGE CONNECTION\n\
                 Error Node: HIGH VOLTAGE CONNECTION\n\n{DELIMITER}\n\n"
            )
        );
        Ok(())
    }

    #[test]
    fn test_delimiter_width() {
        assert_eq!(DELIMITER.len(), 50);
        assert!(DELIMITER.chars().all(|c| c == '-'));
    }

    #[test]
    fn test_empty_report() -> QueueResult<()> {
        let queue = FaultQueue::create()?;
        assert_eq!(render_text(&queue), "No faults found\n");
        Ok(())
    }

    #[test]
    fn test_summary_counts_dropped() -> QueueResult<()> {
        let mut queue = FaultQueue::create_in(BudgetArena::new(1))?;
        let _ = queue.append(&FaultRecord::open(1, Node::ZERO));
        let _ = queue.append(&FaultRecord::open(2, Node::ZERO));
        let text = render_text(&queue);
        assert!(text.ends_with("Faults found: 1 (dropped: 1)\n"));
        assert_eq!(text.matches(DELIMITER).count(), 1);
        Ok(())
    }

    #[test]
    fn test_io_sink() -> Result<(), Box<dyn std::error::Error>> {
        let mut queue = FaultQueue::create()?;
        let _ = queue.append(&FaultRecord::short(0, Node::Blank, Node::DecimalPoint));
        let mut bytes = Vec::new();
        write_text_to(&mut bytes, &queue)?;
        assert_eq!(String::from_utf8(bytes)?, render_text(&queue));
        Ok(())
    }
}
