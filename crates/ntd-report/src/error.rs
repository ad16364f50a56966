//! Report rendering errors.

use std::{fmt, io};

/// Errors raised while writing a report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// The text sink refused a write.
    #[error("Report formatting failed")]
    Format(#[from] fmt::Error),

    /// The output stream failed.
    #[error("Report output failed")]
    Io(#[from] io::Error),

    /// The JSON document could not be produced.
    #[error("JSON report failed")]
    Json(#[from] serde_json::Error),
}

/// Result type for report rendering.
pub type ReportResult<T> = Result<T, ReportError>;
