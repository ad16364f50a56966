//! Prelude for convenient imports.
//!
//! ```rust
//! use ntd_report::prelude::*;
//! ```

pub use crate::{JsonReport, ReportError, ReportResult, TextReport, render_text, write_text, write_text_to};
