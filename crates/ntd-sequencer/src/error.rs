//! Error types for the sequencer and diagnostic session.

use ntd_fault_queue::QueueError;
use ntd_hal::HalError;

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A timing value is outside its accepted range.
    #[error("{field} = {value} is out of range ({min}..={max})")]
    OutOfRange {
        /// Field name.
        field: &'static str,
        /// Offending value.
        value: u32,
        /// Lowest accepted value.
        min: u32,
        /// Highest accepted value.
        max: u32,
    },

    /// The pin map is inconsistent.
    #[error("Invalid pin map")]
    Pins(#[from] HalError),
}

/// Result type for configuration.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Diagnostic session errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The session configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The fault queue could not be created. The jig must halt.
    #[error(transparent)]
    QueueUnavailable(#[from] QueueError),
}

impl SessionError {
    /// Whether the jig must halt rather than report and continue.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, SessionError::QueueUnavailable(_))
    }
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
