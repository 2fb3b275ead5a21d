//! Error types for log filtering and storage.

use thiserror::Error;

/// Errors that can occur while building filters or reading the log store.
#[derive(Debug, Error)]
pub enum LogError {
    /// A query parameter could not be turned into a filter value.
    #[error("invalid value for {field}: {value:?} ({reason})")]
    InvalidFilterValue {
        /// Name of the offending parameter, as sent by the client.
        field: &'static str,
        /// The raw value received.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A required field was not provided.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The backing store failed or could not be reached.
    #[error("log store unavailable: {0}")]
    StoreUnavailable(String),

    /// Serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored record could not be parsed.
    #[error("parse error at line {line}: {reason}")]
    ParseError {
        /// 1-based line number in the source file.
        line: usize,
        /// Parser message.
        reason: String,
    },
}

impl LogError {
    /// Builds an [`LogError::InvalidFilterValue`].
    pub fn invalid_filter(
        field: &'static str,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidFilterValue {
            field,
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if the error was caused by client input rather than the store.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidFilterValue { .. })
    }
}

/// Result type alias for log operations.
pub type Result<T> = std::result::Result<T, LogError>;
