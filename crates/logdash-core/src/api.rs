//! JSON envelopes exchanged between the HTTP API and its clients.

use serde::{Deserialize, Serialize};

use crate::query::QueryPage;
use crate::summary::StatusSummary;
use crate::types::LogRecord;

/// Message for a non-empty result page.
pub const MSG_FILTERED: &str = "Filtered logs";

/// Message for an empty result page.
pub const MSG_NO_MATCH: &str = "No matching logs found";

/// Message for the summary response.
pub const MSG_SUMMARY: &str = "Logged data";

/// Response body of `GET /logged/data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataResponse {
    /// Human-readable outcome.
    pub message: String,
    /// Unpaginated match count.
    pub total: u64,
    /// The requested page.
    pub data: Vec<LogRecord>,
}

impl From<QueryPage> for DataResponse {
    fn from(page: QueryPage) -> Self {
        let message = if page.records.is_empty() {
            MSG_NO_MATCH
        } else {
            MSG_FILTERED
        };
        Self {
            message: message.to_string(),
            total: page.total,
            data: page.records,
        }
    }
}

/// Response body of `GET /logged/all`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResponse {
    /// Human-readable outcome.
    pub message: String,
    /// Records with status `Success`.
    pub success_data: u64,
    /// Records with status `Failure`.
    pub failure_data: u64,
    /// All records.
    pub all_data: u64,
}

impl From<StatusSummary> for SummaryResponse {
    fn from(summary: StatusSummary) -> Self {
        Self {
            message: MSG_SUMMARY.to_string(),
            success_data: summary.success_count,
            failure_data: summary.failure_count,
            all_data: summary.total_count,
        }
    }
}

/// Error body returned with any non-2xx status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable message.
    pub message: String,
    /// Detail, only sent by development deployments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A bare `{ "message": ... }` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    /// The message.
    pub message: String,
}
