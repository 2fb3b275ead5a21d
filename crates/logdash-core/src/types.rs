//! Core types for integration log records.
//!
//! This module provides:
//! - [`LogId`]: Store-assigned identifier for a record
//! - [`LogStatus`]: Outcome of the logged integration call
//! - [`Severity`]: Importance level, 1 (low) through 4 (critical)
//! - [`LogRecord`]: A single integration log record

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::LogError;

/// Unique identifier for a log record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogId(pub String);

impl LogId {
    /// Generates a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LogId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for LogId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Outcome of an integration call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogStatus {
    /// Completed successfully.
    Success,
    /// Failed to complete.
    Failure,
    /// Still in progress.
    Pending,
    /// Completed with warnings.
    Warning,
}

impl LogStatus {
    /// All statuses, in display order.
    pub const ALL: [Self; 4] = [Self::Success, Self::Failure, Self::Pending, Self::Warning];

    /// Returns the wire representation of this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Failure => "Failure",
            Self::Pending => "Pending",
            Self::Warning => "Warning",
        }
    }
}

impl fmt::Display for LogStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogStatus {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                LogError::invalid_filter(
                    "status",
                    s,
                    "expected one of Success, Failure, Pending, Warning",
                )
            })
    }
}

/// Importance level of a log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Severity(u8);

impl Severity {
    /// Lowest severity.
    pub const MIN: u8 = 1;
    /// Highest severity.
    pub const MAX: u8 = 4;

    /// Creates a severity, returning `None` outside `1..=4`.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value >= Self::MIN && value <= Self::MAX {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Returns the numeric level.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Severity {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| {
            format!(
                "severity {value} out of range {}..={}",
                Self::MIN,
                Self::MAX
            )
        })
    }
}

impl From<Severity> for u8 {
    fn from(severity: Severity) -> Self {
        severity.0
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single integration log record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    /// Store-assigned identifier.
    #[serde(alias = "_id")]
    pub id: LogId,
    /// Name of the interface that produced the record.
    pub interface_name: String,
    /// Integration key of the call.
    pub integration_key: String,
    /// Outcome of the call.
    pub status: LogStatus,
    /// Human-readable message.
    pub message: String,
    /// Importance level.
    pub severity: Severity,
    /// When the call was logged. Sole sort key, newest first.
    pub timestamp: DateTime<Utc>,
}

impl LogRecord {
    /// Creates a new log record builder.
    #[must_use]
    pub fn builder() -> LogRecordBuilder {
        LogRecordBuilder::default()
    }
}

/// Builder for constructing log records.
#[derive(Debug, Default)]
pub struct LogRecordBuilder {
    id: Option<LogId>,
    interface_name: Option<String>,
    integration_key: Option<String>,
    status: Option<LogStatus>,
    message: Option<String>,
    severity: Option<Severity>,
    timestamp: Option<DateTime<Utc>>,
}

impl LogRecordBuilder {
    /// Sets the record ID. A random ID is generated when unset.
    #[must_use]
    pub fn id(mut self, id: impl Into<LogId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the interface name.
    #[must_use]
    pub fn interface_name(mut self, name: impl Into<String>) -> Self {
        self.interface_name = Some(name.into());
        self
    }

    /// Sets the integration key.
    #[must_use]
    pub fn integration_key(mut self, key: impl Into<String>) -> Self {
        self.integration_key = Some(key.into());
        self
    }

    /// Sets the status.
    #[must_use]
    pub const fn status(mut self, status: LogStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the message.
    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sets the severity.
    #[must_use]
    pub const fn severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    /// Sets the timestamp.
    #[must_use]
    pub const fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Builds the record, returning an error if required fields are missing.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::MissingField`] if any field other than `id` is unset.
    pub fn build(self) -> Result<LogRecord, LogError> {
        Ok(LogRecord {
            id: self.id.unwrap_or_else(LogId::generate),
            interface_name: self
                .interface_name
                .ok_or(LogError::MissingField("interfaceName"))?,
            integration_key: self
                .integration_key
                .ok_or(LogError::MissingField("integrationKey"))?,
            status: self.status.ok_or(LogError::MissingField("status"))?,
            message: self.message.ok_or(LogError::MissingField("message"))?,
            severity: self.severity.ok_or(LogError::MissingField("severity"))?,
            timestamp: self.timestamp.ok_or(LogError::MissingField("timestamp"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn sample_record() -> LogRecord {
        LogRecord::builder()
            .id("abc123")
            .interface_name("OrderSync")
            .integration_key("ORD-42")
            .status(LogStatus::Failure)
            .message("Upstream timed out")
            .severity(Severity::new(3).unwrap())
            .timestamp(Utc::now())
            .build()
            .unwrap()
    }

    #[test_case("Success", LogStatus::Success ; "success")]
    #[test_case("Failure", LogStatus::Failure ; "failure")]
    #[test_case("Pending", LogStatus::Pending ; "pending")]
    #[test_case("Warning", LogStatus::Warning ; "warning")]
    fn status_parses_exact_names(input: &str, expected: LogStatus) {
        assert_eq!(input.parse::<LogStatus>().unwrap(), expected);
    }

    #[test_case("success" ; "lowercase")]
    #[test_case("FAILURE" ; "uppercase")]
    #[test_case("Done" ; "unknown")]
    #[test_case(" Success" ; "leading space")]
    fn status_rejects_other_spellings(input: &str) {
        let err = input.parse::<LogStatus>().unwrap_err();
        assert!(err.is_client_error());
    }

    #[test]
    fn status_round_trips_through_display() {
        for status in LogStatus::ALL {
            assert_eq!(status.to_string().parse::<LogStatus>().unwrap(), status);
        }
    }

    #[test_case(0, false ; "zero")]
    #[test_case(1, true ; "low")]
    #[test_case(4, true ; "critical")]
    #[test_case(5, false ; "above range")]
    fn severity_range(value: u8, valid: bool) {
        assert_eq!(Severity::new(value).is_some(), valid);
    }

    #[test]
    fn severity_rejects_out_of_range_json() {
        assert!(serde_json::from_str::<Severity>("2").is_ok());
        assert!(serde_json::from_str::<Severity>("9").is_err());
    }

    #[test]
    fn record_serializes_with_camel_case_fields() {
        let json = serde_json::to_value(sample_record()).unwrap();

        assert_eq!(json["id"], "abc123");
        assert_eq!(json["interfaceName"], "OrderSync");
        assert_eq!(json["integrationKey"], "ORD-42");
        assert_eq!(json["status"], "Failure");
        assert_eq!(json["severity"], 3);
    }

    #[test]
    fn record_accepts_document_id_alias() {
        let json = r#"{
            "_id": "65f0c1",
            "interfaceName": "Billing",
            "integrationKey": "INV-1",
            "status": "Success",
            "message": "ok",
            "severity": 1,
            "timestamp": "2024-03-01T10:00:00Z"
        }"#;

        let record: LogRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id.as_str(), "65f0c1");
        assert_eq!(record.status, LogStatus::Success);
    }

    #[test]
    fn builder_reports_missing_field() {
        let result = LogRecord::builder()
            .interface_name("OrderSync")
            .status(LogStatus::Success)
            .build();

        assert!(matches!(
            result,
            Err(LogError::MissingField("integrationKey"))
        ));
    }

    #[test]
    fn builder_generates_id_when_unset() {
        let a = LogRecord::builder()
            .interface_name("A")
            .integration_key("K")
            .status(LogStatus::Pending)
            .message("m")
            .severity(Severity::new(1).unwrap())
            .timestamp(Utc::now())
            .build()
            .unwrap();

        assert!(!a.id.as_str().is_empty());
    }
}
