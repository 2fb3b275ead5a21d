//! Filter construction from raw query parameters.
//!
//! This is the single place where request parameters are validated and
//! turned into a [`FilterCriteria`]. The HTTP layer and the client both go
//! through [`FilterParams`], so escaping and presence rules cannot drift
//! between them.
//!
//! Presence is explicit: a parameter counts as present when it was sent with
//! a non-empty value. `severity=0` is present (and then rejected as out of
//! range); `severity=` is absent.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{LogError, Result};
use crate::types::{LogRecord, LogStatus, Severity};

/// Page size used by the dashboard.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Upper bound for a client-requested page size.
pub const MAX_PAGE_SIZE: u32 = 500;

/// Naive date-time layouts accepted for `dateFrom` / `dateTo`, read as UTC.
const NAIVE_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Page size policy applied when building criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    /// Page size when `limit` is absent.
    pub default_page_size: u32,
    /// Larger requested sizes are clamped to this.
    pub max_page_size: u32,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

/// Raw, loosely-typed filter parameters as they arrive on the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterParams {
    /// Free-text search over message, integration key and interface name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Exact status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Exact interface name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface_name: Option<String>,
    /// Severity level, 1 to 4.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    /// Inclusive lower timestamp bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
    /// Inclusive upper timestamp bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,
    /// 1-based page number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    /// Page size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<String>,
}

impl FilterParams {
    /// Validates the parameters and builds the criteria for one request.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::InvalidFilterValue`] for a malformed status,
    /// severity, date, page or limit.
    pub fn into_criteria(self, limits: &PageLimits) -> Result<FilterCriteria> {
        let mut predicate = LogPredicate::new();

        if let Some(term) = present(self.search.as_deref()) {
            predicate.search = Some(TextSearch::new(term)?);
        }
        if let Some(status) = present(self.status.as_deref()) {
            predicate.status = Some(status.parse()?);
        }
        if let Some(name) = present(self.interface_name.as_deref()) {
            predicate.interface_name = Some(name.to_string());
        }
        if let Some(severity) = present(self.severity.as_deref()) {
            predicate.severity = Some(parse_severity(severity)?);
        }
        if let Some(from) = present(self.date_from.as_deref()) {
            predicate.date_range.from = Some(parse_date_time("dateFrom", from)?);
        }
        if let Some(to) = present(self.date_to.as_deref()) {
            predicate.date_range.to = Some(parse_date_time("dateTo", to)?);
        }

        let page = match present(self.page.as_deref()) {
            Some(raw) => parse_positive("page", raw)?,
            None => 1,
        };
        let page_size = match present(self.limit.as_deref()) {
            Some(raw) => parse_positive("limit", raw)?.min(limits.max_page_size),
            None => limits.default_page_size,
        };

        let criteria = FilterCriteria {
            predicate,
            pagination: Pagination::new(page, page_size),
        };
        trace!(?criteria, "built filter criteria");
        Ok(criteria)
    }
}

/// Validated filter and page selection for one request.
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    /// Which records match.
    pub predicate: LogPredicate,
    /// Which slice of the matches to return.
    pub pagination: Pagination,
}

/// Case-insensitive literal substring search.
#[derive(Debug, Clone)]
pub struct TextSearch {
    term: String,
    pattern: Regex,
}

impl TextSearch {
    /// Compiles a search for `term`. Pattern syntax in `term` is escaped.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::InvalidFilterValue`] if the escaped pattern exceeds
    /// the regex size limit.
    pub fn new(term: &str) -> Result<Self> {
        let pattern = RegexBuilder::new(&regex::escape(term))
            .case_insensitive(true)
            .build()
            .map_err(|e| LogError::invalid_filter("search", term, e.to_string()))?;
        Ok(Self {
            term: term.to_string(),
            pattern,
        })
    }

    /// The literal term as typed.
    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Returns true if `text` contains the term, ignoring case.
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

impl PartialEq for TextSearch {
    fn eq(&self, other: &Self) -> bool {
        self.term == other.term
    }
}

/// Inclusive timestamp range. Either end may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    /// Lower bound (inclusive).
    pub from: Option<DateTime<Utc>>,
    /// Upper bound (inclusive).
    pub to: Option<DateTime<Utc>>,
}

impl DateRange {
    /// Creates a range with the given bounds.
    #[must_use]
    pub const fn new(from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> Self {
        Self { from, to }
    }

    /// Checks if a timestamp falls within this range.
    #[must_use]
    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        self.from.is_none_or(|from| timestamp >= from) && self.to.is_none_or(|to| timestamp <= to)
    }
}

/// Conjunction of the per-field constraints. Absent fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogPredicate {
    /// Substring search across message, integration key and interface name.
    pub search: Option<TextSearch>,
    /// Exact status.
    pub status: Option<LogStatus>,
    /// Exact interface name.
    pub interface_name: Option<String>,
    /// Exact severity.
    pub severity: Option<Severity>,
    /// Timestamp bounds.
    pub date_range: DateRange,
}

impl LogPredicate {
    /// Creates a predicate that matches every record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a text search.
    ///
    /// # Errors
    ///
    /// See [`TextSearch::new`].
    pub fn with_search(mut self, term: &str) -> Result<Self> {
        self.search = Some(TextSearch::new(term)?);
        Ok(self)
    }

    /// Adds a status constraint.
    #[must_use]
    pub const fn with_status(mut self, status: LogStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Adds an interface name constraint.
    #[must_use]
    pub fn with_interface_name(mut self, name: impl Into<String>) -> Self {
        self.interface_name = Some(name.into());
        self
    }

    /// Adds a severity constraint.
    #[must_use]
    pub const fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    /// Adds a timestamp range.
    #[must_use]
    pub const fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = range;
        self
    }

    /// Checks if a record satisfies every constraint.
    #[must_use]
    pub fn matches(&self, record: &LogRecord) -> bool {
        if let Some(ref search) = self.search {
            let hit = search.is_match(&record.message)
                || search.is_match(&record.integration_key)
                || search.is_match(&record.interface_name);
            if !hit {
                return false;
            }
        }

        if self.status.is_some_and(|status| status != record.status) {
            return false;
        }

        if let Some(ref name) = self.interface_name {
            if *name != record.interface_name {
                return false;
            }
        }

        if self.severity.is_some_and(|severity| severity != record.severity) {
            return false;
        }

        self.date_range.contains(record.timestamp)
    }
}

/// Offset/limit page selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page number.
    pub page: u32,
    /// Records per page.
    pub page_size: u32,
}

impl Pagination {
    /// Creates a page selection. Zero values are raised to 1.
    #[must_use]
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    /// Number of matching records to skip.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.page_size)
    }

    /// Maximum number of records to return.
    #[must_use]
    pub fn limit(&self) -> usize {
        self.page_size as usize
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Parses a severity parameter. Non-integers and values outside 1..=4 are rejected.
///
/// # Errors
///
/// Returns [`LogError::InvalidFilterValue`].
pub fn parse_severity(raw: &str) -> Result<Severity> {
    let value: i64 = raw
        .parse()
        .map_err(|_| LogError::invalid_filter("severity", raw, "not an integer"))?;

    u8::try_from(value)
        .ok()
        .and_then(Severity::new)
        .ok_or_else(|| {
            LogError::invalid_filter(
                "severity",
                raw,
                format!("must be between {} and {}", Severity::MIN, Severity::MAX),
            )
        })
}

/// Parses a date bound. Accepts RFC 3339, a naive date-time (read as UTC),
/// or a bare `YYYY-MM-DD` (midnight UTC).
///
/// # Errors
///
/// Returns [`LogError::InvalidFilterValue`] naming `field`.
pub fn parse_date_time(field: &'static str, raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }

    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| LogError::invalid_filter(field, raw, "unrecognized date format"))
}

fn parse_positive(field: &'static str, raw: &str) -> Result<u32> {
    match raw.parse::<u32>() {
        Ok(0) => Err(LogError::invalid_filter(field, raw, "must be at least 1")),
        Ok(value) => Ok(value),
        Err(_) => Err(LogError::invalid_filter(field, raw, "not a positive integer")),
    }
}
