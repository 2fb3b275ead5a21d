//! Filter input state with debounced search.
//!
//! The search box is debounced: typing updates [`FilterState::search_input`]
//! immediately, and the effective search value follows once the input has
//! been quiet for the debounce period. Other fields take effect at once.
//!
//! Time is passed in by the caller, so the state machine can be driven by any
//! event loop and tested without sleeping.

use std::time::{Duration, Instant};

use chrono::SecondsFormat;
use logdash_core::{parse_date_time, FilterParams};
use tracing::trace;

/// A filter field other than search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    /// Exact status.
    Status,
    /// Exact interface name.
    InterfaceName,
    /// Severity level.
    Severity,
    /// Lower date bound.
    DateFrom,
    /// Upper date bound.
    DateTo,
}

/// Effective filter values. Empty means "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterValues {
    /// Search term.
    pub search: String,
    /// Status name.
    pub status: String,
    /// Interface name.
    pub interface_name: String,
    /// Severity level, as entered.
    pub severity: String,
    /// Lower date bound, as entered.
    pub date_from: String,
    /// Upper date bound, as entered.
    pub date_to: String,
}

impl FilterValues {
    fn field_mut(&mut self, field: FilterField) -> &mut String {
        match field {
            FilterField::Status => &mut self.status,
            FilterField::InterfaceName => &mut self.interface_name,
            FilterField::Severity => &mut self.severity,
            FilterField::DateFrom => &mut self.date_from,
            FilterField::DateTo => &mut self.date_to,
        }
    }

    /// Returns the value of `field`.
    #[must_use]
    pub fn get(&self, field: FilterField) -> &str {
        match field {
            FilterField::Status => &self.status,
            FilterField::InterfaceName => &self.interface_name,
            FilterField::Severity => &self.severity,
            FilterField::DateFrom => &self.date_from,
            FilterField::DateTo => &self.date_to,
        }
    }

    /// Returns true if no filter is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone)]
struct PendingSearch {
    text: String,
    due: Instant,
}

/// Filter inputs of the dashboard.
///
/// Mutators return `true` when an effective value changed. The caller resets
/// to the first page and refetches on `true`.
#[derive(Debug, Clone)]
pub struct FilterState {
    search_input: String,
    values: FilterValues,
    pending: Option<PendingSearch>,
    debounce: Duration,
}

impl FilterState {
    /// Creates empty filters with the given search debounce.
    #[must_use]
    pub fn new(debounce: Duration) -> Self {
        Self {
            search_input: String::new(),
            values: FilterValues::default(),
            pending: None,
            debounce,
        }
    }

    /// Text currently shown in the search box.
    #[must_use]
    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    /// Effective filter values.
    #[must_use]
    pub const fn values(&self) -> &FilterValues {
        &self.values
    }

    /// When the pending search takes effect, if one is scheduled.
    #[must_use]
    pub fn pending_deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.due)
    }

    /// Records a keystroke in the search box, rescheduling the debounce.
    ///
    /// The box keeps the text as typed; the search that takes effect is
    /// trimmed.
    pub fn type_search(&mut self, text: &str, now: Instant) {
        text.clone_into(&mut self.search_input);
        self.pending = Some(PendingSearch {
            text: text.trim().to_string(),
            due: now + self.debounce,
        });
    }

    /// Applies the pending search once its deadline has passed.
    pub fn poll_debounce(&mut self, now: Instant) -> bool {
        match self.pending.take() {
            Some(pending) if pending.due <= now => self.apply_search(pending.text),
            other => {
                self.pending = other;
                false
            }
        }
    }

    /// Applies the pending search immediately, as when the box loses focus.
    pub fn commit_search(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) => self.apply_search(pending.text),
            None => false,
        }
    }

    fn apply_search(&mut self, text: String) -> bool {
        if self.values.search == text {
            return false;
        }
        trace!(search = %text, "search applied");
        self.values.search = text;
        true
    }

    /// Sets a non-search field. The value is trimmed.
    pub fn set(&mut self, field: FilterField, value: &str) -> bool {
        let value = value.trim();
        let slot = self.values.field_mut(field);
        if *slot == value {
            return false;
        }
        value.clone_into(slot);
        true
    }

    /// Sets the status filter.
    pub fn set_status(&mut self, value: &str) -> bool {
        self.set(FilterField::Status, value)
    }

    /// Sets the interface name filter.
    pub fn set_interface_name(&mut self, value: &str) -> bool {
        self.set(FilterField::InterfaceName, value)
    }

    /// Sets the severity filter.
    pub fn set_severity(&mut self, value: &str) -> bool {
        self.set(FilterField::Severity, value)
    }

    /// Sets the lower date bound.
    pub fn set_date_from(&mut self, value: &str) -> bool {
        self.set(FilterField::DateFrom, value)
    }

    /// Sets the upper date bound.
    pub fn set_date_to(&mut self, value: &str) -> bool {
        self.set(FilterField::DateTo, value)
    }

    /// Resets every field and cancels any pending search.
    pub fn clear(&mut self) -> bool {
        let changed = !self.values.is_empty();
        self.values = FilterValues::default();
        self.search_input.clear();
        self.pending = None;
        changed
    }

    /// Builds request parameters for `page`. Empty values are omitted.
    #[must_use]
    pub fn to_params(&self, page: u32, page_size: u32) -> FilterParams {
        let v = &self.values;
        FilterParams {
            search: non_empty(&v.search),
            status: non_empty(&v.status),
            interface_name: non_empty(&v.interface_name),
            severity: non_empty(&v.severity),
            date_from: non_empty(&v.date_from).map(|d| normalize_date("dateFrom", d)),
            date_to: non_empty(&v.date_to).map(|d| normalize_date("dateTo", d)),
            page: Some(page.to_string()),
            limit: Some(page_size.to_string()),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// Rewrites a recognised date as RFC 3339 UTC with millisecond precision.
/// A bare date becomes midnight UTC. Unrecognised input is passed through for
/// the server to reject.
fn normalize_date(field: &'static str, raw: String) -> String {
    parse_date_time(field, &raw)
        .map(|at| at.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or(raw)
}
