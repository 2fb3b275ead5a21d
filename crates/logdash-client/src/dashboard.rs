//! Dashboard view state: filters, pagination and the loaded page.
//!
//! [`Dashboard`] never performs I/O. Every user action that needs new data
//! returns a [`RequestTicket`]; the caller fetches `ticket.params` and hands
//! the outcome back through [`Dashboard::apply_response`]. Tickets carry a
//! sequence number, and only the response to the most recent ticket is
//! applied, so a slow response can never overwrite a newer one.

use std::time::Instant;

use logdash_core::{DataResponse, FilterParams, LogRecord, SummaryResponse};
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::filters::{FilterField, FilterState};
use crate::pagination::{PageWindow, Paginator};

/// A fetch the caller should perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    /// Sequence number matched against the latest request on completion.
    pub seq: u64,
    /// Query parameters for `GET /logged/data`.
    pub params: FilterParams,
}

/// Client-side state of the log table.
#[derive(Debug, Clone)]
pub struct Dashboard {
    filters: FilterState,
    paginator: Paginator,
    page_size: u32,
    logs: Vec<LogRecord>,
    total: u64,
    loading: bool,
    error: Option<String>,
    latest_seq: u64,
    summary: Option<SummaryResponse>,
}

impl Dashboard {
    /// Creates an empty dashboard on page 1.
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            filters: FilterState::new(config.debounce),
            paginator: Paginator::new(),
            page_size: config.page_size.max(1),
            logs: Vec::new(),
            total: 0,
            loading: false,
            error: None,
            latest_seq: 0,
            summary: None,
        }
    }

    /// Filter inputs.
    #[must_use]
    pub const fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Records of the current page.
    #[must_use]
    pub fn logs(&self) -> &[LogRecord] {
        &self.logs
    }

    /// Match count reported by the last successful fetch.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// True while the latest request is outstanding.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message of the last failed fetch.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The current page.
    #[must_use]
    pub const fn current_page(&self) -> u32 {
        self.paginator.current()
    }

    /// The page count.
    #[must_use]
    pub const fn total_pages(&self) -> u32 {
        self.paginator.total_pages()
    }

    /// Page buttons for the current position.
    #[must_use]
    pub fn page_window(&self) -> PageWindow {
        self.paginator.window()
    }

    /// Status counts from the last summary fetch.
    #[must_use]
    pub const fn summary(&self) -> Option<&SummaryResponse> {
        self.summary.as_ref()
    }

    /// Stores the counts for the summary cards.
    pub fn set_summary(&mut self, summary: SummaryResponse) {
        self.summary = Some(summary);
    }

    /// When [`Dashboard::poll`] next needs to run, if a search is pending.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.filters.pending_deadline()
    }

    /// Starts a fetch of the current page with the current filters.
    pub fn begin_request(&mut self) -> RequestTicket {
        self.latest_seq += 1;
        self.loading = true;
        let params = self
            .filters
            .to_params(self.paginator.current(), self.page_size);
        debug!(seq = self.latest_seq, page = self.paginator.current(), "requesting logs");
        RequestTicket {
            seq: self.latest_seq,
            params,
        }
    }

    /// Applies the outcome of a fetch. Returns false, changing nothing, if
    /// `ticket` has been superseded by a newer request.
    pub fn apply_response(
        &mut self,
        ticket: &RequestTicket,
        outcome: ClientResult<DataResponse>,
    ) -> bool {
        if ticket.seq != self.latest_seq {
            debug!(seq = ticket.seq, latest = self.latest_seq, "dropping stale response");
            return false;
        }
        self.loading = false;

        match outcome {
            Ok(response) => {
                self.paginator.set_total(response.total, self.page_size);
                self.total = response.total;
                self.logs = response.data;
                self.error = None;
            }
            Err(e) => {
                debug!(error = %e, "log fetch failed");
                self.error = Some(e.to_string());
                self.logs.clear();
                self.total = 0;
                self.paginator.reset_total();
            }
        }
        true
    }

    /// Refetches with unchanged filters and page.
    pub fn retry(&mut self) -> RequestTicket {
        self.begin_request()
    }

    /// Records a keystroke in the search box. The search takes effect later,
    /// through [`Dashboard::poll`] or [`Dashboard::commit_search`].
    pub fn type_search(&mut self, text: &str, now: Instant) {
        self.filters.type_search(text, now);
    }

    /// Applies a debounced search whose quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<RequestTicket> {
        let changed = self.filters.poll_debounce(now);
        self.after_filter_change(changed)
    }

    /// Applies the typed search immediately.
    pub fn commit_search(&mut self) -> Option<RequestTicket> {
        let changed = self.filters.commit_search();
        self.after_filter_change(changed)
    }

    /// Sets a non-search filter.
    pub fn set_filter(&mut self, field: FilterField, value: &str) -> Option<RequestTicket> {
        let changed = self.filters.set(field, value);
        self.after_filter_change(changed)
    }

    /// Clears every filter.
    pub fn clear_filters(&mut self) -> Option<RequestTicket> {
        let changed = self.filters.clear();
        self.after_filter_change(changed || self.paginator.current() != 1)
    }

    fn after_filter_change(&mut self, changed: bool) -> Option<RequestTicket> {
        if !changed {
            return None;
        }
        self.paginator.reset();
        Some(self.begin_request())
    }

    /// Moves to the previous page.
    pub fn previous_page(&mut self) -> Option<RequestTicket> {
        self.paginator.previous().then(|| self.begin_request())
    }

    /// Moves to the next page.
    pub fn next_page(&mut self) -> Option<RequestTicket> {
        self.paginator.next().then(|| self.begin_request())
    }

    /// Jumps to `page`, clamped to the known page range.
    pub fn go_to_page(&mut self, page: u32) -> Option<RequestTicket> {
        self.paginator.go_to(page).then(|| self.begin_request())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use chrono::{TimeZone, Utc};
    use logdash_core::{LogStatus, Severity};
    use std::time::Duration;

    fn dashboard() -> Dashboard {
        Dashboard::new(&ClientConfig::default())
    }

    fn record(i: u32) -> LogRecord {
        LogRecord::builder()
            .id(format!("{i:04}"))
            .interface_name("Billing")
            .integration_key("INT-1")
            .status(LogStatus::Failure)
            .message(format!("call {i}"))
            .severity(Severity::new(2).unwrap())
            .timestamp(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
            .build()
            .unwrap()
    }

    fn page(total: u64, count: u32) -> DataResponse {
        DataResponse {
            message: "Filtered logs".to_string(),
            total,
            data: (0..count).map(record).collect(),
        }
    }

    #[test]
    fn first_request_asks_for_page_one() {
        let mut dash = dashboard();
        let ticket = dash.begin_request();

        assert_eq!(ticket.params.page.as_deref(), Some("1"));
        assert_eq!(ticket.params.limit.as_deref(), Some("50"));
        assert!(dash.is_loading());
    }

    #[test]
    fn response_sets_logs_and_pages() {
        let mut dash = dashboard();
        let ticket = dash.begin_request();

        assert!(dash.apply_response(&ticket, Ok(page(120, 50))));

        assert_eq!(dash.logs().len(), 50);
        assert_eq!(dash.total(), 120);
        assert_eq!(dash.total_pages(), 3);
        assert!(!dash.is_loading());
        assert!(dash.page_window().is_visible());
    }

    #[test]
    fn stale_response_is_ignored() {
        let mut dash = dashboard();
        let slow = dash.begin_request();
        let fast = dash.set_filter(FilterField::Status, "Failure").unwrap();

        assert!(dash.apply_response(&fast, Ok(page(3, 3))));
        assert!(!dash.apply_response(&slow, Ok(page(500, 50))));

        assert_eq!(dash.total(), 3);
        assert_eq!(dash.logs().len(), 3);
    }

    #[test]
    fn error_clears_logs_and_collapses_pages() {
        let mut dash = dashboard();
        let ticket = dash.begin_request();
        dash.apply_response(&ticket, Ok(page(120, 50)));

        let ticket = dash.next_page().unwrap();
        let err = ClientError::Api {
            status: 500,
            message: "Internal server error".to_string(),
        };
        assert!(dash.apply_response(&ticket, Err(err)));

        assert_eq!(dash.error(), Some("Internal server error (HTTP 500)"));
        assert!(dash.logs().is_empty());
        assert_eq!(dash.total_pages(), 1);
        assert!(!dash.page_window().is_visible());
    }

    #[test]
    fn success_clears_previous_error() {
        let mut dash = dashboard();
        let ticket = dash.begin_request();
        dash.apply_response(&ticket, Err(ClientError::InvalidUrl("x".to_string())));
        assert!(dash.error().is_some());

        let ticket = dash.retry();
        dash.apply_response(&ticket, Ok(page(1, 1)));

        assert!(dash.error().is_none());
    }

    #[test]
    fn retry_repeats_the_same_query() {
        let mut dash = dashboard();
        dash.set_filter(FilterField::Severity, "3");
        let first = dash.begin_request();
        let again = dash.retry();

        assert_eq!(first.params, again.params);
        assert!(again.seq > first.seq);
    }

    #[test]
    fn filter_change_resets_to_page_one() {
        let mut dash = dashboard();
        let ticket = dash.begin_request();
        dash.apply_response(&ticket, Ok(page(500, 50)));
        dash.go_to_page(4);

        let ticket = dash.set_filter(FilterField::Status, "Success").unwrap();

        assert_eq!(dash.current_page(), 1);
        assert_eq!(ticket.params.page.as_deref(), Some("1"));
        assert_eq!(ticket.params.status.as_deref(), Some("Success"));
    }

    #[test]
    fn unchanged_filter_does_not_refetch() {
        let mut dash = dashboard();
        dash.set_filter(FilterField::Status, "Success");

        assert!(dash.set_filter(FilterField::Status, " Success ").is_none());
    }

    #[test]
    fn debounced_search_fetches_once() {
        let mut dash = dashboard();
        let t0 = Instant::now();
        dash.type_search("time", t0);
        dash.type_search("timeout", t0 + Duration::from_millis(100));

        assert!(dash.poll(t0 + Duration::from_millis(400)).is_none());
        assert_eq!(dash.next_deadline(), Some(t0 + Duration::from_millis(500)));

        let ticket = dash.poll(t0 + Duration::from_millis(500)).unwrap();
        assert_eq!(ticket.params.search.as_deref(), Some("timeout"));
        assert!(dash.next_deadline().is_none());
    }

    #[test]
    fn clear_on_later_page_refetches_page_one() {
        let mut dash = dashboard();
        let ticket = dash.begin_request();
        dash.apply_response(&ticket, Ok(page(500, 50)));
        dash.go_to_page(3);

        let ticket = dash.clear_filters().unwrap();

        assert_eq!(ticket.params.page.as_deref(), Some("1"));
        assert!(dash.clear_filters().is_none());
    }

    #[test]
    fn clearing_filters_restores_page_count_of_all_records() {
        let mut dash = dashboard();
        let summary = SummaryResponse {
            message: "Logged data".to_string(),
            success_data: 30,
            failure_data: 120,
            all_data: 160,
        };
        dash.set_summary(summary.clone());

        let ticket = dash.set_filter(FilterField::Status, "Success").unwrap();
        dash.apply_response(&ticket, Ok(page(summary.success_data, 30)));
        assert_eq!(dash.total_pages(), 1);

        let ticket = dash.clear_filters().unwrap();
        assert!(ticket.params.status.is_none());
        dash.apply_response(&ticket, Ok(page(summary.all_data, 50)));

        let expected = u32::try_from(summary.all_data.div_ceil(50)).unwrap();
        assert_eq!(dash.total_pages(), expected);
        assert_eq!(dash.total_pages(), 4);
        assert!(dash.page_window().has_next());
    }

    #[test]
    fn navigation_stops_at_the_edges() {
        let mut dash = dashboard();
        let ticket = dash.begin_request();
        dash.apply_response(&ticket, Ok(page(120, 50)));

        assert!(dash.previous_page().is_none());
        assert_eq!(dash.go_to_page(3).unwrap().params.page.as_deref(), Some("3"));
        assert!(dash.next_page().is_none());
        assert_eq!(dash.previous_page().unwrap().params.page.as_deref(), Some("2"));
    }

    #[test]
    fn summary_is_kept() {
        let mut dash = dashboard();
        dash.set_summary(SummaryResponse {
            message: "Logged data".to_string(),
            success_data: 30,
            failure_data: 120,
            all_data: 160,
        });

        assert_eq!(dash.summary().map(|s| s.all_data), Some(160));
    }
}
