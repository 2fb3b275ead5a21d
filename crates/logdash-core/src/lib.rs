//! # logdash-core
//!
//! Log record model and query engine for the logdash integration log dashboard.
//!
//! This crate provides:
//!
//! - [`LogRecord`]: A single integration log record
//! - [`FilterParams`]: Raw query parameters, validated into [`FilterCriteria`]
//! - [`LogPredicate`]: Conjunction of field constraints applied to records
//! - [`LogStore`]: Abstract trait for storage backends
//! - [`MemoryLogStore`] / [`FileLogStore`]: In-memory and JSON-lines backends
//! - [`QueryExecutor`]: Total count plus one sorted page
//! - [`summarize`]: Success / failure / total counts
//! - [`api`]: JSON envelopes of the HTTP API
//!
//! ## Example
//!
//! ```rust
//! use logdash_core::{
//!     query, FilterParams, LogRecord, LogStatus, MemoryLogStore, PageLimits, Severity,
//! };
//! use chrono::Utc;
//!
//! let store = MemoryLogStore::from_records(vec![
//!     LogRecord::builder()
//!         .interface_name("OrderSync")
//!         .integration_key("ORD-1")
//!         .status(LogStatus::Failure)
//!         .message("Upstream timed out")
//!         .severity(Severity::new(3).unwrap())
//!         .timestamp(Utc::now())
//!         .build()
//!         .unwrap(),
//! ]);
//!
//! let criteria = FilterParams {
//!     search: Some("timed OUT".to_string()),
//!     ..FilterParams::default()
//! }
//! .into_criteria(&PageLimits::default())
//! .unwrap();
//!
//! let page = query::execute(&store, &criteria).unwrap();
//! assert_eq!(page.total, 1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod error;
pub mod file_store;
pub mod filter;
pub mod query;
pub mod store;
pub mod summary;
pub mod traits;
pub mod types;

// Re-export main types
pub use api::{DataResponse, ErrorResponse, MessageResponse, SummaryResponse};
pub use error::{LogError, Result};
pub use file_store::{read_json_lines, write_json_lines, FileLogStore};
pub use filter::{
    parse_date_time, parse_severity, DateRange, FilterCriteria, FilterParams, LogPredicate,
    PageLimits, Pagination, TextSearch, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
pub use query::{QueryExecutor, QueryPage};
pub use store::{newest_first, shared_store, MemoryLogStore, SharedLogStore};
pub use summary::{summarize, StatusSummary};
pub use traits::LogStore;
pub use types::{LogId, LogRecord, LogRecordBuilder, LogStatus, Severity};
