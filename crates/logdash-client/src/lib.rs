//! # logdash-client
//!
//! Client side of the log dashboard: filter inputs with a debounced search,
//! pagination with a windowed page bar, and an HTTP client for the API.
//!
//! The view state in [`Dashboard`] is synchronous and does no I/O. Actions
//! that need data return a [`RequestTicket`] for the caller to fetch with
//! [`LogDashClient`]:
//!
//! ```rust,no_run
//! use logdash_client::{ClientConfig, Dashboard, FilterField, LogDashClient};
//!
//! # async fn run() -> logdash_client::ClientResult<()> {
//! let config = ClientConfig::new("http://localhost:8000");
//! let client = LogDashClient::new(&config)?;
//! let mut dashboard = Dashboard::new(&config);
//!
//! if let Some(ticket) = dashboard.set_filter(FilterField::Status, "Failure") {
//!     let outcome = client.fetch_page(&ticket.params).await;
//!     dashboard.apply_response(&ticket, outcome);
//! }
//! println!("{} matching records", dashboard.total());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod dashboard;
pub mod error;
pub mod filters;
pub mod http;
pub mod pagination;

pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_DEBOUNCE};
pub use dashboard::{Dashboard, RequestTicket};
pub use error::{ClientError, ClientResult};
pub use filters::{FilterField, FilterState, FilterValues};
pub use http::LogDashClient;
pub use pagination::{total_pages, PageItem, PageWindow, Paginator, WINDOW_RADIUS};
