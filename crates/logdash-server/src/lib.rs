//! # logdash-server
//!
//! HTTP API for the logdash integration log dashboard, built on axum.
//!
//! ## Example
//!
//! ```rust,no_run
//! use logdash_core::shared_store;
//! use logdash_server::{LogDashServer, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig::default();
//!     let addr = config.bind_addr;
//!     let server = LogDashServer::new(config, shared_store(Vec::new())).unwrap();
//!     // server.serve(addr).await.unwrap();
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Endpoint | Method | Description |
//! |----------|--------|-------------|
//! | `/logged/data` | GET | Filtered page of log records with total count |
//! | `/logged/all` | GET | Success / failure / total counts |
//! | `/test` | GET | Fixed message |
//! | `/health` | GET | Uptime and record count |
//!
//! `/logged/*` require a bearer token when an auth secret is configured.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

// Re-export main types
pub use auth::{AuthenticatedUser, TokenClaims, TokenVerifier};
pub use config::{Environment, ServerConfig, DEFAULT_PORT};
pub use error::{ApiError, ServerError, ServerResult};
pub use routes::create_router;
pub use server::LogDashServer;
pub use state::AppState;
