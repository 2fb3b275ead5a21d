//! HTTP client for the log API.

use logdash_core::{DataResponse, ErrorResponse, FilterParams, SummaryResponse};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Talks to a logdash server over HTTP.
#[derive(Debug, Clone)]
pub struct LogDashClient {
    http: reqwest::Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl LogDashClient {
    /// Creates a client from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] unless the base URL is http or
    /// https, and [`ClientError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::InvalidUrl(base_url));
        }

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            http,
            base_url,
            bearer_token: config.bearer_token.clone(),
        })
    }

    /// The API base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches one page of filtered logs from `GET /logged/data`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] for a non-2xx status and
    /// [`ClientError::Http`] for transport or decoding failures.
    pub async fn fetch_page(&self, params: &FilterParams) -> ClientResult<DataResponse> {
        let request = self.get("/logged/data").query(params);
        let page: DataResponse = self.send(request).await?;
        debug!(total = page.total, rows = page.data.len(), "fetched log page");
        Ok(page)
    }

    /// Fetches the status counts from `GET /logged/all`.
    ///
    /// # Errors
    ///
    /// Same as [`LogDashClient::fetch_page`].
    pub async fn fetch_summary(&self) -> ClientResult<SummaryResponse> {
        self.send(self.get("/logged/all")).await
    }

    fn get(&self, path: &str) -> RequestBuilder {
        let request = self.http.get(format!("{}{path}", self.base_url));
        match &self.bearer_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = request.send().await?;
        if response.status().is_success() {
            return Ok(response.json().await?);
        }
        Err(api_error(response).await)
    }
}

/// Turns a non-2xx response into [`ClientError::Api`], using the body's
/// `message` when it has one.
async fn api_error(response: Response) -> ClientError {
    let status = response.status().as_u16();
    let message = match response.json::<ErrorResponse>().await {
        Ok(body) => body.message,
        Err(_) => format!("HTTP error {status}"),
    };
    warn!(status, %message, "log API request failed");
    ClientError::Api { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration as ChronoDuration, TimeZone, Utc};
    use logdash_core::{LogRecord, LogStatus, MemoryLogStore, Severity};
    use logdash_server::{LogDashServer, ServerConfig};
    use std::net::SocketAddr;
    use std::sync::Arc;
    use tokio::net::TcpListener;

    fn records() -> Vec<LogRecord> {
        let base = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        (0..75u32)
            .map(|i| {
                let status = if i % 3 == 0 {
                    LogStatus::Success
                } else {
                    LogStatus::Failure
                };
                LogRecord::builder()
                    .id(format!("{i:04}"))
                    .interface_name(if i % 2 == 0 { "Billing" } else { "Orders" })
                    .integration_key(format!("INT-{i}"))
                    .status(status)
                    .message(format!("call {i}"))
                    .severity(Severity::new(1 + (i % 4) as u8).unwrap())
                    .timestamp(base + ChronoDuration::minutes(i64::from(i)))
                    .build()
                    .unwrap()
            })
            .collect()
    }

    async fn spawn_server(config: ServerConfig) -> SocketAddr {
        let store = Arc::new(MemoryLogStore::from_records(records()));
        let server = LogDashServer::new(config, store).unwrap();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, server.router()).await.unwrap();
        });
        addr
    }

    fn client(addr: SocketAddr) -> LogDashClient {
        LogDashClient::new(&ClientConfig::new(format!("http://{addr}"))).unwrap()
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        let err = LogDashClient::new(&ClientConfig::new("ftp://logs")).unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn test_fetch_page() {
        let addr = spawn_server(ServerConfig::default()).await;
        let client = client(addr);

        let params = FilterParams {
            status: Some("Success".to_string()),
            page: Some("1".to_string()),
            limit: Some("10".to_string()),
            ..FilterParams::default()
        };
        let page = client.fetch_page(&params).await.unwrap();

        assert_eq!(page.total, 25);
        assert_eq!(page.data.len(), 10);
        assert!(page.data.iter().all(|r| r.status == LogStatus::Success));
        assert_eq!(page.data[0].id.as_str(), "0072");
    }

    #[tokio::test]
    async fn test_fetch_summary() {
        let addr = spawn_server(ServerConfig::default()).await;

        let summary = client(addr).fetch_summary().await.unwrap();

        assert_eq!(summary.success_data, 25);
        assert_eq!(summary.failure_data, 50);
        assert_eq!(summary.all_data, 75);
    }

    #[tokio::test]
    async fn test_bad_filter_maps_to_api_error() {
        let addr = spawn_server(ServerConfig::default()).await;

        let params = FilterParams {
            severity: Some("abc".to_string()),
            ..FilterParams::default()
        };
        let err = client(addr).fetch_page(&params).await.unwrap_err();

        assert_eq!(err.status(), Some(400));
    }

    #[tokio::test]
    async fn test_missing_token_maps_to_api_error() {
        let addr = spawn_server(ServerConfig::default().with_auth_secret("s3cret")).await;

        let err = client(addr).fetch_summary().await.unwrap_err();

        match err {
            ClientError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Token not found.");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_connection_refused_is_http_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(addr).fetch_summary().await.unwrap_err();

        assert!(matches!(err, ClientError::Http(_)));
    }
}
