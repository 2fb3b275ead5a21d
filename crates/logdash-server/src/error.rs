//! Error types for the log API server.

use std::net::SocketAddr;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use logdash_core::{ErrorResponse, LogError};
use thiserror::Error;
use tracing::{error, warn};

/// Result type alias for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

/// Errors that can occur in the log API server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Filter validation or store failure.
    #[error(transparent)]
    Log(#[from] LogError),

    /// The request could not be decoded.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// No bearer token on a protected route.
    #[error("token not found")]
    MissingToken,

    /// The bearer token failed verification.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Invalid server configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Failed to bind to the specified address.
    #[error("failed to bind to {0}: {1}")]
    BindFailed(SocketAddr, std::io::Error),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServerError {
    /// HTTP status for this error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Log(err) if err.is_client_error() => StatusCode::BAD_REQUEST,
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::MissingToken | Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Log(_) | Self::Config(_) | Self::BindFailed(_, _) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to show any client.
    ///
    /// Input errors describe the rejected value; server-side failures are
    /// reduced to a generic message.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::MissingToken => "Token not found.".to_string(),
            Self::Unauthorized(_) => "Unauthorized".to_string(),
            _ if self.status_code().is_client_error() => self.to_string(),
            _ => "Internal server error".to_string(),
        }
    }

    /// Converts into a response body, attaching the error text when `verbose`.
    #[must_use]
    pub fn into_api_error(self, verbose: bool) -> ApiError {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        } else {
            warn!(status = status.as_u16(), error = %self, "request rejected");
        }

        ApiError {
            status,
            body: ErrorResponse {
                message: self.public_message(),
                error: verbose.then(|| self.to_string()),
            },
        }
    }
}

/// A rendered error: status plus JSON body.
#[derive(Debug)]
pub struct ApiError {
    /// HTTP status.
    pub status: StatusCode,
    /// JSON body.
    pub body: ErrorResponse,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        self.into_api_error(false).into_response()
    }
}
