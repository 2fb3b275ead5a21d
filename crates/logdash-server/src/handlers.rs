//! HTTP request handlers for the log API.

use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::{Extension, Json};
use logdash_core::{query, summarize, DataResponse, FilterParams, MessageResponse, SummaryResponse};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::auth::AuthenticatedUser;
use crate::error::{ApiError, ServerError};
use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status message.
    pub status: String,
    /// Server uptime in seconds.
    pub uptime_secs: u64,
    /// Records currently held by the store.
    pub records: usize,
}

/// Handle GET /health - health check endpoint.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        uptime_secs: state.uptime_secs(),
        records: state.store().len(),
    })
}

/// Handle GET /test - liveness probe kept for existing clients.
pub async fn test_endpoint() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "This is test endpoint.".to_string(),
    })
}

/// Handle GET /logged/data - filtered, paginated log records.
pub async fn get_filtered_logs(
    State(state): State<Arc<AppState>>,
    user: Option<Extension<AuthenticatedUser>>,
    params: Result<Query<FilterParams>, QueryRejection>,
) -> Result<Json<DataResponse>, ApiError> {
    let Query(params) =
        params.map_err(|e| state.reject(ServerError::InvalidRequest(e.body_text())))?;

    debug!(
        user_id = ?user.as_ref().and_then(|Extension(u)| u.user_id.as_deref()),
        ?params,
        "log query"
    );

    let criteria = params
        .into_criteria(&state.page_limits())
        .map_err(|e| state.reject(e))?;
    let page = query::execute(state.store().as_ref(), &criteria).map_err(|e| state.reject(e))?;

    Ok(Json(DataResponse::from(page)))
}

/// Handle GET /logged/all - status summary over all records.
pub async fn get_summary(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let summary = summarize(state.store().as_ref()).map_err(|e| state.reject(e))?;
    Ok(Json(SummaryResponse::from(summary)))
}
