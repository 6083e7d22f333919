//! Service-level endpoints: the API root listing and the health probe.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::collections::BTreeMap;
use std::sync::Arc;

use super::{ApiResponse, AppState, HealthResponse};
use crate::domain::Collection;

/// `GET /api/`
///
/// Maps each resource name to the path it is served under.
pub async fn api_root() -> Json<ApiResponse<BTreeMap<&'static str, String>>> {
    let links = Collection::ALL
        .iter()
        .map(|c| (c.resource(), format!("/api/{}/", c.resource())))
        .collect();

    Json(ApiResponse::success(links))
}

/// `GET /api/health`
///
/// Pings the store. Responds 503 when it cannot be reached.
pub async fn health(State(state): State<Arc<AppState>>) -> Response {
    let database = match state.store().ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not reach the store");
            false
        }
    };

    let status = if database {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let body = HealthResponse {
        status: if database { "ok" } else { "degraded" },
        database,
        uptime_seconds: state.start_time.elapsed().as_secs(),
        version: env!("CARGO_PKG_VERSION"),
    };

    (status, Json(ApiResponse::success(body))).into_response()
}
