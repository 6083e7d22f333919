use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

use crate::api::AppState;

/// `GET /api/metrics`, the Prometheus text exposition.
pub async fn get_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.prometheus_handle.as_ref().map_or_else(
        || "Metrics are disabled".to_string(),
        metrics_exporter_prometheus::PrometheusHandle::render,
    )
}

const fn outcome(status: u16) -> &'static str {
    match status {
        500.. => "error",
        400..=499 => "client_error",
        _ => "success",
    }
}

/// Wraps each request in a span carrying a fresh request id, records
/// request metrics and emits one event when the response is ready.
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = Uuid::new_v4();

    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str().to_string());

    let span = info_span!(
        "request",
        %request_id,
        %method,
        %path,
        route = route.as_deref(),
    );

    async move {
        let response = next.run(req).await;
        let elapsed = start.elapsed();
        let status = response.status().as_u16();

        // Route template keeps label cardinality bounded
        let labels = [
            ("method", method),
            ("path", route.unwrap_or(path)),
            ("status", status.to_string()),
        ];

        metrics::counter!("octofit_http_requests_total", &labels).increment(1);
        metrics::histogram!("octofit_http_request_duration_seconds", &labels)
            .record(elapsed.as_secs_f64());

        info!(
            event = "http_request_finished",
            duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            status_code = status,
            outcome = outcome(status),
            "Request finished"
        );

        response
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_buckets() {
        assert_eq!(outcome(200), "success");
        assert_eq!(outcome(204), "success");
        assert_eq!(outcome(404), "client_error");
        assert_eq!(outcome(503), "error");
    }
}
