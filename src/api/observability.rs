use axum::{
    extract::{MatchedPath, Request, State},
    http::HeaderValue,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

use super::AppState;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Route label for requests that matched no route, so unknown paths don't
/// each get their own series.
const UNMATCHED_ROUTE: &str = "unmatched";

pub async fn get_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.prometheus_handle.as_ref().map_or_else(
        || "Metrics not enabled".to_string(),
        metrics_exporter_prometheus::PrometheusHandle::render,
    )
}

/// Which part of the service a route template belongs to.
#[must_use]
pub fn feature_for_route(route: Option<&str>) -> &'static str {
    match route {
        Some(r) if r.starts_with("/posts") => "posts",
        Some("/search") => "search",
        Some("/bookshelf") => "bookshelf",
        Some(r) if r.starts_with("/health") => "health",
        Some("/metrics") => "metrics",
        _ => UNMATCHED_ROUTE,
    }
}

/// Tags each request with an id, records per-feature request metrics and
/// logs one event when the response is ready.
pub async fn request_metrics_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = Uuid::new_v4();

    let method = req.method().clone();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str().to_string());
    let feature = feature_for_route(route.as_deref());
    let route = route.unwrap_or_else(|| UNMATCHED_ROUTE.to_string());

    let span = info_span!(
        "request",
        %request_id,
        %method,
        route = %route,
        feature,
    );

    async move {
        let mut response = next.run(req).await;
        let status = response.status();
        let elapsed = start.elapsed();

        let labels = [
            ("method", method.to_string()),
            ("route", route),
            ("feature", feature.to_string()),
            ("status", status.as_u16().to_string()),
        ];
        metrics::counter!("http_requests_total", &labels).increment(1);
        metrics::histogram!("http_request_duration_seconds", &labels)
            .record(elapsed.as_secs_f64());

        if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }

        info!(
            status = status.as_u16(),
            elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            failed = status.is_server_error(),
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
    fn test_feature_for_route() {
        assert_eq!(feature_for_route(Some("/posts")), "posts");
        assert_eq!(feature_for_route(Some("/posts/{id}")), "posts");
        assert_eq!(feature_for_route(Some("/search")), "search");
        assert_eq!(feature_for_route(Some("/bookshelf")), "bookshelf");
        assert_eq!(feature_for_route(Some("/health/ready")), "health");
        assert_eq!(feature_for_route(Some("/metrics")), "metrics");
        assert_eq!(feature_for_route(None), "unmatched");
    }
}
