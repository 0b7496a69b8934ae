//! HTTP request/response tracing middleware.

use axum::extract::MatchedPath;
use axum::http::Request;
use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultOnFailure, DefaultOnResponse, TraceLayer};
use tracing::{Level, Span};

/// Creates the request logging layer.
///
/// Each request gets an `INFO` span carrying the method, the raw path and, when a
/// route matched, the route template (`/{slug}`, `/url`). The response is logged at
/// `INFO` with status and latency in milliseconds; 5xx responses are additionally
/// logged at `ERROR`.
///
/// # Example Logs
///
/// ```text
/// INFO request{method=GET path=/docs route=/{slug}}: finished processing request latency=3 ms status=302
/// INFO request{method=POST path=/url route=/url}: finished processing request latency=9 ms status=200
/// ```
pub fn layer() -> TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    fn(&Request<axum::body::Body>) -> Span,
> {
    TraceLayer::new_for_http()
        .make_span_with(make_span as fn(&Request<axum::body::Body>) -> Span)
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
        .on_failure(
            DefaultOnFailure::new()
                .level(Level::ERROR)
                .latency_unit(LatencyUnit::Millis),
        )
}

fn make_span(request: &Request<axum::body::Body>) -> Span {
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(MatchedPath::as_str)
        .unwrap_or("-");

    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        route = %route,
    )
}
