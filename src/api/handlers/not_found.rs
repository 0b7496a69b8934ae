//! The fixed not-found page.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse},
};

/// Body served for every 404, compiled into the binary.
pub const NOT_FOUND_PAGE: &str = include_str!("../../../static/404.html");

/// Responds `404 Not Found` with [`NOT_FOUND_PAGE`].
///
/// Used for unknown slugs, unmatched paths and unsupported methods.
pub async fn not_found_handler() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Html(NOT_FOUND_PAGE))
}
