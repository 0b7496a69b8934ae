//! Handler for slug redirects.

use axum::{
    extract::{Path, State, rejection::PathRejection},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use crate::api::handlers::not_found::not_found_handler;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::target_url::encoded_location;

/// Redirects a slug to its stored URL.
///
/// # Endpoint
///
/// `GET /{slug}`
///
/// # Behavior
///
/// - Found: `302 Found` with `Location` set to the stored URL
/// - Anything else (unknown slug, undecodable path, storage error or timeout):
///   `404` with the fixed not-found page. Storage errors are logged but never
///   shown to the client.
///
/// The slug is matched case-insensitively.
pub async fn redirect_handler(
    State(state): State<AppState>,
    slug: Result<Path<String>, PathRejection>,
) -> Response {
    let Path(slug) = match slug {
        Ok(slug) => slug,
        Err(rejection) => {
            debug!("Rejected redirect path: {}", rejection);
            return not_found_handler().await.into_response();
        }
    };

    match state.mapping_service.resolve(&slug).await {
        Ok(mapping) => found(&mapping.url).await,
        Err(AppError::NotFound { .. }) => {
            debug!(slug = %slug, "Slug not found");
            not_found_handler().await.into_response()
        }
        Err(e) => {
            warn!(slug = %slug, error = %e.diagnostic(), "Lookup failed, answering 404");
            not_found_handler().await.into_response()
        }
    }
}

/// Builds a `302 Found` response pointing at `url`.
///
/// Falls back to the not-found page when neither the stored value nor its encoded
/// form is a usable `Location` header.
async fn found(url: &str) -> Response {
    let location = HeaderValue::from_str(url).ok().or_else(|| {
        encoded_location(url).and_then(|encoded| HeaderValue::from_str(&encoded).ok())
    });

    match location {
        Some(location) => (StatusCode::FOUND, [(header::LOCATION, location)]).into_response(),
        None => {
            warn!(url = %url, "Stored URL cannot be used as a Location header");
            not_found_handler().await.into_response()
        }
    }
}
