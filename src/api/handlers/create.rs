//! Handler for mapping creation.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use validator::Validate;

use crate::api::dto::mapping::{CreateUrlRequest, MappingResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a slug → URL mapping.
///
/// # Endpoint
///
/// `POST /url`
///
/// # Request Body
///
/// ```json
/// { "slug": "docs", "url": "https://docs.rs" }
/// ```
///
/// `slug` is optional; when absent or blank a 5-character slug is generated.
///
/// # Response
///
/// ```json
/// { "id": 1, "slug": "docs", "url": "https://docs.rs" }
/// ```
///
/// # Errors
///
/// - 400 for a malformed body, a missing or invalid URL, or an invalid slug
/// - 409 when the slug is already taken
/// - 500 on storage failure
pub async fn create_url_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateUrlRequest>, JsonRejection>,
) -> Result<Json<MappingResponse>, AppError> {
    let Json(payload) = payload?;
    let payload = payload.normalized();
    payload.validate()?;

    let CreateUrlRequest { slug, url } = payload;
    let url = url.unwrap_or_default();

    let mapping = state.mapping_service.create_mapping(url, slug).await?;

    Ok(Json(mapping.into()))
}
