//! DTOs for the creation endpoint.

use crate::domain::entities::UrlMapping;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /url`.
///
/// Only the shape of the body is checked here. Slug format and URL syntax are
/// validated by [`crate::application::services::MappingService`], after the slug
/// has been checked against the store.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUrlRequest {
    /// Optional slug; generated when absent or blank.
    pub slug: Option<String>,

    /// Target URL.
    #[validate(required(message = "URL is required"))]
    pub url: Option<String>,
}

impl CreateUrlRequest {
    /// Trims both fields and drops a blank slug so that one gets generated.
    pub fn normalized(self) -> Self {
        Self {
            slug: self
                .slug
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            url: self.url.map(|u| u.trim().to_string()),
        }
    }
}

/// Created mapping as returned to the client.
#[derive(Debug, Serialize)]
pub struct MappingResponse {
    pub id: i64,
    pub slug: String,
    pub url: String,
}

impl From<UrlMapping> for MappingResponse {
    fn from(mapping: UrlMapping) -> Self {
        Self {
            id: mapping.id,
            slug: mapping.slug,
            url: mapping.url,
        }
    }
}
