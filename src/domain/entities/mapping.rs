//! URL mapping entity.

use chrono::{DateTime, Utc};

/// A persisted slug → URL mapping.
///
/// `slug` is always stored lowercase and is unique across all mappings.
#[derive(Debug, Clone, PartialEq)]
pub struct UrlMapping {
    pub id: i64,
    pub slug: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

impl UrlMapping {
    /// Creates a new UrlMapping instance.
    pub fn new(id: i64, slug: String, url: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            slug,
            url,
            created_at,
        }
    }
}

/// Input data for creating a new mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUrlMapping {
    pub slug: String,
    pub url: String,
}
