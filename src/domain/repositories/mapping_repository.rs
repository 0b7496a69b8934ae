//! Repository trait for the slug store.

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::error::AppError;
use async_trait::async_trait;

/// Durable storage and lookup of [`UrlMapping`] records.
///
/// Implementations must enforce slug uniqueness themselves (a unique index, not an
/// application-level check), so that concurrent creations of one slug yield exactly
/// one mapping.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgMappingRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingRepository: Send + Sync {
    /// Finds a mapping by its (already lowercased) slug.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors or timeouts.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<UrlMapping>, AppError>;

    /// Persists a new mapping.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the slug is already taken.
    /// Returns [`AppError::Internal`] on any other database error or timeout.
    async fn create(&self, new_mapping: NewUrlMapping) -> Result<UrlMapping, AppError>;

    /// Counts all stored mappings.
    async fn count(&self) -> Result<i64, AppError>;

    /// Lists the most recently created mappings, newest first.
    async fn list_recent(&self, limit: i64) -> Result<Vec<UrlMapping>, AppError>;

    /// Performs a trivial round-trip to the store.
    async fn ping(&self) -> Result<(), AppError>;
}
