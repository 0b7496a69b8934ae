//! PostgreSQL implementation of the slug store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;

/// Per-call timeout used when none is configured.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(sqlx::FromRow)]
struct MappingRow {
    id: i64,
    slug: String,
    url: String,
    created_at: DateTime<Utc>,
}

impl From<MappingRow> for UrlMapping {
    fn from(row: MappingRow) -> Self {
        UrlMapping::new(row.id, row.slug, row.url, row.created_at)
    }
}

/// PostgreSQL repository for URL mappings.
///
/// Slug uniqueness is enforced by the `url_mappings_slug_key` unique index created
/// in `migrations/`. Every query runs under a timeout; an expired timeout is
/// reported as [`AppError::Internal`].
pub struct PgMappingRepository {
    pool: Arc<PgPool>,
    timeout: Duration,
}

impl PgMappingRepository {
    /// Creates a new repository with the default per-call timeout.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self::with_timeout(pool, DEFAULT_STORE_TIMEOUT)
    }

    pub fn with_timeout(pool: Arc<PgPool>, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    /// Runs a query future under the configured timeout.
    async fn bounded<T, F>(&self, operation: &'static str, query: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.timeout, query).await {
            Ok(result) => result.map_err(AppError::from),
            Err(elapsed) => Err(AppError::internal_with_cause(
                "Storage request timed out",
                json!({ "operation": operation }),
                elapsed,
            )),
        }
    }
}

#[async_trait]
impl MappingRepository for PgMappingRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<UrlMapping>, AppError> {
        let row = self
            .bounded(
                "find_by_slug",
                sqlx::query_as::<_, MappingRow>(
                    "SELECT id, slug, url, created_at FROM url_mappings WHERE slug = $1",
                )
                .bind(slug)
                .fetch_optional(self.pool.as_ref()),
            )
            .await?;

        Ok(row.map(UrlMapping::from))
    }

    async fn create(&self, new_mapping: NewUrlMapping) -> Result<UrlMapping, AppError> {
        let row = self
            .bounded(
                "create",
                sqlx::query_as::<_, MappingRow>(
                    r#"
                    INSERT INTO url_mappings (slug, url)
                    VALUES ($1, $2)
                    RETURNING id, slug, url, created_at
                    "#,
                )
                .bind(&new_mapping.slug)
                .bind(&new_mapping.url)
                .fetch_one(self.pool.as_ref()),
            )
            .await?;

        tracing::debug!(slug = %row.slug, id = row.id, "Mapping stored");

        Ok(row.into())
    }

    async fn count(&self) -> Result<i64, AppError> {
        self.bounded(
            "count",
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM url_mappings")
                .fetch_one(self.pool.as_ref()),
        )
        .await
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<UrlMapping>, AppError> {
        let rows = self
            .bounded(
                "list_recent",
                sqlx::query_as::<_, MappingRow>(
                    r#"
                    SELECT id, slug, url, created_at
                    FROM url_mappings
                    ORDER BY created_at DESC, id DESC
                    LIMIT $1
                    "#,
                )
                .bind(limit)
                .fetch_all(self.pool.as_ref()),
            )
            .await?;

        Ok(rows.into_iter().map(UrlMapping::from).collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.bounded(
            "ping",
            sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(self.pool.as_ref()),
        )
        .await
        .map(|_| ())
    }
}
