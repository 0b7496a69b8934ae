//! Mapping creation and resolution service.

use std::sync::Arc;

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;
use crate::utils::slug::{generate_slug, validate_slug};
use crate::utils::target_url::validate_target_url;
use serde_json::json;

/// Attempts at finding an unused generated slug before giving up.
const MAX_GENERATION_ATTEMPTS: usize = 10;

/// Service for creating and resolving slug mappings.
///
/// Slugs are compared and stored lowercase. The store's unique index is the final
/// arbiter when two requests race for the same slug; the loser gets
/// [`AppError::Conflict`].
pub struct MappingService<R: MappingRepository> {
    repository: Arc<R>,
}

impl<R: MappingRepository> MappingService<R> {
    /// Creates a new mapping service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Creates a mapping for `url`, using `slug` when given or a generated one otherwise.
    ///
    /// # Flow
    ///
    /// 1. A missing, empty or blank `slug` is replaced by a generated one
    /// 2. A supplied slug that is already taken is a conflict
    /// 3. Slug and URL are validated
    /// 4. The slug is lowercased and the mapping stored
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a malformed slug or URL.
    /// Returns [`AppError::Conflict`] if the slug is already taken.
    /// Returns [`AppError::Internal`] on storage failure.
    pub async fn create_mapping(
        &self,
        url: String,
        slug: Option<String>,
    ) -> Result<UrlMapping, AppError> {
        let requested = slug
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let slug = match requested {
            Some(custom) => {
                if self
                    .repository
                    .find_by_slug(&custom.to_lowercase())
                    .await?
                    .is_some()
                {
                    return Err(AppError::conflict(
                        "Slug already used, please try again",
                        json!({ "slug": custom }),
                    ));
                }
                custom
            }
            None => self.generate_unused_slug().await?,
        };

        validate_slug(&slug)?;
        let url = validate_target_url(&url)?;

        let new_mapping = NewUrlMapping {
            slug: slug.to_lowercase(),
            url,
        };

        let created = self.repository.create(new_mapping).await?;
        tracing::info!(slug = %created.slug, id = created.id, "Mapping created");

        Ok(created)
    }

    /// Looks up the mapping for `slug`, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no mapping exists.
    /// Returns [`AppError::Internal`] on storage failure.
    pub async fn resolve(&self, slug: &str) -> Result<UrlMapping, AppError> {
        let slug = slug.to_lowercase();

        self.repository
            .find_by_slug(&slug)
            .await?
            .ok_or_else(|| AppError::not_found("Slug not found", json!({ "slug": slug })))
    }

    /// Number of stored mappings.
    pub async fn count(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }

    /// Most recent mappings, newest first.
    pub async fn recent(&self, limit: i64) -> Result<Vec<UrlMapping>, AppError> {
        self.repository.list_recent(limit.max(1)).await
    }

    /// Verifies the store answers.
    pub async fn health_check(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }

    /// Generates a slug whose lowercase form is not yet stored.
    async fn generate_unused_slug(&self) -> Result<String, AppError> {
        for _ in 0..MAX_GENERATION_ATTEMPTS {
            let slug = generate_slug().to_lowercase();

            if self.repository.find_by_slug(&slug).await?.is_none() {
                return Ok(slug);
            }
            tracing::debug!(slug = %slug, "Generated slug already taken, retrying");
        }

        Err(AppError::internal(
            "Failed to generate unique slug",
            json!({ "reason": "Too many collisions" }),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockMappingRepository;
    use crate::utils::slug::SLUG_LENGTH;
    use chrono::Utc;

    fn create_test_mapping(id: i64, slug: &str, url: &str) -> UrlMapping {
        UrlMapping::new(id, slug.to_string(), url.to_string(), Utc::now())
    }

    fn echo_create(repo: &mut MockMappingRepository) {
        repo.expect_create()
            .times(1)
            .returning(|new| Ok(create_test_mapping(1, &new.slug, &new.url)));
    }

    #[tokio::test]
    async fn test_create_with_generated_slug() {
        let mut repo = MockMappingRepository::new();
        repo.expect_find_by_slug().times(1).returning(|_| Ok(None));
        echo_create(&mut repo);

        let service = MappingService::new(Arc::new(repo));
        let mapping = service
            .create_mapping("https://example.com".to_string(), None)
            .await
            .unwrap();

        assert_eq!(mapping.url, "https://example.com");
        assert_eq!(mapping.slug.len(), SLUG_LENGTH);
        assert_eq!(mapping.slug, mapping.slug.to_lowercase());
    }

    #[tokio::test]
    async fn test_blank_slug_is_generated() {
        let mut repo = MockMappingRepository::new();
        repo.expect_find_by_slug().times(1).returning(|_| Ok(None));
        echo_create(&mut repo);

        let service = MappingService::new(Arc::new(repo));
        let mapping = service
            .create_mapping("https://example.com".to_string(), Some("   ".to_string()))
            .await
            .unwrap();

        assert_eq!(mapping.slug.len(), SLUG_LENGTH);
    }

    #[tokio::test]
    async fn test_generated_slug_retries_on_collision() {
        let mut repo = MockMappingRepository::new();
        let mut calls = 0;
        repo.expect_find_by_slug().times(3).returning(move |slug| {
            calls += 1;
            if calls < 3 {
                Ok(Some(create_test_mapping(9, slug, "https://taken.example")))
            } else {
                Ok(None)
            }
        });
        echo_create(&mut repo);

        let service = MappingService::new(Arc::new(repo));
        let result = service
            .create_mapping("https://example.com".to_string(), None)
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_generated_slug_gives_up_after_max_attempts() {
        let mut repo = MockMappingRepository::new();
        repo.expect_find_by_slug()
            .times(MAX_GENERATION_ATTEMPTS)
            .returning(|slug| Ok(Some(create_test_mapping(9, slug, "https://taken.example"))));
        repo.expect_create().times(0);

        let service = MappingService::new(Arc::new(repo));
        let err = service
            .create_mapping("https://example.com".to_string(), None)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_custom_slug_is_lowercased() {
        let mut repo = MockMappingRepository::new();
        repo.expect_find_by_slug()
            .withf(|slug| slug == "mylink")
            .times(1)
            .returning(|_| Ok(None));
        repo.expect_create()
            .withf(|new| new.slug == "mylink" && new.url == "https://example.com")
            .times(1)
            .returning(|new| Ok(create_test_mapping(3, &new.slug, &new.url)));

        let service = MappingService::new(Arc::new(repo));
        let mapping = service
            .create_mapping(
                " https://example.com ".to_string(),
                Some("MyLink".to_string()),
            )
            .await
            .unwrap();

        assert_eq!(mapping.slug, "mylink");
    }

    #[tokio::test]
    async fn test_custom_slug_conflict() {
        let mut repo = MockMappingRepository::new();
        repo.expect_find_by_slug()
            .times(1)
            .returning(|slug| Ok(Some(create_test_mapping(5, slug, "https://other.com"))));
        repo.expect_create().times(0);

        let service = MappingService::new(Arc::new(repo));
        let err = service
            .create_mapping("https://example.com".to_string(), Some("taken".to_string()))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_invalid_slug_is_rejected() {
        let mut repo = MockMappingRepository::new();
        repo.expect_find_by_slug().times(1).returning(|_| Ok(None));
        repo.expect_create().times(0);

        let service = MappingService::new(Arc::new(repo));
        let err = service
            .create_mapping("https://example.com".to_string(), Some("a b".to_string()))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_invalid_url_is_rejected() {
        let mut repo = MockMappingRepository::new();
        repo.expect_find_by_slug().times(1).returning(|_| Ok(None));
        repo.expect_create().times(0);

        let service = MappingService::new(Arc::new(repo));
        let err = service
            .create_mapping("not a url".to_string(), None)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_store_conflict_is_propagated() {
        let mut repo = MockMappingRepository::new();
        repo.expect_find_by_slug().times(1).returning(|_| Ok(None));
        repo.expect_create()
            .times(1)
            .returning(|_| Err(AppError::conflict("Slug already used", json!({}))));

        let service = MappingService::new(Arc::new(repo));
        let err = service
            .create_mapping("https://example.com".to_string(), Some("race".to_string()))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_resolve_lowercases_slug() {
        let mut repo = MockMappingRepository::new();
        repo.expect_find_by_slug()
            .withf(|slug| slug == "abc")
            .times(1)
            .returning(|slug| Ok(Some(create_test_mapping(1, slug, "https://example.com"))));

        let service = MappingService::new(Arc::new(repo));
        let mapping = service.resolve("AbC").await.unwrap();

        assert_eq!(mapping.url, "https://example.com");
    }

    #[tokio::test]
    async fn test_resolve_not_found() {
        let mut repo = MockMappingRepository::new();
        repo.expect_find_by_slug().times(1).returning(|_| Ok(None));

        let service = MappingService::new(Arc::new(repo));
        let err = service.resolve("missing").await.unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_resolve_propagates_storage_error() {
        let mut repo = MockMappingRepository::new();
        repo.expect_find_by_slug()
            .times(1)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let service = MappingService::new(Arc::new(repo));
        let err = service.resolve("abc").await.unwrap_err();

        assert!(matches!(err, AppError::Internal { .. }));
    }
}
