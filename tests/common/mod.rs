#![allow(dead_code)]

use axum_test::TestServer;
use slugly::application::services::MappingService;
use slugly::infrastructure::persistence::PgMappingRepository;
use slugly::routes::{RouterOptions, app_router};
use slugly::state::AppState;
use sqlx::PgPool;
use std::sync::Arc;

pub async fn create_test_mapping(pool: &PgPool, slug: &str, url: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO url_mappings (slug, url) VALUES ($1, $2) RETURNING id")
        .bind(slug)
        .bind(url)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn count_mappings(pool: &PgPool, slug: &str) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM url_mappings WHERE slug = $1")
        .bind(slug)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn total_mappings(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM url_mappings")
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn create_test_state(pool: PgPool, expose_error_stack: bool) -> AppState {
    let repository = Arc::new(PgMappingRepository::new(Arc::new(pool)));
    let mapping_service = Arc::new(MappingService::new(repository));

    AppState::new(mapping_service, expose_error_stack)
}

/// Full application router, as served in development.
pub fn create_test_server(pool: PgPool) -> TestServer {
    let app = app_router(create_test_state(pool, true), RouterOptions::default());
    TestServer::new(app).unwrap()
}

/// Full application router, as served in production.
pub fn create_production_server(pool: PgPool) -> TestServer {
    let app = app_router(create_test_state(pool, false), RouterOptions::default());
    TestServer::new(app).unwrap()
}
