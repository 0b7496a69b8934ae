mod common;

use axum::{Router, routing::post};
use axum_test::TestServer;
use regex::Regex;
use serde_json::json;
use slugly::api::handlers::create_url_handler;
use sqlx::PgPool;

fn create_only_server(pool: PgPool) -> TestServer {
    let state = common::create_test_state(pool, true);
    let app = Router::new()
        .route("/url", post(create_url_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[sqlx::test]
async fn test_create_with_explicit_slug(pool: PgPool) {
    let server = create_only_server(pool.clone());

    let response = server
        .post("/url")
        .json(&json!({ "slug": "docs", "url": "https://docs.rs" }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["slug"], "docs");
    assert_eq!(json["url"], "https://docs.rs");
    assert!(json["id"].is_i64());

    assert_eq!(common::count_mappings(&pool, "docs").await, 1);
}

#[sqlx::test]
async fn test_create_generates_slug(pool: PgPool) {
    let server = create_only_server(pool);

    let response = server
        .post("/url")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    let slug = json["slug"].as_str().unwrap();
    assert!(Regex::new(r"^[A-Za-z0-9_-]{5}$").unwrap().is_match(slug));
    assert_eq!(json["url"], "https://example.com");
}

#[sqlx::test]
async fn test_create_with_empty_slug_generates_one(pool: PgPool) {
    let server = create_only_server(pool);

    let response = server
        .post("/url")
        .json(&json!({ "slug": "", "url": "https://example.com" }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["slug"].as_str().unwrap().len(), 5);
}

#[sqlx::test]
async fn test_create_lowercases_slug(pool: PgPool) {
    let server = create_only_server(pool.clone());

    let response = server
        .post("/url")
        .json(&json!({ "slug": "MiXeD", "url": "https://example.com" }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["slug"], "mixed");
    assert_eq!(common::count_mappings(&pool, "mixed").await, 1);
}

#[sqlx::test]
async fn test_create_duplicate_slug_conflict(pool: PgPool) {
    let server = create_only_server(pool.clone());

    server
        .post("/url")
        .json(&json!({ "slug": "taken", "url": "https://first.com" }))
        .await
        .assert_status_ok();

    let response = server
        .post("/url")
        .json(&json!({ "slug": "taken", "url": "https://second.com" }))
        .await;

    assert_eq!(response.status_code(), 409);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["code"], "conflict");
    assert!(json["message"].as_str().unwrap().contains("already used"));

    assert_eq!(common::count_mappings(&pool, "taken").await, 1);
}

#[sqlx::test]
async fn test_create_duplicate_slug_differs_only_in_case(pool: PgPool) {
    let server = create_only_server(pool.clone());

    server
        .post("/url")
        .json(&json!({ "slug": "case", "url": "https://first.com" }))
        .await
        .assert_status_ok();

    let response = server
        .post("/url")
        .json(&json!({ "slug": "CASE", "url": "https://second.com" }))
        .await;

    assert_eq!(response.status_code(), 409);
    assert_eq!(common::count_mappings(&pool, "case").await, 1);
}

#[sqlx::test]
async fn test_create_taken_slug_with_invalid_url_is_conflict(pool: PgPool) {
    let server = create_only_server(pool.clone());

    common::create_test_mapping(&pool, "taken", "https://first.com").await;

    let response = server
        .post("/url")
        .json(&json!({ "slug": "taken", "url": "not a url" }))
        .await;

    assert_eq!(response.status_code(), 409);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["code"], "conflict");

    assert_eq!(common::total_mappings(&pool).await, 1);
}

#[sqlx::test]
async fn test_create_same_url_twice_gets_two_slugs(pool: PgPool) {
    let server = create_only_server(pool.clone());

    let first = server
        .post("/url")
        .json(&json!({ "url": "https://same.com" }))
        .await
        .json::<serde_json::Value>();
    let second = server
        .post("/url")
        .json(&json!({ "url": "https://same.com" }))
        .await
        .json::<serde_json::Value>();

    assert_ne!(first["slug"], second["slug"]);
    assert_eq!(common::total_mappings(&pool).await, 2);
}

#[sqlx::test]
async fn test_create_invalid_url(pool: PgPool) {
    let server = create_only_server(pool.clone());

    let response = server
        .post("/url")
        .json(&json!({ "url": "not a url" }))
        .await;

    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["code"], "validation_error");
    assert!(json["message"].is_string());

    assert_eq!(common::total_mappings(&pool).await, 0);
}

#[sqlx::test]
async fn test_create_missing_url(pool: PgPool) {
    let server = create_only_server(pool.clone());

    let response = server.post("/url").json(&json!({ "slug": "nourl" })).await;

    response.assert_status_bad_request();
    assert_eq!(common::total_mappings(&pool).await, 0);
}

#[sqlx::test]
async fn test_create_invalid_slug(pool: PgPool) {
    let server = create_only_server(pool.clone());

    let response = server
        .post("/url")
        .json(&json!({ "slug": "a b", "url": "https://example.com" }))
        .await;

    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["code"], "validation_error");

    assert_eq!(common::total_mappings(&pool).await, 0);
}

#[sqlx::test]
async fn test_create_reserved_slug(pool: PgPool) {
    let server = create_only_server(pool.clone());

    let response = server
        .post("/url")
        .json(&json!({ "slug": "health", "url": "https://example.com" }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(common::total_mappings(&pool).await, 0);
}

#[sqlx::test]
async fn test_create_malformed_body(pool: PgPool) {
    let server = create_only_server(pool);

    let response = server
        .post("/url")
        .content_type("application/json")
        .text("{ not json")
        .await;

    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["code"], "validation_error");
}

#[sqlx::test]
async fn test_create_then_redirect(pool: PgPool) {
    let server = common::create_test_server(pool);

    let response = server
        .post("/url")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    let slug = json["slug"].as_str().unwrap();

    let redirect = server.get(&format!("/{slug}")).await;

    assert_eq!(redirect.status_code(), 302);
    assert_eq!(redirect.header("location"), "https://example.com");
}

#[sqlx::test]
async fn test_concurrent_creation_of_same_slug(pool: PgPool) {
    let state = common::create_test_state(pool.clone(), true);

    let attempts = (0..8).map(|i| {
        let service = state.mapping_service.clone();
        tokio::spawn(async move {
            service
                .create_mapping(format!("https://example.com/{i}"), Some("race".to_string()))
                .await
        })
    });

    let mut successes = 0;
    for attempt in attempts.collect::<Vec<_>>() {
        if attempt.await.unwrap().is_ok() {
            successes += 1;
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(common::count_mappings(&pool, "race").await, 1);
}
