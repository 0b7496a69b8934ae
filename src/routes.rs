//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`          - Front-end form page
//! - `GET  /static/*`  - Static assets
//! - `GET  /health`    - Health check
//! - `POST /url`       - Create a mapping
//! - `GET  /{slug}`    - Redirect to the mapped URL
//! - anything else     - 404 with the fixed not-found page
//!
//! # Middleware
//!
//! - **Error stack** - Final-stage rendering of error diagnostics
//! - **Rate limiting** - Optional per-IP token bucket on `POST /url`
//! - **CORS** - Any origin may call the API
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling (see [`app_service`])

use crate::api::handlers::{
    create_url_handler, health_handler, not_found_handler, redirect_handler,
};
use crate::api::middleware::{error_stack, rate_limit, tracing};
use crate::config::Config;
use crate::state::AppState;
use axum::handler::HandlerWithoutStateExt;
use axum::routing::{get, post};
use axum::{Router, middleware};
use std::path::PathBuf;
use tower::Layer;
use tower_http::cors::CorsLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::{ServeDir, ServeFile};

/// Router-level settings taken from [`Config`].
#[derive(Debug, Clone)]
pub struct RouterOptions {
    /// Directory holding `index.html` and the other front-end assets.
    pub static_dir: PathBuf,
    /// Throttle `POST /url` per client IP.
    pub rate_limit: bool,
    /// Read the client IP from forwarded headers; only behind a trusted proxy.
    pub behind_proxy: bool,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            static_dir: PathBuf::from("static"),
            rate_limit: false,
            behind_proxy: false,
        }
    }
}

impl From<&Config> for RouterOptions {
    fn from(config: &Config) -> Self {
        Self {
            static_dir: PathBuf::from(&config.static_dir),
            rate_limit: config.rate_limit_enabled,
            behind_proxy: config.behind_proxy,
        }
    }
}

/// Constructs the application router with all routes and middleware.
///
/// Unsupported methods on a known path fall through to the not-found page rather
/// than `405 Method Not Allowed`.
pub fn app_router(state: AppState, options: RouterOptions) -> Router {
    let mut create_route = post(create_url_handler).fallback(not_found_handler);
    if options.rate_limit {
        create_route = if options.behind_proxy {
            create_route.layer(rate_limit::forwarded_layer())
        } else {
            create_route.layer(rate_limit::layer())
        };
    }

    let assets = ServeDir::new(&options.static_dir)
        .not_found_service(not_found_handler.into_service());
    let index = ServeFile::new(options.static_dir.join("index.html"));

    Router::new()
        .route_service("/", index)
        .route("/health", get(health_handler).fallback(not_found_handler))
        .route("/url", create_route)
        .route("/{slug}", get(redirect_handler).fallback(not_found_handler))
        .nest_service("/static", assets)
        .fallback(not_found_handler)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            error_stack::layer,
        ))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(tracing::layer())
}

/// Wraps [`app_router`] so that `/abc/` is routed like `/abc`.
pub fn app_service(state: AppState, options: RouterOptions) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(app_router(state, options))
}
