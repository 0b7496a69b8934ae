//! Final-stage error response mapper.
//!
//! [`crate::error::AppError`] always renders the `stack` field with the production
//! placeholder and leaves an [`ErrorReport`] in the response extensions. This layer
//! consumes that report: outside production the body is re-rendered with the full
//! diagnostic, in production it is left untouched.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::error::ErrorReport;
use crate::state::AppState;

/// Middleware function, installed with `middleware::from_fn_with_state`.
///
/// # Integration
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/url", post(create_url_handler))
///     .layer(middleware::from_fn_with_state(state.clone(), error_stack::layer))
///     .with_state(state);
/// ```
pub async fn layer(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;

    let report = response.extensions_mut().remove::<ErrorReport>();

    match report {
        Some(report) if state.expose_error_stack => report.expose(response),
        _ => response,
    }
}
