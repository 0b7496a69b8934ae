//! Application error type and its JSON representation.
//!
//! Every failure on the creation path ends up here. [`AppError`] renders itself as
//! `{ message, code, details, stack }` with the production placeholder in `stack`,
//! and attaches an [`ErrorReport`] to the response extensions so that
//! [`crate::api::middleware::error_stack`] can swap in the full diagnostic when the
//! service runs outside production.

use axum::{
    Json,
    body::Body,
    extract::rejection::JsonRejection,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

/// Value of the `stack` field when diagnostics are hidden.
pub const STACK_PLACEHOLDER: &str = "🥞";

/// Name of the unique index guarding `url_mappings.slug`.
const SLUG_UNIQUE_CONSTRAINT: &str = "url_mappings_slug_key";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    #[error("{message}")]
    Conflict { message: String, details: Value },

    #[error("{message}")]
    Internal {
        message: String,
        details: Value,
        /// Underlying failure, only ever shown in the diagnostic stack.
        cause: Option<String>,
    },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
            cause: None,
        }
    }

    /// Internal error that keeps the debug form of its cause for diagnostics.
    pub fn internal_with_cause(
        message: impl Into<String>,
        details: Value,
        cause: impl std::fmt::Debug,
    ) -> Self {
        Self::Internal {
            message: message.into(),
            details,
            cause: Some(format!("{cause:?}")),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation_error",
            Self::NotFound { .. } => "not_found",
            Self::Conflict { .. } => "conflict",
            Self::Internal { .. } => "internal_error",
        }
    }

    pub fn details(&self) -> &Value {
        match self {
            Self::Validation { details, .. }
            | Self::NotFound { details, .. }
            | Self::Conflict { details, .. }
            | Self::Internal { details, .. } => details,
        }
    }

    /// Multi-line diagnostic used as the `stack` outside production.
    pub fn diagnostic(&self) -> String {
        let mut out = format!("{}: {}\n    at details: {}", self.code(), self, self.details());
        if let Self::Internal {
            cause: Some(cause), ..
        } = self
        {
            out.push_str("\n    caused by: ");
            out.push_str(cause);
        }
        out
    }
}

/// JSON body of every error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub message: String,
    pub code: &'static str,
    pub details: Value,
    pub stack: String,
}

/// Everything needed to re-render an error response with full diagnostics.
///
/// Stored in the response extensions by [`AppError::into_response`].
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub status: StatusCode,
    pub body: ErrorBody,
    pub diagnostic: String,
}

impl ErrorReport {
    /// Replaces the body of `response` with one that carries the diagnostic stack.
    pub fn expose(self, response: Response) -> Response {
        let body = ErrorBody {
            stack: self.diagnostic,
            ..self.body
        };

        let bytes = match serde_json::to_vec(&body) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!("Failed to serialize error body: {}", e);
                return response;
            }
        };

        let (mut parts, _) = response.into_parts();
        parts.status = self.status;
        parts.headers.remove(header::CONTENT_LENGTH);
        Response::from_parts(parts, Body::from(bytes))
    }
}

impl From<&AppError> for ErrorReport {
    fn from(err: &AppError) -> Self {
        Self {
            status: err.status(),
            body: ErrorBody {
                message: err.to_string(),
                code: err.code(),
                details: err.details().clone(),
                stack: STACK_PLACEHOLDER.to_string(),
            },
            diagnostic: err.diagnostic(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            Self::Internal { .. } => tracing::error!(error = %self.diagnostic(), "Request failed"),
            _ => tracing::debug!(code = self.code(), "Request rejected: {}", self),
        }

        let report = ErrorReport::from(&self);
        let mut response = (report.status, Json(&report.body)).into_response();
        response.extensions_mut().insert(report);
        response
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            return match db.constraint() {
                Some(SLUG_UNIQUE_CONSTRAINT) => {
                    AppError::conflict("Slug already used, please try again", json!({}))
                }
                constraint => AppError::conflict(
                    "Unique constraint violation",
                    json!({ "constraint": constraint }),
                ),
            };
        }

        AppError::internal_with_cause("Database error", json!({}), e)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&errors).unwrap_or_else(|_| json!({}));
        AppError::bad_request("Validation failed", details)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(
            "Invalid request body",
            json!({ "reason": rejection.body_text() }),
        )
    }
}
