//! Validation of the URLs mappings point to.

use crate::error::AppError;
use serde_json::json;
use url::Url;

/// Reasons a target URL is refused.
#[derive(Debug, thiserror::Error)]
pub enum TargetUrlError {
    #[error("URL is required")]
    Missing,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(#[from] url::ParseError),

    #[error("Unsupported URL scheme '{0}'")]
    UnsupportedScheme(String),

    #[error("URL must include a host")]
    MissingHost,
}

impl From<TargetUrlError> for AppError {
    fn from(e: TargetUrlError) -> Self {
        AppError::bad_request("Invalid URL", json!({ "reason": e.to_string() }))
    }
}

/// Checks that `input` is an absolute `http`, `https` or `ftp` URL with a host.
///
/// Returns the trimmed input unchanged; the stored URL is exactly what the client
/// sent, minus surrounding whitespace.
///
/// # Errors
///
/// Returns [`TargetUrlError`] describing the first failed rule.
pub fn validate_target_url(input: &str) -> Result<String, TargetUrlError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TargetUrlError::Missing);
    }

    let url = Url::parse(trimmed)?;

    match url.scheme() {
        "http" | "https" | "ftp" => {}
        other => return Err(TargetUrlError::UnsupportedScheme(other.to_string())),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(TargetUrlError::MissingHost);
    }

    Ok(trimmed.to_string())
}

/// Serialized, percent-encoded form of a stored URL.
///
/// Used for the `Location` header when the raw stored value is not a valid header.
pub fn encoded_location(stored: &str) -> Option<String> {
    Url::parse(stored).ok().map(String::from)
}
