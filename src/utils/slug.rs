//! Slug generation and validation.
//!
//! Generated slugs are [`SLUG_LENGTH`] characters drawn uniformly from the 64-symbol
//! URL-safe alphabet `A-Za-z0-9_-`. User-supplied slugs must match
//! [`SLUG_PATTERN`] and may not shadow one of the service's own routes.

use crate::error::AppError;
use rand::Rng;
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Length of generated slugs.
pub const SLUG_LENGTH: usize = 5;

/// Pattern every slug must match before it is stored.
pub const SLUG_PATTERN: &str = r"^[A-Za-z0-9_-]+$";

const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Slugs that would be shadowed by fixed routes.
const RESERVED_SLUGS: &[&str] = &["url", "health", "static"];

/// Compiled [`SLUG_PATTERN`].
pub static SLUG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(SLUG_PATTERN).unwrap());

/// Generates a random slug.
///
/// No uniqueness check happens here; see
/// [`crate::application::services::MappingService`] for the collision retry.
pub fn generate_slug() -> String {
    let mut rng = rand::rng();

    (0..SLUG_LENGTH)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Validates a slug supplied by a client or produced by [`generate_slug`].
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the slug is empty, contains characters
/// outside `[A-Za-z0-9_-]`, or is reserved.
pub fn validate_slug(slug: &str) -> Result<(), AppError> {
    if !SLUG_REGEX.is_match(slug) {
        return Err(AppError::bad_request(
            "Slug may only contain letters, digits, '_' and '-'",
            json!({ "slug": slug, "pattern": SLUG_PATTERN }),
        ));
    }

    if RESERVED_SLUGS.contains(&slug.to_lowercase().as_str()) {
        return Err(AppError::bad_request(
            "This slug is reserved",
            json!({ "slug": slug }),
        ));
    }

    Ok(())
}
