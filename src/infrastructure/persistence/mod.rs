//! PostgreSQL repository implementations.
//!
//! - [`PgMappingRepository`] - Slug store backed by the `url_mappings` table

pub mod pg_mapping_repository;

pub use pg_mapping_repository::{DEFAULT_STORE_TIMEOUT, PgMappingRepository};
