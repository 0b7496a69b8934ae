//! Repository trait definitions for the domain layer.
//!
//! - [`MappingRepository`] - Slug store: lookup by slug and creation
//!
//! The PostgreSQL implementation lives in `crate::infrastructure::persistence`.
//! A `mockall` mock is generated for unit tests.

pub mod mapping_repository;

pub use mapping_repository::MappingRepository;

#[cfg(test)]
pub use mapping_repository::MockMappingRepository;
