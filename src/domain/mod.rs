//! Domain layer: the URL mapping entity and the store contract.
//!
//! This module has no knowledge of HTTP or PostgreSQL. Handlers talk to it through
//! [`crate::application::services::MappingService`], and the store contract in
//! [`repositories`] is implemented by [`crate::infrastructure::persistence`].
//!
//! - [`entities`] - Plain data structures
//! - [`repositories`] - Data access trait definitions

pub mod entities;
pub mod repositories;
