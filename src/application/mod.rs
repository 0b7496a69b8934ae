//! Application layer: the rules for creating and resolving mappings.
//!
//! - [`services::MappingService`] - Slug allocation, validation and lookup

pub mod services;
