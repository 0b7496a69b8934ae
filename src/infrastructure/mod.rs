//! Infrastructure layer for external integrations.
//!
//! - [`persistence`] - PostgreSQL implementation of the slug store

pub mod persistence;
