//! HTTP middleware.
//!
//! - [`error_stack`] - Final-stage rendering of error diagnostics
//! - [`rate_limit`] - Optional per-IP throttling of mapping creation
//! - [`tracing`] - Request/response logging

pub mod error_stack;
pub mod rate_limit;
pub mod tracing;
