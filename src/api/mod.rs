//! HTTP layer: translates requests into service calls and results into responses.
//!
//! # Modules
//!
//! - [`dto`] - Request/response bodies
//! - [`handlers`] - Redirect, creation, health and not-found handlers
//! - [`middleware`] - Tracing, rate limiting and error-stack rendering

pub mod dto;
pub mod handlers;
pub mod middleware;
