//! Helpers shared by the service, the handlers and the admin CLI.
//!
//! - [`slug`] - Slug generation and validation
//! - [`target_url`] - Validation of target URLs

pub mod slug;
pub mod target_url;
