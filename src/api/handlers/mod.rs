//! HTTP request handlers.

pub mod create;
pub mod health;
pub mod not_found;
pub mod redirect;

pub use create::create_url_handler;
pub use health::health_handler;
pub use not_found::{NOT_FOUND_PAGE, not_found_handler};
pub use redirect::redirect_handler;
