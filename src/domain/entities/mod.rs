//! Core domain entities.
//!
//! A single entity exists: [`UrlMapping`], the association between a slug and its
//! target URL. [`NewUrlMapping`] carries the fields supplied on creation; the id and
//! timestamp are assigned by the store.

pub mod mapping;

pub use mapping::{NewUrlMapping, UrlMapping};
