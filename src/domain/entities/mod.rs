//! Core domain entities.
//!
//! Entities follow the "New Type" pattern used across the crate: a
//! storage-assigned record ([`UrlRecord`]) and a separate input struct for
//! creation ([`NewUrl`]).

pub mod url;

pub use url::{NewUrl, UrlRecord};
