//! Repository trait definitions for the domain layer.
//!
//! # Implementations
//!
//! - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL
//! - [`crate::infrastructure::persistence::InMemoryUrlRepository`] - process-local
//! - `MockUrlRepository` - generated by `mockall` under `cfg(test)`
//!
//! # Testing
//!
//! See integration tests in `tests/repository_url.rs` for PostgreSQL usage.

pub mod url_repository;

pub use url_repository::{StorageError, UrlRepository};

#[cfg(test)]
pub use url_repository::MockUrlRepository;
