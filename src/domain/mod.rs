//! Domain layer containing business entities and storage contracts.
//!
//! The domain layer has no dependency on HTTP or on a concrete database. It
//! defines what a shortened URL is and what the storage layer must guarantee;
//! [`crate::infrastructure::persistence`] provides the implementations and
//! [`crate::application::services`] orchestrates them.
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Storage trait definitions

pub mod entities;
pub mod repositories;
