//! Helper functions shared across layers.
//!
//! - [`code_generator`] - Short code generation, reserved prefixes, custom code rules
//! - [`url_normalizer`] - Destination URL validation and canonicalization

pub mod code_generator;
pub mod url_normalizer;
