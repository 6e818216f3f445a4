//! Short code generation and validation.
//!
//! Codes are drawn from a 62-character alphabet (`0-9`, `a-z`, `A-Z`) using
//! the thread-local CSPRNG from `rand`, which is seeded from the operating
//! system. Two generation strategies are available; both produce uniformly
//! distributed codes of exactly the requested length.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde_json::json;

use crate::error::AppError;

/// Base62 alphabet. Index 0 doubles as the padding digit for [`encode_base62`].
pub const ALPHABET: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Longest code the generator produces; `62^16` still fits in a `u128`.
pub const MAX_GENERATED_LENGTH: usize = 16;

/// Bounds for client-supplied codes. Also the longest code a lookup will try.
pub const MIN_CUSTOM_LENGTH: usize = 3;
pub const MAX_CODE_LENGTH: usize = 32;

/// Leading path segments owned by the service's own routes.
///
/// A code starting with any of these can never be reached through
/// `GET /{code}`, so none is ever stored.
pub const RESERVED_PREFIXES: &[&str] = &["api", "docs", "openapi", "assets", "static"];

/// How random codes are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CodeStrategy {
    /// Each character drawn independently from the alphabet.
    #[default]
    RandomChars,
    /// One integer drawn from `[0, 62^len)` and rendered in base 62.
    Base62,
}

impl FromStr for CodeStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "random" => Ok(Self::RandomChars),
            "base62" => Ok(Self::Base62),
            other => Err(format!(
                "unknown code strategy '{other}' (expected 'random' or 'base62')"
            )),
        }
    }
}

impl fmt::Display for CodeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RandomChars => f.write_str("random"),
            Self::Base62 => f.write_str("base62"),
        }
    }
}

/// Generates a random short code of exactly `length` characters.
///
/// `length` is clamped to `1..=MAX_GENERATED_LENGTH`; configuration
/// validation rejects values outside that range before they get here.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(6, CodeStrategy::RandomChars);
/// assert_eq!(code.len(), 6);
/// assert!(is_base62(&code));
/// ```
pub fn generate_code(length: usize, strategy: CodeStrategy) -> String {
    let length = length.clamp(1, MAX_GENERATED_LENGTH);

    match strategy {
        CodeStrategy::RandomChars => random_chars(length),
        CodeStrategy::Base62 => random_base62(length),
    }
}

fn random_chars(length: usize) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

fn random_base62(length: usize) -> String {
    let upper = (ALPHABET.len() as u128).pow(length as u32);
    let value = rand::rng().random_range(0..upper);

    encode_base62(value, length)
}

/// Renders `value` in base 62, left-padded with `'0'` to at least `width`.
pub fn encode_base62(mut value: u128, width: usize) -> String {
    let base = ALPHABET.len() as u128;
    let mut digits = Vec::with_capacity(width.max(1));

    while value > 0 {
        digits.push(ALPHABET[(value % base) as usize]);
        value /= base;
    }

    while digits.len() < width.max(1) {
        digits.push(ALPHABET[0]);
    }

    digits.reverse();
    digits.into_iter().map(char::from).collect()
}

/// Returns true if every character belongs to the base62 alphabet.
pub fn is_base62(code: &str) -> bool {
    code.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Returns true if the code starts with a reserved route prefix.
pub fn is_reserved(code: &str) -> bool {
    RESERVED_PREFIXES
        .iter()
        .any(|prefix| code.starts_with(prefix))
}

/// Returns true if a record with this code could exist at all.
///
/// Lookups for codes that fail this check are answered as not-found without
/// touching storage.
pub fn is_addressable(code: &str) -> bool {
    !code.is_empty() && code.len() <= MAX_CODE_LENGTH && is_base62(code) && !is_reserved(code)
}

/// Validates a client-supplied short code.
///
/// # Rules
///
/// - Length: 3-32 characters
/// - Characters: base62 only (`0-9`, `a-z`, `A-Z`)
/// - Must not start with a reserved prefix
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if code.len() < MIN_CUSTOM_LENGTH || code.len() > MAX_CODE_LENGTH {
        return Err(AppError::bad_request(
            format!("Short code must be {MIN_CUSTOM_LENGTH}-{MAX_CODE_LENGTH} characters"),
            json!({ "provided_length": code.len() }),
        ));
    }

    if !is_base62(code) {
        return Err(AppError::bad_request(
            "Short code can only contain letters and digits",
            json!({ "short_code": code }),
        ));
    }

    if is_reserved(code) {
        return Err(AppError::bad_request(
            "Short code starts with a reserved prefix",
            json!({ "short_code": code, "reserved": RESERVED_PREFIXES }),
        ));
    }

    Ok(())
}
