//! Pagination query parameters.

use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};

pub const DEFAULT_LIMIT: u32 = 50;

/// `limit` / `offset` query parameters for listing.
///
/// Values are parsed from the query string with `serde_with`, so negative or
/// non-numeric input is rejected at extraction time.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub limit: Option<u32>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub offset: Option<u32>,
}

impl ListParams {
    /// Returns `(limit, offset)` with defaults applied.
    ///
    /// # Defaults
    ///
    /// - `limit`: 50
    /// - `offset`: 0
    ///
    /// The upper bound on `limit` is enforced by the service.
    pub fn limit_offset(&self) -> (u32, u32) {
        (
            self.limit.unwrap_or(DEFAULT_LIMIT),
            self.offset.unwrap_or(0),
        )
    }
}
