//! Rate limiting middleware using token bucket algorithm.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::KeyExtractor,
};

/// Token bucket parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    /// Seconds between token refills.
    pub per_second: u64,
    /// Bucket size: requests allowed in a burst.
    pub burst: u32,
}

impl Default for RateLimit {
    fn default() -> Self {
        Self {
            per_second: 2,
            burst: 100,
        }
    }
}

/// Creates a per-client rate limiter.
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Key Extraction
///
/// The client is identified by `key_extractor`: `PeerIpKeyExtractor` reads
/// the socket peer address, `SmartIpKeyExtractor` prefers
/// `X-Forwarded-For` / `X-Real-IP` and should only be used behind a trusted
/// proxy. Both need the router served with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
///
/// Returns `None` when `limits` has a zero field.
///
/// # Example
///
/// ```rust,ignore
/// let api = Router::new()
///     .route("/urls", post(create_url_handler))
///     .layer(rate_limit::layer(PeerIpKeyExtractor, RateLimit::default()).unwrap());
/// ```
pub fn layer<K>(
    key_extractor: K,
    limits: RateLimit,
) -> Option<GovernorLayer<K, NoOpMiddleware<QuantaInstant>, axum::body::Body>>
where
    K: KeyExtractor,
{
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(limits.per_second)
        .burst_size(limits.burst)
        .key_extractor(key_extractor)
        .finish()?;

    Some(GovernorLayer::new(Arc::new(governor_conf)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tower_governor::key_extractor::{PeerIpKeyExtractor, SmartIpKeyExtractor};

    #[test]
    fn test_default_limits_build() {
        assert!(layer(PeerIpKeyExtractor, RateLimit::default()).is_some());
        assert!(layer(SmartIpKeyExtractor, RateLimit::default()).is_some());
    }

    #[test]
    fn test_zero_limits_rejected() {
        let limits = RateLimit {
            per_second: 0,
            burst: 10,
        };
        assert!(layer(PeerIpKeyExtractor, limits).is_none());

        let limits = RateLimit {
            per_second: 1,
            burst: 0,
        };
        assert!(layer(PeerIpKeyExtractor, limits).is_none());
    }
}
