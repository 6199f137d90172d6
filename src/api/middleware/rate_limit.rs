//! Rate limiting middleware using token bucket algorithm.

use anyhow::{Context, Result};
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

/// Highest refill rate expressible with millisecond replenish intervals.
pub const MAX_PER_SECOND: u64 = 1000;

/// Per-IP rate limiter type used by the router.
pub type RateLimitLayer =
    GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Milliseconds between two replenished tokens for a rate of `per_second`.
///
/// The governor quota is expressed as the interval after which one token comes
/// back, not as a count per second.
///
/// # Errors
///
/// Returns an error if `per_second` is 0 or above [`MAX_PER_SECOND`].
pub fn replenish_interval_ms(per_second: u64) -> Result<u64> {
    if per_second == 0 || per_second > MAX_PER_SECOND {
        anyhow::bail!(
            "rate limit must be between 1 and {MAX_PER_SECOND} requests per second, got {per_second}"
        );
    }
    Ok(1000 / per_second)
}

/// Creates a rate limiter for the public endpoints.
///
/// Each client IP regains `per_second` tokens per second, up to `burst`.
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// Rate limits are keyed by the socket peer address, so the router must be
/// served with `into_make_service_with_connect_info::<SocketAddr>`.
///
/// # Errors
///
/// Returns an error if `per_second` is out of range or `burst` is 0.
pub fn layer(per_second: u64, burst: u32) -> Result<RateLimitLayer> {
    let interval_ms = replenish_interval_ms(per_second)?;

    let governor_conf = GovernorConfigBuilder::default()
        .per_millisecond(interval_ms)
        .burst_size(burst)
        .finish()
        .context("rate limit burst must be greater than 0")?;

    Ok(GovernorLayer::new(Arc::new(governor_conf)))
}
