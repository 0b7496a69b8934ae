//! Rate limiting for mapping creation, using a token bucket per client IP.
//!
//! Disabled unless `RATE_LIMIT_ENABLED` is set. Requests over the limit receive
//! `429 Too Many Requests`.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// Seconds needed to earn back one request.
const REPLENISH_SECONDS: u64 = 30;

/// Requests a fresh client may send at once.
const BURST: u32 = 5;

/// Creates a limiter keyed by the socket peer address.
///
/// Requires the server to be started with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
///
/// # Example
///
/// ```rust,ignore
/// let route = post(create_url_handler).layer(rate_limit::layer());
/// ```
pub fn layer() -> GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>
{
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(REPLENISH_SECONDS)
            .burst_size(BURST)
            .finish()
            .expect("rate limit quota is non-zero"),
    );

    GovernorLayer::new(governor_conf)
}

/// Creates a limiter keyed by `X-Forwarded-For` / `X-Real-IP` / `Forwarded`,
/// falling back to the peer address.
///
/// Only use behind a trusted reverse proxy; clients can forge these headers.
pub fn forwarded_layer()
-> GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(SmartIpKeyExtractor)
            .per_second(REPLENISH_SECONDS)
            .burst_size(BURST)
            .finish()
            .expect("rate limit quota is non-zero"),
    );

    GovernorLayer::new(governor_conf)
}
