//! Rate limiting middleware using token bucket algorithm.
//!
//! Only `POST /api/images/generate` is limited. Drawer submissions
//! (`POST /api/drawer/entries`) reach the same provider with the same server
//! key and are never throttled, so this does not cap provider spend.

use axum::Router;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

const REPLENISH_SECONDS: u64 = 3;
const BURST_SIZE: u32 = 10;

fn generation_layer_with<K>(
    extractor: K,
) -> GovernorLayer<K, NoOpMiddleware<QuantaInstant>, axum::body::Body>
where
    K: KeyExtractor,
{
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(extractor)
            .per_second(REPLENISH_SECONDS)
            .burst_size(BURST_SIZE)
            .finish()
            .unwrap(),
    );

    GovernorLayer::new(governor_conf)
}

/// Creates a rate limiter for image generation endpoints.
///
/// # Limits
///
/// - **Replenish**: one request every 3 seconds
/// - **Burst**: 10 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Key Extraction
///
/// Rate limits are applied per client IP address extracted from the
/// socket peer address.
pub fn generation_layer()
-> GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    generation_layer_with(PeerIpKeyExtractor)
}

/// Same limits as [`generation_layer`], keyed by `X-Forwarded-For` /
/// `X-Real-IP` / `Forwarded` before falling back to the peer address.
///
/// Only for deployments behind a trusted reverse proxy; the headers are
/// client-controlled otherwise.
pub fn proxied_generation_layer()
-> GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    generation_layer_with(SmartIpKeyExtractor)
}

/// Applies the generation rate limit to `router`.
///
/// # Example
///
/// ```rust,ignore
/// let generation = rate_limit::apply(
///     Router::new().route("/images/generate", post(generate_image_handler)),
///     config.behind_proxy,
/// );
/// ```
pub fn apply<S>(router: Router<S>, behind_proxy: bool) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    if behind_proxy {
        router.layer(proxied_generation_layer())
    } else {
        router.layer(generation_layer())
    }
}
