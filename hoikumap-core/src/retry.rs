use std::{thread, time::Duration};

use hoikumap_entities::geo::MapPoint;

use crate::gateways::geocode::GeoCodingGateway;

/// How often and how patiently a query is retried.
///
/// The delay is a fixed pause, not a backoff: it is the self-imposed
/// rate limit the geocoding provider's usage policy asks for. Do not
/// shorten it against a live endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            delay: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    /// A policy without any pause between attempts, for tests.
    pub const fn without_delay(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            delay: Duration::ZERO,
        }
    }
}

/// Wraps a [`GeoCodingGateway`] with a [`RetryPolicy`].
#[derive(Debug)]
pub struct Resolver<G> {
    gateway: G,
    policy: RetryPolicy,
}

impl<G> Resolver<G>
where
    G: GeoCodingGateway,
{
    pub fn new(gateway: G, policy: RetryPolicy) -> Self {
        Self { gateway, policy }
    }

    /// Resolves a place name, or gives up after `max_attempts` tries.
    ///
    /// The delay runs before *every* attempt, the first included, so
    /// successive outbound requests are always at least `delay` apart
    /// no matter how the attempts of neighboring queries interleave.
    pub fn resolve(&self, place: &str) -> Option<MapPoint> {
        let RetryPolicy {
            max_attempts,
            delay,
        } = self.policy;
        for attempt in 1..=max_attempts {
            thread::sleep(delay);
            if let Some(pos) = self.gateway.resolve_place_lat_lng(place) {
                log::debug!("Resolved '{place}' to {pos} on attempt {attempt}/{max_attempts}");
                return Some(pos);
            }
            log::debug!("Geocoding attempt {attempt}/{max_attempts} for '{place}' failed");
        }
        log::warn!("Giving up on '{place}' after {max_attempts} attempts");
        None
    }
}
