use hoikumap_core::retry::Resolver;
use hoikumap_gateways::geocoding_jp::GeocodingJp;

use crate::config;

pub fn geocoding_gateway(cfg: &config::Geocoding) -> GeocodingJp {
    GeocodingJp::with_api_url(cfg.api_url.clone())
}

pub fn geocode_resolver(cfg: &config::Geocoding) -> Resolver<GeocodingJp> {
    Resolver::new(geocoding_gateway(cfg), cfg.retry)
}
