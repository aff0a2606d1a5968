use hoikumap_entities::geo::MapPoint;

/// A single geocoding attempt against an external provider.
///
/// Implementations issue one request and flatten every failure
/// (transport error, unexpected status, unparsable response, provider
/// "not found" sentinel) to `None`. Retrying is the responsibility of
/// [`crate::retry::Resolver`].
pub trait GeoCodingGateway {
    fn resolve_place_lat_lng(&self, place: &str) -> Option<MapPoint>;
}

impl<G: GeoCodingGateway + ?Sized> GeoCodingGateway for &G {
    fn resolve_place_lat_lng(&self, place: &str) -> Option<MapPoint> {
        (**self).resolve_place_lat_lng(place)
    }
}
