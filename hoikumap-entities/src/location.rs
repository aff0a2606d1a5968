use crate::geo::MapPoint;

/// The resolved (or unresolved) position of a named place.
///
/// `pos` is `None` when geocoding failed; downstream consumers render
/// such rows with the provider's `0,0` sentinel and draw no marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub name: String,
    pub pos: Option<MapPoint>,
}
