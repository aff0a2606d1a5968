/// A geographical position in decimal degrees (WGS 84).
///
/// A `MapPoint` can only be constructed from coordinates that are
/// finite and within the valid degree ranges, so every value of this
/// type represents an actual position on the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapPoint {
    lat: f64,
    lng: f64,
}

impl MapPoint {
    pub const LAT_DEG_MAX: f64 = 90.0;
    pub const LAT_DEG_MIN: f64 = -90.0;
    pub const LNG_DEG_MAX: f64 = 180.0;
    pub const LNG_DEG_MIN: f64 = -180.0;

    pub fn try_from_lat_lng_deg(lat: f64, lng: f64) -> Option<Self> {
        if !lat.is_finite() || !lng.is_finite() {
            return None;
        }
        if !(Self::LAT_DEG_MIN..=Self::LAT_DEG_MAX).contains(&lat) {
            return None;
        }
        if !(Self::LNG_DEG_MIN..=Self::LNG_DEG_MAX).contains(&lng) {
            return None;
        }
        Some(Self { lat, lng })
    }

    pub const fn lat_deg(&self) -> f64 {
        self.lat
    }

    pub const fn lng_deg(&self) -> f64 {
        self.lng
    }

    pub const fn to_lat_lng_deg(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }
}

impl std::fmt::Display for MapPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        write!(f, "{},{}", self.lat, self.lng)
    }
}
