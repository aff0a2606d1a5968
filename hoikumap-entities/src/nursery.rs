/// All facilities in the open-data tables belong to the city of
/// Yokohama; the ward column only carries the bare ward name.
pub const CITY_PREFIX: &str = "横浜市";

/// A licensed nursery facility as listed in the monthly open-data
/// tables published by the city.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NurseryFacility {
    /// The facility name (施設・事業名), the join key across all tables.
    pub name: String,
    /// The ward the facility is located in (施設所在区), e.g. "鶴見区".
    pub ward: String,
}

impl NurseryFacility {
    /// The free-text query sent to the geocoding provider.
    ///
    /// The city and ward narrow the search down; facility names alone
    /// are rarely unique enough nationwide.
    pub fn geocode_query(&self) -> String {
        format!("{CITY_PREFIX}{} {}", self.ward, self.name)
    }
}
