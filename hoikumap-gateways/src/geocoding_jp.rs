use std::time::Duration;

use hoikumap_core::gateways::geocode::GeoCodingGateway;
use hoikumap_entities::geo::MapPoint;
use reqwest::StatusCode;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "https://www.geocoding.jp/api/";

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// The free geocoding.jp service.
///
/// The API takes a single `q` parameter with the place name and
/// answers with a small XML document. There is no API key; the service
/// expects clients to throttle themselves (see
/// [`hoikumap_core::retry::RetryPolicy`]).
#[derive(Debug)]
pub struct GeocodingJp {
    api_url: String,
    client: reqwest::blocking::Client,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("unexpected HTTP status {0}")]
    Status(StatusCode),
    #[error(transparent)]
    Xml(#[from] roxmltree::Error),
}

impl GeocodingJp {
    pub fn new() -> Self {
        Self::with_api_url(DEFAULT_API_URL.to_string())
    }

    pub fn with_api_url(api_url: String) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .expect("HTTP client");
        Self { api_url, client }
    }

    fn request(&self, place: &str) -> Result<Option<MapPoint>, Error> {
        let response = self.client.get(&self.api_url).query(&[("q", place)]).send()?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::Status(status));
        }
        let body = response.text()?;
        Ok(parse_lat_lng(&body)?)
    }
}

impl Default for GeocodingJp {
    fn default() -> Self {
        Self::new()
    }
}

impl GeoCodingGateway for GeocodingJp {
    fn resolve_place_lat_lng(&self, place: &str) -> Option<MapPoint> {
        match self.request(place) {
            Ok(pos) => pos,
            Err(err) => {
                log::warn!("Could not geocode '{place}': {err}");
                None
            }
        }
    }
}

/// Extracts the coordinate from a geocoding.jp response document.
///
/// `lat`/`lng` are looked up anywhere in the tree; the exact nesting
/// has changed over the years. A text of literally `"0"` in either
/// field is the provider's "not found" sentinel and counts as a miss,
/// as do missing fields and unparsable numbers.
fn parse_lat_lng(xml: &str) -> Result<Option<MapPoint>, roxmltree::Error> {
    let doc = roxmltree::Document::parse(xml)?;
    let leaf_text = |tag: &str| {
        doc.descendants()
            .find(|node| node.has_tag_name(tag))
            .and_then(|node| node.text())
            .map(str::trim)
    };
    let (Some(lat), Some(lng)) = (leaf_text("lat"), leaf_text("lng")) else {
        return Ok(None);
    };
    if lat == "0" || lng == "0" {
        return Ok(None);
    }
    let (Ok(lat), Ok(lng)) = (lat.parse(), lng.parse()) else {
        return Ok(None);
    };
    Ok(MapPoint::try_from_lat_lng_deg(lat, lng))
}
