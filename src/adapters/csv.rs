use std::io::{BufRead, BufReader, Read, Write};

use anyhow::Result;
use hoikumap_core::cache::LocationCache;
use hoikumap_entities::{geo::MapPoint, location::Location, nursery::NurseryFacility};
use serde::Deserialize;

/// Header of the location file, kept in the localized form the
/// dashboard joins on.
pub const LOCATION_HEADER: [&str; 3] = ["施設・事業名", "緯度", "経度"];

/// Reads last month's location file into a cache.
///
/// The file is treated as headerless three-column data. Rows whose
/// coordinate fields do not parse as numbers are skipped, which
/// tolerates the header row our own writer emits as well as
/// hand-edited leftovers. The `0,0` sentinel loads as an unresolved
/// entry, not as a coordinate.
pub fn read_location_cache<R: Read>(reader: R) -> Result<LocationCache, csv::Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut locations = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let (Some(name), Some(lat), Some(lng)) = (record.get(0), record.get(1), record.get(2))
        else {
            continue;
        };
        let (Ok(lat), Ok(lng)) = (lat.parse::<f64>(), lng.parse::<f64>()) else {
            continue;
        };
        let pos = if lat == 0.0 || lng == 0.0 {
            None
        } else {
            MapPoint::try_from_lat_lng_deg(lat, lng)
        };
        locations.push(Location {
            name: name.to_string(),
            pos,
        });
    }
    Ok(LocationCache::from_locations(locations))
}

/// Streaming writer for the location file.
///
/// Every row is flushed as soon as it is written so an interrupted run
/// leaves a usable cache for the next one.
pub struct LocationWriter<W: Write> {
    inner: csv::Writer<W>,
}

impl<W: Write> LocationWriter<W> {
    pub fn new(writer: W) -> Result<Self, csv::Error> {
        let mut inner = csv::WriterBuilder::new().from_writer(writer);
        inner.write_record(LOCATION_HEADER)?;
        Ok(Self { inner })
    }

    pub fn write(&mut self, location: &Location) -> Result<(), csv::Error> {
        let (lat, lng) = location
            .pos
            .map(|pos| pos.to_lat_lng_deg())
            .unwrap_or((0.0, 0.0));
        let (lat, lng) = (lat.to_string(), lng.to_string());
        self.inner
            .write_record([location.name.as_str(), lat.as_str(), lng.as_str()])?;
        self.inner.flush().map_err(csv::Error::from)
    }

    pub fn into_inner(self) -> Result<W, csv::IntoInnerError<csv::Writer<W>>> {
        self.inner.into_inner()
    }
}

#[derive(Debug, Deserialize)]
struct WaitingRecord {
    #[serde(rename = "施設・事業名")]
    name: String,
    #[serde(rename = "施設所在区")]
    ward: String,
}

/// Reads the facility names and wards from the waiting-children table.
///
/// The open-data exports carry a one-line dataset title above the
/// actual header row; it is skipped before the CSV reader takes over.
/// All other columns are ignored. Input order is preserved.
pub fn read_waiting_facilities<R: Read>(reader: R) -> Result<Vec<NurseryFacility>> {
    let mut reader = BufReader::new(reader);
    let mut title = String::new();
    reader.read_line(&mut title)?;

    let mut rdr = csv::Reader::from_reader(reader);
    let mut facilities = Vec::new();
    for record in rdr.deserialize() {
        let WaitingRecord { name, ward } = record?;
        facilities.push(NurseryFacility { name, ward });
    }
    Ok(facilities)
}
