use std::collections::HashMap;

use hoikumap_entities::{geo::MapPoint, location::Location};

/// The previous run's output, keyed by place name.
///
/// Entries resolve to `None` when the previous run exhausted its
/// retries for that name; such names are *not* queried again but
/// re-emitted with the sentinel, which is what makes reruns idempotent
/// and network-free. The cache is never written during a run.
#[derive(Debug, Default)]
pub struct LocationCache(HashMap<String, Option<MapPoint>>);

impl LocationCache {
    /// Builds the mapping, last write wins on duplicate names.
    pub fn from_locations<I>(locations: I) -> Self
    where
        I: IntoIterator<Item = Location>,
    {
        Self(
            locations
                .into_iter()
                .map(|Location { name, pos }| (name, pos))
                .collect(),
        )
    }

    /// The outer `Option` distinguishes "never seen" from "seen but
    /// unresolved".
    pub fn lookup(&self, name: &str) -> Option<Option<MapPoint>> {
        self.0.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_write_wins_on_duplicate_names() {
        let old = MapPoint::try_from_lat_lng_deg(35.0, 139.0).unwrap();
        let new = MapPoint::try_from_lat_lng_deg(35.5, 139.5).unwrap();
        let cache = LocationCache::from_locations(vec![
            Location {
                name: "ひまわり保育園".into(),
                pos: Some(old),
            },
            Location {
                name: "ひまわり保育園".into(),
                pos: Some(new),
            },
        ]);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.lookup("ひまわり保育園"), Some(Some(new)));
    }

    #[test]
    fn unresolved_entries_are_still_hits() {
        let cache = LocationCache::from_locations(vec![Location {
            name: "たんぽぽ保育園".into(),
            pos: None,
        }]);
        assert_eq!(cache.lookup("たんぽぽ保育園"), Some(None));
        assert_eq!(cache.lookup("すみれ保育園"), None);
    }
}
