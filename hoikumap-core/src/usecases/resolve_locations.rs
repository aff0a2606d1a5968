use hoikumap_entities::{location::Location, nursery::NurseryFacility};

use crate::{cache::LocationCache, gateways::geocode::GeoCodingGateway, retry::Resolver};

/// One name to resolve.
///
/// `name` is the key the dashboard joins on and the key the cache is
/// consulted with; `query` is the free text sent to the provider. For
/// ward names the two coincide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeocodeTask {
    pub name: String,
    pub query: String,
}

impl GeocodeTask {
    pub fn from_place_name(name: impl Into<String>) -> Self {
        let name = name.into();
        let query = name.clone();
        Self { name, query }
    }
}

impl From<NurseryFacility> for GeocodeTask {
    fn from(facility: NurseryFacility) -> Self {
        let query = facility.geocode_query();
        Self {
            name: facility.name,
            query,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ResolveStats {
    pub cached: usize,
    pub fetched: usize,
    pub unresolved: usize,
}

/// Resolves every task in input order and hands each result to `sink`
/// as soon as it is known.
///
/// Cache hits (resolved or not) are emitted verbatim without touching
/// the gateway. A task whose retries exhaust is emitted with `pos:
/// None` and the batch moves on; only the sink can abort the run.
pub fn resolve_locations<G, S, E>(
    tasks: impl IntoIterator<Item = GeocodeTask>,
    cache: &LocationCache,
    resolver: &Resolver<G>,
    mut sink: S,
) -> Result<ResolveStats, E>
where
    G: GeoCodingGateway,
    S: FnMut(&Location) -> Result<(), E>,
{
    let mut stats = ResolveStats::default();
    for GeocodeTask { name, query } in tasks {
        let pos = match cache.lookup(&name) {
            Some(pos) => {
                stats.cached += 1;
                pos
            }
            None => {
                let pos = resolver.resolve(&query);
                match pos {
                    Some(_) => stats.fetched += 1,
                    None => stats.unresolved += 1,
                }
                pos
            }
        };
        sink(&Location { name, pos })?;
    }
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, collections::HashMap, convert::Infallible};

    use hoikumap_entities::geo::MapPoint;

    use super::*;
    use crate::retry::RetryPolicy;

    /// Resolves from a fixed table, unknown queries fail every attempt.
    #[derive(Default)]
    struct TableGateway {
        known: HashMap<String, MapPoint>,
        calls: Cell<u32>,
    }

    impl GeoCodingGateway for TableGateway {
        fn resolve_place_lat_lng(&self, place: &str) -> Option<MapPoint> {
            self.calls.set(self.calls.get() + 1);
            self.known.get(place).copied()
        }
    }

    struct PanicGateway;

    impl GeoCodingGateway for PanicGateway {
        fn resolve_place_lat_lng(&self, place: &str) -> Option<MapPoint> {
            panic!("unexpected network call for '{place}'");
        }
    }

    fn pos(lat: f64, lng: f64) -> MapPoint {
        MapPoint::try_from_lat_lng_deg(lat, lng).unwrap()
    }

    fn collect_sink(out: &mut Vec<Location>) -> impl FnMut(&Location) -> Result<(), Infallible> + '_ {
        |loc| {
            out.push(loc.clone());
            Ok(())
        }
    }

    #[test]
    fn cached_names_never_touch_the_gateway() {
        let cache = LocationCache::from_locations(vec![Location {
            name: "西区".into(),
            pos: Some(pos(35.457168, 139.621194)),
        }]);
        let resolver = Resolver::new(PanicGateway, RetryPolicy::without_delay(10));
        let mut emitted = Vec::new();
        let stats = resolve_locations(
            vec![GeocodeTask::from_place_name("西区")],
            &cache,
            &resolver,
            collect_sink(&mut emitted),
        )
        .unwrap();
        assert_eq!(stats.cached, 1);
        assert_eq!(stats.fetched, 0);
        assert_eq!(emitted[0].pos, Some(pos(35.457168, 139.621194)));
    }

    #[test]
    fn output_order_equals_input_order() {
        let cache = LocationCache::from_locations(vec![
            Location {
                name: "中区".into(),
                pos: Some(pos(35.425549, 139.656855)),
            },
            Location {
                name: "栄区".into(),
                pos: None,
            },
        ]);
        let mut known = HashMap::new();
        known.insert("南区".to_string(), pos(35.426215, 139.604756));
        known.insert("泉区".to_string(), pos(35.418646, 139.501889));
        let gateway = TableGateway {
            known,
            calls: Cell::new(0),
        };
        let resolver = Resolver::new(&gateway, RetryPolicy::without_delay(2));

        let names = ["中区", "南区", "栄区", "泉区", "瀬谷区"];
        let tasks: Vec<_> = names
            .iter()
            .map(|name| GeocodeTask::from_place_name(*name))
            .collect();
        let mut emitted = Vec::new();
        let stats =
            resolve_locations(tasks, &cache, &resolver, collect_sink(&mut emitted)).unwrap();

        let emitted_names: Vec<_> = emitted.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(emitted_names, names);
        assert_eq!(stats.cached, 2);
        assert_eq!(stats.fetched, 2);
        assert_eq!(stats.unresolved, 1);
        // 2 hits for the resolvable names, 2 exhausted attempts for 瀬谷区.
        assert_eq!(gateway.calls.get(), 4);
    }

    #[test]
    fn unresolved_tasks_do_not_abort_the_batch() {
        let cache = LocationCache::default();
        let gateway = TableGateway::default();
        let resolver = Resolver::new(gateway, RetryPolicy::without_delay(3));
        let mut emitted = Vec::new();
        let stats = resolve_locations(
            vec![
                GeocodeTask::from_place_name("存在しない保育園"),
                GeocodeTask::from_place_name("もう一つ"),
            ],
            &cache,
            &resolver,
            collect_sink(&mut emitted),
        )
        .unwrap();
        assert_eq!(stats.unresolved, 2);
        assert_eq!(emitted.len(), 2);
        assert!(emitted.iter().all(|l| l.pos.is_none()));
    }

    #[test]
    fn rerun_from_own_output_is_identical_and_offline() {
        let mut known = HashMap::new();
        known.insert("横浜市鶴見区 あおぞら保育園".to_string(), pos(35.49, 139.68));
        known.insert("横浜市旭区 つくし保育園".to_string(), pos(35.47, 139.53));
        let gateway = TableGateway {
            known,
            calls: Cell::new(0),
        };
        let resolver = Resolver::new(gateway, RetryPolicy::without_delay(2));

        let tasks = vec![
            GeocodeTask::from(NurseryFacility {
                name: "あおぞら保育園".into(),
                ward: "鶴見区".into(),
            }),
            GeocodeTask::from(NurseryFacility {
                name: "どこにもない保育園".into(),
                ward: "港南区".into(),
            }),
            GeocodeTask::from(NurseryFacility {
                name: "つくし保育園".into(),
                ward: "旭区".into(),
            }),
        ];

        let mut first_run = Vec::new();
        resolve_locations(
            tasks.clone(),
            &LocationCache::default(),
            &resolver,
            collect_sink(&mut first_run),
        )
        .unwrap();

        // The second run's cache is the first run's output, failures
        // included, so it must finish without any network call.
        let cache = LocationCache::from_locations(first_run.clone());
        let offline = Resolver::new(PanicGateway, RetryPolicy::without_delay(2));
        let mut second_run = Vec::new();
        let stats = resolve_locations(tasks, &cache, &offline, collect_sink(&mut second_run))
            .unwrap();

        assert_eq!(first_run, second_run);
        assert_eq!(stats.cached, 3);
    }
}
