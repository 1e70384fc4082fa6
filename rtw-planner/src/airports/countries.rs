//! Airport → country lookup table.

use std::collections::HashMap;

use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::domain::{AirportCode, CountryCode};

use super::cache::CountryCache;
use super::client::CountryLookup;
use super::error::AirportError;

/// Immutable airport → country mapping.
///
/// Built once before the search and passed to the dataset loader; airports
/// missing from the table are treated as unknown rather than as errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AirportCountries {
    map: HashMap<AirportCode, CountryCode>,
}

impl AirportCountries {
    /// Create a table from airport/country pairs.
    pub fn new(pairs: impl IntoIterator<Item = (AirportCode, CountryCode)>) -> Self {
        Self {
            map: pairs.into_iter().collect(),
        }
    }

    /// Look up an airport's country.
    pub fn get(&self, airport: &AirportCode) -> Option<CountryCode> {
        self.map.get(airport).copied()
    }

    /// Returns the number of known airports.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if no airport is known.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Build the table for `airports`, looking up only those `cache` has
    /// never seen.
    ///
    /// New answers (including "no country") are merged into the cache and
    /// written back. Airports whose lookup failed are not recorded, so they
    /// are retried next run.
    pub async fn load_or_resolve<L: CountryLookup>(
        cache: &CountryCache,
        lookup: &L,
        airports: &[AirportCode],
        concurrency: usize,
    ) -> Result<Self, AirportError> {
        let mut cached = cache.load();
        let missing = cached.missing(airports);

        info!(
            path = %cache.path().display(),
            cached = cached.airports.len() + cached.unresolved.len(),
            missing = missing.len(),
            "loaded airport cache"
        );

        if !missing.is_empty() {
            let answers = lookup_all(lookup, &missing, concurrency).await;
            let answered = answers.len();
            for (airport, country) in answers {
                cached.record(airport, country);
            }

            info!(
                requested = missing.len(),
                answered,
                "resolved airports missing from cache"
            );

            if answered > 0 {
                cache.save(&cached)?;
            }
        }

        Ok(Self::new(cached.airports))
    }
}

/// Look up every airport in batches of `concurrency`.
///
/// Returns one answer per airport whose lookup succeeded; failures are
/// logged and left out.
async fn lookup_all<L: CountryLookup>(
    lookup: &L,
    airports: &[AirportCode],
    concurrency: usize,
) -> Vec<(AirportCode, Option<CountryCode>)> {
    let mut answers = Vec::with_capacity(airports.len());

    for batch in airports.chunks(concurrency.max(1)) {
        let futures: Vec<_> = batch
            .iter()
            .map(|airport| async move { (*airport, lookup.lookup_country(*airport).await) })
            .collect();

        for (airport, result) in join_all(futures).await {
            match result {
                Ok(country) => {
                    if country.is_none() {
                        debug!(airport = %airport, "no country found for airport");
                    }
                    answers.push((airport, country));
                }
                Err(e) => {
                    warn!(airport = %airport, error = %e, "airport lookup failed, skipping");
                }
            }
        }
    }

    answers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airports::CachedCountries;
    use std::sync::Mutex;
    use tempfile::tempdir;

    fn airport(s: &str) -> AirportCode {
        AirportCode::parse(s).unwrap()
    }

    fn country(s: &str) -> CountryCode {
        CountryCode::parse(s).unwrap()
    }

    /// Mock lookup backed by a fixed table.
    struct MockLookup {
        known: HashMap<AirportCode, CountryCode>,
        failing: Vec<AirportCode>,
        calls: Mutex<usize>,
    }

    impl MockLookup {
        fn new() -> Self {
            Self {
                known: [("PRG", "CZ"), ("LHR", "GB"), ("JFK", "US")]
                    .into_iter()
                    .map(|(a, c)| (airport(a), country(c)))
                    .collect(),
                failing: vec![airport("BAD")],
                calls: Mutex::new(0),
            }
        }

        fn call_count(&self) -> usize {
            *self.calls.lock().unwrap()
        }
    }

    impl CountryLookup for MockLookup {
        async fn lookup_country(
            &self,
            airport: AirportCode,
        ) -> Result<Option<CountryCode>, AirportError> {
            *self.calls.lock().unwrap() += 1;
            if self.failing.contains(&airport) {
                return Err(AirportError::Api {
                    status: 500,
                    message: "boom".to_string(),
                });
            }
            Ok(self.known.get(&airport).copied())
        }
    }

    #[tokio::test]
    async fn lookup_keeps_answers_and_drops_failures() {
        let lookup = MockLookup::new();
        let airports = [
            airport("PRG"),
            airport("LHR"),
            airport("XXX"),
            airport("BAD"),
            airport("JFK"),
        ];

        let answers = lookup_all(&lookup, &airports, 2).await;

        assert_eq!(
            answers,
            vec![
                (airport("PRG"), Some(country("CZ"))),
                (airport("LHR"), Some(country("GB"))),
                (airport("XXX"), None),
                (airport("JFK"), Some(country("US"))),
            ]
        );
        assert_eq!(lookup.call_count(), 5);
    }

    #[tokio::test]
    async fn lookup_with_zero_concurrency_still_runs() {
        let lookup = MockLookup::new();
        let answers = lookup_all(&lookup, &[airport("PRG")], 0).await;
        assert_eq!(answers.len(), 1);
    }

    #[tokio::test]
    async fn load_or_resolve_writes_then_reads_cache() {
        let dir = tempdir().unwrap();
        let cache = CountryCache::new(dir.path().join("airports.json"));
        let airports = [airport("PRG"), airport("LHR")];

        let lookup = MockLookup::new();
        let first = AirportCountries::load_or_resolve(&cache, &lookup, &airports, 4)
            .await
            .unwrap();
        assert_eq!(lookup.call_count(), 2);

        let lookup = MockLookup::new();
        let second = AirportCountries::load_or_resolve(&cache, &lookup, &airports, 4)
            .await
            .unwrap();
        assert_eq!(lookup.call_count(), 0);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn partial_cache_hit_resolves_only_missing() {
        let dir = tempdir().unwrap();
        let cache = CountryCache::new(dir.path().join("airports.json"));

        let mut seeded = CachedCountries::default();
        seeded.record(airport("PRG"), Some(country("CZ")));
        cache.save(&seeded).unwrap();

        let lookup = MockLookup::new();
        let countries = AirportCountries::load_or_resolve(
            &cache,
            &lookup,
            &[airport("PRG"), airport("LHR")],
            4,
        )
        .await
        .unwrap();

        assert_eq!(lookup.call_count(), 1);
        assert_eq!(countries.get(&airport("PRG")), Some(country("CZ")));
        assert_eq!(countries.get(&airport("LHR")), Some(country("GB")));

        let saved = cache.load();
        assert_eq!(saved.airports.get(&airport("LHR")), Some(&country("GB")));
    }

    #[tokio::test]
    async fn airports_without_country_not_looked_up_again() {
        let dir = tempdir().unwrap();
        let cache = CountryCache::new(dir.path().join("airports.json"));
        let airports = [airport("PRG"), airport("XXX")];

        let lookup = MockLookup::new();
        AirportCountries::load_or_resolve(&cache, &lookup, &airports, 4)
            .await
            .unwrap();
        assert_eq!(lookup.call_count(), 2);

        let lookup = MockLookup::new();
        let countries = AirportCountries::load_or_resolve(&cache, &lookup, &airports, 4)
            .await
            .unwrap();
        assert_eq!(lookup.call_count(), 0);
        assert_eq!(countries.get(&airport("XXX")), None);
    }

    #[tokio::test]
    async fn failed_lookups_retried_next_run() {
        let dir = tempdir().unwrap();
        let cache = CountryCache::new(dir.path().join("airports.json"));
        let airports = [airport("PRG"), airport("BAD")];

        let lookup = MockLookup::new();
        AirportCountries::load_or_resolve(&cache, &lookup, &airports, 4)
            .await
            .unwrap();

        let lookup = MockLookup::new();
        AirportCountries::load_or_resolve(&cache, &lookup, &airports, 4)
            .await
            .unwrap();
        assert_eq!(lookup.call_count(), 1);
        assert_eq!(cache.load().missing(&airports), vec![airport("BAD")]);
    }

    #[tokio::test]
    async fn nothing_answered_leaves_no_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("airports.json");
        let cache = CountryCache::new(&path);

        let lookup = MockLookup::new();
        let countries = AirportCountries::load_or_resolve(&cache, &lookup, &[airport("BAD")], 4)
            .await
            .unwrap();

        assert!(countries.is_empty());
        assert!(!path.exists());
    }
}
