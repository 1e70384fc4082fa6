//! Persistent airport → country table.
//!
//! Lookups are slow and airports do not move between countries, so every
//! answer the site gives is kept on disk indefinitely. Later runs only look
//! up airports the file has never seen.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::{AirportCode, CountryCode};

use super::error::AirportError;

/// Default cache file name.
pub const DEFAULT_CACHE_FILE: &str = "airport_list.json";

/// Everything learned from previous lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedCountries {
    /// Airports with a known country.
    #[serde(default)]
    pub airports: BTreeMap<AirportCode, CountryCode>,
    /// Airports the site was asked about but gave no country for.
    #[serde(default)]
    pub unresolved: BTreeSet<AirportCode>,
}

impl CachedCountries {
    /// Airports from `wanted` that have never been looked up, in order and
    /// without repeats.
    pub fn missing(&self, wanted: &[AirportCode]) -> Vec<AirportCode> {
        let mut seen = BTreeSet::new();
        wanted
            .iter()
            .copied()
            .filter(|a| !self.airports.contains_key(a) && !self.unresolved.contains(a))
            .filter(|a| seen.insert(*a))
            .collect()
    }

    /// Record a lookup answer.
    pub fn record(&mut self, airport: AirportCode, country: Option<CountryCode>) {
        match country {
            Some(country) => {
                self.unresolved.remove(&airport);
                self.airports.insert(airport, country);
            }
            None => {
                self.unresolved.insert(airport);
            }
        }
    }
}

/// JSON file holding a [`CachedCountries`] table.
#[derive(Debug, Clone)]
pub struct CountryCache {
    path: PathBuf,
}

impl CountryCache {
    /// Cache stored at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the table, starting empty if the file is missing or unreadable.
    pub fn load(&self) -> CachedCountries {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "no airport cache");
                return CachedCountries::default();
            }
        };

        serde_json::from_str(&contents).unwrap_or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "ignoring corrupt airport cache");
            CachedCountries::default()
        })
    }

    /// Write the table, creating parent directories as needed.
    pub fn save(&self, cached: &CachedCountries) -> Result<(), AirportError> {
        let wrap = |source| AirportError::CacheWrite {
            path: self.path.display().to_string(),
            source,
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(wrap)?;
        }

        let json = serde_json::to_string_pretty(cached)?;
        std::fs::write(&self.path, json).map_err(wrap)
    }

    /// Returns the cache file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
