//! Airport → country resolution.
//!
//! Flight data only names airports, but the planner routes by country.
//! Countries are scraped from world-airport-codes.com once per dataset and
//! kept in a disk cache, since a full lookup takes minutes. Only airports the
//! cache has never seen are looked up.

mod cache;
mod client;
mod countries;
mod error;

pub use cache::{CachedCountries, CountryCache, DEFAULT_CACHE_FILE};
pub use client::{AirportClient, AirportClientConfig, CountryLookup, parse_country_code};
pub use countries::AirportCountries;
pub use error::AirportError;
