//! Round-the-world itinerary search.
//!
//! This module implements the search core: given a sorted catalog of
//! international flights, find closed itineraries of a fixed number of legs
//! that never depart twice from the same country.
//!
//! Each seed flight roots a depth-first search. Non-final steps are pruned
//! to a few stride-sampled candidates so the tree stays tractable, and the
//! independent trees run in parallel.

mod catalog;
mod config;
mod filter;
mod sample;
mod scheduler;
mod search;

pub use catalog::{Catalog, CatalogError};
pub use config::{ConfigError, JourneyWindow, SearchConfig};
pub use filter::{
    closes_loop, continues_route, departs_after_arrival, filter_candidates,
    filter_terminal_candidates, reaches_new_country, within_window,
};
pub use sample::down_sample;
pub use scheduler::{CancellationFlag, SearchError, SearchScheduler};
pub use search::Planner;
