//! Depth-bounded itinerary search.
//!
//! Grows a partial itinerary one leg at a time until it reaches the target
//! length. Non-final steps explore at most `branching_cap` candidates
//! (stride-sampled); the final step keeps every flight that closes the loop.

use std::num::NonZeroUsize;

use tracing::trace;

use crate::domain::Itinerary;

use super::catalog::Catalog;
use super::config::{JourneyWindow, SearchConfig};
use super::filter::{filter_candidates, filter_terminal_candidates};
use super::sample::down_sample;

/// Itinerary planner over one catalog.
///
/// Holds only shared references, so one planner can be used from many
/// threads at once.
#[derive(Debug, Clone)]
pub struct Planner<'a> {
    catalog: &'a Catalog,
    target_length: usize,
    branching_cap: NonZeroUsize,
    window: JourneyWindow,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    ///
    /// A zero branching cap is treated as one; callers are expected to have
    /// run [`SearchConfig::validate`] already.
    pub fn new(catalog: &'a Catalog, config: &SearchConfig) -> Self {
        Self {
            catalog,
            target_length: config.target_length,
            branching_cap: config.branching().unwrap_or(NonZeroUsize::MIN),
            window: config.journey_window(),
        }
    }

    /// Find every complete itinerary reachable from `itinerary` under the
    /// pruning policy.
    ///
    /// Each returned itinerary has exactly `target_length` legs and ends in
    /// the country it started from. Returns an empty list when no extension
    /// is possible.
    pub fn find_routes(&self, itinerary: &Itinerary) -> Vec<Itinerary> {
        let len = itinerary.len();

        if len >= self.target_length {
            return Vec::new();
        }

        if len + 1 == self.target_length {
            return filter_terminal_candidates(itinerary, self.catalog.flights(), &self.window)
                .into_iter()
                .map(|closing| itinerary.extended(closing))
                .collect();
        }

        let candidates = filter_candidates(itinerary, self.catalog.flights(), &self.window);
        let explored = down_sample(&candidates, self.branching_cap);

        trace!(
            depth = len,
            candidates = candidates.len(),
            explored = explored.len(),
            "extending itinerary"
        );

        explored
            .into_iter()
            .flat_map(|next| self.find_routes(&itinerary.extended(next)))
            .collect()
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
