//! Parallel seed scheduling.
//!
//! Every seed flight roots an independent search tree. Trees share nothing
//! but the read-only catalog, so they run on a rayon pool without locks and
//! are joined once at the end.

use std::any::Any;
use std::num::NonZeroUsize;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::domain::{Flight, Itinerary};

use super::catalog::Catalog;
use super::config::{ConfigError, SearchConfig};
use super::sample::down_sample;
use super::search::Planner;

/// Error from a scheduled search run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// Configuration rejected before searching
    #[error("invalid search configuration: {0}")]
    Config(#[from] ConfigError),

    /// The worker thread pool could not be started
    #[error("failed to start search workers: {0}")]
    WorkerPool(String),

    /// The run was cancelled before every seed was searched
    #[error("search cancelled")]
    Cancelled,
}

/// Shared flag for cancelling a run between seed dispatches.
///
/// Seeds already in flight run to completion; seeds not yet started are
/// skipped and the run reports [`SearchError::Cancelled`].
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    /// Create a flag that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Returns true once cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Runs one search tree per seed flight across a worker pool.
#[derive(Debug, Clone)]
pub struct SearchScheduler {
    config: SearchConfig,
    seed_cap: NonZeroUsize,
    cancel: CancellationFlag,
}

impl SearchScheduler {
    /// Create a scheduler, rejecting invalid configuration up front.
    pub fn new(config: SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        let seed_cap = config
            .seeds()
            .ok_or(ConfigError::NotPositive { field: "seed_cap" })?;

        Ok(Self {
            config,
            seed_cap,
            cancel: CancellationFlag::new(),
        })
    }

    /// Use `cancel` to stop the run early.
    pub fn with_cancellation(mut self, cancel: CancellationFlag) -> Self {
        self.cancel = cancel;
        self
    }

    /// Search the catalog for complete itineraries.
    ///
    /// Seeds are stride-sampled from the catalog down to `seed_cap`; each is
    /// searched against the full catalog. The outer list holds one entry
    /// per seed, in seed order.
    pub fn analyze_routes(&self, catalog: &Catalog) -> Result<Vec<Vec<Itinerary>>, SearchError> {
        let seeds = down_sample(catalog.flights(), self.seed_cap);
        let planner = Planner::new(catalog, &self.config);

        info!(
            catalog = catalog.len(),
            seeds = seeds.len(),
            workers = self.config.worker_count,
            target_length = self.config.target_length,
            branching_cap = self.config.branching_cap,
            "starting itinerary search"
        );

        self.run_seeds(&seeds, |itinerary| planner.find_routes(itinerary))
    }

    /// Run `search` once per seed on the worker pool.
    ///
    /// A panic inside one seed's search is logged and that seed yields no
    /// itineraries; its siblings are unaffected.
    pub(crate) fn run_seeds<F>(
        &self,
        seeds: &[Flight],
        search: F,
    ) -> Result<Vec<Vec<Itinerary>>, SearchError>
    where
        F: Fn(&Itinerary) -> Vec<Itinerary> + Sync,
    {
        let started = Instant::now();

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.worker_count)
            .thread_name(|i| format!("rtw-search-{i}"))
            .build()
            .map_err(|e| SearchError::WorkerPool(e.to_string()))?;

        let failed = AtomicUsize::new(0);

        let results: Vec<Option<Vec<Itinerary>>> = pool.install(|| {
            seeds
                .par_iter()
                .enumerate()
                .map(|(index, seed)| {
                    if self.cancel.is_cancelled() {
                        return None;
                    }

                    let itinerary = Itinerary::from_seed(*seed);
                    match catch_unwind(AssertUnwindSafe(|| search(&itinerary))) {
                        Ok(found) => {
                            debug!(seed = index, found = found.len(), "seed search complete");
                            Some(found)
                        }
                        Err(payload) => {
                            warn!(
                                seed = index,
                                origin = %seed.origin_airport(),
                                destination = %seed.dest_airport(),
                                error = panic_message(payload.as_ref()),
                                "seed search failed, skipping"
                            );
                            failed.fetch_add(1, Ordering::Relaxed);
                            Some(Vec::new())
                        }
                    }
                })
                .collect()
        });

        let Some(per_seed) = results.into_iter().collect::<Option<Vec<_>>>() else {
            warn!(seeds = seeds.len(), "itinerary search cancelled");
            return Err(SearchError::Cancelled);
        };

        info!(
            seeds = per_seed.len(),
            itineraries = per_seed.iter().map(Vec::len).sum::<usize>(),
            failed_seeds = failed.load(Ordering::Relaxed),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "itinerary search complete"
        );

        Ok(per_seed)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}
