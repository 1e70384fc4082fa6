//! Search configuration for the itinerary planner.

use std::num::NonZeroUsize;

use chrono::{Duration, Months};
use serde::Deserialize;

/// Error from validating a [`SearchConfig`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A count that must be positive was zero
    #[error("{field} must be positive")]
    NotPositive { field: &'static str },

    /// A tolerance that must not be negative was negative
    #[error("{field} must not be negative")]
    Negative { field: &'static str },

    /// Too few legs to leave home, visit and return without doubling back
    #[error("target_length must be at least 3, got {0}")]
    TargetTooShort(usize),
}

/// Shortest itinerary that can exist: a two-leg trip would have to fly
/// straight back along its own route, which is never allowed.
const MIN_TARGET_LENGTH: usize = 3;

/// Configuration parameters for itinerary search.
///
/// Larger caps find more itineraries but the search tree grows as
/// `branching_cap ^ target_length` per seed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Exact number of legs in a complete itinerary.
    pub target_length: usize,

    /// Maximum number of candidates explored per non-terminal step.
    pub branching_cap: usize,

    /// Maximum number of seed flights explored.
    pub seed_cap: usize,

    /// Maximum elapsed time from first departure to last arrival (months).
    pub journey_window_months: u32,

    /// Slack allowed past the journey window (hours).
    pub window_tolerance_hours: i64,

    /// Number of search worker threads.
    pub worker_count: usize,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        target_length: usize,
        branching_cap: usize,
        seed_cap: usize,
        journey_window_months: u32,
        window_tolerance_hours: i64,
        worker_count: usize,
    ) -> Self {
        Self {
            target_length,
            branching_cap,
            seed_cap,
            journey_window_months,
            window_tolerance_hours,
            worker_count,
        }
    }

    /// Reject configurations that cannot drive a search.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let counts = [
            ("target_length", self.target_length),
            ("branching_cap", self.branching_cap),
            ("seed_cap", self.seed_cap),
            ("worker_count", self.worker_count),
            ("journey_window_months", self.journey_window_months as usize),
        ];
        for (field, value) in counts {
            if value == 0 {
                return Err(ConfigError::NotPositive { field });
            }
        }

        if self.target_length < MIN_TARGET_LENGTH {
            return Err(ConfigError::TargetTooShort(self.target_length));
        }

        if self.window_tolerance_hours < 0 {
            return Err(ConfigError::Negative {
                field: "window_tolerance_hours",
            });
        }

        Ok(())
    }

    /// Returns the branching cap, or `None` if it is zero.
    pub fn branching(&self) -> Option<NonZeroUsize> {
        NonZeroUsize::new(self.branching_cap)
    }

    /// Returns the seed cap, or `None` if it is zero.
    pub fn seeds(&self) -> Option<NonZeroUsize> {
        NonZeroUsize::new(self.seed_cap)
    }

    /// Returns the journey window.
    pub fn journey_window(&self) -> JourneyWindow {
        JourneyWindow {
            span: Months::new(self.journey_window_months),
            tolerance: Duration::try_hours(self.window_tolerance_hours).unwrap_or(Duration::MAX),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            target_length: 10,
            branching_cap: 2,
            seed_cap: 1000,
            journey_window_months: 12,
            window_tolerance_hours: 24,
            worker_count: default_workers(),
        }
    }
}

/// The longest a journey may take, measured from the first departure.
///
/// The span is calendar-based, so a one-year window starting on 29 February
/// ends on 28 February of the following year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JourneyWindow {
    pub span: Months,
    pub tolerance: Duration,
}

impl Default for JourneyWindow {
    fn default() -> Self {
        Self {
            span: Months::new(12),
            tolerance: Duration::hours(24),
        }
    }
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}
