//! Search configuration.

use crate::heuristic::Heuristic;
use crate::smoothing::Smoothing;

/// Tunables of a [`Pathfinder`](crate::Pathfinder), separate from the grid it
/// searches.
///
/// With the `serde` feature every field is optional when deserializing and
/// falls back to its default, so a host can load `{"heuristic": "octile"}`
/// from its own settings file.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct PathfinderConfig {
    /// Remaining-cost estimate. Defaults to Manhattan.
    pub heuristic: Heuristic,
    /// Post-processing of found paths. Defaults to none.
    pub smoothing: Smoothing,
    /// Maximum node expansions before giving up; 0 means unlimited.
    pub max_iterations: u32,
}

impl PathfinderConfig {
    /// Set the heuristic (builder).
    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    /// Set the smoothing mode (builder).
    pub fn with_smoothing(mut self, smoothing: Smoothing) -> Self {
        self.smoothing = smoothing;
        self
    }

    /// Set the iteration cap (builder).
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}
