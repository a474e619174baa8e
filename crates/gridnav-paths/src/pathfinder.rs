use std::f32::consts::SQRT_2;

use gridnav_core::{NavGrid, NavPolicy, Point};

use crate::config::PathfinderConfig;
use crate::heuristic::Heuristic;
use crate::path::Path;
use crate::smoothing::Smoothing;

/// Cost of a single move from `from` to the adjacent cell `to`: the
/// destination's cost, times √2 when the move is diagonal.
#[inline]
pub fn step_cost<G: NavPolicy + ?Sized>(grid: &G, from: Point, to: Point) -> f32 {
    let cost = grid.cell_cost(to);
    if from.is_diagonal_to(to) {
        cost * SQRT_2
    } else {
        cost
    }
}

/// A* search over a borrowed navigation grid.
///
/// The pathfinder never owns the grid: several pathfinders may borrow the
/// same grid, and the grid can only be edited once they are done with it.
/// `G` is any [`NavPolicy`]; wrap a [`NavGrid`] to change costs or
/// walkability without touching the search.
///
/// Nothing but the configuration and the
/// [`last_nodes_explored`](Self::last_nodes_explored) counter survives a call
/// to [`find_path`](Self::find_path).
pub struct Pathfinder<'g, G: NavPolicy + ?Sized = NavGrid> {
    pub(crate) grid: Option<&'g G>,
    pub(crate) config: PathfinderConfig,
    pub(crate) last_nodes_explored: u32,
}

impl<'g, G: NavPolicy + ?Sized> Pathfinder<'g, G> {
    /// Create a pathfinder over `grid` with the default configuration:
    /// Manhattan heuristic, no smoothing, no iteration cap.
    pub fn new(grid: &'g G) -> Self {
        Self::with_config(grid, PathfinderConfig::default())
    }

    /// Create a pathfinder over `grid` with `config`.
    pub fn with_config(grid: &'g G, config: PathfinderConfig) -> Self {
        Self {
            grid: Some(grid),
            config,
            last_nodes_explored: 0,
        }
    }

    /// Create a pathfinder with no grid. Searches fail with
    /// [`NoGrid`](crate::PathfindingError::NoGrid) until one is set.
    pub fn unbound() -> Self {
        Self {
            grid: None,
            config: PathfinderConfig::default(),
            last_nodes_explored: 0,
        }
    }

    #[inline]
    pub fn grid(&self) -> Option<&'g G> {
        self.grid
    }

    /// Replace (or remove) the grid searched by later calls.
    pub fn set_grid(&mut self, grid: Option<&'g G>) {
        self.grid = grid;
    }

    #[inline]
    pub fn config(&self) -> &PathfinderConfig {
        &self.config
    }

    /// Replace the whole configuration.
    pub fn set_config(&mut self, config: PathfinderConfig) {
        self.config = config;
    }

    #[inline]
    pub fn smoothing(&self) -> Smoothing {
        self.config.smoothing
    }

    pub fn set_smoothing(&mut self, smoothing: Smoothing) {
        self.config.smoothing = smoothing;
    }

    #[inline]
    pub fn max_iterations(&self) -> u32 {
        self.config.max_iterations
    }

    /// Cap the number of node expansions per search; 0 removes the cap.
    pub fn set_max_iterations(&mut self, max_iterations: u32) {
        self.config.max_iterations = max_iterations;
    }

    #[inline]
    pub fn heuristic(&self) -> &Heuristic {
        &self.config.heuristic
    }

    pub fn set_heuristic(&mut self, heuristic: Heuristic) {
        self.config.heuristic = heuristic;
    }

    /// Nodes expanded by the most recent [`find_path`](Self::find_path) or
    /// [`is_reachable`](Self::is_reachable) call. Zero after an early failure
    /// or a start-equals-goal request.
    #[inline]
    pub fn last_nodes_explored(&self) -> u32 {
        self.last_nodes_explored
    }

    /// Cost of walking `path` on the current grid, summing
    /// [`step_cost`] over every unit step.
    ///
    /// Waypoints may be further apart than one cell, as after simplification,
    /// as long as each segment is horizontal, vertical or a 45° diagonal; the
    /// segment is walked cell by cell. Returns `None` with no grid, when a
    /// segment has any other slope, or when a visited cell is not walkable.
    pub fn path_cost(&self, path: &Path) -> Option<f32> {
        let grid = self.grid?;
        let mut total = 0.0;
        for w in path.points().windows(2) {
            let d = w[1] - w[0];
            if d.x != 0 && d.y != 0 && d.x.abs() != d.y.abs() {
                return None;
            }
            let step = Point::new(d.x.signum(), d.y.signum());
            let mut cur = w[0];
            while cur != w[1] {
                let next = cur + step;
                if !grid.is_walkable(next) {
                    return None;
                }
                total += step_cost(grid, cur, next);
                cur = next;
            }
        }
        Some(total)
    }
}

impl<G: NavPolicy + ?Sized> Default for Pathfinder<'_, G> {
    fn default() -> Self {
        Self::unbound()
    }
}

impl<G: NavPolicy + ?Sized> std::fmt::Debug for Pathfinder<'_, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pathfinder")
            .field("has_grid", &self.grid.is_some())
            .field("config", &self.config)
            .field("last_nodes_explored", &self.last_nodes_explored)
            .finish()
    }
}
