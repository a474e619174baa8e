//! A* pathfinding over navigation grids.
//!
//! This crate searches the grids defined in [`gridnav_core`]:
//!
//! - **A\*** cheapest-path search ([`Pathfinder::find_path`])
//! - **Reachability** checks ([`Pathfinder::is_reachable`])
//! - **Heuristics**: Manhattan, Euclidean, Chebyshev, Octile or a closure ([`Heuristic`])
//! - **Smoothing** of colinear waypoints ([`Smoothing::Simple`])
//!
//! A [`Pathfinder`] borrows any [`NavPolicy`]; a plain [`NavGrid`] is the
//! common case. Each search allocates its own node table and open set, so
//! only the configuration and the explored-node counter outlive a call.
//!
//! ```
//! use gridnav_paths::{Heuristic, NavGrid, Pathfinder, PathfinderConfig, Point};
//!
//! let mut grid = NavGrid::new(5, 5).unwrap();
//! grid.set_allow_diagonal(true);
//! grid.set_cut_corners(true);
//!
//! let config = PathfinderConfig::default().with_heuristic(Heuristic::Octile);
//! let mut pf = Pathfinder::with_config(&grid, config);
//! let path = pf.find_path(Point::new(0, 0), Point::new(4, 4)).unwrap();
//! assert_eq!(path.len(), 5);
//! assert!((path.total_cost() - 4.0 * std::f32::consts::SQRT_2).abs() < 1e-4);
//! ```

mod astar;
mod config;
mod error;
mod heuristic;
mod node;
mod path;
mod pathfinder;
mod smoothing;

pub use config::PathfinderConfig;
pub use error::PathfindingError;
pub use heuristic::{Heuristic, HeuristicFn, chebyshev, euclidean, manhattan, octile};
pub use path::Path;
pub use pathfinder::{Pathfinder, step_cost};
pub use smoothing::Smoothing;

pub use gridnav_core::{CellFlags, GridError, NavCell, NavGrid, NavPolicy, Point, Range};
