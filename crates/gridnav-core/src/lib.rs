//! Navigation grid types.
//!
//! This crate provides the data side of grid pathfinding: integer geometry,
//! navigation cells with cost, flags and an optional payload, the fixed-size
//! [`NavGrid`] that owns them, and the [`NavPolicy`] trait through which a
//! search sees cost, walkability and adjacency.
//!
//! ```
//! use gridnav_core::{NavGrid, NavPolicy, Point};
//!
//! let mut grid = NavGrid::from_ascii("\
//! ..#
//! ..#
//! ...").unwrap();
//! grid.set_allow_diagonal(true);
//! assert!(!grid.is_walkable(Point::new(2, 0)));
//! assert_eq!(grid.neighbors_of(Point::new(1, 1)).len(), 5);
//! ```

pub mod cell;
pub mod error;
pub mod geom;
pub mod grid;
pub mod policy;

pub use cell::{CellFlags, NavCell, UserData};
pub use error::GridError;
pub use geom::{Point, Range, RangeIter};
pub use grid::NavGrid;
pub use policy::NavPolicy;
