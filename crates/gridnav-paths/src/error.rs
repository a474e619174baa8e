use std::fmt;

use gridnav_core::Point;

/// Reasons a [`Pathfinder::find_path`](crate::Pathfinder::find_path) call can fail.
///
/// Causes are deliberately coarse: an endpoint that is out of bounds and one
/// that is blocked report the same variant, and a search aborted by the
/// iteration cap is indistinguishable from an unreachable goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathfindingError {
    /// No navigation grid is configured.
    NoGrid,
    /// The start is outside the grid or not walkable.
    InvalidStart(Point),
    /// The goal is outside the grid or not walkable.
    InvalidGoal(Point),
    /// The open set was exhausted, or the iteration cap was hit first.
    NoPath { start: Point, goal: Point },
}

impl fmt::Display for PathfindingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoGrid => write!(f, "no navigation grid configured"),
            Self::InvalidStart(p) => write!(f, "start {p} is out of bounds or not walkable"),
            Self::InvalidGoal(p) => write!(f, "goal {p} is out of bounds or not walkable"),
            Self::NoPath { start, goal } => write!(f, "no path from {start} to {goal}"),
        }
    }
}

impl std::error::Error for PathfindingError {}
