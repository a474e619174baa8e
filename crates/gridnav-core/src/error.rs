//! Configuration errors raised while building or editing a grid.

use std::fmt;

use crate::geom::Point;

/// Errors that can occur when constructing or mutating a [`NavGrid`](crate::NavGrid)
/// or a [`NavCell`](crate::NavCell).
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    /// Width or height was zero or negative.
    EmptyGrid { width: i32, height: i32 },
    /// A movement cost was negative, NaN or infinite.
    InvalidCost(f32),
    /// The coordinate lies outside the grid.
    OutOfBounds(Point),
    /// Serialized cell data does not match the grid dimensions.
    CellCount { expected: usize, found: usize },
    /// An ASCII map line did not match the width of the first line.
    InconsistentWidth { line: usize },
    /// An ASCII map contained a character with no cell meaning.
    InvalidChar { ch: char, pos: Point },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid { width, height } => {
                write!(f, "grid dimensions must be positive, got {width}x{height}")
            }
            Self::InvalidCost(c) => write!(f, "invalid cell cost {c}: must be finite and >= 0"),
            Self::OutOfBounds(p) => write!(f, "coordinate {p} is outside the grid"),
            Self::CellCount { expected, found } => {
                write!(f, "expected {expected} cells, found {found}")
            }
            Self::InconsistentWidth { line } => {
                write!(f, "map line {line} has a different width than the first line")
            }
            Self::InvalidChar { ch, pos } => {
                write!(f, "map contains invalid character \u{201c}{ch}\u{201d} at {pos}")
            }
        }
    }
}

impl std::error::Error for GridError {}

/// Check that `cost` is usable as a movement-cost multiplier.
#[inline]
pub(crate) fn check_cost(cost: f32) -> Result<f32, GridError> {
    if cost.is_finite() && cost >= 0.0 {
        Ok(cost)
    } else {
        Err(GridError::InvalidCost(cost))
    }
}
