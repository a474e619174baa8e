//! The [`NavPolicy`] trait: cost, walkability and adjacency as seen by a search.

use crate::cell::NavCell;
use crate::geom::Point;

const CARDINALS: [Point; 4] = [
    Point::new(0, -1),
    Point::new(1, 0),
    Point::new(0, 1),
    Point::new(-1, 0),
];

const DIAGONALS: [Point; 4] = [
    Point::new(1, -1),
    Point::new(1, 1),
    Point::new(-1, 1),
    Point::new(-1, -1),
];

/// Navigation policy consumed by pathfinding.
///
/// Implementors supply cell storage and the two movement toggles; the
/// provided methods define the default policy:
///
/// - out-of-range coordinates cost `f32::INFINITY` and are never walkable,
/// - a cell is walkable unless flagged [`BLOCKED`](crate::CellFlags::BLOCKED),
/// - neighbors are the walkable cardinal cells, plus walkable diagonals when
///   diagonal movement is allowed.
///
/// Any provided method can be overridden. Alternate policies (terrain costs,
/// per-agent walkability) are usually written as small wrappers around a
/// [`NavGrid`](crate::NavGrid) that forward the required methods and override
/// [`cell_cost`](Self::cell_cost) or [`is_walkable`](Self::is_walkable); the
/// default [`neighbors`](Self::neighbors) goes through both, so the overrides
/// reach the search unchanged.
pub trait NavPolicy {
    /// Grid size as (width, height).
    fn dimensions(&self) -> Point;

    /// The cell at `p`, or `None` if out of range.
    fn cell(&self, p: Point) -> Option<&NavCell>;

    /// Whether the four diagonal moves are considered.
    fn allow_diagonal(&self) -> bool;

    /// Whether a diagonal move may squeeze past a blocked flanking cell.
    fn cut_corners(&self) -> bool;

    /// Whether `p` lies inside the grid.
    fn is_valid(&self, p: Point) -> bool {
        let d = self.dimensions();
        p.x >= 0 && p.y >= 0 && p.x < d.x && p.y < d.y
    }

    /// Cost multiplier for entering `p`; `f32::INFINITY` when out of range.
    fn cell_cost(&self, p: Point) -> f32 {
        self.cell(p).map_or(f32::INFINITY, NavCell::cost)
    }

    /// Whether `p` can be entered. Always `false` out of range.
    fn is_walkable(&self, p: Point) -> bool {
        self.cell(p).is_some_and(NavCell::is_walkable)
    }

    /// Append the walkable neighbors of `p` into `buf` as independent
    /// snapshots carrying [`cell_cost`](Self::cell_cost). The caller clears
    /// `buf` before calling.
    ///
    /// Cardinal neighbors come first (N, E, S, W), then diagonals (NE, SE,
    /// SW, NW). Without corner cutting a diagonal is kept only if both
    /// cardinal cells flanking the move are walkable.
    ///
    /// A negative or NaN [`cell_cost`](Self::cell_cost) trips a debug
    /// assertion and is clamped to 0 in release builds.
    fn neighbors(&self, p: Point, buf: &mut Vec<NavCell>) {
        for d in CARDINALS {
            push_neighbor(self, p + d, buf);
        }
        if !self.allow_diagonal() {
            return;
        }
        let cut_corners = self.cut_corners();
        for d in DIAGONALS {
            let n = p + d;
            if !self.is_walkable(n) {
                continue;
            }
            if !cut_corners
                && !(self.is_walkable(p.shift(d.x, 0)) && self.is_walkable(p.shift(0, d.y)))
            {
                continue;
            }
            push_neighbor(self, n, buf);
        }
    }

    /// Convenience wrapper around [`neighbors`](Self::neighbors) returning
    /// a fresh vector.
    fn neighbors_of(&self, p: Point) -> Vec<NavCell> {
        let mut buf = Vec::with_capacity(8);
        self.neighbors(p, &mut buf);
        buf
    }
}

fn push_neighbor<P: NavPolicy + ?Sized>(policy: &P, n: Point, buf: &mut Vec<NavCell>) {
    if !policy.is_walkable(n) {
        return;
    }
    if let Some(cell) = policy.cell(n) {
        let cost = policy.cell_cost(n);
        debug_assert!(cost >= 0.0, "policy cost {cost} at {n} is negative or NaN");
        // `max` maps NaN to 0 as well.
        buf.push(cell.snapshot_with_cost(cost.max(0.0)));
    }
}
