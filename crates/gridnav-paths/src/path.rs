//! The [`Path`] result type.

use gridnav_core::Point;

use crate::smoothing;

/// An ordered list of waypoints plus the cost of traversing them.
///
/// Paths produced by a search run from start to goal. A single waypoint
/// means the start already was the goal; an empty path is the cleared state.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    points: Vec<Point>,
    total_cost: f32,
}

impl Path {
    /// An empty path with zero cost.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty path with room for `n` waypoints.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            points: Vec::with_capacity(n),
            total_cost: 0.0,
        }
    }

    /// Add a waypoint at the end.
    #[inline]
    pub fn append(&mut self, p: Point) {
        self.points.push(p);
    }

    /// Add a waypoint at the front. O(n).
    pub fn prepend(&mut self, p: Point) {
        self.points.insert(0, p);
    }

    /// The waypoint at index `i`.
    #[inline]
    pub fn point(&self, i: usize) -> Option<Point> {
        self.points.get(i).copied()
    }

    #[inline]
    pub fn start(&self) -> Option<Point> {
        self.points.first().copied()
    }

    #[inline]
    pub fn end(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// Number of waypoints.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Reverse the waypoint order in place. The cost is unchanged.
    pub fn reverse(&mut self) {
        self.points.reverse();
    }

    /// Drop every waypoint and reset the cost to zero.
    pub fn clear(&mut self) {
        self.points.clear();
        self.total_cost = 0.0;
    }

    #[inline]
    pub fn total_cost(&self) -> f32 {
        self.total_cost
    }

    #[inline]
    pub fn set_total_cost(&mut self, cost: f32) {
        self.total_cost = cost;
    }

    /// The waypoints as a slice.
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Consume the path, keeping only its waypoints.
    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    /// Iterate over the waypoints in order.
    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, Point>> {
        self.points.iter().copied()
    }

    /// Call `f` with the index and position of every waypoint, in order.
    pub fn for_each(&self, mut f: impl FnMut(usize, Point)) {
        for (i, &p) in self.points.iter().enumerate() {
            f(i, p);
        }
    }

    /// Collapse runs of waypoints that keep the same step direction down to
    /// their turning points. Endpoints and cost are preserved.
    pub fn simplify(&mut self) {
        self.points = smoothing::simplify(&self.points);
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = Point;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, Point>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl From<Vec<Point>> for Path {
    /// Wrap raw waypoints; the cost starts at zero.
    fn from(points: Vec<Point>) -> Self {
        Self {
            points,
            total_cost: 0.0,
        }
    }
}
