//! Post-search path simplification.

use gridnav_core::Point;

/// How a found path is post-processed before being returned.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Smoothing {
    /// Return every step of the search.
    #[default]
    None,
    /// Keep only the endpoints and the waypoints where the direction changes.
    Simple,
}

/// Drop every interior waypoint whose incoming and outgoing steps have the
/// same (dx, dy). The first and last waypoints are always kept.
///
/// This only removes redundant colinear waypoints; the route itself is
/// unchanged (no line-of-sight shortcuts).
pub(crate) fn simplify(points: &[Point]) -> Vec<Point> {
    let [first, .., last] = points else {
        return points.to_vec();
    };
    let mut out = Vec::with_capacity(points.len());
    out.push(*first);
    for w in points.windows(3) {
        if w[1] - w[0] != w[2] - w[1] {
            out.push(w[1]);
        }
    }
    out.push(*last);
    out
}
