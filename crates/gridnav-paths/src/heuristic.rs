//! Distance estimates used to guide A*.

use std::f32::consts::SQRT_2;
use std::fmt;
use std::sync::Arc;

use gridnav_core::Point;

#[inline]
fn deltas(a: Point, b: Point) -> (f32, f32) {
    ((a.x - b.x).abs() as f32, (a.y - b.y).abs() as f32)
}

/// Manhattan (L1) distance. Admissible for 4-directional movement only.
#[inline]
pub fn manhattan(a: Point, b: Point) -> f32 {
    let (dx, dy) = deltas(a, b);
    dx + dy
}

/// Euclidean (L2) distance.
#[inline]
pub fn euclidean(a: Point, b: Point) -> f32 {
    let (dx, dy) = deltas(a, b);
    (dx * dx + dy * dy).sqrt()
}

/// Chebyshev (L∞) distance. Exact for 8-directional movement where a diagonal
/// step costs the same as a cardinal one.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> f32 {
    let (dx, dy) = deltas(a, b);
    dx.max(dy)
}

/// Octile distance: cardinal steps cost 1, diagonal steps √2. Exact on an
/// open uniform-cost grid with 8-directional movement.
#[inline]
pub fn octile(a: Point, b: Point) -> f32 {
    let (dx, dy) = deltas(a, b);
    dx.max(dy) + (SQRT_2 - 1.0) * dx.min(dy)
}

/// Boxed user-supplied estimate.
pub type HeuristicFn = Arc<dyn Fn(Point, Point) -> f32 + Send + Sync>;

/// The remaining-cost estimate used by the search.
///
/// A* returns optimal paths only while the estimate never exceeds the true
/// remaining cost. That is not checked: [`Manhattan`](Self::Manhattan), the
/// default, overestimates once diagonal moves are enabled, and a custom
/// closure is trusted as given. Cell costs below 1.0 make every built-in
/// estimate inadmissible.
#[derive(Clone, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Heuristic {
    #[default]
    Manhattan,
    Euclidean,
    Chebyshev,
    Octile,
    /// Caller-provided estimate. Not serializable.
    #[cfg_attr(feature = "serde", serde(skip))]
    Custom(HeuristicFn),
}

impl Heuristic {
    /// Wrap a closure as a custom heuristic.
    pub fn custom(f: impl Fn(Point, Point) -> f32 + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(f))
    }

    /// Estimated cost from `from` to `to`.
    #[inline]
    pub fn estimate(&self, from: Point, to: Point) -> f32 {
        match self {
            Self::Manhattan => manhattan(from, to),
            Self::Euclidean => euclidean(from, to),
            Self::Chebyshev => chebyshev(from, to),
            Self::Octile => octile(from, to),
            Self::Custom(f) => f(from, to),
        }
    }
}

impl fmt::Debug for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Manhattan => write!(f, "Manhattan"),
            Self::Euclidean => write!(f, "Euclidean"),
            Self::Chebyshev => write!(f, "Chebyshev"),
            Self::Octile => write!(f, "Octile"),
            Self::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

impl PartialEq for Heuristic {
    /// Built-ins compare by kind; custom heuristics only equal clones of
    /// themselves.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Custom(a), Self::Custom(b)) => Arc::ptr_eq(a, b),
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}
