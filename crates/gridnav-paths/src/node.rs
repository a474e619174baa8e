use std::cmp::Ordering;

use gridnav_core::Point;

// ---------------------------------------------------------------------------
// Per-search node table entry
// ---------------------------------------------------------------------------

/// Bookkeeping for one discovered cell during a single search.
#[derive(Clone, Debug)]
pub(crate) struct SearchNode {
    pub(crate) g: f32,
    pub(crate) h: f32,
    pub(crate) f: f32,
    pub(crate) parent: Option<Point>,
    pub(crate) closed: bool,
    /// Sequence number of the live open-set entry for this node. Older heap
    /// entries carry a different number and are skipped as stale.
    pub(crate) seq: u64,
}

impl SearchNode {
    pub(crate) fn new(g: f32, h: f32, parent: Option<Point>, seq: u64) -> Self {
        Self {
            g,
            h,
            f: g + h,
            parent,
            closed: false,
            seq,
        }
    }

    /// Record a cheaper route through `parent`.
    pub(crate) fn relax(&mut self, g: f32, parent: Point, seq: u64) {
        self.g = g;
        self.f = g + self.h;
        self.parent = Some(parent);
        self.seq = seq;
    }
}

// ---------------------------------------------------------------------------
// Open-set entry
// ---------------------------------------------------------------------------

/// Entry of the open set, ordered for `BinaryHeap` so that the lowest `f`
/// pops first and, among equal `f`, the earliest inserted.
#[derive(Clone, Copy, Debug)]
pub(crate) struct OpenEntry {
    pub(crate) pos: Point,
    pub(crate) f: f32,
    pub(crate) seq: u64,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed on both keys: BinaryHeap is a max-heap.
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}
