use std::collections::hash_map::Entry;
use std::collections::{BinaryHeap, HashMap};
use std::f32::consts::SQRT_2;

use gridnav_core::{NavCell, NavPolicy, Point};

use crate::config::PathfinderConfig;
use crate::error::PathfindingError;
use crate::node::{OpenEntry, SearchNode};
use crate::path::Path;
use crate::pathfinder::Pathfinder;
use crate::smoothing::Smoothing;

impl<G: NavPolicy + ?Sized> Pathfinder<'_, G> {
    /// Compute the cheapest path from `start` to `goal` using A*.
    ///
    /// The returned path includes both endpoints, runs start to goal and
    /// carries the sum of its step costs. A diagonal step costs the
    /// destination cell's cost times √2, a cardinal step the cost itself.
    /// With [`Smoothing::Simple`] colinear waypoints are then dropped; the
    /// cost is unchanged.
    ///
    /// Preconditions are checked in order: grid present, start in bounds,
    /// goal in bounds, start walkable, goal walkable. Equal endpoints then
    /// return a single-point path of cost 0 without searching.
    pub fn find_path(&mut self, start: Point, goal: Point) -> Result<Path, PathfindingError> {
        self.last_nodes_explored = 0;

        let grid = self.grid.ok_or(PathfindingError::NoGrid)?;
        // Bounds are checked with `is_valid`, independent of `is_walkable`.
        let invalid = if !grid.is_valid(start) {
            Some(PathfindingError::InvalidStart(start))
        } else if !grid.is_valid(goal) {
            Some(PathfindingError::InvalidGoal(goal))
        } else if !grid.is_walkable(start) {
            Some(PathfindingError::InvalidStart(start))
        } else if !grid.is_walkable(goal) {
            Some(PathfindingError::InvalidGoal(goal))
        } else {
            None
        };
        if let Some(err) = invalid {
            log::debug!("find_path: {err}");
            return Err(err);
        }

        if start == goal {
            let mut path = Path::with_capacity(1);
            path.append(start);
            return Ok(path);
        }

        let (found, explored) = search(grid, &self.config, start, goal);
        self.last_nodes_explored = explored;

        let Some(mut path) = found else {
            log::debug!("find_path: no path {start} -> {goal} ({explored} nodes explored)");
            return Err(PathfindingError::NoPath { start, goal });
        };
        if self.config.smoothing == Smoothing::Simple {
            path.simplify();
        }
        log::debug!(
            "find_path: {start} -> {goal}, {} waypoints, cost {:.3}, {explored} nodes explored",
            path.len(),
            path.total_cost(),
        );
        Ok(path)
    }

    /// Whether [`find_path`](Self::find_path) would succeed for the same
    /// endpoints. Runs the full search, so the iteration cap applies and
    /// [`last_nodes_explored`](Self::last_nodes_explored) is updated.
    pub fn is_reachable(&mut self, start: Point, goal: Point) -> bool {
        self.find_path(start, goal).is_ok()
    }
}

/// Run A* between two distinct walkable cells. Returns the unsmoothed path,
/// if any, and the number of nodes expanded.
fn search<G: NavPolicy + ?Sized>(
    grid: &G,
    config: &PathfinderConfig,
    start: Point,
    goal: Point,
) -> (Option<Path>, u32) {
    let heuristic = &config.heuristic;
    let mut nodes: HashMap<Point, SearchNode> = HashMap::new();
    let mut open: BinaryHeap<OpenEntry> = BinaryHeap::new();
    let mut seq: u64 = 0;

    let start_node = SearchNode::new(0.0, heuristic.estimate(start, goal), None, seq);
    open.push(OpenEntry {
        pos: start,
        f: start_node.f,
        seq,
    });
    nodes.insert(start, start_node);

    let mut explored: u32 = 0;
    let mut nbuf: Vec<NavCell> = Vec::with_capacity(8);

    while let Some(current) = open.pop() {
        let Some(node) = nodes.get_mut(&current.pos) else {
            continue;
        };
        // Skip superseded and already expanded entries.
        if node.closed || node.seq != current.seq {
            continue;
        }
        node.closed = true;
        let current_g = node.g;
        explored = explored.saturating_add(1);

        if current.pos == goal {
            return (Some(reconstruct(&nodes, goal, current_g)), explored);
        }
        if config.max_iterations > 0 && explored > config.max_iterations {
            log::trace!(
                "search: iteration cap {} hit at {}",
                config.max_iterations,
                current.pos
            );
            break;
        }

        nbuf.clear();
        grid.neighbors(current.pos, &mut nbuf);

        for cell in &nbuf {
            let np = cell.pos();
            let edge = if current.pos.is_diagonal_to(np) {
                cell.cost() * SQRT_2
            } else {
                cell.cost()
            };
            let tentative_g = current_g + edge;

            match nodes.entry(np) {
                Entry::Vacant(slot) => {
                    seq += 1;
                    let h = heuristic.estimate(np, goal);
                    let n = slot.insert(SearchNode::new(tentative_g, h, Some(current.pos), seq));
                    open.push(OpenEntry { pos: np, f: n.f, seq });
                }
                Entry::Occupied(mut slot) => {
                    let n = slot.get_mut();
                    if n.closed || tentative_g >= n.g {
                        continue;
                    }
                    seq += 1;
                    n.relax(tentative_g, current.pos, seq);
                    open.push(OpenEntry { pos: np, f: n.f, seq });
                }
            }
        }
    }

    (None, explored)
}

fn reconstruct(nodes: &HashMap<Point, SearchNode>, goal: Point, cost: f32) -> Path {
    let mut path = Path::new();
    let mut cur = Some(goal);
    while let Some(p) = cur {
        path.append(p);
        cur = nodes.get(&p).and_then(|n| n.parent);
    }
    path.reverse();
    path.set_total_cost(cost);
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristic::Heuristic;
    use gridnav_core::NavGrid;

    const EPS: f32 = 1e-4;

    fn open_grid(w: i32, h: i32, diagonal: bool, cut: bool) -> NavGrid {
        let mut g = NavGrid::new(w, h).unwrap();
        g.set_allow_diagonal(diagonal);
        g.set_cut_corners(cut);
        g
    }

    fn octile_config() -> PathfinderConfig {
        PathfinderConfig::default().with_heuristic(Heuristic::Octile)
    }

    fn is_adjacent(a: Point, b: Point) -> bool {
        let d = b - a;
        d != Point::ZERO && d.x.abs() <= 1 && d.y.abs() <= 1
    }

    #[test]
    fn open_grid_pure_diagonal() {
        let g = open_grid(5, 5, true, true);
        let mut pf = Pathfinder::with_config(&g, octile_config());
        let path = pf.find_path(Point::new(0, 0), Point::new(4, 4)).unwrap();
        assert_eq!(path.len(), 5);
        assert_eq!(path.start(), Some(Point::new(0, 0)));
        assert_eq!(path.end(), Some(Point::new(4, 4)));
        assert!((path.total_cost() - 4.0 * SQRT_2).abs() < EPS);
        assert!(pf.last_nodes_explored() >= 5);
    }

    #[test]
    fn blocked_center_forces_cardinal_detour() {
        let mut g = open_grid(5, 5, true, false);
        g.set_blocked(Point::new(2, 2), true).unwrap();
        let mut pf = Pathfinder::with_config(&g, octile_config());
        let path = pf.find_path(Point::new(0, 0), Point::new(4, 4)).unwrap();
        assert!(path.total_cost() > 4.0 * SQRT_2 + EPS);
        assert!((path.total_cost() - (4.0 + 2.0 * SQRT_2)).abs() < EPS);
        assert!(!path.points().contains(&Point::new(2, 2)));
        assert!(path.points().windows(2).all(|w| is_adjacent(w[0], w[1])));
    }

    #[test]
    fn cardinal_only_by_default() {
        let g = NavGrid::new(4, 4).unwrap();
        let mut pf = Pathfinder::new(&g);
        let path = pf.find_path(Point::new(0, 0), Point::new(3, 3)).unwrap();
        assert_eq!(path.len(), 7);
        assert_eq!(path.total_cost(), 6.0);
        assert!(
            path.points()
                .windows(2)
                .all(|w| !w[0].is_diagonal_to(w[1]))
        );
    }

    #[test]
    fn corner_gap_needs_cutting() {
        let mut g = NavGrid::from_ascii(".#\n#.").unwrap();
        g.set_allow_diagonal(true);
        let start = Point::new(0, 0);
        let goal = Point::new(1, 1);
        assert_eq!(
            Pathfinder::new(&g).find_path(start, goal),
            Err(PathfindingError::NoPath { start, goal })
        );

        g.set_cut_corners(true);
        let path = Pathfinder::new(&g).find_path(start, goal).unwrap();
        assert_eq!(path.points(), &[start, goal]);
        assert!((path.total_cost() - SQRT_2).abs() < EPS);
    }

    #[test]
    fn costs_steer_the_route() {
        let g = NavGrid::from_ascii(
            "\
.9.
.9.
...",
        )
        .unwrap();
        let mut pf = Pathfinder::new(&g);
        let path = pf.find_path(Point::new(0, 0), Point::new(2, 0)).unwrap();
        assert_eq!(path.total_cost(), 6.0);
        assert!(path.points().contains(&Point::new(1, 2)));
    }

    #[test]
    fn precondition_errors() {
        let mut g = NavGrid::new(3, 3).unwrap();
        g.set_blocked(Point::new(1, 1), true).unwrap();

        let mut pf: Pathfinder<'_> = Pathfinder::unbound();
        assert_eq!(
            pf.find_path(Point::new(0, 0), Point::new(2, 2)),
            Err(PathfindingError::NoGrid)
        );

        pf.set_grid(Some(&g));
        let bad = Point::new(-1, 0);
        assert_eq!(
            pf.find_path(bad, Point::new(2, 2)),
            Err(PathfindingError::InvalidStart(bad))
        );
        assert_eq!(
            pf.find_path(Point::new(1, 1), Point::new(2, 2)),
            Err(PathfindingError::InvalidStart(Point::new(1, 1)))
        );
        assert_eq!(
            pf.find_path(Point::new(0, 0), Point::new(3, 0)),
            Err(PathfindingError::InvalidGoal(Point::new(3, 0)))
        );
        assert_eq!(
            pf.find_path(Point::new(0, 0), Point::new(1, 1)),
            Err(PathfindingError::InvalidGoal(Point::new(1, 1)))
        );
        // Bounds of both endpoints come before walkability.
        assert_eq!(
            pf.find_path(Point::new(1, 1), Point::new(9, 9)),
            Err(PathfindingError::InvalidGoal(Point::new(9, 9)))
        );
        assert_eq!(
            pf.find_path(Point::new(9, 9), Point::new(1, 1)),
            Err(PathfindingError::InvalidStart(Point::new(9, 9)))
        );
        assert_eq!(
            pf.find_path(Point::new(1, 1), Point::new(1, 1)),
            Err(PathfindingError::InvalidStart(Point::new(1, 1)))
        );
        assert_eq!(pf.last_nodes_explored(), 0);
    }

    #[test]
    fn start_equals_goal() {
        let g = NavGrid::new(3, 3).unwrap();
        let mut pf = Pathfinder::new(&g);
        let p = Point::new(1, 2);
        let path = pf.find_path(p, p).unwrap();
        assert_eq!(path.points(), &[p]);
        assert_eq!(path.total_cost(), 0.0);
        assert_eq!(pf.last_nodes_explored(), 0);
    }

    #[test]
    fn walled_off_goal_is_no_path() {
        let g = NavGrid::from_ascii(
            "\
..#.
..#.
..#.",
        )
        .unwrap();
        let mut pf = Pathfinder::new(&g);
        let (start, goal) = (Point::new(0, 0), Point::new(3, 2));
        assert_eq!(
            pf.find_path(start, goal),
            Err(PathfindingError::NoPath { start, goal })
        );
        // Every cell on the start side was expanded.
        assert_eq!(pf.last_nodes_explored(), 6);
        assert!(!pf.is_reachable(start, goal));
        assert!(pf.is_reachable(start, Point::new(1, 2)));
    }

    #[test]
    fn iteration_cap() {
        let g = NavGrid::new(10, 1).unwrap();
        let (start, goal) = (Point::new(0, 0), Point::new(9, 0));
        let mut pf = Pathfinder::new(&g);

        pf.set_max_iterations(3);
        assert_eq!(
            pf.find_path(start, goal),
            Err(PathfindingError::NoPath { start, goal })
        );
        assert_eq!(pf.last_nodes_explored(), 4);
        assert!(!pf.is_reachable(start, goal));

        // The goal check comes before the cap check.
        pf.set_max_iterations(9);
        let path = pf.find_path(start, goal).unwrap();
        assert_eq!(path.len(), 10);
        assert_eq!(pf.last_nodes_explored(), 10);

        pf.set_max_iterations(0);
        assert!(pf.is_reachable(start, goal));
    }

    #[test]
    fn counter_resets_on_early_failure() {
        let g = NavGrid::new(5, 5).unwrap();
        let mut pf = Pathfinder::new(&g);
        pf.find_path(Point::new(0, 0), Point::new(4, 4)).unwrap();
        assert!(pf.last_nodes_explored() > 0);
        assert!(pf.find_path(Point::new(0, 0), Point::new(5, 5)).is_err());
        assert_eq!(pf.last_nodes_explored(), 0);
    }

    #[test]
    fn repeated_calls_are_deterministic() {
        let mut g = NavGrid::from_ascii(
            "\
......
.##.#.
....#.
.#....",
        )
        .unwrap();
        g.set_allow_diagonal(true);
        let mut pf = Pathfinder::new(&g);
        let first = pf.find_path(Point::new(0, 0), Point::new(5, 3)).unwrap();
        let explored = pf.last_nodes_explored();
        for _ in 0..5 {
            assert_eq!(pf.find_path(Point::new(0, 0), Point::new(5, 3)).unwrap(), first);
            assert_eq!(pf.last_nodes_explored(), explored);
        }
    }

    #[test]
    fn simple_smoothing() {
        let g = open_grid(5, 5, true, true);
        let mut pf = Pathfinder::with_config(&g, octile_config());
        pf.set_smoothing(Smoothing::Simple);
        let path = pf.find_path(Point::new(0, 0), Point::new(4, 4)).unwrap();
        assert_eq!(path.points(), &[Point::new(0, 0), Point::new(4, 4)]);
        assert!((path.total_cost() - 4.0 * SQRT_2).abs() < EPS);
        assert!((pf.path_cost(&path).unwrap() - path.total_cost()).abs() < EPS);
    }

    #[test]
    fn smoothing_keeps_turns() {
        let g = NavGrid::from_ascii(
            "\
...
##.
...",
        )
        .unwrap();
        let mut pf = Pathfinder::new(&g);
        let raw = pf.find_path(Point::new(0, 0), Point::new(0, 2)).unwrap();
        pf.set_smoothing(Smoothing::Simple);
        let smooth = pf.find_path(Point::new(0, 0), Point::new(0, 2)).unwrap();
        assert_eq!(raw.len(), 7);
        assert_eq!(
            smooth.points(),
            &[
                Point::new(0, 0),
                Point::new(2, 0),
                Point::new(2, 2),
                Point::new(0, 2)
            ]
        );
        assert_eq!(smooth.total_cost(), raw.total_cost());
    }

    #[test]
    fn zero_heuristic_matches_octile_cost() {
        let mut g = NavGrid::from_ascii(
            "\
.....
.###.
.2...
...#.",
        )
        .unwrap();
        g.set_allow_diagonal(true);
        let (start, goal) = (Point::new(0, 0), Point::new(4, 3));

        let mut dijkstra = Pathfinder::new(&g);
        dijkstra.set_heuristic(Heuristic::custom(|_, _| 0.0));
        let reference = dijkstra.find_path(start, goal).unwrap();

        let mut astar = Pathfinder::with_config(&g, octile_config());
        let path = astar.find_path(start, goal).unwrap();
        assert!((path.total_cost() - reference.total_cost()).abs() < EPS);
    }

    #[test]
    fn total_cost_is_sum_of_steps() {
        let mut g = NavGrid::from_ascii(
            "\
.3..
..2.
1...",
        )
        .unwrap();
        g.set_allow_diagonal(true);
        let mut pf = Pathfinder::with_config(&g, octile_config());
        let path = pf.find_path(Point::new(0, 2), Point::new(3, 0)).unwrap();
        let summed: f32 = path
            .points()
            .windows(2)
            .map(|w| crate::step_cost(&g, w[0], w[1]))
            .sum();
        assert!((path.total_cost() - summed).abs() < EPS);
    }

    /// Treats one column as a wall without touching the grid.
    struct WallColumn<'a> {
        base: &'a NavGrid,
        x: i32,
    }

    impl NavPolicy for WallColumn<'_> {
        fn dimensions(&self) -> Point {
            self.base.size()
        }
        fn cell(&self, p: Point) -> Option<&NavCell> {
            self.base.cell(p)
        }
        fn allow_diagonal(&self) -> bool {
            self.base.allow_diagonal()
        }
        fn cut_corners(&self) -> bool {
            self.base.cut_corners()
        }
        fn is_walkable(&self, p: Point) -> bool {
            p.x != self.x && self.base.is_walkable(p)
        }
    }

    #[test]
    fn search_respects_policy_decorator() {
        let g = NavGrid::new(3, 3).unwrap();
        let wall = WallColumn { base: &g, x: 1 };
        let mut pf = Pathfinder::new(&wall);
        let (start, goal) = (Point::new(0, 0), Point::new(2, 0));
        assert_eq!(
            pf.find_path(start, goal),
            Err(PathfindingError::NoPath { start, goal })
        );
        assert_eq!(
            pf.find_path(start, Point::new(1, 1)),
            Err(PathfindingError::InvalidGoal(Point::new(1, 1)))
        );
        assert!(Pathfinder::new(&g).is_reachable(start, goal));
    }

    /// Reports every coordinate as walkable, in range or not.
    struct Permissive<'a>(&'a NavGrid);

    impl NavPolicy for Permissive<'_> {
        fn dimensions(&self) -> Point {
            self.0.size()
        }
        fn cell(&self, p: Point) -> Option<&NavCell> {
            self.0.cell(p)
        }
        fn allow_diagonal(&self) -> bool {
            false
        }
        fn cut_corners(&self) -> bool {
            false
        }
        fn is_walkable(&self, _: Point) -> bool {
            true
        }
    }

    #[test]
    fn out_of_range_endpoints_rejected_under_lenient_policy() {
        let g = NavGrid::new(3, 3).unwrap();
        let lenient = Permissive(&g);
        let mut pf = Pathfinder::new(&lenient);
        let far = Point::new(-5, -5);
        assert_eq!(pf.find_path(far, far), Err(PathfindingError::InvalidStart(far)));
        assert_eq!(
            pf.find_path(Point::new(0, 0), Point::new(3, 1)),
            Err(PathfindingError::InvalidGoal(Point::new(3, 1)))
        );
        assert!(pf.is_reachable(Point::new(0, 0), Point::new(2, 2)));
    }

    #[test]
    fn dyn_policy() {
        let g = NavGrid::new(3, 1).unwrap();
        let policy: &dyn NavPolicy = &g;
        let mut pf = Pathfinder::new(policy);
        assert_eq!(
            pf.find_path(Point::new(0, 0), Point::new(2, 0))
                .unwrap()
                .total_cost(),
            2.0
        );
    }
}
