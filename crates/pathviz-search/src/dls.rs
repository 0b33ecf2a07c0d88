//! Depth-limited search and iterative deepening on top of it.

use pathviz_core::{CellKind, Grid, Point};

use crate::reconstruct::{Trail, reconstruct_path};
use crate::space::Endpoints;
use crate::visualizer::Visualizer;

/// How a depth-limited run ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DepthOutcome {
    /// The goal was reached within the limit; the path is marked.
    Found,
    /// The goal was not reached, but some cells lay beyond the limit.
    Cutoff,
    /// Everything reachable was explored without finding the goal, or an
    /// endpoint was missing.
    Exhausted,
    /// The visualizer asked to stop.
    Cancelled,
}

impl DepthOutcome {
    #[inline]
    pub fn is_found(self) -> bool {
        self == Self::Found
    }
}

/// Depth-limited search: depth-first, never stepping more than `limit`
/// edges away from the start.
pub fn dls<V: Visualizer + ?Sized>(
    vis: &mut V,
    grid: &mut Grid,
    start: Option<Point>,
    end: Option<Point>,
    limit: usize,
) -> bool {
    depth_limited(vis, grid, start, end, limit).is_found()
}

/// Depth-limited search reporting why it stopped.
///
/// The stack holds `(cell, depth)` pairs and a neighbour is pushed only
/// while the current depth is below `limit`. A cell is pushed again only
/// when reached at a strictly smaller depth than before, so a deep first
/// visit never hides a shorter route that fits within the limit.
pub fn depth_limited<V: Visualizer + ?Sized>(
    vis: &mut V,
    grid: &mut Grid,
    start: Option<Point>,
    end: Option<Point>,
    limit: usize,
) -> DepthOutcome {
    let Some(ends) = Endpoints::resolve(grid, start, end) else {
        log::debug!("dls: missing or out-of-range endpoint");
        return DepthOutcome::Exhausted;
    };

    let mut depth = vec![usize::MAX; grid.len()];
    depth[ends.start] = 0;
    let mut trail = Trail::new(grid.len());
    let mut stack: Vec<(usize, usize)> = vec![(ends.start, 0)];
    let mut cutoff = false;

    let mut nbuf: Vec<Point> = Vec::with_capacity(4);
    let mut expanded = 0usize;

    loop {
        if vis.is_done() {
            log::debug!("dls({limit}): cancelled after {expanded} expansions");
            return DepthOutcome::Cancelled;
        }
        let Some((ci, d)) = stack.pop() else {
            break;
        };
        // Superseded by a shallower push of the same cell.
        if d > depth[ci] {
            continue;
        }

        if ci == ends.goal {
            reconstruct_path(&trail, ends.goal, grid, vis);
            log::debug!("dls({limit}): found path of {d} edges after {expanded} expansions");
            return DepthOutcome::Found;
        }

        let cp = grid.point(ci);
        nbuf.clear();
        nbuf.extend(grid.neighbors(cp));

        for &np in nbuf.iter() {
            let Some(ni) = grid.idx(np) else {
                continue;
            };
            if d >= limit {
                cutoff |= depth[ni] == usize::MAX;
                continue;
            }
            if d + 1 >= depth[ni] {
                continue;
            }
            let rediscovered = depth[ni] != usize::MAX;
            depth[ni] = d + 1;
            trail.link(ni, ci);
            stack.push((ni, d + 1));
            if !rediscovered {
                ends.mark(grid, ni, CellKind::Open);
            }
        }

        vis.draw(grid);
        ends.mark(grid, ci, CellKind::Closed);
        expanded += 1;
    }

    log::debug!(
        "dls({limit}): {} after {expanded} expansions",
        if cutoff { "cut off" } else { "exhausted" }
    );
    if cutoff {
        DepthOutcome::Cutoff
    } else {
        DepthOutcome::Exhausted
    }
}

/// Iterative deepening search.
pub fn ids<V: Visualizer + ?Sized>(
    vis: &mut V,
    grid: &mut Grid,
    start: Option<Point>,
    end: Option<Point>,
) -> bool {
    iterative_deepening(vis, grid, start, end).is_some()
}

/// Iterative deepening search returning the depth limit that succeeded.
///
/// Runs [`depth_limited`] with limits 0, 1, 2, … up to `rows * cols`,
/// clearing every search mark before each attempt. Stops early when an
/// attempt was exhausted without any cutoff, since a larger limit could not
/// reach anything new.
pub fn iterative_deepening<V: Visualizer + ?Sized>(
    vis: &mut V,
    grid: &mut Grid,
    start: Option<Point>,
    end: Option<Point>,
) -> Option<usize> {
    Endpoints::resolve(grid, start, end)?;

    let max_depth = grid.len();
    for limit in 0..=max_depth {
        grid.clear_marks();
        log::debug!("ids: trying depth {limit}");
        match depth_limited(vis, grid, start, end, limit) {
            DepthOutcome::Found => return Some(limit),
            DepthOutcome::Cutoff => {}
            DepthOutcome::Exhausted | DepthOutcome::Cancelled => return None,
        }
    }
    log::debug!("ids: depth bound {max_depth} exhausted");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathviz_core::Context;

    use crate::bfs;
    use crate::distance::manhattan;
    use crate::visualizer::{Headless, Watched};

    #[test]
    fn limit_shorter_than_path_is_cut_off() {
        let mut g = Grid::new(5, 5).unwrap();
        let (s, e) = (Some(Point::at(0, 0)), Some(Point::at(4, 4)));
        assert_eq!(depth_limited(&mut Headless, &mut g, s, e, 7), DepthOutcome::Cutoff);
        assert_eq!(g.count(CellKind::Path), 0);
        g.clear_marks();
        assert!(dls(&mut Headless, &mut g, s, e, 8));
        assert_eq!(g.count(CellKind::Path) + 1, 8);
    }

    #[test]
    fn never_marks_beyond_the_limit() {
        let mut g = Grid::new(9, 9).unwrap();
        let start = Point::at(4, 4);
        let limit = 3;
        assert!(!dls(&mut Headless, &mut g, Some(start), Some(Point::at(0, 0)), limit));
        for cell in g.cells() {
            if cell.kind != CellKind::Empty {
                assert!(manhattan(cell.pos(), start) <= limit as f64, "{} marked", cell.pos());
            }
        }
        assert!(g.count(CellKind::Open) + g.count(CellKind::Closed) > 0);
    }

    #[test]
    fn shallower_route_is_not_hidden_by_deep_first_visit() {
        // Depth-first order walks the long way round the pillar first and
        // reaches the cell left of the goal at depth 6, right at the limit.
        let map = ".S.#\n.#.E\n...#";
        let mut g: Grid = map.parse().unwrap();
        let (s, e) = (g.start(), g.end());
        assert!(dls(&mut Headless, &mut g, s, e, 6));
        assert_eq!(g.count(CellKind::Path) + 1, 3);
    }

    #[test]
    fn small_region_is_exhausted() {
        let mut g: Grid = "S.#.\n..#E".parse().unwrap();
        let (s, e) = (g.start(), g.end());
        assert_eq!(depth_limited(&mut Headless, &mut g, s, e, 10), DepthOutcome::Exhausted);
        assert_eq!(depth_limited(&mut Headless, &mut g, None, e, 10), DepthOutcome::Exhausted);
    }

    #[test]
    fn ids_first_succeeds_at_bfs_length() {
        let map = "S.#....\n..#.##.\n..#..#.\n.....#E";
        let mut a: Grid = map.parse().unwrap();
        let mut b: Grid = map.parse().unwrap();
        let (s, e) = (a.start(), a.end());
        assert!(bfs(&mut Headless, &mut b, s, e));
        let bfs_len = b.count(CellKind::Path) + 1;

        assert_eq!(iterative_deepening(&mut Headless, &mut a, s, e), Some(bfs_len));
        assert_eq!(a.count(CellKind::Path) + 1, bfs_len);
    }

    #[test]
    fn ids_clears_marks_between_depths() {
        let mut g: Grid = "S...E".parse().unwrap();
        let (s, e) = (g.start(), g.end());
        let mut first_frames = Vec::new();
        assert!(ids(
            &mut |g: &Grid| first_frames.push(g.to_string()),
            &mut g,
            s,
            e
        ));
        // Depth 0 expands only the start; depth 1 starts again from a clean grid.
        assert_eq!(first_frames[0], "S...E\n");
        assert_eq!(first_frames[1], "So..E\n");
        assert_eq!(g.to_string(), "S***E\n");
    }

    #[test]
    fn ids_gives_up_on_enclosed_goal() {
        let mut g: Grid = "S...\n..#.\n.#E#\n..#.".parse().unwrap();
        let (s, e) = (g.start(), g.end());
        let mut fresh = 0;
        assert_eq!(
            iterative_deepening(
                &mut |g: &Grid| {
                    if g.count(CellKind::Closed) == 0 {
                        fresh += 1;
                    }
                },
                &mut g,
                s,
                e
            ),
            None
        );
        // Every depth starts with at least one frame free of closed cells;
        // running all 16 depths would show at least 16 of them.
        assert!(fresh < 16);
    }

    #[test]
    fn ids_stops_when_cancelled() {
        let mut g = Grid::new(6, 6).unwrap();
        let ctx = Context::new();
        let quit = ctx.clone();
        let mut vis = Watched::new(ctx, move |_: &Grid| quit.cancel());
        assert!(!ids(&mut vis, &mut g, Some(Point::at(0, 0)), Some(Point::at(5, 5))));
        assert!(vis.context().is_done());
    }
}
