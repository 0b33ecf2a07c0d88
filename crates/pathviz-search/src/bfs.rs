//! Breadth-first and depth-first search.
//!
//! Both share one loop and differ only in the frontier: a FIFO queue for
//! BFS, a LIFO stack for DFS. Cells are marked visited when they enter the
//! frontier, so each one is queued at most once per run.

use std::collections::VecDeque;

use pathviz_core::{CellKind, Grid, Point};

use crate::reconstruct::{Trail, reconstruct_path};
use crate::space::Endpoints;
use crate::visualizer::Visualizer;

/// Frontier discipline for the uninformed searches.
trait Fringe: Default {
    fn put(&mut self, idx: usize);
    fn take(&mut self) -> Option<usize>;
}

impl Fringe for VecDeque<usize> {
    #[inline]
    fn put(&mut self, idx: usize) {
        self.push_back(idx);
    }

    #[inline]
    fn take(&mut self) -> Option<usize> {
        self.pop_front()
    }
}

impl Fringe for Vec<usize> {
    #[inline]
    fn put(&mut self, idx: usize) {
        self.push(idx);
    }

    #[inline]
    fn take(&mut self) -> Option<usize> {
        self.pop()
    }
}

/// Breadth-first search.
///
/// Finds a path with the fewest edges when one exists.
pub fn bfs<V: Visualizer + ?Sized>(
    vis: &mut V,
    grid: &mut Grid,
    start: Option<Point>,
    end: Option<Point>,
) -> bool {
    blind::<VecDeque<usize>, V>("bfs", vis, grid, start, end)
}

/// Depth-first search.
///
/// Finds a path when one exists, but not necessarily a short one.
pub fn dfs<V: Visualizer + ?Sized>(
    vis: &mut V,
    grid: &mut Grid,
    start: Option<Point>,
    end: Option<Point>,
) -> bool {
    blind::<Vec<usize>, V>("dfs", vis, grid, start, end)
}

fn blind<Q: Fringe, V: Visualizer + ?Sized>(
    name: &str,
    vis: &mut V,
    grid: &mut Grid,
    start: Option<Point>,
    end: Option<Point>,
) -> bool {
    let Some(ends) = Endpoints::resolve(grid, start, end) else {
        log::debug!("{name}: missing or out-of-range endpoint");
        return false;
    };

    let mut frontier = Q::default();
    frontier.put(ends.start);
    let mut seen = vec![false; grid.len()];
    seen[ends.start] = true;
    let mut trail = Trail::new(grid.len());
    let mut nbuf: Vec<Point> = Vec::with_capacity(4);
    let mut expanded = 0usize;

    loop {
        if vis.is_done() {
            log::debug!("{name}: cancelled after {expanded} expansions");
            return false;
        }
        let Some(ci) = frontier.take() else {
            break;
        };

        if ci == ends.goal {
            let marked = reconstruct_path(&trail, ends.goal, grid, vis);
            log::debug!("{name}: found path of {} edges after {expanded} expansions", marked + 1);
            return true;
        }

        let cp = grid.point(ci);
        log::trace!("{name}: expanding {cp}");
        nbuf.clear();
        nbuf.extend(grid.neighbors(cp));

        for &np in nbuf.iter() {
            let Some(ni) = grid.idx(np) else {
                continue;
            };
            if seen[ni] {
                continue;
            }
            seen[ni] = true;
            trail.link(ni, ci);
            frontier.put(ni);
            ends.mark(grid, ni, CellKind::Open);
        }

        vis.draw(grid);
        ends.mark(grid, ci, CellKind::Closed);
        expanded += 1;
    }

    log::debug!("{name}: frontier exhausted after {expanded} expansions");
    false
}
