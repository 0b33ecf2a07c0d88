use pathviz_core::{CellKind, Grid, Point};

use crate::distance::Heuristic;
use crate::reconstruct::{Trail, reconstruct_path};
use crate::space::{Endpoints, OpenList};
use crate::visualizer::Visualizer;

/// Greedy best-first search with the Manhattan heuristic.
pub fn greedy<V: Visualizer + ?Sized>(
    vis: &mut V,
    grid: &mut Grid,
    start: Option<Point>,
    end: Option<Point>,
) -> bool {
    greedy_with(Heuristic::Manhattan, vis, grid, start, end)
}

/// Greedy best-first search.
///
/// The frontier is ordered by the heuristic estimate alone, ignoring the
/// cost already paid, and a cell is never queued twice. Usually fast, not
/// guaranteed to find a shortest path.
pub fn greedy_with<V: Visualizer + ?Sized>(
    heuristic: Heuristic,
    vis: &mut V,
    grid: &mut Grid,
    start: Option<Point>,
    end: Option<Point>,
) -> bool {
    let Some(ends) = Endpoints::resolve(grid, start, end) else {
        log::debug!("greedy: missing or out-of-range endpoint");
        return false;
    };
    let goal = grid.point(ends.goal);

    let mut seen = vec![false; grid.len()];
    seen[ends.start] = true;
    let mut trail = Trail::new(grid.len());
    let mut open = OpenList::new();
    open.push(ends.start, heuristic.estimate(grid.point(ends.start), goal));

    let mut nbuf: Vec<Point> = Vec::with_capacity(4);
    let mut expanded = 0usize;

    loop {
        if vis.is_done() {
            log::debug!("greedy: cancelled after {expanded} expansions");
            return false;
        }
        let Some(current) = open.pop() else {
            break;
        };
        let ci = current.idx;

        if ci == ends.goal {
            let marked = reconstruct_path(&trail, ends.goal, grid, vis);
            log::debug!(
                "greedy ({heuristic}): found path of {} edges after {expanded} expansions",
                marked + 1
            );
            return true;
        }

        let cp = grid.point(ci);
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
            open.push(ni, heuristic.estimate(np, goal));
            ends.mark(grid, ni, CellKind::Open);
        }

        vis.draw(grid);
        ends.mark(grid, ci, CellKind::Closed);
        expanded += 1;
    }

    log::debug!("greedy: frontier exhausted after {expanded} expansions");
    false
}
