use pathviz_core::{CellKind, Grid, Point};

use crate::reconstruct::{Trail, reconstruct_path};
use crate::space::{Endpoints, OpenList, UNREACHABLE};
use crate::visualizer::Visualizer;

/// Uniform-cost search.
///
/// Expands cells in order of accumulated cost `g`; equal costs are expanded
/// in insertion order. With every step costing 1 it visits cells in the
/// same order as [`bfs`](crate::bfs) and finds a path with the fewest edges.
pub fn ucs<V: Visualizer + ?Sized>(
    vis: &mut V,
    grid: &mut Grid,
    start: Option<Point>,
    end: Option<Point>,
) -> bool {
    let Some(ends) = Endpoints::resolve(grid, start, end) else {
        log::debug!("ucs: missing or out-of-range endpoint");
        return false;
    };

    let mut g_score = vec![UNREACHABLE; grid.len()];
    g_score[ends.start] = 0;
    let mut closed = vec![false; grid.len()];
    let mut trail = Trail::new(grid.len());
    let mut open = OpenList::new();
    open.push(ends.start, 0.0);

    let mut nbuf: Vec<Point> = Vec::with_capacity(4);
    let mut expanded = 0usize;

    loop {
        if vis.is_done() {
            log::debug!("ucs: cancelled after {expanded} expansions");
            return false;
        }
        let Some(current) = open.pop() else {
            break;
        };
        let ci = current.idx;

        // Skip entries superseded by a cheaper insertion.
        if closed[ci] {
            continue;
        }

        if ci == ends.goal {
            reconstruct_path(&trail, ends.goal, grid, vis);
            log::debug!(
                "ucs: found path of cost {} after {expanded} expansions",
                g_score[ci]
            );
            return true;
        }

        closed[ci] = true;
        let current_g = g_score[ci];
        let cp = grid.point(ci);
        nbuf.clear();
        nbuf.extend(grid.neighbors(cp));

        for &np in nbuf.iter() {
            let Some(ni) = grid.idx(np) else {
                continue;
            };
            if closed[ni] {
                continue;
            }
            let tentative = current_g + 1;
            if tentative >= g_score[ni] {
                continue;
            }
            g_score[ni] = tentative;
            trail.link(ni, ci);
            open.push(ni, tentative as f64);
            ends.mark(grid, ni, CellKind::Open);
        }

        vis.draw(grid);
        ends.mark(grid, ci, CellKind::Closed);
        expanded += 1;
    }

    log::debug!("ucs: frontier exhausted after {expanded} expansions");
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bfs;
    use crate::visualizer::Headless;

    #[test]
    fn open_grid_cost_is_manhattan() {
        let mut g = Grid::new(5, 5).unwrap();
        assert!(ucs(&mut Headless, &mut g, Some(Point::at(0, 0)), Some(Point::at(4, 4))));
        assert_eq!(g.count(CellKind::Path) + 1, 8);
    }

    #[test]
    fn ucs_expands_like_bfs_on_unit_costs() {
        let map = "S...\n.##.\n...E";
        let mut a: Grid = map.parse().unwrap();
        let mut b: Grid = map.parse().unwrap();
        let (s, e) = (a.start(), a.end());

        let mut bfs_frames = Vec::new();
        let mut ucs_frames = Vec::new();
        assert!(bfs(&mut |g: &Grid| bfs_frames.push(g.to_string()), &mut a, s, e));
        assert!(ucs(&mut |g: &Grid| ucs_frames.push(g.to_string()), &mut b, s, e));
        assert_eq!(bfs_frames, ucs_frames);
        assert_eq!(a, b);
    }

    #[test]
    fn unreachable_goal_fails() {
        let mut g: Grid = "S#.\n##.\n..E".parse().unwrap();
        let (s, e) = (g.start(), g.end());
        assert!(!ucs(&mut Headless, &mut g, s, e));
        assert_eq!(g.count(CellKind::Path), 0);
    }
}
