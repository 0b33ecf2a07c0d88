use pathviz_core::{CellKind, Grid, Point};

use crate::distance::Heuristic;
use crate::reconstruct::{Trail, reconstruct_path};
use crate::space::{Endpoints, OpenList, UNREACHABLE};
use crate::visualizer::Visualizer;

/// A* search with the Manhattan heuristic.
pub fn astar<V: Visualizer + ?Sized>(
    vis: &mut V,
    grid: &mut Grid,
    start: Option<Point>,
    end: Option<Point>,
) -> bool {
    astar_with(Heuristic::Manhattan, vis, grid, start, end)
}

/// A* search.
///
/// The frontier is ordered by `f = g + h`, ties broken by insertion order.
/// A pending cell reached again by a cheaper route is re-queued with its
/// improved `f`; the outdated entry is skipped when it surfaces. With an
/// admissible, consistent heuristic the path found is a shortest one.
pub fn astar_with<V: Visualizer + ?Sized>(
    heuristic: Heuristic,
    vis: &mut V,
    grid: &mut Grid,
    start: Option<Point>,
    end: Option<Point>,
) -> bool {
    search(heuristic, vis, grid, start, end).0
}

/// Counters for one A* run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Tally {
    expanded: usize,
    /// Pending cells pushed again with a cheaper `g`.
    requeued: usize,
    /// Outdated entries popped and skipped.
    stale: usize,
}

fn search<V: Visualizer + ?Sized>(
    heuristic: Heuristic,
    vis: &mut V,
    grid: &mut Grid,
    start: Option<Point>,
    end: Option<Point>,
) -> (bool, Tally) {
    let mut tally = Tally::default();
    let Some(ends) = Endpoints::resolve(grid, start, end) else {
        log::debug!("astar: missing or out-of-range endpoint");
        return (false, tally);
    };
    let goal = grid.point(ends.goal);

    let mut g_score = vec![UNREACHABLE; grid.len()];
    let mut f_score = vec![f64::INFINITY; grid.len()];
    let mut pending = vec![false; grid.len()];
    let mut closed = vec![false; grid.len()];
    let mut trail = Trail::new(grid.len());

    g_score[ends.start] = 0;
    f_score[ends.start] = heuristic.estimate(grid.point(ends.start), goal);
    pending[ends.start] = true;
    let mut open = OpenList::new();
    open.push(ends.start, f_score[ends.start]);

    let mut nbuf: Vec<Point> = Vec::with_capacity(4);

    loop {
        if vis.is_done() {
            log::debug!("astar: cancelled after {} expansions", tally.expanded);
            return (false, tally);
        }
        let Some(current) = open.pop() else {
            break;
        };
        let ci = current.idx;

        // Skip stale entries.
        if !pending[ci] || current.key > f_score[ci] {
            tally.stale += 1;
            continue;
        }
        pending[ci] = false;

        if ci == ends.goal {
            reconstruct_path(&trail, ends.goal, grid, vis);
            log::debug!(
                "astar ({heuristic}): found path of cost {} after {} expansions \
                 ({} re-queued, {} stale)",
                g_score[ci],
                tally.expanded,
                tally.requeued,
                tally.stale
            );
            return (true, tally);
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
            let tentative_g = current_g + 1;
            if tentative_g >= g_score[ni] {
                continue;
            }
            if pending[ni] {
                tally.requeued += 1;
            }
            trail.link(ni, ci);
            g_score[ni] = tentative_g;
            f_score[ni] = tentative_g as f64 + heuristic.estimate(np, goal);
            pending[ni] = true;
            open.push(ni, f_score[ni]);
            ends.mark(grid, ni, CellKind::Open);
        }

        vis.draw(grid);
        ends.mark(grid, ci, CellKind::Closed);
        tally.expanded += 1;
    }

    log::debug!("astar: frontier exhausted after {} expansions", tally.expanded);
    (false, tally)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bfs;
    use crate::visualizer::Headless;

    #[test]
    fn open_grid_path_is_manhattan() {
        let mut g = Grid::new(5, 5).unwrap();
        assert!(astar(&mut Headless, &mut g, Some(Point::at(0, 0)), Some(Point::at(4, 4))));
        assert_eq!(g.count(CellKind::Path) + 1, 8);
    }

    #[test]
    fn expands_fewer_cells_than_bfs() {
        let mut a = Grid::new(7, 10).unwrap();
        a.place_start(Point::at(3, 0)).unwrap();
        a.place_end(Point::at(3, 9)).unwrap();
        let mut b = a.clone();
        let (s, e) = (a.start(), a.end());
        let (mut astar_frames, mut bfs_frames) = (0, 0);
        assert!(astar(&mut |_: &Grid| astar_frames += 1, &mut a, s, e));
        assert!(bfs(&mut |_: &Grid| bfs_frames += 1, &mut b, s, e));
        assert!(astar_frames < bfs_frames);
        assert_eq!(a.count(CellKind::Path), b.count(CellKind::Path));
    }

    #[test]
    fn euclidean_is_also_optimal() {
        let map = "S..#....\n.#.#.##.\n.#...#..\n.####.#.\n......#E";
        let mut a: Grid = map.parse().unwrap();
        let mut b: Grid = map.parse().unwrap();
        let (s, e) = (a.start(), a.end());
        assert!(astar_with(Heuristic::Euclidean, &mut Headless, &mut a, s, e));
        assert!(bfs(&mut Headless, &mut b, s, e));
        assert_eq!(a.count(CellKind::Path), b.count(CellKind::Path));
    }

    #[test]
    fn start_equals_goal() {
        let mut g = Grid::new(3, 3).unwrap();
        let p = Some(Point::at(1, 1));
        let mut frames = 0;
        assert!(astar(&mut |_: &Grid| frames += 1, &mut g, p, p));
        assert_eq!(frames, 0);
        assert_eq!(g.count(CellKind::Empty), 9);
    }

    #[test]
    fn cheaper_route_requeues_a_pending_cell() {
        // (2,3) is first reached from (1,3) at cost 5, then from (2,4) at
        // cost 3 before it is expanded.
        let map = ".E#...\n.##.#S\n......";
        let mut a: Grid = map.parse().unwrap();
        let mut b: Grid = map.parse().unwrap();
        let (s, e) = (a.start(), a.end());

        let (found, tally) = search(Heuristic::Manhattan, &mut Headless, &mut a, s, e);
        assert!(found);
        assert_eq!(tally.requeued, 1);
        assert_eq!(tally.stale, 1);

        assert!(bfs(&mut Headless, &mut b, s, e));
        assert_eq!(a.count(CellKind::Path) + 1, 9);
        assert_eq!(a.count(CellKind::Path), b.count(CellKind::Path));
        assert_eq!(a.kind(Point::at(2, 3)), Some(CellKind::Path));
    }

    #[test]
    fn stale_entry_does_not_expand_twice() {
        let map = ".E#...\n.##.#S\n......";
        let mut g: Grid = map.parse().unwrap();
        let (s, e) = (g.start(), g.end());
        let mut frames = 0;
        let mut count = |_: &Grid| frames += 1;
        let (found, tally) = search(Heuristic::Manhattan, &mut count, &mut g, s, e);
        assert!(found);
        // One frame per expansion, then one per path cell.
        assert_eq!(tally.expanded, 13);
        assert_eq!(frames, tally.expanded + 8);
    }
}
