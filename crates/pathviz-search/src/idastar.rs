//! Iterative deepening A*.
//!
//! Each probe is a depth-first walk bounded by `f = g + h`. The walk keeps
//! the current root-to-cell path as an explicit stack of frames, which
//! doubles as the cycle check: a cell is never entered twice on the same
//! path, but may be entered again through a different one. When a probe
//! fails the threshold rises to the smallest `f` that was pruned.

use pathviz_core::{CellKind, Grid, Point};

use crate::distance::Heuristic;
use crate::space::Endpoints;
use crate::visualizer::Visualizer;

/// IDA* with the Manhattan heuristic.
pub fn ida_star<V: Visualizer + ?Sized>(
    vis: &mut V,
    grid: &mut Grid,
    start: Option<Point>,
    end: Option<Point>,
) -> bool {
    ida_star_with(Heuristic::Manhattan, vis, grid, start, end)
}

/// IDA* search.
///
/// The first threshold is `h(start)`. Every probe starts from a grid with
/// its search marks cleared. Cells are marked open while on the current
/// path and closed once the walk backs out of them. Fails when a probe
/// prunes nothing, since no larger threshold could reach anything new.
pub fn ida_star_with<V: Visualizer + ?Sized>(
    heuristic: Heuristic,
    vis: &mut V,
    grid: &mut Grid,
    start: Option<Point>,
    end: Option<Point>,
) -> bool {
    let Some(ends) = Endpoints::resolve(grid, start, end) else {
        log::debug!("idastar: missing or out-of-range endpoint");
        return false;
    };

    let mut walk = Walk::new(heuristic, ends, grid);
    let mut limit = walk.f(grid, ends.start, 0);
    let mut probes = 0usize;

    loop {
        grid.clear_marks();
        probes += 1;
        log::debug!("idastar ({heuristic}): probe {probes} with threshold {limit}");
        match walk.probe(vis, grid, limit) {
            Probe::Found => {
                let marked = walk.mark_path(grid, vis);
                log::debug!(
                    "idastar ({heuristic}): found path of {} edges after {probes} probes",
                    marked + 1
                );
                return true;
            }
            Probe::Cancelled => {
                log::debug!("idastar: cancelled during probe {probes}");
                return false;
            }
            Probe::Exceeded(next) if next.is_finite() => limit = next,
            Probe::Exceeded(_) => {
                log::debug!("idastar: nothing pruned in probe {probes}, giving up");
                return false;
            }
        }
    }
}

/// Outcome of one bounded probe.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Probe {
    Found,
    /// Smallest pruned `f`; infinite when nothing was pruned.
    Exceeded(f64),
    Cancelled,
}

/// Outcome of trying to step onto a cell.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Step {
    Descended,
    Goal,
    Pruned(f64),
    Cancelled,
}

/// A cell on the current path with the neighbours still to try.
#[derive(Clone, Copy, Debug)]
struct Frame {
    idx: usize,
    g: usize,
    nbrs: [usize; 4],
    len: usize,
    next: usize,
}

struct Walk {
    heuristic: Heuristic,
    ends: Endpoints,
    goal: Point,
    path: Vec<Frame>,
    on_path: Vec<bool>,
}

impl Walk {
    fn new(heuristic: Heuristic, ends: Endpoints, grid: &Grid) -> Self {
        Self {
            heuristic,
            ends,
            goal: grid.point(ends.goal),
            path: Vec::new(),
            on_path: vec![false; grid.len()],
        }
    }

    #[inline]
    fn f(&self, grid: &Grid, idx: usize, g: usize) -> f64 {
        g as f64 + self.heuristic.estimate(grid.point(idx), self.goal)
    }

    fn probe<V: Visualizer + ?Sized>(
        &mut self,
        vis: &mut V,
        grid: &mut Grid,
        limit: f64,
    ) -> Probe {
        self.path.clear();
        self.on_path.fill(false);
        let mut next_limit = f64::INFINITY;

        match self.enter(vis, grid, self.ends.start, 0, limit) {
            Step::Descended => {}
            Step::Goal => return Probe::Found,
            Step::Pruned(f) => return Probe::Exceeded(f),
            Step::Cancelled => return Probe::Cancelled,
        }

        while let Some(top) = self.path.last_mut() {
            if top.next == top.len {
                let idx = top.idx;
                self.path.pop();
                self.on_path[idx] = false;
                self.ends.mark(grid, idx, CellKind::Closed);
                continue;
            }
            let ni = top.nbrs[top.next];
            let g = top.g + 1;
            top.next += 1;
            if self.on_path[ni] {
                continue;
            }
            match self.enter(vis, grid, ni, g, limit) {
                Step::Descended => {}
                Step::Goal => return Probe::Found,
                Step::Pruned(f) => {
                    next_limit = next_limit.min(f);
                    self.ends.mark(grid, ni, CellKind::Closed);
                }
                Step::Cancelled => return Probe::Cancelled,
            }
        }
        Probe::Exceeded(next_limit)
    }

    /// Try to extend the path with `idx`, reached at cost `g`.
    fn enter<V: Visualizer + ?Sized>(
        &mut self,
        vis: &mut V,
        grid: &mut Grid,
        idx: usize,
        g: usize,
        limit: f64,
    ) -> Step {
        if vis.is_done() {
            return Step::Cancelled;
        }
        let f = self.f(grid, idx, g);
        if f > limit {
            return Step::Pruned(f);
        }
        if idx == self.ends.goal {
            return Step::Goal;
        }

        let mut nbrs = [0usize; 4];
        let mut len = 0;
        for np in grid.neighbors(grid.point(idx)) {
            if let Some(ni) = grid.idx(np) {
                nbrs[len] = ni;
                len += 1;
            }
        }
        self.path.push(Frame {
            idx,
            g,
            nbrs,
            len,
            next: 0,
        });
        self.on_path[idx] = true;
        self.ends.mark(grid, idx, CellKind::Open);
        vis.draw(grid);
        Step::Descended
    }

    /// Mark every cell on the path between start and goal, drawing after
    /// each one. Returns how many were marked.
    fn mark_path<V: Visualizer + ?Sized>(&self, grid: &mut Grid, vis: &mut V) -> usize {
        let mut marked = 0;
        for frame in self.path.iter().skip(1).rev() {
            self.ends.mark(grid, frame.idx, CellKind::Path);
            vis.draw(grid);
            marked += 1;
        }
        marked
    }
}
