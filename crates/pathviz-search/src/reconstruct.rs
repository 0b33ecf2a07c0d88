use pathviz_core::{CellKind, Grid};

use crate::visualizer::Visualizer;

const NONE: usize = usize::MAX;

/// Predecessor table (`came_from`) for a single run.
///
/// A link always points from a cell to the cell it was reached from. The
/// strategies only link a cell when it is first reached, or re-reached at
/// a strictly lower cost, so following links always ends at the start.
#[derive(Debug)]
pub(crate) struct Trail {
    parent: Vec<usize>,
}

impl Trail {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            parent: vec![NONE; len],
        }
    }

    #[inline]
    pub(crate) fn link(&mut self, child: usize, parent: usize) {
        self.parent[child] = parent;
    }

    #[inline]
    pub(crate) fn parent(&self, idx: usize) -> Option<usize> {
        match self.parent[idx] {
            NONE => None,
            p => Some(p),
        }
    }

    /// Cells strictly between `goal` and the root, goal side first.
    pub(crate) fn between(&self, goal: usize) -> Between<'_> {
        Between {
            trail: self,
            cur: self.parent(goal),
            steps: 0,
        }
    }
}

pub(crate) struct Between<'a> {
    trail: &'a Trail,
    cur: Option<usize>,
    steps: usize,
}

impl Iterator for Between<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let cur = self.cur?;
        // The root has no predecessor and is not part of the result.
        let next = self.trail.parent(cur)?;
        self.steps += 1;
        debug_assert!(self.steps <= self.trail.parent.len(), "came_from cycle");
        self.cur = Some(next);
        Some(cur)
    }
}

/// Walk back from `goal`, tagging every intermediate cell as
/// [`CellKind::Path`] and drawing once per tagged cell.
///
/// Returns the number of tagged cells, i.e. the path's edge count minus one
/// (zero when start and goal coincide or are adjacent).
pub(crate) fn reconstruct_path<V: Visualizer + ?Sized>(
    trail: &Trail,
    goal: usize,
    grid: &mut Grid,
    vis: &mut V,
) -> usize {
    let mut marked = 0;
    for idx in trail.between(goal) {
        grid.mark(grid.point(idx), CellKind::Path);
        vis.draw(grid);
        marked += 1;
    }
    marked
}
