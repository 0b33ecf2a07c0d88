//! Per-run bookkeeping shared by the strategies.
//!
//! Every table is a dense `Vec` indexed by the grid's row-major cell index,
//! allocated when a run starts and dropped when it ends.

use std::collections::BinaryHeap;

use pathviz_core::{CellKind, Grid, Point};

/// Sentinel cost meaning "not reached yet".
pub(crate) const UNREACHABLE: i32 = i32::MAX;

/// The run's start and goal as cell indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Endpoints {
    pub(crate) start: usize,
    pub(crate) goal: usize,
}

impl Endpoints {
    /// Returns `None` when either endpoint is missing or outside the grid,
    /// in which case the run fails without exploring.
    pub(crate) fn resolve(grid: &Grid, start: Option<Point>, end: Option<Point>) -> Option<Self> {
        Some(Self {
            start: grid.idx(start?)?,
            goal: grid.idx(end?)?,
        })
    }

    /// Write a search mark, leaving the run's own endpoints alone even when
    /// the driver did not tag them.
    #[inline]
    pub(crate) fn mark(self, grid: &mut Grid, idx: usize, kind: CellKind) {
        if idx != self.start && idx != self.goal {
            grid.mark(grid.point(idx), kind);
        }
    }
}

// ---------------------------------------------------------------------------
// Priority frontier
// ---------------------------------------------------------------------------

/// Heap entry ordered by `key`, then by insertion sequence.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Entry {
    pub(crate) idx: usize,
    pub(crate) key: f64,
    seq: u64,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops the smallest key first, and
        // the earliest insertion among equal keys.
        other
            .key
            .total_cmp(&self.key)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl Eq for Entry {}

/// Min-priority frontier with deterministic FIFO tie-breaking.
#[derive(Debug, Default)]
pub(crate) struct OpenList {
    heap: BinaryHeap<Entry>,
    seq: u64,
}

impl OpenList {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, idx: usize, key: f64) {
        self.heap.push(Entry {
            idx,
            key,
            seq: self.seq,
        });
        self.seq += 1;
    }

    pub(crate) fn pop(&mut self) -> Option<Entry> {
        self.heap.pop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_list_pops_lowest_key_first() {
        let mut open = OpenList::new();
        open.push(1, 3.0);
        open.push(2, 1.0);
        open.push(3, 2.0);
        let order: Vec<_> = std::iter::from_fn(|| open.pop()).map(|e| e.idx).collect();
        assert_eq!(order, vec![2, 3, 1]);
    }

    #[test]
    fn equal_keys_pop_in_insertion_order() {
        let mut open = OpenList::new();
        for idx in [7, 4, 9, 1] {
            open.push(idx, 5.0);
        }
        open.push(0, 6.0);
        let order: Vec<_> = std::iter::from_fn(|| open.pop()).map(|e| e.idx).collect();
        assert_eq!(order, vec![7, 4, 9, 1, 0]);
    }

    #[test]
    fn endpoints_need_both_in_range() {
        let g = Grid::new(2, 2).unwrap();
        let (a, b) = (Some(Point::at(0, 0)), Some(Point::at(1, 1)));
        assert_eq!(
            Endpoints::resolve(&g, a, b),
            Some(Endpoints { start: 0, goal: 3 })
        );
        assert_eq!(Endpoints::resolve(&g, None, b), None);
        assert_eq!(Endpoints::resolve(&g, a, None), None);
        assert_eq!(Endpoints::resolve(&g, a, Some(Point::at(2, 0))), None);
    }

    #[test]
    fn endpoint_marks_are_skipped() {
        let mut g = Grid::new(1, 3).unwrap();
        let ends = Endpoints { start: 0, goal: 2 };
        for idx in 0..3 {
            ends.mark(&mut g, idx, CellKind::Closed);
        }
        assert_eq!(g.to_string(), ".x.\n");
    }
}
