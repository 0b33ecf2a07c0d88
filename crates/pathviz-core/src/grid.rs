//! The [`Grid`]: a fixed rows × cols board owning every [`Cell`].
//!
//! Cells are stored densely in row-major order. The grid never resizes; the
//! driver paints endpoints and barriers on it and a search engine writes its
//! frontier, visited and path marks into it while running.

use std::fmt;
use std::str::FromStr;

use crate::cell::{Cell, CellKind};
use crate::error::{GridError, Result};
use crate::geom::{Point, Range};

/// A rectangular board of [`Cell`]s.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: i32,
    cols: i32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid of empty cells.
    pub fn new(rows: i32, cols: i32) -> Result<Self> {
        if rows <= 0 || cols <= 0 {
            return Err(GridError::Empty);
        }
        let cells = Range::new(0, 0, cols, rows)
            .iter()
            .map(|p| Cell::new(p.row(), p.col()))
            .collect();
        Ok(Self { rows, cols, cells })
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// Number of cells (`rows * cols`).
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: construction rejects zero-sized grids.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The grid rectangle, `[0, cols) × [0, rows)`.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.cols, self.rows)
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    /// Flat row-major index of `p`, or `None` if out of range.
    #[inline]
    pub fn idx(&self, p: Point) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some((p.y * self.cols + p.x) as usize)
    }

    /// Point for a flat index produced by [`Grid::idx`].
    #[inline]
    pub fn point(&self, idx: usize) -> Point {
        let cols = self.cols as usize;
        Point::new((idx % cols) as i32, (idx / cols) as i32)
    }

    pub fn cell(&self, p: Point) -> Option<&Cell> {
        self.idx(p).map(|i| &self.cells[i])
    }

    pub fn kind(&self, p: Point) -> Option<CellKind> {
        self.cell(p).map(|c| c.kind)
    }

    /// Overwrite the kind at `p`. Does nothing if out of range.
    pub fn set_kind(&mut self, p: Point, kind: CellKind) {
        if let Some(i) = self.idx(p) {
            self.cells[i].kind = kind;
        }
    }

    /// Write a search mark at `p`.
    ///
    /// Start, End and Barrier cells keep their tag; only empty or previously
    /// marked cells are retagged.
    pub fn mark(&mut self, p: Point, kind: CellKind) {
        if let Some(i) = self.idx(p) {
            let cell = &mut self.cells[i];
            if cell.kind == CellKind::Empty || cell.kind.is_mark() {
                cell.kind = kind;
            }
        }
    }

    /// Whether a search may step onto `p`.
    #[inline]
    pub fn is_passable(&self, p: Point) -> bool {
        self.cell(p).is_some_and(|c| !c.is_barrier())
    }

    /// Orthogonal neighbours of `p` that are inside the grid and not
    /// barriers, in the order up, right, down, left.
    ///
    /// Computed from the current contents, so barrier edits between runs are
    /// always honoured.
    pub fn neighbors(&self, p: Point) -> impl Iterator<Item = Point> + '_ {
        p.neighbors_4()
            .into_iter()
            .filter(move |&n| self.is_passable(n))
    }

    /// Every cell in row-major order.
    pub fn cells(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    /// Count cells of the given kind.
    pub fn count(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|c| c.kind == kind).count()
    }

    /// Position of the start cell, if one is placed.
    pub fn start(&self) -> Option<Point> {
        self.find(CellKind::Start)
    }

    /// Position of the end cell, if one is placed.
    pub fn end(&self) -> Option<Point> {
        self.find(CellKind::End)
    }

    fn find(&self, kind: CellKind) -> Option<Point> {
        self.cells.iter().find(|c| c.kind == kind).map(Cell::pos)
    }

    /// Reset every cell to [`CellKind::Empty`].
    pub fn reset(&mut self) {
        for c in self.cells.iter_mut() {
            c.reset();
        }
    }

    /// Clear search marks (open, closed, path), keeping endpoints and
    /// barriers.
    pub fn clear_marks(&mut self) {
        for c in self.cells.iter_mut() {
            if c.kind.is_mark() {
                c.reset();
            }
        }
    }

    // -----------------------------------------------------------------------
    // Driver-side editing
    // -----------------------------------------------------------------------

    /// Make `p` the start cell, clearing any previous start.
    pub fn place_start(&mut self, p: Point) -> Result<()> {
        self.place_endpoint(p, CellKind::Start, CellKind::End)
    }

    /// Make `p` the end cell, clearing any previous end.
    pub fn place_end(&mut self, p: Point) -> Result<()> {
        self.place_endpoint(p, CellKind::End, CellKind::Start)
    }

    fn place_endpoint(&mut self, p: Point, kind: CellKind, other: CellKind) -> Result<()> {
        let i = self.idx(p).ok_or(GridError::OutOfRange(p))?;
        if self.cells[i].kind == other {
            return Err(GridError::Occupied(p));
        }
        if let Some(old) = self.find(kind) {
            self.set_kind(old, CellKind::Empty);
        }
        self.cells[i].kind = kind;
        Ok(())
    }

    /// Paint a barrier at `p`. Endpoints are left untouched and reported
    /// as [`GridError::Occupied`].
    pub fn place_barrier(&mut self, p: Point) -> Result<()> {
        let i = self.idx(p).ok_or(GridError::OutOfRange(p))?;
        if self.cells[i].kind.is_endpoint() {
            return Err(GridError::Occupied(p));
        }
        self.cells[i].kind = CellKind::Barrier;
        Ok(())
    }

    /// Return `p` to empty, whatever it held.
    pub fn erase(&mut self, p: Point) -> Result<()> {
        let i = self.idx(p).ok_or(GridError::OutOfRange(p))?;
        self.cells[i].reset();
        Ok(())
    }
}

impl FromStr for Grid {
    type Err = GridError;

    /// Parse a text map: one line per row, `.` empty, `#` barrier, `S`
    /// start, `E` end, and `o`/`x`/`*` for search marks. Blank lines and
    /// surrounding whitespace are ignored.
    fn from_str(s: &str) -> Result<Self> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let Some(first) = lines.first() else {
            return Err(GridError::Empty);
        };
        let cols = first.chars().count();

        let mut grid = Grid::new(lines.len() as i32, cols as i32)?;
        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != cols {
                return Err(GridError::Ragged {
                    line: row + 1,
                    expected: cols,
                    found,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let (row, col) = (row as i32, col as i32);
                let kind =
                    CellKind::from_char(ch).ok_or(GridError::UnknownCell { ch, row, col })?;
                if kind.is_endpoint() && grid.find(kind).is_some() {
                    return Err(GridError::DuplicateEndpoint { kind, row, col });
                }
                grid.set_kind(Point::at(row, col), kind);
            }
        }
        Ok(grid)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols as usize) {
            for c in row {
                write!(f, "{}", c.kind.to_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Grid {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Grid {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let map = String::deserialize(deserializer)?;
        map.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_zero_size() {
        assert_eq!(Grid::new(0, 4), Err(GridError::Empty));
        assert_eq!(Grid::new(3, -1), Err(GridError::Empty));
    }

    #[test]
    fn cells_are_row_major_with_fixed_positions() {
        let g = Grid::new(2, 3).unwrap();
        assert_eq!(g.len(), 6);
        let pos: Vec<_> = g.cells().map(|c| (c.row(), c.col())).collect();
        assert_eq!(pos, vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]);
        assert_eq!(g.idx(Point::at(1, 2)), Some(5));
        assert_eq!(g.point(5), Point::at(1, 2));
        assert_eq!(g.idx(Point::at(2, 0)), None);
    }

    #[test]
    fn neighbors_skip_barriers_and_bounds() {
        let mut g = Grid::new(3, 3).unwrap();
        g.place_barrier(Point::at(0, 1)).unwrap();
        let corner: Vec<_> = g.neighbors(Point::at(0, 0)).collect();
        assert_eq!(corner, vec![Point::at(1, 0)]);

        let center: Vec<_> = g.neighbors(Point::at(1, 1)).collect();
        assert_eq!(
            center,
            vec![Point::at(1, 2), Point::at(2, 1), Point::at(1, 0)]
        );
    }

    #[test]
    fn neighbors_follow_barrier_edits() {
        let mut g = Grid::new(1, 3).unwrap();
        assert_eq!(g.neighbors(Point::at(0, 1)).count(), 2);
        g.place_barrier(Point::at(0, 2)).unwrap();
        assert_eq!(g.neighbors(Point::at(0, 1)).count(), 1);
        g.erase(Point::at(0, 2)).unwrap();
        assert_eq!(g.neighbors(Point::at(0, 1)).count(), 2);
    }

    #[test]
    fn mark_keeps_painted_cells() {
        let mut g: Grid = "S.#E".parse().unwrap();
        for col in 0..4 {
            g.mark(Point::at(0, col), CellKind::Path);
        }
        assert_eq!(g.to_string(), "S*#E\n");
    }

    #[test]
    fn clear_marks_keeps_endpoints_and_barriers() {
        let mut g: Grid = "Sox\n*#E".parse().unwrap();
        g.clear_marks();
        assert_eq!(g.to_string(), "S..\n.#E\n");
        g.reset();
        assert_eq!(g.count(CellKind::Empty), 6);
    }

    #[test]
    fn endpoints_are_unique() {
        let mut g = Grid::new(2, 2).unwrap();
        g.place_start(Point::at(0, 0)).unwrap();
        g.place_start(Point::at(1, 1)).unwrap();
        assert_eq!(g.count(CellKind::Start), 1);
        assert_eq!(g.start(), Some(Point::at(1, 1)));

        assert_eq!(
            g.place_end(Point::at(1, 1)),
            Err(GridError::Occupied(Point::at(1, 1)))
        );
        g.place_end(Point::at(0, 1)).unwrap();
        assert_eq!(g.end(), Some(Point::at(0, 1)));
        assert_eq!(
            g.place_barrier(Point::at(0, 1)),
            Err(GridError::Occupied(Point::at(0, 1)))
        );
        assert_eq!(
            g.place_start(Point::at(5, 5)),
            Err(GridError::OutOfRange(Point::at(5, 5)))
        );
    }

    #[test]
    fn parse_and_display_round_trip() {
        let map = "S..#\n.#..\n...E\n";
        let g: Grid = map.parse().unwrap();
        assert_eq!((g.rows(), g.cols()), (3, 4));
        assert_eq!(g.start(), Some(Point::at(0, 0)));
        assert_eq!(g.end(), Some(Point::at(2, 3)));
        assert_eq!(g.count(CellKind::Barrier), 2);
        assert_eq!(g.to_string(), map);
    }

    #[test]
    fn parse_errors() {
        assert_eq!("".parse::<Grid>(), Err(GridError::Empty));
        assert_eq!(
            "...\n..".parse::<Grid>(),
            Err(GridError::Ragged {
                line: 2,
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            "..?".parse::<Grid>(),
            Err(GridError::UnknownCell {
                ch: '?',
                row: 0,
                col: 2
            })
        );
        assert_eq!(
            "S.\n.S".parse::<Grid>(),
            Err(GridError::DuplicateEndpoint {
                kind: CellKind::Start,
                row: 1,
                col: 1
            })
        );
    }
}
