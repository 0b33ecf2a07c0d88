//! The [`Cell`] type: a single grid node tagged with a [`CellKind`].

use crate::geom::Point;

/// What a cell currently represents.
///
/// `Start`, `End` and `Barrier` are painted by the driver. `Open`, `Closed`
/// and `Path` are search marks written by the engine during a run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKind {
    #[default]
    Empty,
    Start,
    End,
    Barrier,
    /// Discovered, waiting in the frontier.
    Open,
    /// Fully expanded.
    Closed,
    Path,
}

impl CellKind {
    /// Whether this kind is a search mark (cleared between runs and between
    /// deepening iterations).
    #[inline]
    pub const fn is_mark(self) -> bool {
        matches!(self, Self::Open | Self::Closed | Self::Path)
    }

    /// Whether this is the start or end tag.
    #[inline]
    pub const fn is_endpoint(self) -> bool {
        matches!(self, Self::Start | Self::End)
    }

    /// Character used by the text map format.
    pub const fn to_char(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Start => 'S',
            Self::End => 'E',
            Self::Barrier => '#',
            Self::Open => 'o',
            Self::Closed => 'x',
            Self::Path => '*',
        }
    }

    /// Parse a text map character.
    pub const fn from_char(ch: char) -> Option<Self> {
        Some(match ch {
            '.' => Self::Empty,
            'S' => Self::Start,
            'E' => Self::End,
            '#' => Self::Barrier,
            'o' => Self::Open,
            'x' => Self::Closed,
            '*' => Self::Path,
            _ => return None,
        })
    }
}

/// A grid node. Its position is fixed at creation; only the kind changes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    row: i32,
    col: i32,
    pub kind: CellKind,
}

impl Cell {
    /// Create an empty cell at `(row, col)`.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self {
            row,
            col,
            kind: CellKind::Empty,
        }
    }

    #[inline]
    pub const fn row(&self) -> i32 {
        self.row
    }

    #[inline]
    pub const fn col(&self) -> i32 {
        self.col
    }

    /// Position as a [`Point`] (`x` = column, `y` = row).
    #[inline]
    pub const fn pos(&self) -> Point {
        Point::at(self.row, self.col)
    }

    #[inline]
    pub const fn is_barrier(&self) -> bool {
        matches!(self.kind, CellKind::Barrier)
    }

    /// Return the cell to [`CellKind::Empty`].
    #[inline]
    pub fn reset(&mut self) {
        self.kind = CellKind::Empty;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chars_round_trip() {
        for kind in [
            CellKind::Empty,
            CellKind::Start,
            CellKind::End,
            CellKind::Barrier,
            CellKind::Open,
            CellKind::Closed,
            CellKind::Path,
        ] {
            assert_eq!(CellKind::from_char(kind.to_char()), Some(kind));
        }
        assert_eq!(CellKind::from_char('?'), None);
    }

    #[test]
    fn marks_and_endpoints() {
        assert!(CellKind::Open.is_mark());
        assert!(CellKind::Path.is_mark());
        assert!(!CellKind::Barrier.is_mark());
        assert!(CellKind::Start.is_endpoint());
        assert!(!CellKind::Empty.is_endpoint());
    }

    #[test]
    fn cell_position_is_fixed() {
        let mut c = Cell::new(2, 5);
        c.kind = CellKind::Barrier;
        assert!(c.is_barrier());
        assert_eq!(c.pos(), Point::new(5, 2));
        c.reset();
        assert_eq!(c.kind, CellKind::Empty);
        assert_eq!((c.row(), c.col()), (2, 5));
    }
}
