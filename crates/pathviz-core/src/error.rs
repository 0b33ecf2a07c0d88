use thiserror::Error;

use crate::cell::CellKind;
use crate::geom::Point;

/// Error produced when building or editing a [`Grid`](crate::Grid).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("grid has no cells")]
    Empty,

    #[error("line {line} has {found} cells, expected {expected}")]
    Ragged {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown map character {ch:?} at row {row}, column {col}")]
    UnknownCell { ch: char, row: i32, col: i32 },

    #[error("second {kind:?} cell at row {row}, column {col}")]
    DuplicateEndpoint { kind: CellKind, row: i32, col: i32 },

    #[error("position {0} is outside the grid")]
    OutOfRange(Point),

    #[error("position {0} is already taken by the other endpoint")]
    Occupied(Point),
}

/// Result for grid construction and editing.
pub type Result<T> = std::result::Result<T, GridError>;
