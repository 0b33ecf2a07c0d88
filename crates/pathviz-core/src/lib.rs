//! **pathviz-core**: grid types shared by the pathviz search engine and its
//! drivers.
//!
//! This crate provides the geometry primitives, the tagged [`Cell`], the
//! fixed-size [`Grid`] that owns every cell, and the cooperative
//! cancellation [`Context`] used while a search is running.

pub mod cell;
pub mod context;
pub mod error;
pub mod geom;
pub mod grid;

pub use cell::{Cell, CellKind};
pub use context::Context;
pub use error::GridError;
pub use geom::{Point, Range};
pub use grid::Grid;
