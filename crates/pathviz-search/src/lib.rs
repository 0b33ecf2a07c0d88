//! Search strategies over a uniform-cost grid, built for visualisation.
//!
//! Every strategy takes a [`Visualizer`], a mutable [`Grid`], a start and an
//! end point, and returns whether a path was found. While running it writes
//! frontier ([`CellKind::Open`]) and visited ([`CellKind::Closed`]) marks into
//! the grid and calls [`Visualizer::draw`] once per expansion; on success the
//! cells of the path are tagged [`CellKind::Path`] in place.
//!
//! - **Uninformed**: [`bfs`], [`dfs`], [`ucs`]
//! - **Informed**: [`greedy`], [`astar`] (and their `*_with` forms taking a
//!   [`Heuristic`])
//! - **Depth-bounded**: [`dls`], [`ids`], [`ida_star`]
//!
//! [`Strategy`] wraps all of them behind one value so a driver can offer a
//! menu and dispatch on the user's choice.
//!
//! # Cancellation
//!
//! Before each frontier item is processed the engine asks
//! [`Visualizer::is_done`]. A `true` answer aborts the run, which then
//! reports failure and leaves its partial marks in the grid.
//!
//! [`Grid`]: pathviz_core::Grid
//! [`CellKind::Open`]: pathviz_core::CellKind::Open
//! [`CellKind::Closed`]: pathviz_core::CellKind::Closed
//! [`CellKind::Path`]: pathviz_core::CellKind::Path

mod astar;
mod bfs;
mod distance;
mod dls;
mod greedy;
mod idastar;
mod reconstruct;
mod space;
mod strategy;
mod ucs;
mod visualizer;

pub use astar::{astar, astar_with};
pub use bfs::{bfs, dfs};
pub use distance::{Heuristic, euclidean, manhattan};
pub use dls::{DepthOutcome, depth_limited, dls, ids, iterative_deepening};
pub use greedy::{greedy, greedy_with};
pub use idastar::{ida_star, ida_star_with};
pub use strategy::{DEFAULT_DEPTH_LIMIT, ParseStrategyError, Strategy};
pub use ucs::ucs;
pub use visualizer::{Headless, Visualizer, Watched};
