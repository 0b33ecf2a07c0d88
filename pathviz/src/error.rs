use std::io;
use std::path::PathBuf;

use pathviz_core::GridError;
use pathviz_search::ParseStrategyError;
use thiserror::Error;

/// Everything that can stop the driver before or during a run.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Cli(#[from] clap::Error),

    #[error("invalid --{arg} value {value:?}: {reason}")]
    Invalid {
        arg: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error(transparent)]
    Strategy(#[from] ParseStrategyError),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("a {rows}x{cols} grid has no room for separate start and end cells")]
    NoRoom { rows: i32, cols: i32 },

    #[error("cannot read map {}: {source}", .path.display())]
    Map { path: PathBuf, source: io::Error },

    #[error("terminal: {0}")]
    Terminal(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
