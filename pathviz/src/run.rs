//! Building the grid for a run and driving a strategy over it.

use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

use pathviz_core::{CellKind, Context, Grid, Point};
use pathviz_search::Strategy;
use pathviz_term::TermVisualizer;

use crate::config::RunConfig;
use crate::error::{Error, Result};
use crate::mapgen::{MapGen, seeded_rng};

/// What a finished run reports.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub strategy: Strategy,
    /// Edges on the marked path, when one was found.
    pub path_len: Option<usize>,
    /// Frames drawn during the run.
    pub steps: usize,
    pub cancelled: bool,
}

impl Outcome {
    fn read(strategy: Strategy, grid: &Grid, found: bool, steps: usize, cancelled: bool) -> Self {
        let path_len = found.then(|| grid.count(CellKind::Path) + 1);
        Self {
            strategy,
            path_len,
            steps,
            cancelled,
        }
    }

    pub fn found(&self) -> bool {
        self.path_len.is_some()
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.path_len {
            Some(len) => {
                write!(f, "{}: path of {len} steps ({} frames)", self.strategy, self.steps)
            }
            None if self.cancelled => {
                write!(f, "{}: cancelled after {} frames", self.strategy, self.steps)
            }
            None => write!(f, "{}: no path ({} frames)", self.strategy, self.steps),
        }
    }
}

/// Load `path` as a text map.
pub fn load_map(path: &Path) -> Result<Grid> {
    let text = fs::read_to_string(path).map_err(|source| Error::Map {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(text.parse()?)
}

/// The grid a run starts from: the configured map, or a generated one.
///
/// Configured endpoints replace the map's own. A missing start goes to the
/// top-left corner and a missing end to the bottom-right one; when the
/// other endpoint already holds that corner, the opposite corner is used.
pub fn build_grid(cfg: &RunConfig) -> Result<Grid> {
    let mut grid = match &cfg.map {
        Some(path) => load_map(path)?,
        None => Grid::new(cfg.rows, cfg.cols)?,
    };
    let top_left = Point::ZERO;
    let bottom_right = Point::at(grid.rows() - 1, grid.cols() - 1);
    if let Some(p) = cfg.start {
        grid.place_start(p)?;
    }
    if let Some(p) = cfg.end {
        grid.place_end(p)?;
    }
    if grid.start().is_none() {
        let p = free_corner(&grid, grid.end(), top_left, bottom_right)?;
        grid.place_start(p)?;
    }
    if grid.end().is_none() {
        let p = free_corner(&grid, grid.start(), bottom_right, top_left)?;
        grid.place_end(p)?;
    }
    if cfg.map.is_none() {
        MapGen::new(seeded_rng(cfg.seed)).scatter(&mut grid, cfg.density);
    }
    log::info!(
        "grid {}x{}, {} barriers",
        grid.rows(),
        grid.cols(),
        grid.count(CellKind::Barrier)
    );
    Ok(grid)
}

/// `preferred`, unless the other endpoint sits there.
fn free_corner(
    grid: &Grid,
    taken: Option<Point>,
    preferred: Point,
    other: Point,
) -> Result<Point> {
    match [preferred, other].into_iter().find(|&p| Some(p) != taken) {
        Some(p) => Ok(p),
        None => Err(Error::NoRoom {
            rows: grid.rows(),
            cols: grid.cols(),
        }),
    }
}

/// Run `strategy` without drawing.
pub fn run_headless(strategy: Strategy, grid: &mut Grid) -> Outcome {
    let (start, end) = (grid.start(), grid.end());
    let mut steps = 0;
    let found = strategy.run(&mut |_: &Grid| steps += 1, grid, start, end);
    Outcome::read(strategy, grid, found, steps, false)
}

/// Animate `strategy` in the terminal, then wait for a key unless the user
/// quit during the run.
pub fn run_terminal(strategy: Strategy, grid: &mut Grid, delay: Duration) -> Result<Outcome> {
    let (start, end) = (grid.start(), grid.end());
    let ctx = Context::new();
    let mut vis = TermVisualizer::new(ctx.clone())
        .with_delay(delay)
        .with_title(strategy.to_string());
    vis.init()?;

    let found = strategy.run(&mut vis, grid, start, end);
    if let Some(err) = vis.take_error() {
        return Err(err.into());
    }
    let outcome = Outcome::read(strategy, grid, found, vis.steps(), ctx.is_done());
    if !outcome.cancelled {
        vis.show(grid, &format!("{outcome}  (any key to exit)"))?;
        vis.wait_key()?;
    }
    vis.close();
    Ok(outcome)
}
