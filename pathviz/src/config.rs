//! Command-line configuration.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use clap::{App, Arg, ArgMatches, value_t};
use pathviz_core::Point;
use pathviz_search::Strategy;

use crate::error::{Error, Result};

pub const DEFAULT_ROWS: i32 = 50;
pub const DEFAULT_COLS: i32 = 50;
pub const DEFAULT_DENSITY: f64 = 0.2;
pub const DEFAULT_DELAY_MS: u64 = 10;

/// Settings for one run of the driver.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunConfig {
    pub rows: i32,
    pub cols: i32,
    pub strategy: Strategy,
    /// Text map to load instead of generating one. Its size wins over
    /// `rows` and `cols`, and its `S`/`E` cells over the defaults.
    pub map: Option<PathBuf>,
    /// Chance of each free cell becoming a barrier on a generated map.
    pub density: f64,
    /// Seed for map generation; `None` draws one from the OS.
    pub seed: Option<u64>,
    /// Pause after each drawn step.
    pub delay: Duration,
    pub start: Option<Point>,
    pub end: Option<Point>,
    /// Run without the terminal front end and print the final grid.
    pub headless: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            strategy: Strategy::default(),
            map: None,
            density: DEFAULT_DENSITY,
            seed: None,
            delay: Duration::from_millis(DEFAULT_DELAY_MS),
            start: None,
            end: None,
            headless: false,
        }
    }
}

/// The command-line interface.
pub fn app() -> App<'static, 'static> {
    App::new("pathviz")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Watch a search strategy explore a grid")
        .arg(
            Arg::with_name("strategy")
                .short("s")
                .long("strategy")
                .value_name("NAME")
                .takes_value(true)
                .default_value("astar")
                .help(
                    "bfs, dfs, ucs, greedy, astar, dls[:LIMIT], ids or idastar; \
                     informed ones take :euclidean",
                ),
        )
        .arg(
            Arg::with_name("rows")
                .short("r")
                .long("rows")
                .value_name("N")
                .takes_value(true)
                .default_value("50"),
        )
        .arg(
            Arg::with_name("cols")
                .short("c")
                .long("cols")
                .value_name("N")
                .takes_value(true)
                .default_value("50"),
        )
        .arg(
            Arg::with_name("map")
                .short("m")
                .long("map")
                .value_name("FILE")
                .takes_value(true)
                .help("Text map using . # S E"),
        )
        .arg(
            Arg::with_name("density")
                .short("d")
                .long("density")
                .value_name("P")
                .takes_value(true)
                .default_value("0.2")
                .help("Barrier probability for generated maps"),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .value_name("N")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("delay")
                .long("delay")
                .value_name("MS")
                .takes_value(true)
                .default_value("10")
                .help("Pause after each step"),
        )
        .arg(
            Arg::with_name("start")
                .long("start")
                .value_name("ROW,COL")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("end")
                .long("end")
                .value_name("ROW,COL")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("headless")
                .long("headless")
                .help("Print the result instead of animating it"),
        )
        .arg(
            Arg::with_name("list")
                .long("list")
                .help("List the strategies and exit"),
        )
}

impl RunConfig {
    /// Parse a full argument list, program name first.
    pub fn parse_from<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let matches = app().get_matches_from_safe(args)?;
        Self::from_matches(&matches)
    }

    pub fn from_matches(m: &ArgMatches<'_>) -> Result<Self> {
        let rows = value_t!(m, "rows", i32)?;
        let cols = value_t!(m, "cols", i32)?;
        for (arg, n) in [("rows", rows), ("cols", cols)] {
            if n <= 0 {
                return Err(Error::Invalid {
                    arg,
                    value: n.to_string(),
                    reason: "must be positive",
                });
            }
        }

        let density = value_t!(m, "density", f64)?;
        if !(0.0..=1.0).contains(&density) {
            return Err(Error::Invalid {
                arg: "density",
                value: density.to_string(),
                reason: "must be between 0 and 1",
            });
        }

        let strategy = Strategy::from_str(m.value_of("strategy").unwrap_or("astar"))?;
        let delay = Duration::from_millis(value_t!(m, "delay", u64)?);
        let seed = m
            .value_of("seed")
            .map(|s| {
                s.parse().map_err(|_| Error::Invalid {
                    arg: "seed",
                    value: s.to_string(),
                    reason: "not an unsigned integer",
                })
            })
            .transpose()?;
        let start = m.value_of("start").map(|s| parse_cell("start", s)).transpose()?;
        let end = m.value_of("end").map(|s| parse_cell("end", s)).transpose()?;

        Ok(Self {
            rows,
            cols,
            strategy,
            map: m.value_of("map").map(PathBuf::from),
            density,
            seed,
            delay,
            start,
            end,
            headless: m.is_present("headless"),
        })
    }

}

/// Parse `ROW,COL`.
fn parse_cell(arg: &'static str, s: &str) -> Result<Point> {
    let invalid = || Error::Invalid {
        arg,
        value: s.to_string(),
        reason: "expected ROW,COL",
    };
    let (row, col) = s.split_once(',').ok_or_else(invalid)?;
    let row = row.trim().parse().map_err(|_| invalid())?;
    let col = col.trim().parse().map_err(|_| invalid())?;
    Ok(Point::at(row, col))
}
