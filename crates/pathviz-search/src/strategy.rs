use std::fmt;
use std::str::FromStr;

use pathviz_core::{Grid, Point};
use thiserror::Error;

use crate::distance::Heuristic;
use crate::visualizer::Visualizer;
use crate::{astar_with, bfs, dfs, dls, greedy_with, ida_star_with, ids, ucs};

/// Depth limit used when `dls` is chosen without one.
pub const DEFAULT_DEPTH_LIMIT: usize = 50;

/// A search strategy and its parameters.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    Bfs,
    Dfs,
    Ucs,
    Greedy(Heuristic),
    AStar(Heuristic),
    Dls(usize),
    Ids,
    IdaStar(Heuristic),
}

const MENU: [Strategy; 8] = [
    Strategy::Bfs,
    Strategy::Dfs,
    Strategy::AStar(Heuristic::Manhattan),
    Strategy::Ucs,
    Strategy::Greedy(Heuristic::Manhattan),
    Strategy::Dls(DEFAULT_DEPTH_LIMIT),
    Strategy::Ids,
    Strategy::IdaStar(Heuristic::Manhattan),
];

impl Default for Strategy {
    fn default() -> Self {
        Self::AStar(Heuristic::Manhattan)
    }
}

impl Strategy {
    /// The strategies a driver offers, in menu order.
    pub fn menu() -> &'static [Strategy] {
        &MENU
    }

    /// Whether a successful run is guaranteed to return a shortest path.
    pub fn is_optimal(self) -> bool {
        matches!(
            self,
            Self::Bfs | Self::Ucs | Self::AStar(_) | Self::Ids | Self::IdaStar(_)
        )
    }

    /// The command-line form, parsed back by [`FromStr`].
    pub fn key(self) -> String {
        let (name, h) = match self {
            Self::Bfs => ("bfs", None),
            Self::Dfs => ("dfs", None),
            Self::Ucs => ("ucs", None),
            Self::Greedy(h) => ("greedy", Some(h)),
            Self::AStar(h) => ("astar", Some(h)),
            Self::Dls(limit) => return format!("dls:{limit}"),
            Self::Ids => ("ids", None),
            Self::IdaStar(h) => ("idastar", Some(h)),
        };
        match h {
            Some(Heuristic::Euclidean) => format!("{name}:euclidean"),
            _ => name.to_string(),
        }
    }

    /// Run the search. See the crate docs for the marking and callback
    /// contract shared by every strategy.
    pub fn run<V: Visualizer + ?Sized>(
        self,
        vis: &mut V,
        grid: &mut Grid,
        start: Option<Point>,
        end: Option<Point>,
    ) -> bool {
        log::debug!("{self}: searching from {start:?} to {end:?}");
        let found = match self {
            Self::Bfs => bfs(vis, grid, start, end),
            Self::Dfs => dfs(vis, grid, start, end),
            Self::Ucs => ucs(vis, grid, start, end),
            Self::Greedy(h) => greedy_with(h, vis, grid, start, end),
            Self::AStar(h) => astar_with(h, vis, grid, start, end),
            Self::Dls(limit) => dls(vis, grid, start, end, limit),
            Self::Ids => ids(vis, grid, start, end),
            Self::IdaStar(h) => ida_star_with(h, vis, grid, start, end),
        };
        log::debug!("{self}: {}", if found { "path found" } else { "no path" });
        found
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (name, h) = match *self {
            Self::Bfs => ("BFS", None),
            Self::Dfs => ("DFS", None),
            Self::Ucs => ("UCS", None),
            Self::Greedy(h) => ("Greedy", Some(h)),
            Self::AStar(h) => ("A*", Some(h)),
            Self::Dls(limit) => return write!(f, "DLS ({limit})"),
            Self::Ids => ("IDS", None),
            Self::IdaStar(h) => ("IDA*", Some(h)),
        };
        match h {
            Some(Heuristic::Euclidean) => write!(f, "{name} (euclidean)"),
            _ => f.write_str(name),
        }
    }
}

/// Error returned when parsing a [`Strategy`] from text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseStrategyError {
    #[error("unknown strategy `{0}`")]
    Unknown(String),

    #[error("unknown heuristic `{0}`")]
    Heuristic(String),

    #[error("invalid depth limit `{0}`")]
    Limit(String),

    #[error("strategy `{0}` takes no argument")]
    UnexpectedArgument(String),
}

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    /// Parses `name[:arg]`, case-insensitively.
    ///
    /// Names are `bfs`, `dfs`, `ucs`, `greedy`, `astar`, `dls`, `ids` and
    /// `idastar`. The informed strategies take an optional heuristic
    /// (`astar:euclidean`), `dls` an optional depth limit (`dls:20`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        let (name, arg) = match s.split_once(':') {
            Some((name, arg)) => (name, Some(arg)),
            None => (s.as_str(), None),
        };
        let heuristic = || -> Result<Heuristic, ParseStrategyError> {
            arg.map_or(Ok(Heuristic::Manhattan), |a| {
                a.parse().map_err(ParseStrategyError::Heuristic)
            })
        };
        let bare = |strategy: Strategy| match arg {
            Some(_) => Err(ParseStrategyError::UnexpectedArgument(name.to_string())),
            None => Ok(strategy),
        };

        match name {
            "bfs" => bare(Self::Bfs),
            "dfs" => bare(Self::Dfs),
            "ucs" | "dijkstra" => bare(Self::Ucs),
            "ids" | "iddfs" => bare(Self::Ids),
            "greedy" => Ok(Self::Greedy(heuristic()?)),
            "astar" | "a*" => Ok(Self::AStar(heuristic()?)),
            "idastar" | "ida*" => Ok(Self::IdaStar(heuristic()?)),
            "dls" => match arg {
                None => Ok(Self::Dls(DEFAULT_DEPTH_LIMIT)),
                Some(a) => a
                    .parse()
                    .map(Self::Dls)
                    .map_err(|_| ParseStrategyError::Limit(a.to_string())),
            },
            _ => Err(ParseStrategyError::Unknown(name.to_string())),
        }
    }
}
