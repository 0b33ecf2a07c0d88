//! The pathviz driver: configuration, map loading and generation, and
//! running a strategy headless or in the terminal.

pub mod config;
pub mod error;
pub mod mapgen;
pub mod run;

pub use config::RunConfig;
pub use error::{Error, Result};
pub use run::Outcome;
