pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::{JsonFileStore, MemoryStore};
pub use crate::core::{
    keeper::ScoreKeeper,
    merge::{FullFormEntry, HoleMerger},
    parser::parse_line,
    round::NewRound,
    scorecard::Scorecard,
    selection::HoleSelection,
};
pub use domain::model::{HoleStats, PartialHoleUpdate, Round, TeeBox};
pub use utils::error::{ParseError, Result, ScorecardError};
