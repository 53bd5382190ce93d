//! Domain records produced by the orchestration and analysis layers.

pub mod game;
pub mod league;

pub use game::{GameRecord, GameStatus};
pub use league::{ErrorReport, LeagueDataResult, LeagueErrorKind, Severity};
