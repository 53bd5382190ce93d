//! Canonical game records.

use chrono::DateTime;
use chrono_tz::Tz;
use serde::Serialize;
use serde_json::Value;

/// Coarse game state derived from the feed's free-text status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    PreGame,
    Live,
    Final,
}

impl GameStatus {
    /// Map an ESPN `status.type.name` value.
    ///
    /// Anything not in the table is treated as not yet started.
    pub fn from_espn(name: &str) -> Self {
        match name {
            "STATUS_IN_PROGRESS" | "STATUS_HALFTIME" | "STATUS_END_PERIOD"
            | "STATUS_FIRST_HALF" | "STATUS_SECOND_HALF" | "STATUS_OVERTIME"
            | "STATUS_SHOOTOUT" | "STATUS_RAIN_DELAY" | "STATUS_DELAYED" => GameStatus::Live,
            "STATUS_FINAL" | "STATUS_FINAL_OT" | "STATUS_FINAL_PEN" | "STATUS_FULL_TIME"
            | "STATUS_FINAL_AET" | "STATUS_FORFEIT" | "STATUS_CANCELED" | "STATUS_ABANDONED" => {
                GameStatus::Final
            }
            "STATUS_SCHEDULED" | "STATUS_POSTPONED" | "STATUS_TBD" => GameStatus::PreGame,
            other => {
                tracing::debug!(status = other, "unmapped ESPN status, treating as scheduled");
                GameStatus::PreGame
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GameStatus::PreGame => "Scheduled",
            GameStatus::Live => "Live",
            GameStatus::Final => "Final",
        }
    }
}

/// One scheduled, live or finished game.
///
/// `score` holds `(home, away)` so the two are always present together.
#[derive(Debug, Clone, Serialize)]
pub struct GameRecord {
    pub event_id: String,
    pub league: String,
    pub home_team: String,
    pub away_team: String,
    pub start_time: DateTime<Tz>,
    pub venue: Option<String>,
    pub status: GameStatus,
    pub score: Option<(u32, u32)>,
    /// The untouched feed entry, for callers that need fields not modeled here.
    #[serde(skip_serializing)]
    pub raw_metadata: Value,
}

impl GameRecord {
    pub fn home_score(&self) -> Option<u32> {
        self.score.map(|(home, _)| home)
    }

    pub fn away_score(&self) -> Option<u32> {
        self.score.map(|(_, away)| away)
    }
}
