//! ESPN wire types: serde shapes for the scoreboard, teams and game-log feeds.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashMap;


/// ESPN sends some numbers as strings and some as numbers.
fn de_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Str(s) => s,
        Raw::Int(i) => i.to_string(),
        Raw::Float(f) => f.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Scoreboard  (site v2 API)
// ---------------------------------------------------------------------------

/// Events are kept raw so a single malformed entry can be skipped without
/// losing the rest of the slate.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScoreboardResponse {
    #[serde(default)]
    pub events: Vec<Value>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnEvent {
    #[serde(deserialize_with = "de_string_or_number")]
    pub id: String,
    pub date: String,
    #[serde(default)]
    pub name: Option<String>,
    pub status: EspnStatus,
    #[serde(default)]
    pub competitions: Vec<EspnCompetition>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnStatus {
    #[serde(rename = "type")]
    pub status_type: EspnStatusType,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnStatusType {
    /// "STATUS_SCHEDULED", "STATUS_IN_PROGRESS", "STATUS_FINAL", ...
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnCompetition {
    #[serde(default)]
    pub competitors: Vec<EspnCompetitor>,
    #[serde(default)]
    pub venue: Option<EspnVenue>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnCompetitor {
    /// "home" | "away"
    #[serde(rename = "homeAway")]
    pub home_away: String,
    pub team: EspnTeam,
    #[serde(default)]
    pub score: Option<EspnScore>,
}

/// Scoreboard scores are strings; some endpoints send an object instead.
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum EspnScore {
    Text(String),
    Number(f64),
    Detailed { value: f64 },
}

impl EspnScore {
    pub fn as_u32(&self) -> Option<u32> {
        let value = match self {
            EspnScore::Text(s) => s.trim().parse::<f64>().ok()?,
            EspnScore::Number(n) | EspnScore::Detailed { value: n } => *n,
        };
        (value >= 0.0 && value.fract() == 0.0).then_some(value as u32)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnTeam {
    #[serde(default, deserialize_with = "de_opt_string_or_number")]
    pub id: Option<String>,
    #[serde(rename = "displayName")]
    pub display_name: String,
    #[serde(default)]
    pub abbreviation: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnVenue {
    #[serde(rename = "fullName", default)]
    pub full_name: Option<String>,
}

fn de_opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Wrapper(#[serde(deserialize_with = "de_string_or_number")] String);

    Ok(Option::<Wrapper>::deserialize(deserializer)?.map(|w| w.0))
}

// ---------------------------------------------------------------------------
// Athlete game log  (common v3 API)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct GameLogResponse {
    /// Column labels, e.g. ["MIN", "FG", "FG%", ..., "PTS"]
    #[serde(default)]
    pub labels: Vec<String>,
    /// Per-event metadata keyed by event id.
    #[serde(default)]
    pub events: HashMap<String, GameLogEventMeta>,
    #[serde(rename = "seasonTypes", default)]
    pub season_types: Vec<GameLogSeasonType>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GameLogEventMeta {
    #[serde(rename = "gameDate", default)]
    pub game_date: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GameLogSeasonType {
    #[serde(default)]
    pub categories: Vec<GameLogCategory>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GameLogCategory {
    #[serde(default)]
    pub events: Vec<GameLogEventStats>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GameLogEventStats {
    #[serde(rename = "eventId", deserialize_with = "de_string_or_number")]
    pub event_id: String,
    #[serde(default)]
    pub stats: Vec<String>,
}
