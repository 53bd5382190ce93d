//! Per-league fetch outcomes and the error reports projected from them.

use serde::Serialize;
use serde_json::Value;

use super::GameRecord;

/// Why a league fetch failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LeagueErrorKind {
    Validation,
    Server,
    Unexpected,
    Task,
}

/// Outcome of one league's fetch-and-normalize cycle.
///
/// Built only through [`LeagueDataResult::succeeded`] and
/// [`LeagueDataResult::failed`]: a failed result never carries games and
/// always carries both an error message and a kind.
#[derive(Debug, Clone, Serialize)]
pub struct LeagueDataResult {
    league: String,
    games: Vec<GameRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    teams_snapshot: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<(LeagueErrorKind, String)>,
}

impl LeagueDataResult {
    pub fn succeeded(
        league: impl Into<String>,
        games: Vec<GameRecord>,
        teams_snapshot: Option<Value>,
    ) -> Self {
        Self {
            league: league.into(),
            games,
            teams_snapshot,
            error: None,
        }
    }

    pub fn failed(
        league: impl Into<String>,
        kind: LeagueErrorKind,
        error: impl Into<String>,
    ) -> Self {
        Self {
            league: league.into(),
            games: Vec::new(),
            teams_snapshot: None,
            error: Some((kind, error.into())),
        }
    }

    pub fn league(&self) -> &str {
        &self.league
    }

    pub fn success(&self) -> bool {
        self.error.is_none()
    }

    pub fn games(&self) -> &[GameRecord] {
        &self.games
    }

    pub fn teams_snapshot(&self) -> Option<&Value> {
        self.teams_snapshot.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_ref().map(|(_, msg)| msg.as_str())
    }

    pub fn error_kind(&self) -> Option<LeagueErrorKind> {
        self.error.as_ref().map(|(kind, _)| *kind)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Medium,
    High,
}

/// One failed league, as surfaced to reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorReport {
    pub league: String,
    pub kind: LeagueErrorKind,
    pub severity: Severity,
    pub message: String,
}
