//! Scoreboard event → [`GameRecord`] normalization.

use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde_json::Value;

use crate::espn::types::{EspnCompetitor, EspnEvent};
use crate::error::{IntelError, Result};
use crate::models::{GameRecord, GameStatus};

/// ESPN timestamps usually omit seconds: "2025-08-09T23:05Z".
const ESPN_MINUTE_FORMAT: &str = "%Y-%m-%dT%H:%MZ";

pub fn parse_espn_time(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, ESPN_MINUTE_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

fn malformed(event_id: &str, what: &str) -> IntelError {
    IntelError::Json(serde::de::Error::custom(format!(
        "event {event_id}: {what}"
    )))
}

fn side<'a>(competitors: &'a [EspnCompetitor], which: &str) -> Option<&'a EspnCompetitor> {
    competitors
        .iter()
        .find(|c| c.home_away.eq_ignore_ascii_case(which))
}

/// Normalize one raw scoreboard entry.
///
/// Fails when the entry is missing its id, start time or either side; the
/// caller decides whether that aborts anything.
pub fn normalize_event(league: &str, raw: &Value, display_tz: Tz) -> Result<GameRecord> {
    let event: EspnEvent = serde_json::from_value(raw.clone())?;

    let start = parse_espn_time(&event.date)
        .ok_or_else(|| malformed(&event.id, &format!("unparseable date '{}'", event.date)))?;

    let competition = event
        .competitions
        .first()
        .ok_or_else(|| malformed(&event.id, "no competitions"))?;
    let home = side(&competition.competitors, "home")
        .ok_or_else(|| malformed(&event.id, "no home competitor"))?;
    let away = side(&competition.competitors, "away")
        .ok_or_else(|| malformed(&event.id, "no away competitor"))?;

    let status = GameStatus::from_espn(&event.status.status_type.name);

    let score = match status {
        GameStatus::PreGame => None,
        GameStatus::Live | GameStatus::Final => {
            let home_score = home.score.as_ref().and_then(|s| s.as_u32());
            let away_score = away.score.as_ref().and_then(|s| s.as_u32());
            home_score.zip(away_score)
        }
    };

    Ok(GameRecord {
        event_id: event.id,
        league: league.to_string(),
        home_team: home.team.display_name.clone(),
        away_team: away.team.display_name.clone(),
        start_time: start.with_timezone(&display_tz),
        venue: competition.venue.as_ref().and_then(|v| v.full_name.clone()),
        status,
        score,
        raw_metadata: raw.clone(),
    })
}

/// Normalize a whole slate, skipping (and logging) entries that do not parse.
pub fn normalize_events(league: &str, events: &[Value], display_tz: Tz) -> Vec<GameRecord> {
    events
        .iter()
        .filter_map(|raw| match normalize_event(league, raw, display_tz) {
            Ok(game) => Some(game),
            Err(e) => {
                tracing::warn!(league, error = %e, "skipping unparseable schedule entry");
                None
            }
        })
        .collect()
}
