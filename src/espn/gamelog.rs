//! Flattened athlete game logs.

use chrono::{DateTime, Utc};
use std::collections::HashSet;

use crate::espn::normalize::parse_espn_time;
use crate::espn::types::GameLogResponse;

#[derive(Debug, Clone, PartialEq)]
pub struct GameLogEntry {
    pub event_id: String,
    pub date: Option<DateTime<Utc>>,
    pub stats: Vec<String>,
}

/// One athlete's per-game stat lines, most recent game first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameLog {
    pub labels: Vec<String>,
    pub entries: Vec<GameLogEntry>,
}

impl GameLog {
    /// Flatten the season-type / category nesting, drop repeated events and
    /// sort newest first (undated entries last, in feed order).
    pub fn from_response(response: GameLogResponse) -> Self {
        let mut seen = HashSet::new();
        let mut entries: Vec<GameLogEntry> = response
            .season_types
            .into_iter()
            .flat_map(|st| st.categories)
            .flat_map(|c| c.events)
            .filter(|e| seen.insert(e.event_id.clone()))
            .map(|e| {
                let date = response
                    .events
                    .get(&e.event_id)
                    .and_then(|meta| meta.game_date.as_deref())
                    .and_then(parse_espn_time);
                GameLogEntry {
                    event_id: e.event_id,
                    date,
                    stats: e.stats,
                }
            })
            .collect();

        // stable: ties and undated entries keep feed order
        entries.sort_by(|a, b| match (a.date, b.date) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });

        Self {
            labels: response.labels,
            entries,
        }
    }

    /// Values of one column, most recent first. Made-attempted cells such as
    /// "7-15" yield the made count; unparseable cells are skipped.
    pub fn values(&self, label: &str) -> Vec<f64> {
        let Some(idx) = self.labels.iter().position(|l| l.eq_ignore_ascii_case(label)) else {
            return Vec::new();
        };

        self.entries
            .iter()
            .filter_map(|e| e.stats.get(idx))
            .filter_map(|cell| parse_stat_cell(cell))
            .collect()
    }
}

fn parse_stat_cell(cell: &str) -> Option<f64> {
    let head = cell.split('-').next()?.trim();
    head.parse::<f64>().ok()
}
