//! Roster snapshots loaded from `<root>/<sport>/**/*.json`, narrowed to
//! `<root>/<sport>/<league>/` when that directory exists.
//!
//! Each file holds one team: either an array of player objects or an object
//! with an `athletes` array. The file stem, with `_` read as a space, is the
//! team name.

use lru::LruCache;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{
    num::NonZeroUsize,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, PoisonError},
};

use crate::core::{collect_json_files, try_read_to_string};
use crate::leagues::EspnLeague;

#[cfg(test)]
mod tests;

/// More slots than there are leagues, so nothing is evicted in practice.
const ROSTER_CACHE_CAPACITY: NonZeroUsize = match NonZeroUsize::new(16) {
    Some(n) => n,
    None => panic!("roster cache capacity must be non-zero"),
};

/// One athlete on one team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub id: String,
    pub name: String,
    pub team: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawPlayer {
    id: Value,
    #[serde(default)]
    name: Option<String>,
    #[serde(rename = "fullName", default)]
    full_name: Option<String>,
    #[serde(rename = "displayName", default)]
    display_name: Option<String>,
    #[serde(default)]
    position: Option<RawPosition>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawPosition {
    Abbreviation(String),
    Detailed {
        abbreviation: Option<String>,
        name: Option<String>,
    },
}

impl RawPlayer {
    fn into_entry(self, team: &str) -> Option<RosterEntry> {
        let id = match self.id {
            Value::String(s) if !s.is_empty() => s,
            Value::Number(n) => n.to_string(),
            _ => return None,
        };
        let name = self.name.or(self.full_name).or(self.display_name)?;
        let position = self.position.and_then(|p| match p {
            RawPosition::Abbreviation(s) => Some(s),
            RawPosition::Detailed { abbreviation, name } => abbreviation.or(name),
        });

        Some(RosterEntry {
            id,
            name,
            team: team.to_string(),
            position,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RosterFile {
    Players(Vec<Value>),
    Wrapped { athletes: Vec<Value> },
}

fn team_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().replace('_', " "))
        .unwrap_or_default()
}

/// Parse one team file. Unreadable or malformed files yield nothing;
/// individual malformed players are dropped.
pub fn parse_roster_file(path: &Path) -> Vec<RosterEntry> {
    let Some(contents) = try_read_to_string(path) else {
        tracing::warn!(path = %path.display(), "unreadable roster file, skipping");
        return Vec::new();
    };

    let players = match serde_json::from_str::<RosterFile>(&contents) {
        Ok(RosterFile::Players(players)) | Ok(RosterFile::Wrapped { athletes: players }) => {
            players
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "malformed roster file, skipping");
            return Vec::new();
        }
    };

    let team = team_from_path(path);
    players
        .into_iter()
        .filter_map(|raw| {
            serde_json::from_value::<RawPlayer>(raw)
                .ok()
                .and_then(|p| p.into_entry(&team))
        })
        .collect()
}

/// Load every team file under `dir`. File order (sorted by path) and the
/// order of players within each file are preserved.
pub fn load_roster_dir(dir: &Path) -> Vec<RosterEntry> {
    collect_json_files(dir)
        .par_iter()
        .map(|path| parse_roster_file(path))
        .collect::<Vec<_>>()
        .into_iter()
        .flatten()
        .collect()
}

/// Lazily loaded, cached rosters keyed by ESPN league.
pub struct RosterStore {
    root: PathBuf,
    cache: Arc<Mutex<LruCache<EspnLeague, Arc<[RosterEntry]>>>>,
}

impl RosterStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: Arc::new(Mutex::new(LruCache::new(ROSTER_CACHE_CAPACITY))),
        }
    }

    /// Directory scanned for `league`: `<root>/<sport>/<league>` when it
    /// exists, otherwise the whole `<root>/<sport>` tree.
    pub fn dir_for(&self, league: EspnLeague) -> PathBuf {
        let sport_dir = self.root.join(league.sport);
        let league_dir = sport_dir.join(league.league);
        if league_dir.is_dir() {
            league_dir
        } else {
            sport_dir
        }
    }

    /// The roster for `league`, loading it from disk on first use.
    pub fn roster(&self, league: EspnLeague) -> Arc<[RosterEntry]> {
        if let Some(hit) = self
            .cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&league)
        {
            return Arc::clone(hit);
        }

        let dir = self.dir_for(league);
        let loaded: Arc<[RosterEntry]> = load_roster_dir(&dir).into();
        tracing::debug!(%league, players = loaded.len(), dir = %dir.display(), "roster loaded");
        if loaded.is_empty() {
            tracing::warn!(%league, dir = %dir.display(), "no roster entries found");
        }

        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .put(league, Arc::clone(&loaded));
        loaded
    }

    pub fn find_by_id(&self, league: EspnLeague, espn_id: &str) -> Option<RosterEntry> {
        self.roster(league).iter().find(|e| e.id == espn_id).cloned()
    }

    /// Drop cached rosters so the next lookup re-reads the directory.
    pub fn invalidate(&self) {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
