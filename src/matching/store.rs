//! Confirmed / pending / rejected player identities, persisted as two JSON
//! documents shaped `{ sport_key: { odds_name: record } }`.
//!
//! `confirmed_matches.json` holds confirmed records; `pending_review.json`
//! holds pending and rejected ones. Both are read fully on open and written
//! fully on every mutation. All access goes through one mutex, so concurrent
//! callers in this process never interleave a read-modify-write.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard, PoisonError},
};

use crate::core::{try_read_to_string, write_string};
use crate::error::IntelError;
use crate::Result;


pub const CONFIRMED_FILE: &str = "confirmed_matches.json";
pub const PENDING_FILE: &str = "pending_review.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityState {
    Confirmed,
    Pending,
    Rejected,
}

/// One odds-feed player name resolved to an ESPN athlete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerIdentityRecord {
    pub odds_name: String,
    pub espn_id: String,
    pub espn_name: String,
    pub team: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    pub confidence: f64,
    pub state: IdentityState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejected_at: Option<DateTime<Utc>>,
}

type Partition = BTreeMap<String, BTreeMap<String, PlayerIdentityRecord>>;

#[derive(Debug, Default)]
struct StoreState {
    confirmed: Partition,
    pending: Partition,
}

#[derive(Debug)]
pub struct IdentityStore {
    confirmed_path: PathBuf,
    pending_path: PathBuf,
    state: Mutex<StoreState>,
}

fn load_partition(path: &Path) -> Result<Partition> {
    match try_read_to_string(path) {
        None => Ok(Partition::new()),
        Some(contents) if contents.trim().is_empty() => Ok(Partition::new()),
        Some(contents) => serde_json::from_str(&contents).map_err(|e| IntelError::Store {
            message: format!("{}: {e}", path.display()),
        }),
    }
}

fn save_partition(path: &Path, partition: &Partition) -> Result<()> {
    let json = serde_json::to_string_pretty(partition)?;
    write_string(path, &json)?;
    Ok(())
}

impl IdentityStore {
    /// Open (or start empty) the store files under `dir`.
    ///
    /// Missing files are an empty store; unparseable files are an error so a
    /// corrupted document is never silently overwritten.
    pub fn open(dir: &Path) -> Result<Self> {
        let confirmed_path = dir.join(CONFIRMED_FILE);
        let pending_path = dir.join(PENDING_FILE);

        let state = StoreState {
            confirmed: load_partition(&confirmed_path)?,
            pending: load_partition(&pending_path)?,
        };
        tracing::debug!(
            confirmed = state.confirmed.values().map(BTreeMap::len).sum::<usize>(),
            pending = state.pending.values().map(BTreeMap::len).sum::<usize>(),
            dir = %dir.display(),
            "identity store opened"
        );

        Ok(Self {
            confirmed_path,
            pending_path,
            state: Mutex::new(state),
        })
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn confirmed(&self, sport_key: &str, odds_name: &str) -> Option<PlayerIdentityRecord> {
        self.lock()
            .confirmed
            .get(sport_key)
            .and_then(|m| m.get(odds_name))
            .cloned()
    }

    /// Confirmed lookup that refreshes `last_seen_at` and persists on a hit.
    pub fn touch_confirmed(
        &self,
        sport_key: &str,
        odds_name: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<PlayerIdentityRecord>> {
        let mut state = self.lock();
        let Some(record) = state
            .confirmed
            .get_mut(sport_key)
            .and_then(|m| m.get_mut(odds_name))
        else {
            return Ok(None);
        };

        record.last_seen_at = now;
        let hit = record.clone();
        save_partition(&self.confirmed_path, &state.confirmed)?;
        Ok(Some(hit))
    }

    /// Pending-partition lookup. Rejected records are returned too; callers
    /// check `state`.
    pub fn pending(&self, sport_key: &str, odds_name: &str) -> Option<PlayerIdentityRecord> {
        self.lock()
            .pending
            .get(sport_key)
            .and_then(|m| m.get(odds_name))
            .cloned()
    }

    /// Record a fuzzy hit for review. Returns `false` without writing when the
    /// key is already confirmed.
    pub fn insert_pending(&self, sport_key: &str, record: PlayerIdentityRecord) -> Result<bool> {
        let mut state = self.lock();
        if state
            .confirmed
            .get(sport_key)
            .is_some_and(|m| m.contains_key(&record.odds_name))
        {
            return Ok(false);
        }

        state
            .pending
            .entry(sport_key.to_string())
            .or_default()
            .insert(record.odds_name.clone(), record);
        save_partition(&self.pending_path, &state.pending)?;
        Ok(true)
    }

    /// Store a confirmed record and drop any pending or rejected record for
    /// the same key. Both documents are rewritten.
    pub fn confirm(&self, sport_key: &str, record: PlayerIdentityRecord) -> Result<()> {
        let mut state = self.lock();
        let odds_name = record.odds_name.clone();

        if let Some(m) = state.pending.get_mut(sport_key) {
            m.remove(&odds_name);
            if m.is_empty() {
                state.pending.remove(sport_key);
            }
        }
        state
            .confirmed
            .entry(sport_key.to_string())
            .or_default()
            .insert(odds_name, record);

        save_partition(&self.confirmed_path, &state.confirmed)?;
        save_partition(&self.pending_path, &state.pending)?;
        Ok(())
    }

    /// Mark a pending record rejected in place. Returns whether one existed.
    pub fn reject(&self, sport_key: &str, odds_name: &str, now: DateTime<Utc>) -> Result<bool> {
        let mut state = self.lock();
        let Some(record) = state
            .pending
            .get_mut(sport_key)
            .and_then(|m| m.get_mut(odds_name))
        else {
            return Ok(false);
        };

        record.state = IdentityState::Rejected;
        record.rejected_at = Some(now);
        save_partition(&self.pending_path, &state.pending)?;
        Ok(true)
    }

    /// Records awaiting review as `(sport_key, record)`, optionally for one
    /// sport. Rejected records are excluded.
    pub fn pending_records(&self, sport_key: Option<&str>) -> Vec<(String, PlayerIdentityRecord)> {
        self.lock()
            .pending
            .iter()
            .filter(|(sport, _)| sport_key.map_or(true, |k| k == sport.as_str()))
            .flat_map(|(sport, m)| m.values().map(move |r| (sport.clone(), r.clone())))
            .filter(|(_, r)| r.state == IdentityState::Pending)
            .collect()
    }
}
