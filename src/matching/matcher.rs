//! Three-tier player resolution: confirmed, then pending, then fuzzy against
//! the ESPN roster, writing new fuzzy hits back as pending.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::fuzzy::best_match;
use super::roster::RosterStore;
use super::store::{IdentityState, IdentityStore, PlayerIdentityRecord};
use crate::leagues;
use crate::Result;

#[cfg(test)]
mod tests;

/// Which tier answered a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchSource {
    Confirmed,
    Pending,
    Fuzzy,
}

impl std::fmt::Display for MatchSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            MatchSource::Confirmed => "confirmed",
            MatchSource::Pending => "pending",
            MatchSource::Fuzzy => "fuzzy",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerMatch {
    pub record: PlayerIdentityRecord,
    pub source: MatchSource,
}

pub struct PlayerMatcher {
    store: IdentityStore,
    rosters: RosterStore,
}

impl PlayerMatcher {
    pub fn new(store: IdentityStore, rosters: RosterStore) -> Self {
        Self { store, rosters }
    }

    pub fn store(&self) -> &IdentityStore {
        &self.store
    }

    pub fn rosters(&self) -> &RosterStore {
        &self.rosters
    }

    /// Resolve `odds_name` for an odds sport key such as `basketball_nba`.
    pub fn match_player(&self, odds_name: &str, sport_key: &str) -> Result<Option<PlayerMatch>> {
        self.match_player_at(odds_name, sport_key, Utc::now())
    }

    pub fn match_player_at(
        &self,
        odds_name: &str,
        sport_key: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<PlayerMatch>> {
        if let Some(record) = self.store.touch_confirmed(sport_key, odds_name, now)? {
            return Ok(Some(PlayerMatch {
                record,
                source: MatchSource::Confirmed,
            }));
        }

        if let Some(record) = self.store.pending(sport_key, odds_name) {
            if record.state == IdentityState::Rejected {
                tracing::debug!(odds_name, sport_key, "previously rejected, not rematching");
                return Ok(None);
            }
            return Ok(Some(PlayerMatch {
                record,
                source: MatchSource::Pending,
            }));
        }

        let Some(league) = leagues::odds_sport(sport_key) else {
            tracing::debug!(sport_key, "no ESPN league for sport key");
            return Ok(None);
        };

        let roster = self.rosters.roster(league);
        let Some(hit) = best_match(odds_name, &roster) else {
            tracing::debug!(odds_name, sport_key, candidates = roster.len(), "no fuzzy match");
            return Ok(None);
        };

        let record = PlayerIdentityRecord {
            odds_name: odds_name.to_string(),
            espn_id: hit.entry.id.clone(),
            espn_name: hit.entry.name.clone(),
            team: hit.entry.team.clone(),
            position: hit.entry.position.clone(),
            confidence: hit.confidence,
            state: IdentityState::Pending,
            verified_by: None,
            created_at: now,
            last_seen_at: now,
            verified_at: None,
            rejected_at: None,
        };

        if self.store.insert_pending(sport_key, record.clone())? {
            tracing::info!(
                odds_name,
                espn_name = %record.espn_name,
                confidence = record.confidence,
                "fuzzy match queued for review"
            );
        }

        Ok(Some(PlayerMatch {
            record,
            source: MatchSource::Fuzzy,
        }))
    }

    /// Manually confirm `odds_name` as ESPN athlete `espn_id`.
    ///
    /// Returns `false` when the sport is unknown, `verified_by` is blank, or
    /// the id is not on the league roster.
    pub fn confirm(
        &self,
        odds_name: &str,
        sport_key: &str,
        espn_id: &str,
        verified_by: &str,
    ) -> Result<bool> {
        self.confirm_at(odds_name, sport_key, espn_id, verified_by, Utc::now())
    }

    pub fn confirm_at(
        &self,
        odds_name: &str,
        sport_key: &str,
        espn_id: &str,
        verified_by: &str,
        now: DateTime<Utc>,
    ) -> Result<bool> {
        if verified_by.trim().is_empty() {
            tracing::warn!(odds_name, "confirmation requires a verifier");
            return Ok(false);
        }
        let Some(league) = leagues::odds_sport(sport_key) else {
            tracing::warn!(sport_key, "unknown sport key");
            return Ok(false);
        };
        let Some(entry) = self.rosters.find_by_id(league, espn_id) else {
            tracing::warn!(espn_id, %league, "ESPN id not found on roster");
            return Ok(false);
        };

        let created_at = self
            .store
            .pending(sport_key, odds_name)
            .map_or(now, |r| r.created_at);

        self.store.confirm(
            sport_key,
            PlayerIdentityRecord {
                odds_name: odds_name.to_string(),
                espn_id: entry.id,
                espn_name: entry.name,
                team: entry.team,
                position: entry.position,
                confidence: 1.0,
                state: IdentityState::Confirmed,
                verified_by: Some(verified_by.to_string()),
                created_at,
                last_seen_at: now,
                verified_at: Some(now),
                rejected_at: None,
            },
        )?;
        tracing::info!(odds_name, espn_id, verified_by, "match confirmed");
        Ok(true)
    }

    pub fn reject(&self, odds_name: &str, sport_key: &str) -> Result<bool> {
        self.store.reject(sport_key, odds_name, Utc::now())
    }

    pub fn pending(&self, sport_key: Option<&str>) -> Vec<(String, PlayerIdentityRecord)> {
        self.store.pending_records(sport_key)
    }
}
