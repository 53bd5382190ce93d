//! Concurrent per-league schedule fetches behind a shared semaphore.

use async_trait::async_trait;
use chrono::NaiveDate;
use chrono_tz::Tz;
use serde_json::Value;
use std::{collections::BTreeMap, sync::Arc};
use tokio::sync::Semaphore;

use crate::cli::types::GameDate;
use crate::error::IntelError;
use crate::espn::normalize::normalize_events;
use crate::leagues::{self, EspnLeague};
use crate::models::{ErrorReport, LeagueDataResult, LeagueErrorKind, Severity};
use crate::Result;


pub const DEFAULT_MAX_CONCURRENCY: usize = 5;

/// Where schedules and team listings come from.
#[async_trait]
pub trait ScheduleSource: Send + Sync {
    async fn schedule(&self, league: EspnLeague, date: GameDate) -> Result<Vec<Value>>;
    async fn teams(&self, league: EspnLeague) -> Result<Value>;
}

/// Everything one league task needs, cheap to clone into a spawned task.
#[derive(Clone)]
struct LeagueFetcher {
    source: Arc<dyn ScheduleSource>,
    semaphore: Arc<Semaphore>,
    display_tz: Tz,
}

impl LeagueFetcher {
    async fn fetch(&self, key: &str, date: GameDate) -> LeagueDataResult {
        let Some(league) = leagues::league(key) else {
            return LeagueDataResult::failed(
                key,
                LeagueErrorKind::Validation,
                IntelError::UnknownLeague {
                    league: key.to_string(),
                }
                .to_string(),
            );
        };

        // held until this function returns, success or not
        let Ok(_permit) = self.semaphore.acquire().await else {
            return LeagueDataResult::failed(key, LeagueErrorKind::Unexpected, "semaphore closed");
        };

        let events = match self.source.schedule(league, date).await {
            Ok(events) => events,
            Err(e) => {
                let kind = classify(&e);
                tracing::warn!(league = key, ?kind, error = %e, "schedule fetch failed");
                return LeagueDataResult::failed(key, kind, e.to_string());
            }
        };

        let teams = match self.source.teams(league).await {
            Ok(teams) => Some(teams),
            Err(e) => {
                tracing::debug!(league = key, error = %e, "teams snapshot unavailable");
                None
            }
        };

        let games = normalize_events(key, &events, self.display_tz);
        tracing::info!(league = key, games = games.len(), raw = events.len(), "league fetched");
        LeagueDataResult::succeeded(key, games, teams)
    }
}

fn classify(err: &IntelError) -> LeagueErrorKind {
    if err.is_validation() {
        return LeagueErrorKind::Validation;
    }
    match err {
        IntelError::UpstreamServer { .. }
        | IntelError::Timeout { .. }
        | IntelError::RateLimited { .. } => LeagueErrorKind::Server,
        _ => LeagueErrorKind::Unexpected,
    }
}

pub struct DataOrchestrator {
    fetcher: LeagueFetcher,
    leagues: Vec<String>,
}

impl DataOrchestrator {
    pub fn new(
        source: Arc<dyn ScheduleSource>,
        max_concurrency: usize,
        leagues: Vec<String>,
        display_tz: Tz,
    ) -> Self {
        Self {
            fetcher: LeagueFetcher {
                source,
                semaphore: Arc::new(Semaphore::new(max_concurrency.max(1))),
                display_tz,
            },
            leagues,
        }
    }

    pub async fn fetch_all_leagues_data(
        &self,
        target_date: &str,
        leagues: Option<&[String]>,
    ) -> Result<BTreeMap<String, LeagueDataResult>> {
        self.fetch_all_leagues_data_at(target_date, leagues, GameDate::today().as_naive())
            .await
    }

    /// Fetch every requested league for `target_date`.
    ///
    /// The date is checked against `today` before any request is made.
    /// Unknown league keys are dropped with a warning; if none remain the
    /// call fails. A league whose task panics is reported as a `Task`
    /// failure without affecting the others.
    pub async fn fetch_all_leagues_data_at(
        &self,
        target_date: &str,
        leagues: Option<&[String]>,
        today: NaiveDate,
    ) -> Result<BTreeMap<String, LeagueDataResult>> {
        let date = GameDate::parse_within(target_date, today)?;

        let requested = leagues.unwrap_or(&self.leagues);
        let mut keys: Vec<String> = Vec::new();
        for raw in requested {
            let key = raw.trim().to_ascii_lowercase();
            if !leagues::is_known_league(&key) {
                tracing::warn!(league = %raw, "unknown league, skipping");
                continue;
            }
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        if keys.is_empty() {
            return Err(IntelError::NoLeagues {
                requested: requested.to_vec(),
            });
        }

        tracing::info!(%date, leagues = keys.len(), "fetching league data");

        let handles: Vec<_> = keys
            .into_iter()
            .map(|key| {
                let fetcher = self.fetcher.clone();
                let task_key = key.clone();
                let handle = tokio::spawn(async move { fetcher.fetch(&task_key, date).await });
                (key, handle)
            })
            .collect();

        let mut results = BTreeMap::new();
        for (key, handle) in handles {
            let result = match handle.await {
                Ok(result) => result,
                Err(e) => {
                    tracing::error!(league = %key, error = %e, "league task failed");
                    LeagueDataResult::failed(key.as_str(), LeagueErrorKind::Task, e.to_string())
                }
            };
            results.insert(key, result);
        }
        Ok(results)
    }

    /// Fetch one league, holding one concurrency slot for the duration.
    pub async fn fetch_league_data(&self, league: &str, date: GameDate) -> LeagueDataResult {
        self.fetcher.fetch(league, date).await
    }
}

/// One report per failed league: `Medium` for validation failures, `High`
/// otherwise.
pub fn aggregate_errors<'a>(
    results: impl IntoIterator<Item = &'a LeagueDataResult>,
) -> Vec<ErrorReport> {
    results
        .into_iter()
        .filter_map(|r| {
            let kind = r.error_kind()?;
            let severity = match kind {
                LeagueErrorKind::Validation => Severity::Medium,
                _ => Severity::High,
            };
            Some(ErrorReport {
                league: r.league().to_string(),
                kind,
                severity,
                message: r.error().unwrap_or_default().to_string(),
            })
        })
        .collect()
}
