//! Runtime settings read from the environment.
//!
//! Every value has a default, so an empty environment is a valid
//! configuration; only the value-bet command needs `ODDS_API_KEY`.

use chrono_tz::Tz;
use std::{path::PathBuf, str::FromStr, time::Duration};

use crate::core::files::{default_data_dir, default_roster_dir};
use crate::error::IntelError;
use crate::error_handler::HandlerConfig;
use crate::orchestrator::DEFAULT_MAX_CONCURRENCY;
use crate::Result;


pub const DATA_DIR_ENV_VAR: &str = "SPORTS_INTEL_DATA_DIR";
pub const ROSTER_DIR_ENV_VAR: &str = "SPORTS_INTEL_ROSTER_DIR";
pub const ODDS_API_KEY_ENV_VAR: &str = "ODDS_API_KEY";
pub const MAX_CONCURRENCY_ENV_VAR: &str = "SPORTS_INTEL_MAX_CONCURRENCY";
pub const TIMEOUT_ENV_VAR: &str = "SPORTS_INTEL_TIMEOUT_SECS";
pub const MAX_RETRIES_ENV_VAR: &str = "SPORTS_INTEL_MAX_RETRIES";
pub const RETRY_BASE_ENV_VAR: &str = "SPORTS_INTEL_RETRY_BASE_MS";
pub const TIMEZONE_ENV_VAR: &str = "SPORTS_INTEL_TIMEZONE";
pub const LEAGUES_ENV_VAR: &str = "SPORTS_INTEL_LEAGUES";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_RETRY_BASE_MS: u64 = 1000;
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::New_York;
pub const DEFAULT_LEAGUES: &[&str] = &["nba", "wnba", "nfl", "mlb", "nhl"];

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Holds `confirmed_matches.json` and `pending_review.json`.
    pub data_dir: PathBuf,
    pub roster_dir: PathBuf,
    pub odds_api_key: Option<String>,
    pub max_concurrency: usize,
    pub request_timeout: Duration,
    pub max_retries: u32,
    pub retry_base_delay: Duration,
    pub display_tz: Tz,
    pub leagues: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            roster_dir: default_roster_dir(),
            odds_api_key: None,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_base_delay: Duration::from_millis(DEFAULT_RETRY_BASE_MS),
            display_tz: DEFAULT_TIMEZONE,
            leagues: DEFAULT_LEAGUES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

fn parse_var<T: FromStr>(name: &str, raw: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e| IntelError::Config {
        message: format!("{name}={raw:?}: {e}"),
    })
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut config = Config::default();

        if let Some(dir) = get(DATA_DIR_ENV_VAR) {
            config.data_dir = PathBuf::from(dir);
            config.roster_dir = config.data_dir.join("rosters");
        }
        if let Some(dir) = get(ROSTER_DIR_ENV_VAR) {
            config.roster_dir = PathBuf::from(dir);
        }
        config.odds_api_key = get(ODDS_API_KEY_ENV_VAR).map(|k| k.trim().to_string());

        if let Some(raw) = get(MAX_CONCURRENCY_ENV_VAR) {
            config.max_concurrency = parse_var(MAX_CONCURRENCY_ENV_VAR, &raw)?;
            if config.max_concurrency == 0 {
                return Err(IntelError::Config {
                    message: format!("{MAX_CONCURRENCY_ENV_VAR} must be at least 1"),
                });
            }
        }
        if let Some(raw) = get(TIMEOUT_ENV_VAR) {
            config.request_timeout = Duration::from_secs(parse_var(TIMEOUT_ENV_VAR, &raw)?);
        }
        if let Some(raw) = get(MAX_RETRIES_ENV_VAR) {
            config.max_retries = parse_var(MAX_RETRIES_ENV_VAR, &raw)?;
        }
        if let Some(raw) = get(RETRY_BASE_ENV_VAR) {
            config.retry_base_delay = Duration::from_millis(parse_var(RETRY_BASE_ENV_VAR, &raw)?);
        }
        if let Some(raw) = get(TIMEZONE_ENV_VAR) {
            config.display_tz = parse_var(TIMEZONE_ENV_VAR, &raw)?;
        }
        if let Some(raw) = get(LEAGUES_ENV_VAR) {
            config.leagues = raw
                .split(',')
                .map(|s| s.trim().to_ascii_lowercase())
                .filter(|s| !s.is_empty())
                .collect();
        }

        Ok(config)
    }

    pub fn handler_config(&self) -> HandlerConfig {
        HandlerConfig {
            max_retries: self.max_retries,
            base_delay: self.retry_base_delay,
        }
    }
}
