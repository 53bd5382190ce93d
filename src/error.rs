//! Error types for sports-intel

use std::time::Duration;

use thiserror::Error;


pub type Result<T> = std::result::Result<T, IntelError>;

/// Third-party feed an upstream failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataSource {
    Espn,
    OddsApi,
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataSource::Espn => write!(f, "ESPN"),
            DataSource::OddsApi => write!(f, "The Odds API"),
        }
    }
}

#[derive(Error, Debug)]
pub enum IntelError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Invalid date '{input}': {reason}")]
    InvalidDate { input: String, reason: String },

    #[error("Unknown league: {league}")]
    UnknownLeague { league: String },

    #[error("No valid leagues to fetch (requested: {requested:?})")]
    NoLeagues { requested: Vec<String> },

    /// The upstream answered with a 4xx: the request itself was wrong.
    #[error("{feed} rejected the request ({status}): {message}")]
    UpstreamValidation {
        feed: DataSource,
        status: u16,
        message: String,
    },

    /// The upstream answered with a 5xx or could not be reached.
    #[error("{feed} server error{}: {message}", status_suffix(.status))]
    UpstreamServer {
        feed: DataSource,
        status: Option<u16>,
        message: String,
    },

    #[error("Request to {feed} timed out")]
    Timeout { feed: DataSource },

    #[error("Rate limited by {feed}{}", retry_after_suffix(.retry_after))]
    RateLimited {
        feed: DataSource,
        retry_after: Option<Duration>,
    },

    #[error("Analysis failed: {message}")]
    Analysis { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Identity store error: {message}")]
    Store { message: String },

    #[error("League task failed: {message}")]
    Task { message: String },
}

impl IntelError {
    /// True for errors caused by the caller's input rather than the environment.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            IntelError::InvalidDate { .. }
                | IntelError::UnknownLeague { .. }
                | IntelError::NoLeagues { .. }
                | IntelError::UpstreamValidation { .. }
        )
    }

    /// The feed an error originated from, if it came from one.
    pub fn data_source(&self) -> Option<DataSource> {
        match self {
            IntelError::UpstreamValidation { feed, .. }
            | IntelError::UpstreamServer { feed, .. }
            | IntelError::Timeout { feed }
            | IntelError::RateLimited { feed, .. } => Some(*feed),
            _ => None,
        }
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" ({s})")).unwrap_or_default()
}

fn retry_after_suffix(retry_after: &Option<Duration>) -> String {
    retry_after
        .map(|d| format!(", retry after {}s", d.as_secs()))
        .unwrap_or_default()
}
