//! Identifier types accepted on the command line.

use crate::error::{IntelError, Result};
use crate::leagues::{self, EspnLeague};
use std::fmt;
use std::str::FromStr;

/// An Odds API sport key with a known ESPN league, e.g. `basketball_nba`.
///
/// # Examples
///
/// ```rust
/// use sports_intel::SportKey;
///
/// let key: SportKey = "basketball_nba".parse().unwrap();
/// assert_eq!(key.espn_league().to_string(), "basketball/nba");
/// assert!("cricket_ipl".parse::<SportKey>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SportKey {
    key: String,
    league: EspnLeague,
}

impl SportKey {
    pub fn as_str(&self) -> &str {
        &self.key
    }

    pub fn espn_league(&self) -> EspnLeague {
        self.league
    }
}

impl fmt::Display for SportKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

impl FromStr for SportKey {
    type Err = IntelError;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_ascii_lowercase();
        let league = leagues::odds_sport(&key).ok_or_else(|| IntelError::UnknownLeague {
            league: s.to_string(),
        })?;
        Ok(Self { key, league })
    }
}
