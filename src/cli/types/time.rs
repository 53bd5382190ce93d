//! Date type for schedule lookups.

use crate::error::{IntelError, Result};
use chrono::{Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How far from today a schedule date may lie, in either direction.
pub const MAX_DATE_DISTANCE_DAYS: i64 = 365;

const FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y%m%d"];

/// Type-safe wrapper for a calendar date accepted as `YYYY-MM-DD` or `YYYYMMDD`.
///
/// # Examples
///
/// ```rust
/// use sports_intel::GameDate;
///
/// let dashed: GameDate = "2025-08-09".parse().unwrap();
/// let compact: GameDate = "20250809".parse().unwrap();
/// assert_eq!(dashed, compact);
/// assert_eq!(dashed.espn_param(), "20250809");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GameDate(pub NaiveDate);

impl GameDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn today() -> Self {
        Self(Utc::now().date_naive())
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    /// The `dates=` query value ESPN expects.
    pub fn espn_param(&self) -> String {
        self.0.format("%Y%m%d").to_string()
    }

    /// Parse and check that the date lies within a year of `today`.
    pub fn parse_within(input: &str, today: NaiveDate) -> Result<Self> {
        let date: GameDate = input.parse()?;
        let distance = (date.0 - today).num_days().abs();
        if distance > Duration::days(MAX_DATE_DISTANCE_DAYS).num_days() {
            return Err(IntelError::InvalidDate {
                input: input.to_string(),
                reason: format!(
                    "must be within {MAX_DATE_DISTANCE_DAYS} days of {today} (is {distance} days away)"
                ),
            });
        }
        Ok(date)
    }
}

impl Default for GameDate {
    fn default() -> Self {
        Self::today()
    }
}

impl fmt::Display for GameDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for GameDate {
    type Err = IntelError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        // chrono accepts unpadded fields, so pick the format by exact length
        let format = match trimmed.len() {
            10 => Some(FORMATS[0]),
            8 if trimmed.bytes().all(|b| b.is_ascii_digit()) => Some(FORMATS[1]),
            _ => None,
        };
        format
            .and_then(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
            .map(Self)
            .ok_or_else(|| IntelError::InvalidDate {
                input: s.to_string(),
                reason: "expected YYYY-MM-DD or YYYYMMDD".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_both_formats_parse_to_same_date() {
        let today = day(2025, 8, 1);
        let dashed = GameDate::parse_within("2025-08-09", today).unwrap();
        let compact = GameDate::parse_within("20250809", today).unwrap();
        assert_eq!(dashed, compact);
        assert_eq!(dashed.as_naive(), day(2025, 8, 9));
    }

    #[test]
    fn test_bad_formats_rejected() {
        let today = day(2025, 8, 1);
        for input in ["2025/08/09", "invalid", "", "2025-8-9", "2025-13-01"] {
            let err = GameDate::parse_within(input, today).unwrap_err();
            assert!(
                matches!(err, IntelError::InvalidDate { .. }),
                "{input} should be an InvalidDate"
            );
        }
    }

    #[test]
    fn test_out_of_range_dates_rejected() {
        let today = day(2025, 8, 9);
        let past = (today - Duration::days(400)).format("%Y-%m-%d").to_string();
        let future = (today + Duration::days(400)).format("%Y%m%d").to_string();

        assert!(GameDate::parse_within(&past, today).is_err());
        assert!(GameDate::parse_within(&future, today).is_err());
    }

    #[test]
    fn test_window_edges_accepted() {
        let today = day(2025, 8, 9);
        let edge = (today - Duration::days(MAX_DATE_DISTANCE_DAYS))
            .format("%Y-%m-%d")
            .to_string();
        assert!(GameDate::parse_within(&edge, today).is_ok());
    }

    #[test]
    fn test_display_and_espn_param() {
        let date = GameDate::new(day(2024, 1, 5));
        assert_eq!(date.to_string(), "2024-01-05");
        assert_eq!(date.espn_param(), "20240105");
    }
}
