//! The Odds API v4 client.

use reqwest::Client;

use crate::core::http::get_json;
use crate::error::{DataSource, IntelError};
use crate::odds::types::{EventOdds, OddsEvent};
use crate::Result;


pub const ODDS_BASE_URL: &str = "https://api.the-odds-api.com/v4";

/// Bookmaker region queried for prices.
pub const DEFAULT_REGION: &str = "us";

#[derive(Debug, Clone)]
pub struct OddsClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl OddsClient {
    pub fn new(client: Client, api_key: Option<String>) -> Self {
        Self::with_base_url(client, ODDS_BASE_URL, api_key)
    }

    pub fn with_base_url(
        client: Client,
        base_url: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    fn api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| IntelError::Config {
            message: "ODDS_API_KEY is not set".to_string(),
        })
    }

    /// Upcoming events for an odds sport key such as `basketball_nba`.
    pub async fn events(&self, sport_key: &str) -> Result<Vec<OddsEvent>> {
        let key = self.api_key()?;
        let url = format!("{}/sports/{}/events", self.base_url, sport_key);
        let params = [("apiKey", key.to_string())];

        get_json(&self.client, DataSource::OddsApi, &url, &params).await
    }

    /// Prices for `markets` (e.g. `player_points`) on one event.
    pub async fn event_odds(
        &self,
        sport_key: &str,
        event_id: &str,
        markets: &[String],
    ) -> Result<EventOdds> {
        let key = self.api_key()?;
        if markets.is_empty() {
            return Err(IntelError::Config {
                message: "at least one market is required".to_string(),
            });
        }

        let url = format!(
            "{}/sports/{}/events/{}/odds",
            self.base_url, sport_key, event_id
        );
        let params = [
            ("apiKey", key.to_string()),
            ("regions", DEFAULT_REGION.to_string()),
            ("markets", markets.join(",")),
            ("oddsFormat", "american".to_string()),
        ];

        get_json(&self.client, DataSource::OddsApi, &url, &params).await
    }
}
