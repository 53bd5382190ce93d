//! ESPN HTTP client: scoreboard, teams and athlete game logs.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::analysis::StatsSource;
use crate::cli::types::GameDate;
use crate::core::http::get_json;
use crate::error::DataSource;
use crate::espn::gamelog::GameLog;
use crate::espn::types::{GameLogResponse, ScoreboardResponse};
use crate::leagues::EspnLeague;
use crate::orchestrator::ScheduleSource;
use crate::Result;

#[cfg(test)]
mod tests;

/// Base path for the ESPN site API (scoreboards, teams).
pub const SITE_BASE_URL: &str = "https://site.api.espn.com/apis/site/v2/sports";

/// Base path for the ESPN common API (athlete game logs).
pub const WEB_BASE_URL: &str = "https://site.web.api.espn.com/apis/common/v3/sports";

/// ESPN client over an injected `reqwest::Client`.
///
/// Base URLs are fields so tests can point the client at a mock server.
#[derive(Debug, Clone)]
pub struct EspnClient {
    client: Client,
    site_base: String,
    web_base: String,
}

impl EspnClient {
    pub fn new(client: Client) -> Self {
        Self::with_base_urls(client, SITE_BASE_URL, WEB_BASE_URL)
    }

    pub fn with_base_urls(
        client: Client,
        site_base: impl Into<String>,
        web_base: impl Into<String>,
    ) -> Self {
        Self {
            client,
            site_base: site_base.into().trim_end_matches('/').to_string(),
            web_base: web_base.into().trim_end_matches('/').to_string(),
        }
    }

    /// Raw scoreboard events for one league and date.
    pub async fn get_scoreboard(&self, league: EspnLeague, date: GameDate) -> Result<Vec<Value>> {
        let url = format!(
            "{}/{}/{}/scoreboard",
            self.site_base, league.sport, league.league
        );
        let params = [("dates", date.espn_param())];

        let res: ScoreboardResponse = get_json(&self.client, DataSource::Espn, &url, &params).await?;
        Ok(res.events)
    }

    /// Teams listing for one league, returned as-is.
    pub async fn get_teams(&self, league: EspnLeague) -> Result<Value> {
        let url = format!("{}/{}/{}/teams", self.site_base, league.sport, league.league);
        get_json(&self.client, DataSource::Espn, &url, &[]).await
    }

    pub async fn get_game_log(&self, league: EspnLeague, athlete_id: &str) -> Result<GameLog> {
        let url = format!(
            "{}/{}/{}/athletes/{}/gamelog",
            self.web_base, league.sport, league.league, athlete_id
        );

        let res: GameLogResponse = get_json(&self.client, DataSource::Espn, &url, &[]).await?;
        Ok(GameLog::from_response(res))
    }
}

#[async_trait]
impl ScheduleSource for EspnClient {
    async fn schedule(&self, league: EspnLeague, date: GameDate) -> Result<Vec<Value>> {
        self.get_scoreboard(league, date).await
    }

    async fn teams(&self, league: EspnLeague) -> Result<Value> {
        self.get_teams(league).await
    }
}

#[async_trait]
impl StatsSource for EspnClient {
    async fn game_log(&self, league: EspnLeague, athlete_id: &str) -> Result<GameLog> {
        self.get_game_log(league, athlete_id).await
    }
}
