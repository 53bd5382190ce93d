//! Resources shared by the command handlers.

use reqwest::Client;

use crate::{
    config::Config,
    core::build_client,
    error_handler::ErrorHandler,
    espn::{
        http::{SITE_BASE_URL, WEB_BASE_URL},
        EspnClient,
    },
    matching::{IdentityStore, PlayerMatcher, RosterStore},
    odds::{http::ODDS_BASE_URL, OddsClient},
    Result,
};

/// Upstream base URLs; tests point these at a mock server.
#[derive(Debug, Clone)]
pub struct BaseUrls {
    pub espn_site: String,
    pub espn_web: String,
    pub odds: String,
}

impl Default for BaseUrls {
    fn default() -> Self {
        Self {
            espn_site: SITE_BASE_URL.to_string(),
            espn_web: WEB_BASE_URL.to_string(),
            odds: ODDS_BASE_URL.to_string(),
        }
    }
}

/// Configuration plus one HTTP connection pool, handed to every command.
///
/// Clients built from it share the pool; dropping the context closes it.
pub struct CommandContext {
    pub config: Config,
    http: Client,
    urls: BaseUrls,
}

impl CommandContext {
    pub fn new(config: Config) -> Result<Self> {
        Self::with_base_urls(config, BaseUrls::default())
    }

    pub fn with_base_urls(config: Config, urls: BaseUrls) -> Result<Self> {
        let http = build_client(config.request_timeout)?;
        Ok(Self { config, http, urls })
    }

    pub fn espn(&self) -> EspnClient {
        EspnClient::with_base_urls(self.http.clone(), &self.urls.espn_site, &self.urls.espn_web)
    }

    pub fn odds(&self) -> OddsClient {
        OddsClient::with_base_url(
            self.http.clone(),
            &self.urls.odds,
            self.config.odds_api_key.clone(),
        )
    }

    /// Open the identity store and roster tree named by the config.
    pub fn matcher(&self) -> Result<PlayerMatcher> {
        let store = IdentityStore::open(&self.config.data_dir)?;
        let rosters = RosterStore::new(&self.config.roster_dir);
        Ok(PlayerMatcher::new(store, rosters))
    }

    pub fn error_handler(&self) -> ErrorHandler {
        ErrorHandler::new(self.config.handler_config())
    }
}
