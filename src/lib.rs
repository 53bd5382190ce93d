//! Sports Intel Library
//!
//! Game schedules from ESPN, betting lines from The Odds API, and the glue
//! that joins them: resolving sportsbook player names to ESPN athletes.
//!
//! ## Features
//!
//! - **Schedules**: concurrent per-league scoreboard fetches with a bounded
//!   semaphore, normalized into [`models::GameRecord`]s
//! - **Player matching**: exact and fuzzy name matching against on-disk
//!   rosters, with a confirm / pending / reject review workflow persisted as JSON
//! - **Error handling**: classified retries, backoff and degraded fallbacks
//!   through one [`error_handler::ErrorHandler`]
//! - **Value bets**: player-prop lines compared with recent game-log averages
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sports_intel::{
//!     matching::{IdentityStore, PlayerMatcher, RosterStore},
//!     Config,
//! };
//!
//! # fn example() -> sports_intel::Result<()> {
//! let config = Config::from_env()?;
//! let matcher = PlayerMatcher::new(
//!     IdentityStore::open(&config.data_dir)?,
//!     RosterStore::new(&config.roster_dir),
//! );
//!
//! if let Some(hit) = matcher.match_player("L. James", "basketball_nba")? {
//!     println!("{} -> {} ({})", hit.record.odds_name, hit.record.espn_id, hit.source);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! ```bash
//! export ODDS_API_KEY=...                      # required for value bets
//! export SPORTS_INTEL_ROSTER_DIR=~/rosters     # <sport>/**/*.json
//! export SPORTS_INTEL_MAX_CONCURRENCY=5
//! ```

pub mod analysis;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub mod error_handler;
pub mod espn;
pub mod leagues;
pub mod logging;
pub mod matching;
pub mod models;
pub mod odds;
pub mod orchestrator;
pub mod report;

// Re-export commonly used types
pub use cli::types::{GameDate, SportKey};
pub use config::Config;
pub use error::{IntelError, Result};
