//! CLI argument definitions and parsing.

pub mod types;

use clap::{Args, Parser, Subcommand};
use types::SportKey;

/// Output shape shared by the reporting commands.
#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Render Markdown instead of plain text.
    #[clap(long)]
    pub markdown: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fetch and normalize game schedules for one or more leagues.
    Games {
        /// Date as YYYY-MM-DD or YYYYMMDD, within a year of today (default: today).
        #[clap(long, short)]
        date: Option<String>,

        /// League key (repeatable): `-l nba -l nfl`. Defaults to `SPORTS_INTEL_LEAGUES`.
        #[clap(long = "league", short = 'l')]
        leagues: Option<Vec<String>>,

        #[clap(flatten)]
        output: OutputArgs,
    },

    /// Resolve an odds-feed player name to an ESPN athlete.
    Match {
        /// Odds API sport key, e.g. `basketball_nba`.
        #[clap(long, short)]
        sport: SportKey,

        /// Player name as the sportsbook spells it.
        name: String,
    },

    /// Confirm an odds-feed name as a specific ESPN athlete.
    Confirm {
        #[clap(long, short)]
        sport: SportKey,

        #[clap(long)]
        odds_name: String,

        #[clap(long)]
        espn_id: String,

        /// Who verified the mapping.
        #[clap(long = "by")]
        verified_by: String,
    },

    /// Reject a pending match so it is not suggested again.
    Reject {
        #[clap(long, short)]
        sport: SportKey,

        #[clap(long)]
        odds_name: String,
    },

    /// List matches awaiting review.
    Pending {
        #[clap(long, short)]
        sport: Option<SportKey>,
    },

    /// List upcoming Odds API events and their ids.
    ///
    /// Requires `ODDS_API_KEY`.
    Events {
        #[clap(long, short)]
        sport: SportKey,

        #[clap(flatten)]
        output: OutputArgs,
    },

    /// Compare player-prop lines with recent ESPN averages.
    ///
    /// Requires `ODDS_API_KEY`.
    ValueBets {
        #[clap(long, short)]
        sport: SportKey,

        /// Odds API event id, as listed by `events`.
        #[clap(long)]
        event_id: String,

        /// Prop market (repeatable). Defaults to points, rebounds and assists.
        #[clap(long = "market", short = 'm')]
        markets: Option<Vec<String>>,

        /// Prefer this bookmaker's lines when it offers them.
        #[clap(long)]
        bookmaker: Option<String>,

        #[clap(flatten)]
        output: OutputArgs,
    },
}

#[derive(Debug, Parser)]
#[clap(
    name = "sports-intel",
    version,
    about = "Game schedules, player identity matching and prop value bets"
)]
pub struct SportsIntel {
    /// Debug-level diagnostics on stderr.
    #[clap(long, short, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Commands,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        SportsIntel::command().debug_assert();
    }

    #[test]
    fn test_parse_games() {
        let cli = SportsIntel::parse_from([
            "sports-intel",
            "games",
            "--date",
            "20250809",
            "-l",
            "nba",
            "-l",
            "nfl",
            "--markdown",
        ]);
        match cli.command {
            Commands::Games {
                date,
                leagues,
                output,
            } => {
                assert_eq!(date.as_deref(), Some("20250809"));
                assert_eq!(leagues, Some(vec!["nba".to_string(), "nfl".to_string()]));
                assert!(output.markdown);
            }
            other => panic!("Expected Games, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_confirm_and_global_verbose() {
        let cli = SportsIntel::parse_from([
            "sports-intel",
            "confirm",
            "--sport",
            "basketball_nba",
            "--odds-name",
            "L. James",
            "--espn-id",
            "10",
            "--by",
            "analyst",
            "-v",
        ]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Confirm {
                sport,
                odds_name,
                espn_id,
                verified_by,
            } => {
                assert_eq!(sport.as_str(), "basketball_nba");
                assert_eq!(odds_name, "L. James");
                assert_eq!(espn_id, "10");
                assert_eq!(verified_by, "analyst");
            }
            other => panic!("Expected Confirm, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_events() {
        let cli = SportsIntel::parse_from(["sports-intel", "events", "-s", "icehockey_nhl"]);
        match cli.command {
            Commands::Events { sport, output } => {
                assert_eq!(sport.as_str(), "icehockey_nhl");
                assert!(!output.markdown);
            }
            other => panic!("Expected Events, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_sport_rejected_at_parse() {
        let result = SportsIntel::try_parse_from([
            "sports-intel",
            "match",
            "--sport",
            "cricket_ipl",
            "L. James",
        ]);
        assert!(result.is_err());
    }
}
