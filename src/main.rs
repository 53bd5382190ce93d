//! Entry point: parse CLI and dispatch to command handlers.

use anyhow::Context;
use clap::Parser;
use sports_intel::{
    cli::{Commands, SportsIntel},
    commands::{
        events::handle_events,
        games::handle_games,
        identity::{handle_confirm, handle_match, handle_pending, handle_reject},
        value_bets::{handle_value_bets, ValueBetsParams},
        CommandContext,
    },
    logging,
    report::Format,
    Config,
};

fn format(markdown: bool) -> Format {
    if markdown {
        Format::Markdown
    } else {
        Format::Text
    }
}

/// Run the CLI.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app = SportsIntel::parse();
    logging::init(app.verbose);

    let config = Config::from_env().context("reading configuration")?;
    let ctx = CommandContext::new(config).context("building HTTP client")?;

    let output = match app.command {
        Commands::Games {
            date,
            leagues,
            output,
        } => handle_games(&ctx, date, leagues, format(output.markdown)).await?,

        Commands::Match { sport, name } => handle_match(&ctx, &sport, &name)?,

        Commands::Confirm {
            sport,
            odds_name,
            espn_id,
            verified_by,
        } => handle_confirm(&ctx, &sport, &odds_name, &espn_id, &verified_by)?,

        Commands::Reject { sport, odds_name } => handle_reject(&ctx, &sport, &odds_name)?,

        Commands::Pending { sport } => handle_pending(&ctx, sport.as_ref())?,

        Commands::Events { sport, output } => {
            handle_events(&ctx, &sport, format(output.markdown)).await?
        }

        Commands::ValueBets {
            sport,
            event_id,
            markets,
            bookmaker,
            output,
        } => {
            handle_value_bets(
                &ctx,
                ValueBetsParams {
                    sport,
                    event_id,
                    markets,
                    bookmaker,
                    format: format(output.markdown),
                },
            )
            .await?
        }
    };

    print!("{output}");
    Ok(())
}
