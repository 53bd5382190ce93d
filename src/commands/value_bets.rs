//! `value-bets`: odds lines against recent ESPN production.

use crate::{
    analysis::{ValueAnalyzer, ValueBetConfig},
    cli::types::SportKey,
    error_handler::{ErrorContext, Recovered},
    report::{render_error_summary, render_value_bets, Format},
    Result,
};

use super::common::CommandContext;

pub const DEFAULT_MARKETS: &[&str] = &["player_points", "player_rebounds", "player_assists"];

#[derive(Debug)]
pub struct ValueBetsParams {
    pub sport: SportKey,
    pub event_id: String,
    pub markets: Option<Vec<String>>,
    pub bookmaker: Option<String>,
    pub format: Format,
}

pub async fn handle_value_bets(ctx: &CommandContext, params: ValueBetsParams) -> Result<String> {
    let markets = params
        .markets
        .unwrap_or_else(|| DEFAULT_MARKETS.iter().map(|m| m.to_string()).collect());
    let sport_key = params.sport.as_str();

    let odds = ctx.odds();
    let handler = ctx.error_handler();
    let league = params.sport.espn_league().to_string();

    let fetched = handler
        .run_with_recovery(
            ErrorContext::new("event_odds").with_league(league),
            || odds.event_odds(sport_key, &params.event_id, &markets),
        )
        .await?;
    let props = match fetched {
        Recovered::Value(event) => event.prop_lines(params.bookmaker.as_deref()),
        Recovered::Degraded(fallback) => {
            tracing::warn!(?fallback, "odds unavailable, analysing no lines");
            Vec::new()
        }
    };
    tracing::info!(lines = props.len(), event_id = %params.event_id, "prop lines loaded");

    let matcher = ctx.matcher()?;
    let espn = ctx.espn();
    let report = ValueAnalyzer::new(&matcher, &espn, &handler, ValueBetConfig::default())
        .analyze(sport_key, &params.event_id, &props)
        .await?;

    let mut out = render_value_bets(&report, params.format);
    out.push_str(&render_error_summary(&handler.aggregate_errors(), params.format));
    Ok(out)
}
