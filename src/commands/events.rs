//! `events`: upcoming Odds API events for a sport, with their ids.

use crate::{
    cli::types::SportKey,
    report::{render_events, Format},
    Result,
};

use super::common::CommandContext;

pub async fn handle_events(ctx: &CommandContext, sport: &SportKey, format: Format) -> Result<String> {
    let events = ctx.odds().events(sport.as_str()).await?;
    tracing::info!(sport = %sport, events = events.len(), "odds events loaded");
    Ok(render_events(&events, ctx.config.display_tz, format))
}
