//! `games`: concurrent schedule fetch across leagues.

use std::sync::Arc;

use crate::{
    orchestrator::DataOrchestrator,
    report::{render_games, Format},
    GameDate, Result,
};

use super::common::CommandContext;

/// Fetch every requested league for `date` (default today) and render the
/// slate. Individual league failures are part of the output, not an error.
pub async fn handle_games(
    ctx: &CommandContext,
    date: Option<String>,
    leagues: Option<Vec<String>>,
    format: Format,
) -> Result<String> {
    let orchestrator = DataOrchestrator::new(
        Arc::new(ctx.espn()),
        ctx.config.max_concurrency,
        ctx.config.leagues.clone(),
        ctx.config.display_tz,
    );

    let date = date.unwrap_or_else(|| GameDate::today().to_string());
    let results = orchestrator
        .fetch_all_leagues_data(&date, leagues.as_deref())
        .await?;

    let failed = results.values().filter(|r| !r.success()).count();
    if failed > 0 {
        tracing::warn!(failed, total = results.len(), "some leagues failed");
    }

    Ok(render_games(&results, format))
}
