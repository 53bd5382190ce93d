//! `match`, `confirm`, `reject` and `pending`: the identity review workflow.

use crate::{cli::types::SportKey, report::render_pending, Result};

use super::common::CommandContext;

pub fn handle_match(ctx: &CommandContext, sport: &SportKey, name: &str) -> Result<String> {
    let matcher = ctx.matcher()?;
    Ok(match matcher.match_player(name, sport.as_str())? {
        Some(hit) => format!(
            "{} -> {} ({}, id {})  confidence {:.2}  [{}]\n",
            name,
            hit.record.espn_name,
            hit.record.team,
            hit.record.espn_id,
            hit.record.confidence,
            hit.source
        ),
        None => format!("No match for '{name}' in {sport}\n"),
    })
}

pub fn handle_confirm(
    ctx: &CommandContext,
    sport: &SportKey,
    odds_name: &str,
    espn_id: &str,
    verified_by: &str,
) -> Result<String> {
    let matcher = ctx.matcher()?;
    Ok(
        if matcher.confirm(odds_name, sport.as_str(), espn_id, verified_by)? {
            format!("Confirmed '{odds_name}' as ESPN athlete {espn_id}\n")
        } else {
            format!("Could not confirm '{odds_name}': athlete {espn_id} is not on the {sport} roster\n")
        },
    )
}

pub fn handle_reject(ctx: &CommandContext, sport: &SportKey, odds_name: &str) -> Result<String> {
    let matcher = ctx.matcher()?;
    Ok(if matcher.reject(odds_name, sport.as_str())? {
        format!("Rejected pending match for '{odds_name}'\n")
    } else {
        format!("No pending match for '{odds_name}' in {sport}\n")
    })
}

pub fn handle_pending(ctx: &CommandContext, sport: Option<&SportKey>) -> Result<String> {
    let matcher = ctx.matcher()?;
    Ok(render_pending(&matcher.pending(sport.map(SportKey::as_str))))
}
