//! Plain-text and Markdown rendering of league slates, value bets and error
//! summaries. Everything here is a pure function of its input.

use chrono_tz::Tz;
use std::collections::BTreeMap;
use std::fmt::Write;

use crate::analysis::{AnalysisReport, BetSide};
use crate::error_handler::ErrorAggregate;
use crate::matching::PlayerIdentityRecord;
use crate::models::{ErrorReport, GameRecord, GameStatus, LeagueDataResult};
use crate::odds::OddsEvent;
use crate::orchestrator::aggregate_errors;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Text,
    Markdown,
}

fn game_state(game: &GameRecord) -> String {
    match (game.status, game.score) {
        (GameStatus::PreGame, _) | (_, None) => game.status.label().to_string(),
        (status, Some((home, away))) => format!("{} {away}-{home}", status.label()),
    }
}

fn game_line(game: &GameRecord) -> String {
    format!(
        "{}  {} @ {}  [{}]",
        game.start_time.format("%-I:%M %p %Z"),
        game.away_team,
        game.home_team,
        game_state(game)
    )
}

pub fn render_games(results: &BTreeMap<String, LeagueDataResult>, format: Format) -> String {
    let mut out = String::new();
    let md = format == Format::Markdown;

    if md {
        out.push_str("# Games\n\n");
    }

    for (league, result) in results.iter().filter(|(_, r)| r.success()) {
        let title = league.to_ascii_uppercase();
        if md {
            let _ = writeln!(out, "## {title} ({} games)\n", result.games().len());
        } else {
            let _ = writeln!(out, "{title} ({} games)", result.games().len());
        }

        if result.games().is_empty() {
            out.push_str(if md { "_No games scheduled._\n\n" } else { "  no games\n" });
            continue;
        }

        if md {
            out.push_str("| Time | Matchup | Status | Venue |\n|---|---|---|---|\n");
            for game in result.games() {
                let _ = writeln!(
                    out,
                    "| {} | {} @ {} | {} | {} |",
                    game.start_time.format("%-I:%M %p %Z"),
                    game.away_team,
                    game.home_team,
                    game_state(game),
                    game.venue.as_deref().unwrap_or("-")
                );
            }
            out.push('\n');
        } else {
            for game in result.games() {
                let _ = writeln!(out, "  {}", game_line(game));
            }
        }
    }

    let failures = aggregate_errors(results.values());
    if !failures.is_empty() {
        out.push_str(&render_league_failures(&failures, format));
    }
    out
}

pub fn render_league_failures(reports: &[ErrorReport], format: Format) -> String {
    let mut out = String::new();
    match format {
        Format::Markdown => {
            out.push_str("## Failed leagues\n\n");
            for r in reports {
                let _ = writeln!(
                    out,
                    "- **{}** ({:?}, {:?}): {}",
                    r.league.to_ascii_uppercase(),
                    r.kind,
                    r.severity,
                    r.message
                );
            }
        }
        Format::Text => {
            out.push_str("Failed leagues:\n");
            for r in reports {
                let _ = writeln!(
                    out,
                    "  {} [{:?}/{:?}] {}",
                    r.league.to_ascii_uppercase(),
                    r.severity,
                    r.kind,
                    r.message
                );
            }
        }
    }
    out
}

fn american(price: Option<f64>) -> String {
    match price {
        Some(p) if p > 0.0 => format!("+{p:.0}"),
        Some(p) => format!("{p:.0}"),
        None => "-".to_string(),
    }
}

pub fn render_value_bets(report: &AnalysisReport, format: Format) -> String {
    let mut out = String::new();
    let md = format == Format::Markdown;

    if md {
        let _ = writeln!(out, "# Value bets: {} ({})\n", report.event_id, report.sport_key);
    } else {
        let _ = writeln!(out, "Value bets for {} ({})", report.event_id, report.sport_key);
    }

    if report.value_bets.is_empty() {
        out.push_str(if md { "_No lines clear the edge threshold._\n" } else { "  none\n" });
    } else if md {
        out.push_str("| Player | Market | Line | Avg | Edge | Pick | Price | Book | Match |\n");
        out.push_str("|---|---|---|---|---|---|---|---|---|\n");
        for bet in &report.value_bets {
            let price = match bet.side {
                BetSide::Over => bet.prop.over_price,
                BetSide::Under => bet.prop.under_price,
            };
            let _ = writeln!(
                out,
                "| {} ({}) | {} | {} | {:.1} | {:+.1}% | {} | {} | {} | {} {:.2} |",
                bet.espn_name,
                bet.team,
                bet.stat_label,
                bet.prop.line,
                bet.evaluation.average,
                bet.evaluation.edge * 100.0,
                bet.side,
                american(price),
                bet.prop.bookmaker,
                bet.match_source,
                bet.match_confidence
            );
        }
    } else {
        for bet in &report.value_bets {
            let _ = writeln!(
                out,
                "  {:<24} {:<4} {} {:>5}  avg {:.1} over {} games  edge {:+.1}%  ({}, {} match)",
                bet.espn_name,
                bet.stat_label,
                bet.side,
                bet.prop.line,
                bet.evaluation.average,
                bet.evaluation.games_used,
                bet.evaluation.edge * 100.0,
                bet.prop.bookmaker,
                bet.match_source
            );
        }
    }

    if !report.skipped.is_empty() {
        if md {
            let _ = writeln!(out, "\n<details><summary>{} skipped</summary>\n", report.skipped.len());
            for s in &report.skipped {
                let _ = writeln!(out, "- {} `{}`: {}", s.prop.player_name, s.prop.market, s.reason);
            }
            out.push_str("\n</details>\n");
        } else {
            let _ = writeln!(out, "Skipped ({}):", report.skipped.len());
            for s in &report.skipped {
                let _ = writeln!(out, "  {} {}: {}", s.prop.player_name, s.prop.market, s.reason);
            }
        }
    }
    out
}

pub fn render_error_summary(agg: &ErrorAggregate, format: Format) -> String {
    let mut out = String::new();
    if agg.total_errors == 0 {
        return out;
    }
    let md = format == Format::Markdown;

    if md {
        let _ = writeln!(out, "## Errors ({})\n", agg.total_errors);
    } else {
        let _ = writeln!(out, "Errors: {}", agg.total_errors);
    }

    let categories: Vec<String> = agg
        .by_category
        .iter()
        .map(|(c, n)| format!("{c}: {n}"))
        .collect();
    let _ = writeln!(out, "{}{}", if md { "- By category: " } else { "  by category: " }, categories.join(", "));

    for (league, rate) in &agg.league_error_rates {
        let _ = writeln!(out, "{}{league}: {rate:.0}% failed", if md { "- " } else { "  " });
    }
    if agg.retries_attempted > 0 {
        let _ = writeln!(out, "{}retries: {}", if md { "- " } else { "  " }, agg.retries_attempted);
    }
    for rec in &agg.recommendations {
        let _ = writeln!(out, "{}{rec}", if md { "- Recommendation: " } else { "  * " });
    }
    out
}

/// Upcoming odds events, earliest first, with the ids `value-bets` takes.
pub fn render_events(events: &[OddsEvent], display_tz: Tz, format: Format) -> String {
    if events.is_empty() {
        return "No upcoming events.\n".to_string();
    }

    let mut sorted: Vec<&OddsEvent> = events.iter().collect();
    sorted.sort_by_key(|e| e.commence_time);

    let mut out = String::new();
    if format == Format::Markdown {
        out.push_str("| Start | Matchup | Event id |\n|---|---|---|\n");
    }
    for event in sorted {
        let start = event
            .commence_time
            .with_timezone(&display_tz)
            .format("%a %b %-d %-I:%M %p %Z");
        match format {
            Format::Markdown => {
                let _ = writeln!(
                    out,
                    "| {start} | {} @ {} | `{}` |",
                    event.away_team, event.home_team, event.id
                );
            }
            Format::Text => {
                let _ = writeln!(
                    out,
                    "{start}  {} @ {}  [{}]",
                    event.away_team, event.home_team, event.id
                );
            }
        }
    }
    out
}

pub fn render_pending(records: &[(String, PlayerIdentityRecord)]) -> String {
    if records.is_empty() {
        return "No matches awaiting review.\n".to_string();
    }

    let mut out = String::new();
    for (sport, r) in records {
        let _ = writeln!(
            out,
            "{sport}  {:<24} -> {} ({}, id {})  confidence {:.2}",
            r.odds_name, r.espn_name, r.team, r.espn_id, r.confidence
        );
    }
    out
}
