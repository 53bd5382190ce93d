//! Player-prop value bets: recent average against the posted line.

use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashMap;

use crate::error::IntelError;
use crate::error_handler::{ErrorContext, ErrorHandler, Recovered};
use crate::espn::GameLog;
use crate::leagues::{self, EspnLeague};
use crate::matching::{MatchSource, PlayerMatcher};
use crate::odds::PropLine;
use crate::Result;

#[cfg(test)]
mod tests;

/// Where athlete game logs come from.
#[async_trait]
pub trait StatsSource: Send + Sync {
    async fn game_log(&self, league: EspnLeague, athlete_id: &str) -> Result<GameLog>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueBetConfig {
    /// How many of the most recent games to average.
    pub recent_games: usize,
    /// Minimum relative edge, e.g. `0.10` for 10%.
    pub edge_threshold: f64,
}

impl Default for ValueBetConfig {
    fn default() -> Self {
        Self {
            recent_games: 10,
            edge_threshold: 0.10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BetSide {
    Over,
    Under,
}

impl std::fmt::Display for BetSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BetSide::Over => write!(f, "OVER"),
            BetSide::Under => write!(f, "UNDER"),
        }
    }
}

/// Result of comparing a recent average with a line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LineEvaluation {
    pub average: f64,
    pub games_used: usize,
    pub edge: f64,
    pub side: Option<BetSide>,
}

/// Average the first `recent_games` values (most recent first) and compare
/// with `line`. `None` when there are no values or the line is not positive.
pub fn evaluate_line(values: &[f64], line: f64, config: &ValueBetConfig) -> Option<LineEvaluation> {
    let recent = &values[..values.len().min(config.recent_games)];
    if recent.is_empty() || line <= 0.0 {
        return None;
    }

    let average = recent.iter().sum::<f64>() / recent.len() as f64;
    let edge = (average - line) / line;
    let side = if edge >= config.edge_threshold {
        Some(BetSide::Over)
    } else if edge <= -config.edge_threshold {
        Some(BetSide::Under)
    } else {
        None
    };

    Some(LineEvaluation {
        average,
        games_used: recent.len(),
        edge,
        side,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueBet {
    pub prop: PropLine,
    pub espn_id: String,
    pub espn_name: String,
    pub team: String,
    pub match_source: MatchSource,
    pub match_confidence: f64,
    pub stat_label: String,
    pub evaluation: LineEvaluation,
    pub side: BetSide,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    UnsupportedMarket,
    NoPlayerMatch,
    StatsUnavailable { detail: String },
    NoRecentGames,
    InvalidLine,
    NoEdge { edge: f64 },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::UnsupportedMarket => write!(f, "market has no stat mapping"),
            SkipReason::NoPlayerMatch => write!(f, "no roster match"),
            SkipReason::StatsUnavailable { detail } => write!(f, "stats unavailable: {detail}"),
            SkipReason::NoRecentGames => write!(f, "no recent games for this stat"),
            SkipReason::InvalidLine => write!(f, "line is not positive"),
            SkipReason::NoEdge { edge } => write!(f, "edge {:+.1}% below threshold", edge * 100.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedProp {
    pub prop: PropLine,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub sport_key: String,
    pub event_id: String,
    pub value_bets: Vec<ValueBet>,
    pub skipped: Vec<SkippedProp>,
}

/// Matches each prop's player, pulls their game log through the error
/// handler and keeps the lines whose edge clears the threshold.
pub struct ValueAnalyzer<'a> {
    matcher: &'a PlayerMatcher,
    stats: &'a dyn StatsSource,
    handler: &'a ErrorHandler,
    config: ValueBetConfig,
}

impl<'a> ValueAnalyzer<'a> {
    pub fn new(
        matcher: &'a PlayerMatcher,
        stats: &'a dyn StatsSource,
        handler: &'a ErrorHandler,
        config: ValueBetConfig,
    ) -> Self {
        Self {
            matcher,
            stats,
            handler,
            config,
        }
    }

    pub async fn analyze(
        &self,
        sport_key: &str,
        event_id: &str,
        props: &[PropLine],
    ) -> Result<AnalysisReport> {
        let league = leagues::odds_sport(sport_key).ok_or_else(|| IntelError::UnknownLeague {
            league: sport_key.to_string(),
        })?;

        let mut report = AnalysisReport {
            sport_key: sport_key.to_string(),
            event_id: event_id.to_string(),
            ..Default::default()
        };
        // one fetch per athlete, however many markets they appear in
        let mut logs: HashMap<String, std::result::Result<GameLog, String>> = HashMap::new();

        for prop in props {
            let skip = |reason| SkippedProp {
                prop: prop.clone(),
                reason,
            };

            let Some(label) = leagues::stat_label(&prop.market) else {
                report.skipped.push(skip(SkipReason::UnsupportedMarket));
                continue;
            };

            let Some(hit) = self.matcher.match_player(&prop.player_name, sport_key)? else {
                report.skipped.push(skip(SkipReason::NoPlayerMatch));
                continue;
            };
            let espn_id = hit.record.espn_id.clone();

            if !logs.contains_key(&espn_id) {
                let fetched = self.fetch_log(league, &espn_id).await;
                logs.insert(espn_id.clone(), fetched);
            }
            let log = match logs.get(&espn_id) {
                Some(Ok(log)) => log,
                Some(Err(detail)) => {
                    report.skipped.push(skip(SkipReason::StatsUnavailable {
                        detail: detail.clone(),
                    }));
                    continue;
                }
                None => continue,
            };

            let values = log.values(label);
            if values.is_empty() {
                report.skipped.push(skip(SkipReason::NoRecentGames));
                continue;
            }
            let Some(evaluation) = evaluate_line(&values, prop.line, &self.config) else {
                report.skipped.push(skip(SkipReason::InvalidLine));
                continue;
            };
            let Some(side) = evaluation.side else {
                report.skipped.push(skip(SkipReason::NoEdge {
                    edge: evaluation.edge,
                }));
                continue;
            };

            report.value_bets.push(ValueBet {
                prop: prop.clone(),
                espn_id,
                espn_name: hit.record.espn_name,
                team: hit.record.team,
                match_source: hit.source,
                match_confidence: hit.record.confidence,
                stat_label: label.to_string(),
                evaluation,
                side,
            });
        }

        report
            .value_bets
            .sort_by(|a, b| b.evaluation.edge.abs().total_cmp(&a.evaluation.edge.abs()));
        tracing::info!(
            sport_key,
            event_id,
            value_bets = report.value_bets.len(),
            skipped = report.skipped.len(),
            "analysis complete"
        );
        Ok(report)
    }

    async fn fetch_log(
        &self,
        league: EspnLeague,
        athlete_id: &str,
    ) -> std::result::Result<GameLog, String> {
        let stats = self.stats;
        let ctx = ErrorContext::new("game_log").with_league(league.to_string());

        match self
            .handler
            .run_with_recovery(ctx, move || stats.game_log(league, athlete_id))
            .await
        {
            Ok(Recovered::Value(log)) => Ok(log),
            Ok(Recovered::Degraded(_)) => Err("upstream unavailable after retries".to_string()),
            Err(e) => Err(e.to_string()),
        }
    }
}
