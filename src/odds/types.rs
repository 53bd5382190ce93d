//! The Odds API v4 wire types and the flattened prop lines built from them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry of `/sports/{sport}/events`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct OddsEvent {
    pub id: String,
    pub sport_key: String,
    pub commence_time: DateTime<Utc>,
    pub home_team: String,
    pub away_team: String,
}

/// `/sports/{sport}/events/{id}/odds`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EventOdds {
    pub id: String,
    pub sport_key: String,
    #[serde(default)]
    pub home_team: Option<String>,
    #[serde(default)]
    pub away_team: Option<String>,
    #[serde(default)]
    pub bookmakers: Vec<Bookmaker>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Bookmaker {
    pub key: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub markets: Vec<Market>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Market {
    pub key: String,
    #[serde(default)]
    pub outcomes: Vec<Outcome>,
}

/// For player props `name` is "Over"/"Under" and `description` the player.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Outcome {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub point: Option<f64>,
}

/// One player's line in one market at one bookmaker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropLine {
    pub player_name: String,
    pub market: String,
    pub line: f64,
    pub over_price: Option<f64>,
    pub under_price: Option<f64>,
    pub bookmaker: String,
}

impl EventOdds {
    /// One [`PropLine`] per player and market.
    ///
    /// The line is taken from `preferred_bookmaker` when it prices that
    /// player and market, otherwise from the first bookmaker that does.
    /// Outcomes without a player or a point are ignored.
    pub fn prop_lines(&self, preferred_bookmaker: Option<&str>) -> Vec<PropLine> {
        let mut books: Vec<&Bookmaker> = self.bookmakers.iter().collect();
        if let Some(pref) = preferred_bookmaker {
            // stable: the rest keep feed order
            books.sort_by_key(|b| b.key != pref);
        }

        let mut lines: Vec<PropLine> = Vec::new();
        for book in books {
            for market in &book.markets {
                for outcome in &market.outcomes {
                    let (Some(player), Some(point)) = (outcome.description.as_deref(), outcome.point)
                    else {
                        continue;
                    };

                    let existing = lines
                        .iter()
                        .position(|l| l.player_name == player && l.market == market.key);
                    let idx = match existing {
                        Some(i) if lines[i].bookmaker != book.key => continue,
                        Some(i) => i,
                        None => {
                            lines.push(PropLine {
                                player_name: player.to_string(),
                                market: market.key.clone(),
                                line: point,
                                over_price: None,
                                under_price: None,
                                bookmaker: book.key.clone(),
                            });
                            lines.len() - 1
                        }
                    };

                    match outcome.name.to_ascii_lowercase().as_str() {
                        "over" => lines[idx].over_price = Some(outcome.price),
                        "under" => lines[idx].under_price = Some(outcome.price),
                        _ => {}
                    }
                }
            }
        }
        lines
    }
}
