//! Static lookup tables between user-facing keys and upstream identifiers.

/// An ESPN `(sport, league)` path pair, e.g. `("basketball", "nba")`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EspnLeague {
    pub sport: &'static str,
    pub league: &'static str,
}

impl EspnLeague {
    const fn new(sport: &'static str, league: &'static str) -> Self {
        Self { sport, league }
    }
}

impl std::fmt::Display for EspnLeague {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.sport, self.league)
    }
}

/// League keys accepted on the command line.
const LEAGUES: &[(&str, EspnLeague)] = &[
    ("nba", EspnLeague::new("basketball", "nba")),
    ("wnba", EspnLeague::new("basketball", "wnba")),
    ("ncaab", EspnLeague::new("basketball", "mens-college-basketball")),
    ("nfl", EspnLeague::new("football", "nfl")),
    ("ncaaf", EspnLeague::new("football", "college-football")),
    ("mlb", EspnLeague::new("baseball", "mlb")),
    ("nhl", EspnLeague::new("hockey", "nhl")),
    ("mls", EspnLeague::new("soccer", "usa.1")),
    ("epl", EspnLeague::new("soccer", "eng.1")),
];

/// The Odds API sport keys.
const ODDS_SPORTS: &[(&str, EspnLeague)] = &[
    ("basketball_nba", EspnLeague::new("basketball", "nba")),
    ("basketball_wnba", EspnLeague::new("basketball", "wnba")),
    ("basketball_ncaab", EspnLeague::new("basketball", "mens-college-basketball")),
    ("americanfootball_nfl", EspnLeague::new("football", "nfl")),
    ("americanfootball_ncaaf", EspnLeague::new("football", "college-football")),
    ("baseball_mlb", EspnLeague::new("baseball", "mlb")),
    ("icehockey_nhl", EspnLeague::new("hockey", "nhl")),
    ("soccer_usa_mls", EspnLeague::new("soccer", "usa.1")),
    ("soccer_epl", EspnLeague::new("soccer", "eng.1")),
];

/// Player-prop market key → ESPN game-log column label.
const PROP_MARKETS: &[(&str, &str)] = &[
    ("player_points", "PTS"),
    ("player_rebounds", "REB"),
    ("player_assists", "AST"),
    ("player_steals", "STL"),
    ("player_blocks", "BLK"),
    ("player_turnovers", "TO"),
    ("player_pass_yds", "YDS"),
    ("player_rush_yds", "YDS"),
    ("player_reception_yds", "YDS"),
    ("player_receptions", "REC"),
    ("batter_hits", "H"),
    ("batter_home_runs", "HR"),
    ("batter_rbis", "RBI"),
    ("pitcher_strikeouts", "K"),
    ("player_goals", "G"),
    ("player_shots_on_goal", "SOG"),
];

pub fn league(key: &str) -> Option<EspnLeague> {
    let key = key.trim().to_ascii_lowercase();
    LEAGUES.iter().find(|(k, _)| *k == key).map(|(_, l)| *l)
}

pub fn is_known_league(key: &str) -> bool {
    league(key).is_some()
}

pub fn league_keys() -> impl Iterator<Item = &'static str> {
    LEAGUES.iter().map(|(k, _)| *k)
}

pub fn odds_sport(sport_key: &str) -> Option<EspnLeague> {
    ODDS_SPORTS
        .iter()
        .find(|(k, _)| *k == sport_key)
        .map(|(_, l)| *l)
}

pub fn stat_label(market: &str) -> Option<&'static str> {
    PROP_MARKETS
        .iter()
        .find(|(k, _)| *k == market)
        .map(|(_, label)| *label)
}
