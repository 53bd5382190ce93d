//! Unit tests for value-bet analysis

use super::*;
use crate::error::DataSource;
use crate::error_handler::HandlerConfig;
use crate::espn::gamelog::GameLogEntry;
use crate::matching::{IdentityStore, RosterStore};
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tempfile::TempDir;

const SPORT: &str = "basketball_nba";

fn prop(player: &str, market: &str, line: f64) -> PropLine {
    PropLine {
        player_name: player.to_string(),
        market: market.to_string(),
        line,
        over_price: Some(-110.0),
        under_price: Some(-110.0),
        bookmaker: "draftkings".to_string(),
    }
}

#[cfg(test)]
mod evaluate_tests {
    use super::*;

    #[test]
    fn test_over_under_and_no_edge() {
        let config = ValueBetConfig::default();

        let over = evaluate_line(&[30.0, 28.0, 32.0], 25.5, &config).unwrap();
        assert_eq!(over.average, 30.0);
        assert_eq!(over.side, Some(BetSide::Over));

        let under = evaluate_line(&[20.0, 22.0], 25.5, &config).unwrap();
        assert_eq!(under.side, Some(BetSide::Under));

        let flat = evaluate_line(&[26.0, 25.0], 25.5, &config).unwrap();
        assert_eq!(flat.side, None);
        assert!(flat.edge.abs() < 0.01);
    }

    #[test]
    fn test_only_recent_games_used() {
        let config = ValueBetConfig {
            recent_games: 2,
            edge_threshold: 0.1,
        };
        let eval = evaluate_line(&[10.0, 20.0, 100.0, 100.0], 10.0, &config).unwrap();
        assert_eq!(eval.games_used, 2);
        assert_eq!(eval.average, 15.0);
        assert_eq!(eval.edge, 0.5);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let config = ValueBetConfig::default();
        let eval = evaluate_line(&[11.0], 10.0, &config).unwrap();
        assert!((eval.edge - 0.1).abs() < 1e-9);
        assert_eq!(eval.side, Some(BetSide::Over));
    }

    #[test]
    fn test_degenerate_inputs() {
        let config = ValueBetConfig::default();
        assert!(evaluate_line(&[], 10.0, &config).is_none());
        assert!(evaluate_line(&[5.0], 0.0, &config).is_none());
    }
}

#[cfg(test)]
mod analyzer_tests {
    use super::*;

    /// Game logs keyed by athlete id; unknown ids fail with a 503.
    struct FakeStats {
        logs: HashMap<&'static str, GameLog>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl StatsSource for FakeStats {
        async fn game_log(&self, _league: EspnLeague, athlete_id: &str) -> Result<GameLog> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.logs
                .get(athlete_id)
                .cloned()
                .ok_or_else(|| IntelError::UpstreamServer {
                    feed: DataSource::Espn,
                    status: Some(503),
                    message: "unavailable".into(),
                })
        }
    }

    fn log(points: &[&str], rebounds: &[&str]) -> GameLog {
        GameLog {
            labels: vec!["PTS".into(), "REB".into()],
            entries: points
                .iter()
                .zip(rebounds)
                .enumerate()
                .map(|(i, (p, r))| GameLogEntry {
                    event_id: i.to_string(),
                    date: None,
                    stats: vec![p.to_string(), r.to_string()],
                })
                .collect(),
        }
    }

    fn matcher(temp_dir: &TempDir) -> PlayerMatcher {
        let nba = temp_dir.path().join("rosters").join("basketball").join("nba");
        fs::create_dir_all(&nba).unwrap();
        fs::write(
            nba.join("Lakers.json"),
            r#"[{"id": "10", "name": "LeBron James"}, {"id": "11", "name": "Anthony Davis"}]"#,
        )
        .unwrap();
        PlayerMatcher::new(
            IdentityStore::open(&temp_dir.path().join("store")).unwrap(),
            RosterStore::new(temp_dir.path().join("rosters")),
        )
    }

    fn handler() -> ErrorHandler {
        ErrorHandler::new(HandlerConfig {
            max_retries: 1,
            base_delay: Duration::from_millis(10),
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_analyze_mixed_slate() {
        let temp_dir = TempDir::new().unwrap();
        let matcher = matcher(&temp_dir);
        let handler = handler();
        let stats = FakeStats {
            logs: HashMap::from([("10", log(&["30", "32", "28"], &["8", "7", "9"]))]),
            calls: AtomicUsize::new(0),
        };

        let props = vec![
            prop("L. James", "player_points", 25.5),
            prop("L. James", "player_rebounds", 7.5),
            prop("L. James", "player_double_double", 0.5),
            prop("Zzyzx Qwerty", "player_points", 10.5),
            prop("Anthony Davis", "player_points", 24.5),
        ];

        let report = ValueAnalyzer::new(&matcher, &stats, &handler, ValueBetConfig::default())
            .analyze(SPORT, "evt1", &props)
            .await
            .unwrap();

        assert_eq!(report.value_bets.len(), 1);
        let bet = &report.value_bets[0];
        assert_eq!(bet.espn_id, "10");
        assert_eq!(bet.side, BetSide::Over);
        assert_eq!(bet.stat_label, "PTS");
        assert_eq!(bet.match_source, MatchSource::Fuzzy);

        let reasons: Vec<_> = report.skipped.iter().map(|s| &s.reason).collect();
        assert!(matches!(reasons[0], SkipReason::NoEdge { .. }));
        assert_eq!(reasons[1], &SkipReason::UnsupportedMarket);
        assert_eq!(reasons[2], &SkipReason::NoPlayerMatch);
        assert!(matches!(reasons[3], SkipReason::StatsUnavailable { .. }));

        // LeBron fetched once for two markets; Davis tried twice (one retry)
        assert_eq!(stats.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_unknown_sport_key() {
        let temp_dir = TempDir::new().unwrap();
        let matcher = matcher(&temp_dir);
        let handler = handler();
        let stats = FakeStats {
            logs: HashMap::new(),
            calls: AtomicUsize::new(0),
        };

        let err = ValueAnalyzer::new(&matcher, &stats, &handler, ValueBetConfig::default())
            .analyze("cricket_ipl", "evt1", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, IntelError::UnknownLeague { .. }));
    }
}
