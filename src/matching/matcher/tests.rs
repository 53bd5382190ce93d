//! Unit tests for the player matcher

use super::*;
use chrono::TimeZone;
use std::fs;
use tempfile::TempDir;

const SPORT: &str = "basketball_nba";

fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 8, 9, hour, 0, 0).unwrap()
}

/// Matcher over a temp dir with the Lakers and Celtics on the NBA roster.
fn matcher(temp_dir: &TempDir) -> PlayerMatcher {
    let roster_dir = temp_dir.path().join("rosters");
    let nba = roster_dir.join("basketball").join("nba");
    fs::create_dir_all(&nba).unwrap();
    fs::write(
        nba.join("Lakers.json"),
        r#"[{"id": "10", "name": "LeBron James", "position": "F"},
            {"id": "11", "name": "Anthony Davis", "position": "C"}]"#,
    )
    .unwrap();
    fs::write(
        nba.join("Celtics.json"),
        r#"[{"id": "20", "name": "Jayson Tatum"}]"#,
    )
    .unwrap();

    let store = IdentityStore::open(&temp_dir.path().join("store")).unwrap();
    PlayerMatcher::new(store, RosterStore::new(roster_dir))
}

#[test]
fn test_fuzzy_match_writes_pending() {
    let temp_dir = TempDir::new().unwrap();
    let matcher = matcher(&temp_dir);

    let hit = matcher.match_player_at("L. James", SPORT, at(1)).unwrap().unwrap();
    assert_eq!(hit.source, MatchSource::Fuzzy);
    assert_eq!(hit.record.espn_id, "10");
    assert_eq!(hit.record.team, "Lakers");
    assert_eq!(hit.record.position.as_deref(), Some("F"));
    assert!(hit.record.confidence > 0.8 && hit.record.confidence < 1.0);

    let pending = matcher.store().pending(SPORT, "L. James").unwrap();
    assert_eq!(pending, hit.record);
}

#[test]
fn test_second_lookup_served_from_pending() {
    let temp_dir = TempDir::new().unwrap();
    let matcher = matcher(&temp_dir);

    matcher.match_player_at("L. James", SPORT, at(1)).unwrap();
    let again = matcher.match_player_at("L. James", SPORT, at(2)).unwrap().unwrap();
    assert_eq!(again.source, MatchSource::Pending);
    // pending hits are not mutated
    assert_eq!(again.record.last_seen_at, at(1));
}

#[test]
fn test_exact_name_is_full_confidence() {
    let temp_dir = TempDir::new().unwrap();
    let matcher = matcher(&temp_dir);

    let hit = matcher
        .match_player_at("jayson tatum", SPORT, at(1))
        .unwrap()
        .unwrap();
    assert_eq!(hit.record.espn_id, "20");
    assert_eq!(hit.record.confidence, 1.0);
}

#[test]
fn test_no_match_and_unknown_sport() {
    let temp_dir = TempDir::new().unwrap();
    let matcher = matcher(&temp_dir);

    assert!(matcher.match_player_at("Zzyzx Qwerty", SPORT, at(1)).unwrap().is_none());
    assert!(matcher
        .match_player_at("LeBron James", "cricket_ipl", at(1))
        .unwrap()
        .is_none());
    assert!(matcher.pending(None).is_empty());
}

#[test]
fn test_confirm_then_match_is_confirmed() {
    let temp_dir = TempDir::new().unwrap();
    let matcher = matcher(&temp_dir);

    matcher.match_player_at("L. James", SPORT, at(1)).unwrap();
    assert!(matcher.confirm_at("L. James", SPORT, "10", "analyst", at(2)).unwrap());

    let hit = matcher.match_player_at("L. James", SPORT, at(3)).unwrap().unwrap();
    assert_eq!(hit.source, MatchSource::Confirmed);
    assert_eq!(hit.record.confidence, 1.0);
    assert_eq!(hit.record.verified_by.as_deref(), Some("analyst"));
    assert_eq!(hit.record.verified_at, Some(at(2)));
    // creation time carried over from the pending record
    assert_eq!(hit.record.created_at, at(1));
    assert!(matcher.store().pending(SPORT, "L. James").is_none());
}

#[test]
fn test_confirm_rejects_bad_input() {
    let temp_dir = TempDir::new().unwrap();
    let matcher = matcher(&temp_dir);

    assert!(!matcher.confirm("L. James", SPORT, "999", "analyst").unwrap());
    assert!(!matcher.confirm("L. James", SPORT, "10", "  ").unwrap());
    assert!(!matcher.confirm("L. James", "cricket_ipl", "10", "analyst").unwrap());
    assert!(matcher.store().confirmed(SPORT, "L. James").is_none());
}

#[test]
fn test_rejected_name_is_not_rematched() {
    let temp_dir = TempDir::new().unwrap();
    let matcher = matcher(&temp_dir);

    matcher.match_player_at("L. James", SPORT, at(1)).unwrap();
    assert!(matcher.reject("L. James", SPORT).unwrap());
    assert!(!matcher.reject("A. Nobody", SPORT).unwrap());

    assert!(matcher.match_player_at("L. James", SPORT, at(2)).unwrap().is_none());
    let kept = matcher.store().pending(SPORT, "L. James").unwrap();
    assert_eq!(kept.state, IdentityState::Rejected);
}
