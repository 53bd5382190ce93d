//! Unit tests for roster loading

use super::*;
use std::fs;
use tempfile::TempDir;

fn nba() -> EspnLeague {
    crate::leagues::league("nba").unwrap()
}

fn write_team(root: &Path, rel: &str, contents: &str) {
    let path = root.join("basketball").join("nba").join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

#[cfg(test)]
mod parse_tests {
    use super::*;

    #[test]
    fn test_team_injected_from_file_stem() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Los_Angeles_Lakers.json");
        fs::write(
            &path,
            r#"[{"id": "10", "name": "LeBron James", "position": "F"}]"#,
        )
        .unwrap();

        let entries = parse_roster_file(&path);
        assert_eq!(
            entries,
            vec![RosterEntry {
                id: "10".into(),
                name: "LeBron James".into(),
                team: "Los Angeles Lakers".into(),
                position: Some("F".into()),
            }]
        );
    }

    #[test]
    fn test_alternate_shapes_and_name_fields() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Celtics.json");
        fs::write(
            &path,
            r#"{"athletes": [
                {"id": 4065648, "fullName": "Jayson Tatum", "position": {"abbreviation": "SF"}},
                {"id": "3917376", "displayName": "Jaylen Brown"}
            ]}"#,
        )
        .unwrap();

        let entries = parse_roster_file(&path);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, "4065648");
        assert_eq!(entries[0].name, "Jayson Tatum");
        assert_eq!(entries[0].position.as_deref(), Some("SF"));
        assert_eq!(entries[1].name, "Jaylen Brown");
        assert_eq!(entries[1].position, None);
    }

    #[test]
    fn test_bad_players_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Heat.json");
        fs::write(
            &path,
            r#"[
                {"id": "1", "name": "Jimmy Butler"},
                {"name": "No Id"},
                {"id": "3"},
                "not an object",
                {"id": "", "name": "Empty Id"}
            ]"#,
        )
        .unwrap();

        let entries = parse_roster_file(&path);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "Jimmy Butler");
    }

    #[test]
    fn test_malformed_file_yields_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Broken.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(parse_roster_file(&path).is_empty());
        assert!(parse_roster_file(&temp_dir.path().join("missing.json")).is_empty());
    }
}

#[cfg(test)]
mod store_tests {
    use super::*;

    #[test]
    fn test_roster_loads_nested_files_in_path_order() {
        let temp_dir = TempDir::new().unwrap();
        write_team(temp_dir.path(), "west/Lakers.json", r#"[{"id": "10", "name": "LeBron James"}]"#);
        write_team(temp_dir.path(), "east/Celtics.json", r#"[{"id": "20", "name": "Jayson Tatum"}]"#);
        write_team(temp_dir.path(), "east/Broken.json", "oops");

        let store = RosterStore::new(temp_dir.path());
        let roster = store.roster(nba());
        let names: Vec<_> = roster.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Jayson Tatum", "LeBron James"]);
        assert_eq!(roster[1].team, "Lakers");
    }

    #[test]
    fn test_missing_directory_is_empty_roster() {
        let temp_dir = TempDir::new().unwrap();
        let store = RosterStore::new(temp_dir.path());
        assert!(store.roster(nba()).is_empty());
    }

    #[test]
    fn test_roster_cached_until_invalidated() {
        let temp_dir = TempDir::new().unwrap();
        write_team(temp_dir.path(), "Lakers.json", r#"[{"id": "10", "name": "LeBron James"}]"#);

        let store = RosterStore::new(temp_dir.path());
        assert_eq!(store.roster(nba()).len(), 1);

        write_team(temp_dir.path(), "Celtics.json", r#"[{"id": "20", "name": "Jayson Tatum"}]"#);
        assert_eq!(store.roster(nba()).len(), 1);

        store.invalidate();
        assert_eq!(store.roster(nba()).len(), 2);
    }

    #[test]
    fn test_sport_level_layout_without_league_directory() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("basketball");
        fs::create_dir_all(dir.join("west")).unwrap();
        fs::write(dir.join("Lakers.json"), r#"[{"id": "10", "name": "LeBron James"}]"#).unwrap();
        fs::write(
            dir.join("west").join("Warriors.json"),
            r#"[{"id": "30", "name": "Stephen Curry"}]"#,
        )
        .unwrap();

        let store = RosterStore::new(temp_dir.path());
        assert_eq!(store.dir_for(nba()), dir);

        let roster = store.roster(nba());
        let names: Vec<_> = roster.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["LeBron James", "Stephen Curry"]);
        assert_eq!(roster[0].team, "Lakers");
    }

    #[test]
    fn test_league_directory_narrows_the_sport_tree() {
        let temp_dir = TempDir::new().unwrap();
        write_team(temp_dir.path(), "Lakers.json", r#"[{"id": "10", "name": "LeBron James"}]"#);
        let wnba = temp_dir.path().join("basketball").join("wnba");
        fs::create_dir_all(&wnba).unwrap();
        fs::write(wnba.join("Aces.json"), r#"[{"id": "40", "name": "A'ja Wilson"}]"#).unwrap();

        let store = RosterStore::new(temp_dir.path());
        let roster = store.roster(nba());
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].id, "10");
    }

    #[test]
    fn test_find_by_id() {
        let temp_dir = TempDir::new().unwrap();
        write_team(temp_dir.path(), "Lakers.json", r#"[{"id": "10", "name": "LeBron James"}]"#);

        let store = RosterStore::new(temp_dir.path());
        let found = store.find_by_id(nba(), "10").unwrap();
        assert_eq!(found.name, "LeBron James");
        assert!(store.find_by_id(nba(), "99").is_none());
    }
}
