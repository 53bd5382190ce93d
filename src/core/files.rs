//! File system helpers for the identity store and roster tree

use std::{
    fs,
    io::{Read, Write},
    path::{Path, PathBuf},
};

const APP_DIR: &str = "sports-intel";

/// Path: ~/.local/share/sports-intel (or the platform equivalent)
pub fn default_data_dir() -> PathBuf {
    let base = dirs::data_dir().unwrap_or_else(|| {
        let mut home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.push(".local");
        home.push("share");
        home
    });
    base.join(APP_DIR)
}

/// Path: <data dir>/rosters
pub fn default_roster_dir() -> PathBuf {
    default_data_dir().join("rosters")
}

/// Try to read a file into a String
pub fn try_read_to_string(path: &Path) -> Option<String> {
    let mut f = fs::File::open(path).ok()?;
    let mut s = String::new();

    f.read_to_string(&mut s).ok()?;

    Some(s)
}

/// Write a string to file, replacing any previous contents in one rename.
///
/// The data is written to a sibling `.tmp` file first so a crash mid-write
/// never leaves a truncated document behind.
pub fn write_string(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let tmp = path.with_extension("json.tmp");
    {
        let mut f = fs::File::create(&tmp)?;
        f.write_all(contents.as_bytes())?;
        f.sync_all()?;
    }
    fs::rename(&tmp, path)
}

/// Recursively collect every `*.json` file below `root`, sorted by path.
///
/// A missing root yields an empty list; unreadable subdirectories are skipped.
pub fn collect_json_files(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let Ok(entries) = fs::read_dir(&dir) else {
            continue;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                pending.push(path);
            } else if path.extension().is_some_and(|ext| ext == "json") {
                files.push(path);
            }
        }
    }

    files.sort();
    files
}
