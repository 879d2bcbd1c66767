//! Persistence for the timezone row list.
//!
//! One JSON record keyed `"timezones"`, written on every row-list change and
//! read once at startup. Every failure is absorbed at this boundary: a
//! missing or corrupt file falls back to the default row, and a failed write
//! leaves the session running in-memory only.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::models::{SavedTimezone, TimezoneRow};

/// File name used under `$HOME` when no explicit path is given.
const DEFAULT_FILE: &str = ".tzpanel.json";

#[derive(Debug, Serialize, Deserialize, Default)]
struct StateFile {
    timezones: Vec<SavedTimezone>,
}

/// Resolve the state file path: CLI argument, then `$TZPANEL_STATE`, then
/// `$HOME/.tzpanel.json`, then the bare file name in the working directory.
pub fn resolve_state_path(arg: Option<&str>) -> PathBuf {
    if let Some(p) = arg {
        return PathBuf::from(p);
    }
    if let Some(p) = std::env::var_os("TZPANEL_STATE") {
        return PathBuf::from(p);
    }
    match std::env::var_os("HOME") {
        Some(home) => Path::new(&home).join(DEFAULT_FILE),
        None => PathBuf::from(DEFAULT_FILE),
    }
}

/// Load saved rows; any failure or an empty list yields the default row.
pub fn load_rows(path: &Path) -> Vec<TimezoneRow> {
    let saved = fs::read_to_string(path)
        .ok()
        .and_then(|raw| serde_json::from_str::<StateFile>(&raw).ok())
        .map(|state| state.timezones)
        .unwrap_or_default();
    if saved.is_empty() {
        vec![TimezoneRow::default_row()]
    } else {
        saved.into_iter().map(SavedTimezone::into_row).collect()
    }
}

/// Save rows. Failures are swallowed.
pub fn save_rows(path: &Path, rows: &[TimezoneRow]) {
    let state = StateFile {
        timezones: rows.iter().map(SavedTimezone::from_row).collect(),
    };
    if let Ok(json) = serde_json::to_string_pretty(&state) {
        let _ = fs::write(path, json);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_file() -> PathBuf {
        std::env::temp_dir().join(format!("tzpanel-test-{}.json", Uuid::new_v4()))
    }

    #[test]
    fn test_round_trip() {
        let path = temp_file();
        let rows = vec![
            TimezoneRow::default_row(),
            TimezoneRow::new(0, "London"),
        ];
        save_rows(&path, &rows);

        let loaded = load_rows(&path);
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].id, "default");
        assert_eq!(loaded[0].offset_minutes, 480);
        assert_eq!(loaded[1].label, "London");
        // Display text is transient and never persisted.
        assert!(loaded[1].text.is_empty());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let rows = load_rows(Path::new("/nonexistent/tzpanel-state.json"));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "default");
        assert_eq!(rows[0].offset_minutes, 480);
    }

    #[test]
    fn test_corrupt_file_falls_back_to_default() {
        let path = temp_file();
        fs::write(&path, "{not json").unwrap();
        let rows = load_rows(&path);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "default");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_empty_list_falls_back_to_default() {
        let path = temp_file();
        fs::write(&path, r#"{"timezones": []}"#).unwrap();
        let rows = load_rows(&path);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "default");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_resolve_state_path_prefers_argument() {
        assert_eq!(resolve_state_path(Some("/tmp/custom.json")), PathBuf::from("/tmp/custom.json"));
    }
}
