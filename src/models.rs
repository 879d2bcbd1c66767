//! Domain models for the timestamp panel.
//!
//! Runtime rows carry their current display text; the persisted record is
//! the row minus that text, serialized camelCase for compatibility with
//! state files written by earlier builds.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::presets::find_preset_label;

/// Id of the fallback row used when no saved state exists.
pub const DEFAULT_ROW_ID: &str = "default";

/// Which input surface was edited last; decides the direction of the next
/// conversion. Transient, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditSource {
    #[default]
    Timestamp,
    Row(String),
}

/// One configured timezone row.
///
/// Row ids are opaque strings: freshly added rows get a UUID, but ids from
/// saved state (including the literal `"default"`) pass through untouched.
#[derive(Debug, Clone)]
pub struct TimezoneRow {
    pub id: String,
    pub label: String,
    pub offset_minutes: i32,
    pub editable_offset: bool,
    /// Current date-string content; may be mid-edit and unparsed.
    pub text: String,
}

impl TimezoneRow {
    /// Create a fresh row at the given offset with a generated id.
    pub fn new(offset_minutes: i32, label: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            label: label.into(),
            offset_minutes,
            editable_offset: true,
            text: String::new(),
        }
    }

    /// The fallback row: Beijing/Singapore, UTC+8.
    pub fn default_row() -> Self {
        Self {
            id: DEFAULT_ROW_ID.to_string(),
            label: "北京/新加坡".to_string(),
            offset_minutes: 480,
            editable_offset: true,
            text: String::new(),
        }
    }

    /// Display label for the active language, falling back to the numeric
    /// offset when the stored offset matches no preset.
    pub fn display_label(&self, zh: bool) -> String {
        find_preset_label(self.offset_minutes, zh)
            .map(str::to_string)
            .unwrap_or_else(|| format_offset(self.offset_minutes))
    }

    /// Row caption: `label (UTC+8)`.
    pub fn caption(&self, zh: bool) -> String {
        format!("{} ({})", self.display_label(zh), format_offset(self.offset_minutes))
    }
}

/// Persisted form of a row, stored under the `"timezones"` key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedTimezone {
    pub id: String,
    pub label: String,
    pub offset_minutes: i32,
    pub editable_offset: bool,
}

impl SavedTimezone {
    pub fn from_row(row: &TimezoneRow) -> Self {
        Self {
            id: row.id.clone(),
            label: row.label.clone(),
            offset_minutes: row.offset_minutes,
            editable_offset: row.editable_offset,
        }
    }

    pub fn into_row(self) -> TimezoneRow {
        TimezoneRow {
            id: self.id,
            label: self.label,
            offset_minutes: self.offset_minutes,
            editable_offset: self.editable_offset,
            text: String::new(),
        }
    }
}

/// Render an offset as `UTC±H[:MM]`; minutes show only when nonzero.
pub fn format_offset(minutes: i32) -> String {
    let sign = if minutes >= 0 { '+' } else { '-' };
    let abs = minutes.abs();
    let hours = abs / 60;
    let mins = abs % 60;
    if mins != 0 {
        format!("UTC{sign}{hours}:{mins:02}")
    } else {
        format!("UTC{sign}{hours}")
    }
}
