//! Conversion coordinator.
//!
//! [`Panel`] is the state container behind the UI: the ordered row list, the
//! raw timestamp text, the last canonical instant, and the edit source.
//! Every transition either succeeds atomically or returns an error with the
//! state untouched, so the UI can toast the failure and carry on.

use crate::models::{format_offset, EditSource, TimezoneRow};
use crate::presets::find_preset_label;
use crate::time::{self, ConvertError};

/// Result of one conversion pass.
#[derive(Debug, Clone)]
pub struct ConvertOutcome {
    /// The canonical instant everything was formatted from.
    pub instant: i64,
    /// Ids of rows whose rendered text changed.
    pub changed_rows: Vec<String>,
    /// The edit source that drove this conversion.
    pub source: EditSource,
    /// Whether a row-sourced conversion moved the canonical instant (and
    /// with it the raw timestamp field).
    pub timestamp_changed: bool,
}

/// Panel state: rows, raw timestamp text, and conversion bookkeeping.
#[derive(Debug, Clone)]
pub struct Panel {
    pub rows: Vec<TimezoneRow>,
    pub timestamp_input: String,
    pub last_instant: Option<i64>,
    pub edit_source: EditSource,
}

impl Panel {
    pub fn new(rows: Vec<TimezoneRow>) -> Self {
        Self {
            rows,
            timestamp_input: String::new(),
            last_instant: None,
            edit_source: EditSource::Timestamp,
        }
    }

    pub fn row(&self, id: &str) -> Option<&TimezoneRow> {
        self.rows.iter().find(|r| r.id == id)
    }

    /// Record typing in the raw timestamp field.
    pub fn mark_timestamp_edited(&mut self) {
        self.edit_source = EditSource::Timestamp;
    }

    /// Record typing in a row's date field.
    pub fn mark_row_edited(&mut self, id: &str) {
        self.edit_source = EditSource::Row(id.to_string());
    }

    /// Run one conversion pass.
    ///
    /// The base instant is `override_ms` when given; otherwise it comes from
    /// the current edit source — a row's date text (through its offset) or
    /// the raw timestamp field. On success every row is reformatted, a
    /// row-sourced conversion rewrites the raw timestamp text, and the edit
    /// source resets to the timestamp field. A row edit is a one-shot
    /// trigger, not a sticky mode.
    pub fn convert(&mut self, override_ms: Option<i64>) -> Result<ConvertOutcome, ConvertError> {
        let source = self.edit_source.clone();
        let instant = match override_ms {
            Some(ms) => ms,
            None => match &source {
                EditSource::Row(id) => {
                    let row = self.row(id).ok_or(ConvertError::RowNotFound)?;
                    let fields = time::parse_date_string(&row.text)?;
                    time::to_instant(&fields, row.offset_minutes)?
                }
                EditSource::Timestamp => time::parse_timestamp(&self.timestamp_input)?,
            },
        };

        // Parsing is done; from here on the pass cannot fail.
        let mut changed_rows = Vec::new();
        for row in &mut self.rows {
            let text = time::format_date_string(instant, row.offset_minutes);
            if row.text != text {
                changed_rows.push(row.id.clone());
                row.text = text;
            }
        }

        let from_row = matches!(source, EditSource::Row(_));
        let timestamp_changed = from_row && self.last_instant != Some(instant);
        if from_row {
            // Keep the two input surfaces agreeing.
            self.timestamp_input = instant.to_string();
        }
        self.last_instant = Some(instant);
        self.edit_source = EditSource::Timestamp;

        Ok(ConvertOutcome { instant, changed_rows, source, timestamp_changed })
    }

    /// Append a UTC+0 row initialized from the current base instant.
    ///
    /// Needs a base: the last converted instant, else whatever the raw
    /// timestamp field parses to. Returns the new row's id.
    pub fn add_row(&mut self, zh: bool) -> Result<String, ConvertError> {
        let base = match self.last_instant {
            Some(ms) => ms,
            None => time::parse_timestamp(&self.timestamp_input)?,
        };
        self.last_instant = Some(base);

        let label = find_preset_label(0, zh)
            .map(str::to_string)
            .unwrap_or_else(|| format_offset(0));
        let mut row = TimezoneRow::new(0, label);
        row.text = time::format_date_string(base, 0);
        let id = row.id.clone();
        self.rows.push(row);
        Ok(id)
    }

    /// Remove a row by id. The first row is permanent; removing it is
    /// refused no matter what the caller confirmed.
    pub fn remove_row(&mut self, id: &str) -> bool {
        match self.rows.iter().position(|r| r.id == id) {
            Some(0) | None => false,
            Some(idx) => {
                self.rows.remove(idx);
                true
            }
        }
    }

    /// Whether a row may be removed (anything but the first).
    pub fn is_removable(&self, id: &str) -> bool {
        self.rows.iter().position(|r| r.id == id).is_some_and(|idx| idx > 0)
    }

    /// Change a row's offset in place, reformatting only that row against
    /// the last canonical instant. Other rows and the timestamp field are
    /// left alone.
    pub fn set_row_offset(&mut self, id: &str, offset_minutes: i32, label: impl Into<String>) {
        let Some(row) = self.rows.iter_mut().find(|r| r.id == id) else {
            return;
        };
        row.offset_minutes = offset_minutes;
        row.label = label.into();
        if let Some(ms) = self.last_instant {
            row.text = time::format_date_string(ms, offset_minutes);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_row_panel() -> Panel {
        let mut utc = TimezoneRow::new(0, "London");
        utc.id = "utc".to_string();
        let mut beijing = TimezoneRow::new(480, "Beijing/Singapore");
        beijing.id = "beijing".to_string();
        Panel::new(vec![utc, beijing])
    }

    #[test]
    fn test_timestamp_sourced_conversion() {
        let mut panel = two_row_panel();
        panel.timestamp_input = "0".to_string();
        let out = panel.convert(None).unwrap();

        assert_eq!(out.instant, 0);
        assert_eq!(panel.rows[0].text, "1970-01-01 00:00:00");
        assert_eq!(panel.rows[1].text, "1970-01-01 08:00:00");
        assert_eq!(out.changed_rows, vec!["utc".to_string(), "beijing".to_string()]);
        assert!(!out.timestamp_changed);
        assert_eq!(panel.last_instant, Some(0));
    }

    #[test]
    fn test_row_edit_recomputes_canonical_instant() {
        let mut panel = two_row_panel();
        panel.timestamp_input = "0".to_string();
        panel.convert(None).unwrap();

        // The user retypes the +8 row one hour later.
        panel.rows[1].text = "1970-01-01 09:00:00".to_string();
        panel.mark_row_edited("beijing");
        let out = panel.convert(None).unwrap();

        assert_eq!(out.instant, 3_600_000);
        assert_eq!(panel.rows[0].text, "1970-01-01 01:00:00");
        assert_eq!(panel.rows[1].text, "1970-01-01 09:00:00");
        // The edited row reformats to exactly what was typed, so only the
        // other row counts as changed.
        assert_eq!(out.changed_rows, vec!["utc".to_string()]);
        assert!(out.timestamp_changed);
        // The raw timestamp field is rewritten to the new canonical value.
        assert_eq!(panel.timestamp_input, "3600000");
        // Row edits are one-shot; the next conversion is timestamp-sourced.
        assert_eq!(panel.edit_source, EditSource::Timestamp);
    }

    #[test]
    fn test_convert_twice_is_idempotent() {
        let mut panel = two_row_panel();
        panel.timestamp_input = "1700000000".to_string();
        panel.convert(None).unwrap();
        let out = panel.convert(None).unwrap();
        assert!(out.changed_rows.is_empty());
        assert!(!out.timestamp_changed);
        assert_eq!(out.instant, 1_700_000_000_000);
    }

    #[test]
    fn test_override_takes_precedence() {
        let mut panel = two_row_panel();
        panel.timestamp_input = "garbage".to_string();
        panel.mark_row_edited("beijing");
        let out = panel.convert(Some(0)).unwrap();
        assert_eq!(out.instant, 0);
        assert_eq!(panel.rows[0].text, "1970-01-01 00:00:00");
    }

    #[test]
    fn test_parse_failure_mutates_nothing() {
        let mut panel = two_row_panel();
        panel.timestamp_input = "1700000000".to_string();
        panel.convert(None).unwrap();
        let before = panel.clone();

        panel.timestamp_input = "abc".to_string();
        assert_eq!(panel.convert(None).unwrap_err(), ConvertError::NotANumber);
        assert_eq!(panel.last_instant, before.last_instant);
        assert_eq!(panel.rows[0].text, before.rows[0].text);
        assert_eq!(panel.rows[1].text, before.rows[1].text);
    }

    #[test]
    fn test_bad_row_text_propagates_untouched() {
        let mut panel = two_row_panel();
        panel.timestamp_input = "0".to_string();
        panel.convert(None).unwrap();

        panel.rows[1].text = "not a date".to_string();
        panel.mark_row_edited("beijing");
        let err = panel.convert(None).unwrap_err();
        assert_eq!(err, ConvertError::BadDateFormat);
        // No mutation: the half-typed text stays, the other row keeps its
        // rendering, and the edit source is still armed.
        assert_eq!(panel.rows[1].text, "not a date");
        assert_eq!(panel.rows[0].text, "1970-01-01 00:00:00");
        assert_eq!(panel.edit_source, EditSource::Row("beijing".to_string()));
    }

    #[test]
    fn test_stale_row_source_reports_row_not_found() {
        let mut panel = two_row_panel();
        panel.mark_row_edited("gone");
        assert_eq!(panel.convert(None).unwrap_err(), ConvertError::RowNotFound);
        assert_eq!(panel.last_instant, None);
    }

    #[test]
    fn test_row_edit_normalizes_overflow_dates() {
        let mut panel = two_row_panel();
        panel.timestamp_input = "0".to_string();
        panel.convert(None).unwrap();

        panel.rows[0].text = "2023-13-01 00:00:00".to_string();
        panel.mark_row_edited("utc");
        let out = panel.convert(None).unwrap();
        // Month 13 carried into January 2024 and the row re-rendered
        // normalized.
        assert_eq!(panel.rows[0].text, "2024-01-01 00:00:00");
        assert!(out.changed_rows.contains(&"utc".to_string()));
    }

    #[test]
    fn test_add_row_requires_base_instant() {
        let mut panel = two_row_panel();
        panel.timestamp_input = String::new();
        assert_eq!(panel.add_row(false).unwrap_err(), ConvertError::EmptyInput);
        assert_eq!(panel.rows.len(), 2);

        panel.timestamp_input = "0".to_string();
        let id = panel.add_row(false).unwrap();
        assert_eq!(panel.rows.len(), 3);
        let row = panel.row(&id).unwrap();
        assert_eq!(row.offset_minutes, 0);
        assert_eq!(row.label, "London");
        assert_eq!(row.text, "1970-01-01 00:00:00");
        assert_eq!(panel.last_instant, Some(0));
    }

    #[test]
    fn test_first_row_is_permanent() {
        let mut panel = two_row_panel();
        assert!(!panel.is_removable("utc"));
        assert!(!panel.remove_row("utc"));
        assert!(panel.is_removable("beijing"));
        assert!(panel.remove_row("beijing"));
        assert_eq!(panel.rows.len(), 1);
        assert!(!panel.remove_row("beijing"));
    }

    #[test]
    fn test_set_row_offset_reformats_one_row() {
        let mut panel = two_row_panel();
        panel.timestamp_input = "0".to_string();
        panel.convert(None).unwrap();

        panel.set_row_offset("beijing", 540, "Tokyo/Seoul");
        let row = panel.row("beijing").unwrap();
        assert_eq!(row.offset_minutes, 540);
        assert_eq!(row.text, "1970-01-01 09:00:00");
        // The sibling row is untouched.
        assert_eq!(panel.rows[0].text, "1970-01-01 00:00:00");
    }

    #[test]
    fn test_set_row_offset_without_instant_keeps_text() {
        let mut panel = two_row_panel();
        panel.set_row_offset("beijing", 540, "Tokyo/Seoul");
        let row = panel.row("beijing").unwrap();
        assert_eq!(row.offset_minutes, 540);
        assert!(row.text.is_empty());
    }
}
