//! Application state and event handling.
//!
//! Elm-style: a central `App` struct holds all state, key events mutate it,
//! and the frame tick expires transient toast/highlight flags. The
//! conversion logic itself lives in [`crate::panel`]; this layer only
//! routes keys, schedules the cosmetic timers, and persists row changes.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::i18n::{strings, Lang, Strings};
use crate::models::EditSource;
use crate::panel::{ConvertOutcome, Panel};
use crate::presets::PRESET_ZONES;
use crate::storage;
use crate::time::ConvertError;

/// How long the changed-field highlight stays on.
const HIGHLIGHT_TTL: Duration = Duration::from_millis(500);
/// How long a toast message stays up.
const TOAST_TTL: Duration = Duration::from_millis(1400);

/// Input mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Normal navigation mode
    #[default]
    Normal,
    /// Typing into the timestamp field or a row's date field
    Editing,
    /// Choosing a preset offset for the selected row
    SelectingOffset,
    /// Confirmation dialog (remove row)
    Confirming,
}

/// Which text field holds the cursor while editing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Focus {
    Timestamp,
    Row(String),
}

/// Transient toast message
#[derive(Debug, Clone)]
pub struct Toast {
    pub text: String,
    shown_at: Instant,
}

impl Toast {
    fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), shown_at: Instant::now() }
    }

    fn should_dismiss(&self) -> bool {
        self.shown_at.elapsed() > TOAST_TTL
    }
}

/// Transient changed-field highlight. Replaced wholesale on every
/// conversion, so an expiry can only ever clear the state it was scheduled
/// against.
#[derive(Debug, Clone)]
pub struct HighlightState {
    pub timestamp: bool,
    pub rows: Vec<String>,
    since: Instant,
}

impl HighlightState {
    fn new(timestamp: bool, rows: Vec<String>) -> Self {
        Self { timestamp, rows, since: Instant::now() }
    }

    fn should_clear(&self) -> bool {
        self.since.elapsed() > HIGHLIGHT_TTL
    }
}

/// Confirmation dialog state for removing a row
#[derive(Debug, Clone)]
pub struct ConfirmDialog {
    pub row_id: String,
    pub message: String,
    /// Whether "Yes" is focused (false = "No" is focused)
    pub yes_focused: bool,
}

/// Offset selector state: the row being changed and the preset cursor
#[derive(Debug, Clone)]
pub struct OffsetSelect {
    pub row_id: String,
    /// Offsets offered: every preset not already used by another row, plus
    /// the row's current offset.
    pub offsets: Vec<i32>,
    pub index: usize,
}

/// Main application state
#[derive(Debug)]
pub struct App {
    /// Whether the application should quit
    pub should_quit: bool,

    /// Current input mode
    pub input_mode: InputMode,

    /// Conversion state: rows, timestamp text, edit source
    pub panel: Panel,

    /// Index of the selected row
    pub selected_row: usize,

    /// Focused text field while in `Editing` mode
    pub focus: Focus,

    /// Current toast (if any)
    pub toast: Option<Toast>,

    /// Current changed-field highlight (if any)
    pub highlight: Option<HighlightState>,

    /// Current confirm dialog (if any)
    pub confirm: Option<ConfirmDialog>,

    /// Current offset selector (if any)
    pub offset_select: Option<OffsetSelect>,

    /// Display language
    pub lang: Lang,

    /// Show help overlay
    pub show_help: bool,

    state_path: PathBuf,
}

impl App {
    /// Create the application: load saved rows, seed the timestamp field
    /// with `now_ms`, and run one conversion with highlighting suppressed.
    pub fn new(state_path: PathBuf, now_ms: i64) -> Self {
        let rows = storage::load_rows(&state_path);
        let mut panel = Panel::new(rows);
        panel.timestamp_input = now_ms.to_string();
        // The seed instant always parses; ignore the outcome and show no
        // highlight on the first render.
        let _ = panel.convert(Some(now_ms));

        Self {
            should_quit: false,
            input_mode: InputMode::Normal,
            panel,
            selected_row: 0,
            focus: Focus::Timestamp,
            toast: None,
            highlight: None,
            confirm: None,
            offset_select: None,
            lang: Lang::Auto,
            show_help: false,
            state_path,
        }
    }

    /// Active string table.
    pub fn strings(&self) -> &'static Strings {
        strings(self.lang)
    }

    pub fn is_zh(&self) -> bool {
        self.lang.is_zh()
    }

    /// Show a toast message, superseding any current one.
    pub fn show_toast(&mut self, text: impl Into<String>) {
        self.toast = Some(Toast::new(text));
    }

    /// Whether the given row's text field is currently highlighted.
    pub fn row_highlighted(&self, id: &str) -> bool {
        self.highlight.as_ref().is_some_and(|h| h.rows.iter().any(|r| r == id))
    }

    /// Whether the raw timestamp field is currently highlighted.
    pub fn timestamp_highlighted(&self) -> bool {
        self.highlight.as_ref().is_some_and(|h| h.timestamp)
    }

    fn save(&self) {
        storage::save_rows(&self.state_path, &self.panel.rows);
    }

    /// Expire transient state (called every frame).
    pub fn tick(&mut self) {
        if self.toast.as_ref().is_some_and(Toast::should_dismiss) {
            self.toast = None;
        }
        if self.highlight.as_ref().is_some_and(HighlightState::should_clear) {
            self.highlight = None;
        }
    }

    /// Run a conversion from the current edit source and apply the
    /// highlight policy to the outcome.
    fn run_convert(&mut self) -> bool {
        match self.panel.convert(None) {
            Ok(outcome) => {
                self.apply_highlight(&outcome);
                true
            }
            // Stale row reference: a leftover edit source for a removed
            // row. Not a user mistake, so no toast.
            Err(ConvertError::RowNotFound) => false,
            Err(err) => {
                self.show_toast(self.strings().convert_error(err));
                false
            }
        }
    }

    /// Timestamp-sourced conversions highlight the rows that changed; a
    /// row-sourced conversion highlights the other changed rows plus the
    /// timestamp field when the canonical instant moved.
    fn apply_highlight(&mut self, outcome: &ConvertOutcome) {
        let state = match &outcome.source {
            EditSource::Timestamp => HighlightState::new(false, outcome.changed_rows.clone()),
            EditSource::Row(edited) => {
                let others = outcome
                    .changed_rows
                    .iter()
                    .filter(|id| *id != edited)
                    .cloned()
                    .collect();
                HighlightState::new(outcome.timestamp_changed, others)
            }
        };
        self.highlight = Some(state);
    }

    /// Handle a key event.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Enter) {
                self.show_help = false;
            }
            return;
        }

        match self.input_mode {
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::Editing => self.handle_editing_key(key),
            InputMode::SelectingOffset => self.handle_selecting_key(key),
            InputMode::Confirming => self.handle_confirming_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('j') | KeyCode::Down => {
                if !self.panel.rows.is_empty() {
                    self.selected_row = (self.selected_row + 1) % self.panel.rows.len();
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                if !self.panel.rows.is_empty() {
                    self.selected_row = self
                        .selected_row
                        .checked_sub(1)
                        .unwrap_or(self.panel.rows.len() - 1);
                }
            }
            KeyCode::Char('i') => {
                self.focus = Focus::Timestamp;
                self.input_mode = InputMode::Editing;
            }
            KeyCode::Char('e') => {
                if let Some(row) = self.panel.rows.get(self.selected_row) {
                    self.focus = Focus::Row(row.id.clone());
                    self.input_mode = InputMode::Editing;
                }
            }
            KeyCode::Enter | KeyCode::Char('c') => {
                self.run_convert();
            }
            KeyCode::Char('o') => self.open_offset_select(),
            KeyCode::Char('a') => self.add_row(),
            KeyCode::Char('d') | KeyCode::Delete => self.open_remove_confirm(),
            KeyCode::Char('L') => self.lang = self.lang.next(),
            _ => {}
        }
    }

    fn handle_editing_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.input_mode = InputMode::Normal,
            KeyCode::Enter => {
                // Leave editing only once the text converts; otherwise the
                // toast explains and the cursor stays for fixing.
                if self.run_convert() {
                    self.input_mode = InputMode::Normal;
                }
            }
            KeyCode::Backspace => {
                self.edit_text(|text| {
                    text.pop();
                });
            }
            KeyCode::Char(c) => {
                self.edit_text(|text| text.push(c));
            }
            _ => {}
        }
    }

    /// Mutate the focused text and mark it as the edit source.
    fn edit_text(&mut self, f: impl FnOnce(&mut String)) {
        match self.focus.clone() {
            Focus::Timestamp => {
                f(&mut self.panel.timestamp_input);
                self.panel.mark_timestamp_edited();
            }
            Focus::Row(id) => {
                if let Some(row) = self.panel.rows.iter_mut().find(|r| r.id == id) {
                    f(&mut row.text);
                    self.panel.mark_row_edited(&id);
                }
            }
        }
    }

    fn open_offset_select(&mut self) {
        let Some(row) = self.panel.rows.get(self.selected_row) else {
            return;
        };
        if !row.editable_offset {
            return;
        }
        let used: Vec<i32> = self
            .panel
            .rows
            .iter()
            .filter(|r| r.id != row.id)
            .map(|r| r.offset_minutes)
            .collect();
        let offsets: Vec<i32> = PRESET_ZONES
            .iter()
            .map(|z| z.offset_minutes)
            .filter(|m| *m == row.offset_minutes || !used.contains(m))
            .collect();
        if offsets.is_empty() {
            return;
        }
        let index = offsets.iter().position(|m| *m == row.offset_minutes).unwrap_or(0);
        self.offset_select = Some(OffsetSelect { row_id: row.id.clone(), offsets, index });
        self.input_mode = InputMode::SelectingOffset;
    }

    fn handle_selecting_key(&mut self, key: KeyEvent) {
        let Some(select) = &mut self.offset_select else {
            self.input_mode = InputMode::Normal;
            return;
        };
        match key.code {
            KeyCode::Esc => {
                self.offset_select = None;
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Char('j') | KeyCode::Down => {
                select.index = (select.index + 1) % select.offsets.len();
            }
            KeyCode::Char('k') | KeyCode::Up => {
                select.index = select.index.checked_sub(1).unwrap_or(select.offsets.len() - 1);
            }
            KeyCode::Enter => {
                let offset = select.offsets[select.index];
                let row_id = select.row_id.clone();
                let label = crate::presets::find_preset_label(offset, self.is_zh())
                    .map(str::to_string)
                    .unwrap_or_else(|| crate::models::format_offset(offset));
                self.panel.set_row_offset(&row_id, offset, label);
                self.save();
                self.offset_select = None;
                self.input_mode = InputMode::Normal;
            }
            _ => {}
        }
    }

    fn add_row(&mut self) {
        let zh = self.is_zh();
        match self.panel.add_row(zh) {
            Ok(id) => {
                self.selected_row = self
                    .panel
                    .rows
                    .iter()
                    .position(|r| r.id == id)
                    .unwrap_or(self.panel.rows.len() - 1);
                self.save();
            }
            Err(_) => {
                self.show_toast(self.strings().add_needs_timestamp);
            }
        }
    }

    fn open_remove_confirm(&mut self) {
        let Some(row) = self.panel.rows.get(self.selected_row) else {
            return;
        };
        if !self.panel.is_removable(&row.id) {
            return;
        }
        let label = row.display_label(self.is_zh());
        let message = self.strings().confirm_remove(&label, self.is_zh());
        self.confirm = Some(ConfirmDialog {
            row_id: row.id.clone(),
            message,
            yes_focused: false,
        });
        self.input_mode = InputMode::Confirming;
    }

    fn handle_confirming_key(&mut self, key: KeyEvent) {
        let Some(dialog) = &mut self.confirm else {
            self.input_mode = InputMode::Normal;
            return;
        };
        match key.code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => self.close_confirm(),
            KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
                dialog.yes_focused = !dialog.yes_focused;
            }
            KeyCode::Enter => {
                if dialog.yes_focused {
                    self.remove_confirmed();
                } else {
                    self.close_confirm();
                }
            }
            KeyCode::Char('y') | KeyCode::Char('Y') => self.remove_confirmed(),
            _ => {}
        }
    }

    fn remove_confirmed(&mut self) {
        if let Some(dialog) = self.confirm.take() {
            if self.panel.remove_row(&dialog.row_id) {
                self.save();
            }
        }
        if self.selected_row >= self.panel.rows.len() && !self.panel.rows.is_empty() {
            self.selected_row = self.panel.rows.len() - 1;
        }
        self.input_mode = InputMode::Normal;
    }

    fn close_confirm(&mut self) {
        self.confirm = None;
        self.input_mode = InputMode::Normal;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn test_app() -> App {
        // A path that never exists: state starts from the default row.
        let path = std::env::temp_dir().join(format!("tzpanel-app-{}.json", uuid::Uuid::new_v4()));
        let mut app = App::new(path, 1_700_000_000_000);
        app.lang = Lang::En;
        app
    }

    #[test]
    fn test_startup_seeds_and_converts() {
        let app = test_app();
        assert_eq!(app.panel.timestamp_input, "1700000000000");
        assert_eq!(app.panel.last_instant, Some(1_700_000_000_000));
        assert_eq!(app.panel.rows[0].text, "2023-11-15 08:13:20");
        // Startup conversion shows no highlight.
        assert!(app.highlight.is_none());
    }

    #[test]
    fn test_convert_key_highlights_changed_rows() {
        let mut app = test_app();
        app.panel.timestamp_input = "0".to_string();
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.panel.rows[0].text, "1970-01-01 08:00:00");
        assert!(app.row_highlighted(&app.panel.rows[0].id.clone()));
        assert!(!app.timestamp_highlighted());
    }

    #[test]
    fn test_bad_input_toasts_and_keeps_state(){
        let mut app = test_app();
        let before = app.panel.rows[0].text.clone();
        app.panel.timestamp_input = "abc".to_string();
        app.panel.mark_timestamp_edited();
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.toast.as_ref().map(|t| t.text.as_str()), Some("Not a valid number"));
        assert_eq!(app.panel.rows[0].text, before);
    }

    #[test]
    fn test_row_edit_round_trip() {
        let mut app = test_app();
        app.panel.timestamp_input = "0".to_string();
        app.handle_key(key(KeyCode::Enter));

        // Edit the default (+8) row to 09:00 and convert.
        app.handle_key(key(KeyCode::Char('e')));
        assert_eq!(app.input_mode, InputMode::Editing);
        app.panel.rows[0].text.clear();
        for c in "1970-01-01 09:00:00".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.panel.last_instant, Some(3_600_000));
        assert_eq!(app.panel.timestamp_input, "3600000");
        assert!(app.timestamp_highlighted());
    }

    #[test]
    fn test_add_and_remove_rows() {
        let mut app = test_app();
        app.handle_key(key(KeyCode::Char('a')));
        assert_eq!(app.panel.rows.len(), 2);
        assert_eq!(app.panel.rows[1].offset_minutes, 0);
        assert_eq!(app.selected_row, 1);

        // Removing needs the dialog; 'y' confirms.
        app.handle_key(key(KeyCode::Char('d')));
        assert_eq!(app.input_mode, InputMode::Confirming);
        app.handle_key(key(KeyCode::Char('y')));
        assert_eq!(app.panel.rows.len(), 1);
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_first_row_has_no_remove_dialog() {
        let mut app = test_app();
        app.selected_row = 0;
        app.handle_key(key(KeyCode::Char('d')));
        assert!(app.confirm.is_none());
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_confirm_defaults_to_no() {
        let mut app = test_app();
        app.handle_key(key(KeyCode::Char('a')));
        app.handle_key(key(KeyCode::Char('d')));
        // Enter with "No" focused cancels.
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.panel.rows.len(), 2);
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_offset_select_excludes_used_offsets() {
        let mut app = test_app();
        app.handle_key(key(KeyCode::Char('a'))); // second row at UTC+0
        app.selected_row = 1;
        app.handle_key(key(KeyCode::Char('o')));
        let select = app.offset_select.as_ref().unwrap();
        // The default row's +480 is taken; the row's own 0 stays offered.
        assert!(select.offsets.contains(&0));
        assert!(!select.offsets.contains(&480));
        assert_eq!(select.offsets[select.index], 0);
    }

    #[test]
    fn test_language_cycles() {
        let mut app = test_app();
        app.lang = Lang::Auto;
        app.handle_key(key(KeyCode::Char('L')));
        assert_eq!(app.lang, Lang::Zh);
        app.handle_key(key(KeyCode::Char('L')));
        assert_eq!(app.lang, Lang::En);
    }
}
