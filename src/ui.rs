//! UI rendering module.
//!
//! All TUI rendering with ratatui, keeping the Kanagawa Dragon aesthetic:
//! the timestamp field on top, one bordered block per timezone row, and
//! modal overlays for the offset selector, removal confirmation, and help.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Focus, InputMode, Toast};
use crate::models::format_offset;
use crate::theme::{colors, phase_color, styles};
use crate::time::day_phase;

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let bg_block = Block::default().style(Style::default().bg(colors::BG_DARK));
    frame.render_widget(bg_block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Timestamp input
            Constraint::Min(4),    // Timezone rows
            Constraint::Length(1), // Hint line
        ])
        .split(area);

    render_timestamp_field(frame, app, chunks[0]);
    render_rows(frame, app, chunks[1]);
    render_hint(frame, app, chunks[2]);

    // Overlays
    if app.offset_select.is_some() {
        render_offset_select(frame, app, area);
    }
    if app.confirm.is_some() {
        render_confirm_dialog(frame, app, area);
    }
    if let Some(toast) = &app.toast {
        render_toast(frame, toast, area);
    }
    if app.show_help {
        render_help_overlay(frame, app, area);
    }
}

/// Render the raw timestamp input field
fn render_timestamp_field(frame: &mut Frame, app: &App, area: Rect) {
    let s = app.strings();
    let editing = app.input_mode == InputMode::Editing && app.focus == Focus::Timestamp;

    let block = Block::default()
        .title(format!(" {} ", s.input_label))
        .title_style(styles::title())
        .title(Line::from(format!(" {} ", app.lang.name())).right_aligned())
        .borders(Borders::ALL)
        .border_style(if editing {
            styles::border_focused()
        } else {
            styles::border()
        })
        .style(Style::default().bg(colors::BG_MEDIUM));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let value = &app.panel.timestamp_input;
    let cursor = if editing { "█" } else { "" };
    let content = if value.is_empty() && !editing {
        Paragraph::new(s.placeholder).style(styles::text_hint())
    } else {
        let style = if app.timestamp_highlighted() {
            styles::highlight()
        } else if editing {
            styles::form_input_focused()
        } else {
            styles::text()
        };
        Paragraph::new(format!("{value}{cursor}")).style(style)
    };
    frame.render_widget(content, inner);
}

/// Render the timezone rows, keeping the selected one visible
fn render_rows(frame: &mut Frame, app: &App, area: Rect) {
    let rows = &app.panel.rows;
    if rows.is_empty() {
        return;
    }

    let visible = (area.height / 3).max(1) as usize;
    let start = app.selected_row.saturating_sub(visible.saturating_sub(1));

    let mut y = area.y;
    for (idx, row) in rows.iter().enumerate().skip(start).take(visible) {
        let row_area = Rect::new(area.x, y, area.width, 3.min(area.bottom().saturating_sub(y)));
        if row_area.height < 3 {
            break;
        }
        y += 3;

        let selected = idx == app.selected_row;
        let editing =
            app.input_mode == InputMode::Editing && app.focus == Focus::Row(row.id.clone());

        let accent = app
            .panel
            .last_instant
            .map(|ms| phase_color(day_phase(ms, row.offset_minutes)))
            .unwrap_or(colors::FG_DIM);

        let mut caption = Line::from(Span::styled(
            format!(" {} ", row.caption(app.is_zh())),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ));
        if selected {
            caption = caption.patch_style(Style::default().add_modifier(Modifier::REVERSED));
        }

        let block = Block::default()
            .title(caption)
            .borders(Borders::ALL)
            .border_style(if editing {
                styles::border_focused()
            } else if selected {
                styles::border()
            } else {
                styles::border_dim()
            })
            .style(Style::default().bg(colors::BG_MEDIUM));
        let inner = block.inner(row_area);
        frame.render_widget(block, row_area);

        let cursor = if editing { "█" } else { "" };
        let style = if app.row_highlighted(&row.id) {
            styles::highlight()
        } else if editing {
            styles::form_input_focused()
        } else {
            styles::text()
        };
        let text = Paragraph::new(format!("{}{cursor}", row.text)).style(style);
        frame.render_widget(text, inner);
    }
}

/// Render the bottom hint line
fn render_hint(frame: &mut Frame, app: &App, area: Rect) {
    let hint = Paragraph::new(app.strings().help_hint).style(styles::text_hint());
    frame.render_widget(hint, area);
}

/// Render the preset offset selector
fn render_offset_select(frame: &mut Frame, app: &App, area: Rect) {
    let select = match &app.offset_select {
        Some(s) => s,
        None => return,
    };

    let height = (select.offsets.len() as u16 + 2).min(area.height.saturating_sub(2));
    let popup_area = centered_rect(36, height, area);
    frame.render_widget(Clear, popup_area);

    let zh = app.is_zh();
    let items: Vec<ListItem> = select
        .offsets
        .iter()
        .enumerate()
        .map(|(idx, &minutes)| {
            let label = crate::presets::find_preset_label(minutes, zh)
                .map(str::to_string)
                .unwrap_or_else(|| format_offset(minutes));
            let line = format!(" {} ({}) ", label, format_offset(minutes));
            let style = if idx == select.index {
                styles::selected()
            } else {
                styles::text()
            };
            ListItem::new(Line::from(Span::styled(line, style)))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(format!(" {} ", app.strings().select_tz))
            .title_style(styles::title())
            .borders(Borders::ALL)
            .border_style(styles::border_focused())
            .style(styles::modal_content_bg()),
    );
    frame.render_widget(list, popup_area);
}

/// Render the remove-row confirmation dialog
fn render_confirm_dialog(frame: &mut Frame, app: &App, area: Rect) {
    let dialog = match &app.confirm {
        Some(d) => d,
        None => return,
    };
    let s = app.strings();

    let popup_area = centered_rect(45, 8, area);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(format!(" {} ", s.confirm_title))
        .title_style(Style::default().fg(colors::RED).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::RED))
        .style(Style::default().bg(colors::BG_MEDIUM));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(2),    // Message
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Buttons
        ])
        .margin(1)
        .split(inner);

    let message = Paragraph::new(dialog.message.as_str())
        .style(styles::text())
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center);
    frame.render_widget(message, chunks[0]);

    let button_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Length(10),
            Constraint::Percentage(10),
            Constraint::Length(10),
            Constraint::Percentage(25),
        ])
        .split(chunks[2]);

    let no_style = if !dialog.yes_focused {
        styles::button_focused()
    } else {
        styles::button()
    };
    let no_btn = Paragraph::new(format!("[ {} ]", s.confirm_no))
        .style(no_style)
        .alignment(Alignment::Center);
    frame.render_widget(no_btn, button_chunks[1]);

    let yes_style = if dialog.yes_focused {
        styles::button_danger()
    } else {
        styles::button()
    };
    let yes_btn = Paragraph::new(format!("[ {} ]", s.confirm_yes))
        .style(yes_style)
        .alignment(Alignment::Center);
    frame.render_widget(yes_btn, button_chunks[3]);
}

/// Render the transient toast near the bottom edge
fn render_toast(frame: &mut Frame, toast: &Toast, area: Rect) {
    let width = (toast.text.chars().count() as u16 + 4).clamp(20, area.width.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.bottom().saturating_sub(4);
    let toast_area = Rect::new(x, y, width, 3);

    frame.render_widget(Clear, toast_area);
    let popup = Paragraph::new(toast.text.as_str())
        .style(styles::error())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors::RED))
                .style(Style::default().bg(colors::BG_DIM)),
        );
    frame.render_widget(popup, toast_area);
}

/// Render the help overlay
fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let popup_area = centered_rect(52, 16, area);
    frame.render_widget(Clear, popup_area);

    let key_style = Style::default().fg(colors::BLUE);
    let zh = app.is_zh();
    let s = app.strings();
    let entries: Vec<(&str, String)> = vec![
        ("j/k", (if zh { "选择时区行" } else { "Select timezone row" }).to_string()),
        ("Enter / c", s.convert.to_string()),
        ("i", (if zh { "编辑时间戳" } else { "Edit timestamp" }).to_string()),
        ("e", (if zh { "编辑该行日期" } else { "Edit row date text" }).to_string()),
        ("o", s.select_tz.to_string()),
        ("a", s.add_tz.to_string()),
        ("d", s.remove_tz.to_string()),
        ("L", (if zh { "切换语言" } else { "Cycle language" }).to_string()),
        ("q / Ctrl+C", (if zh { "退出" } else { "Quit" }).to_string()),
    ];

    let mut lines = vec![Line::from(""), Line::from("")];
    for (keys, help) in entries {
        lines.push(Line::from(vec![
            Span::styled(format!("  {keys:<12}"), key_style),
            Span::raw(help),
        ]));
    }

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title(format!(" {} ", app.strings().title.trim()))
                .title_style(styles::title())
                .borders(Borders::ALL)
                .border_style(styles::border())
                .style(Style::default().bg(colors::BG_MEDIUM)),
        )
        .style(styles::text());
    frame.render_widget(paragraph, popup_area);
}

/// Helper to create a centered rectangle
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
