//! Help overlay widget listing mouse gestures and keyboard shortcuts.
//!
//! Triggered by '?', dismissed by 'Esc' or '?'.

use super::constants::{HELP_POPUP_HEIGHT_PERCENT, HELP_POPUP_WIDTH_PERCENT};
use crate::config::KeyBindings;
use crate::model::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Order actions are listed in.
const ACTIONS: [KeyAction; 6] = [
    KeyAction::NextContent,
    KeyAction::PrevContent,
    KeyAction::ResetLayout,
    KeyAction::ToggleIds,
    KeyAction::ToggleHelp,
    KeyAction::Quit,
];

const MOUSE_GESTURES: [(&str, &str); 4] = [
    ("Drag outer border", "Split the pane, then size it"),
    ("Drag shared border", "Resize the split"),
    ("Click [x]", "Delete the pane"),
    ("Click pane", "Place the selected content"),
];

/// Render the help overlay centered on the screen.
///
/// Edit gestures and keys are left out in read-only mode.
pub fn render_help_overlay(frame: &mut Frame, bindings: &KeyBindings, read_only: bool) {
    let popup_area = centered_rect(
        HELP_POPUP_WIDTH_PERCENT,
        HELP_POPUP_HEIGHT_PERCENT,
        frame.area(),
    );

    frame.render_widget(Clear, popup_area);

    let help_paragraph = Paragraph::new(build_help_content(bindings, read_only))
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Left);

    frame.render_widget(help_paragraph, popup_area);

    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height.saturating_sub(1),
        width: popup_area.width,
        height: 1,
    };
    let hint = Paragraph::new(Line::from(Span::styled(
        " Press Esc or ? to close ",
        Style::default().add_modifier(Modifier::DIM),
    )))
    .alignment(Alignment::Center);

    frame.render_widget(hint, hint_area);
}

/// Calculate the centered rect for the help overlay.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_width = area.width * percent_x / 100;
    let popup_height = area.height * percent_y / 100;
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    Rect {
        x: area.x + popup_x,
        y: area.y + popup_y,
        width: popup_width,
        height: popup_height,
    }
}

/// Human label for a key event, e.g. `Ctrl+c`.
pub fn key_label(key: &KeyEvent) -> String {
    let base = match key.code {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        other => format!("{other:?}"),
    };
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        format!("Ctrl+{base}")
    } else {
        base
    }
}

fn describe(action: KeyAction) -> &'static str {
    match action {
        KeyAction::Quit => "Quit",
        KeyAction::ToggleHelp => "Show or hide this help",
        KeyAction::ToggleIds => "Show or hide pane ids",
        KeyAction::ResetLayout => "Reset to a single empty pane",
        KeyAction::NextContent => "Select next palette content",
        KeyAction::PrevContent => "Select previous palette content",
    }
}

/// Keys bound to `action`, sorted and deduplicated, joined with `/`.
fn keys_for(bindings: &KeyBindings, action: KeyAction) -> String {
    let mut labels: Vec<String> = bindings
        .iter()
        .filter(|(_, bound)| **bound == action)
        .map(|(key, _)| key_label(key))
        .collect();
    labels.sort_by_key(|label| (label.len(), label.clone()));
    labels.dedup();
    labels.join("/")
}

fn build_help_content(bindings: &KeyBindings, read_only: bool) -> Vec<Line<'static>> {
    let category_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(Color::White);

    let entry = |keys: String, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {keys:<20}"), key_style),
            Span::styled(desc, desc_style),
        ])
    };

    let mut lines = Vec::new();
    if !read_only {
        lines.push(Line::from(Span::styled("Mouse", category_style)));
        for (gesture, desc) in MOUSE_GESTURES {
            lines.push(entry(gesture.to_string(), desc));
        }
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled("Keys", category_style)));
    for action in ACTIONS {
        if read_only && action.edits_layout() {
            continue;
        }
        let keys = keys_for(bindings, action);
        if !keys.is_empty() {
            lines.push(entry(keys, describe(action)));
        }
    }
    lines.push(entry("Esc".to_string(), "Close this help"));
    lines
}

// ===== Tests =====

#[cfg(test)]
#[path = "help_tests.rs"]
mod tests;
