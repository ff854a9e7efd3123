//! Pane and chrome styling.
//!
//! Colors are dropped entirely when `NO_COLOR` is set.

use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Colors are on unless `NO_COLOR` is set to anything.
    pub fn from_env() -> Self {
        Self::new(std::env::var_os("NO_COLOR").is_none())
    }

    /// Explicit configuration.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== PaneStyles =====

/// Styles used by the layout renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaneStyles {
    /// Pane borders.
    pub border: Style,
    /// Boundary of the split being resized.
    pub active_boundary: Style,
    /// Pane titles.
    pub title: Style,
    /// The `[x]` button.
    pub delete_button: Style,
    /// Placed content.
    pub content: Style,
    /// Empty pane placeholder and hints.
    pub muted: Style,
    /// Header bar.
    pub header: Style,
}

impl PaneStyles {
    /// Styles for the current environment.
    pub fn new() -> Self {
        Self::with_color_config(ColorConfig::from_env())
    }

    /// Styles for an explicit color configuration.
    ///
    /// Without colors only modifiers remain, so the active boundary and
    /// the header stay distinguishable.
    pub fn with_color_config(config: ColorConfig) -> Self {
        if config.colors_enabled() {
            Self {
                border: Style::default().fg(Color::Gray),
                active_boundary: Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
                title: Style::default().fg(Color::Cyan),
                delete_button: Style::default().fg(Color::Red),
                content: Style::default().fg(Color::Green),
                muted: Style::default().fg(Color::DarkGray),
                header: Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            }
        } else {
            Self {
                border: Style::default(),
                active_boundary: Style::default().add_modifier(Modifier::BOLD),
                title: Style::default(),
                delete_button: Style::default(),
                content: Style::default(),
                muted: Style::default().add_modifier(Modifier::DIM),
                header: Style::default().add_modifier(Modifier::REVERSED),
            }
        }
    }
}

impl Default for PaneStyles {
    fn default() -> Self {
        Self::new()
    }
}

// ===== Tests =====
