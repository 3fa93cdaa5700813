//! Pane and status styling.

use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on the
/// `NO_COLOR` environment variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Colors are enabled unless `NO_COLOR` is set (to any value).
    pub fn from_env() -> Self {
        Self::new(std::env::var_os("NO_COLOR").is_none())
    }

    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== PaneStyles =====

/// Styles shared by every pane: focus borders, list highlight, status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneStyles {
    pub focused_border: Style,
    pub unfocused_border: Style,
    pub highlight: Style,
    pub status: Style,
    pub status_error: Style,
    pub cursor: Style,
}

impl PaneStyles {
    pub fn new() -> Self {
        Self::with_color_config(ColorConfig::from_env())
    }

    /// Without colors, focus and highlight fall back to text modifiers.
    pub fn with_color_config(config: ColorConfig) -> Self {
        let cursor = Style::default().add_modifier(Modifier::REVERSED);
        if config.colors_enabled() {
            Self {
                focused_border: Style::default().fg(Color::Cyan),
                unfocused_border: Style::default().fg(Color::DarkGray),
                highlight: Style::default()
                    .bg(Color::Blue)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
                status: Style::default().fg(Color::Gray),
                status_error: Style::default().fg(Color::Red),
                cursor,
            }
        } else {
            Self {
                focused_border: Style::default().add_modifier(Modifier::BOLD),
                unfocused_border: Style::default(),
                highlight: Style::default().add_modifier(Modifier::REVERSED),
                status: Style::default(),
                status_error: Style::default().add_modifier(Modifier::BOLD),
                cursor,
            }
        }
    }

    pub fn border(&self, focused: bool) -> Style {
        if focused {
            self.focused_border
        } else {
            self.unfocused_border
        }
    }
}

impl Default for PaneStyles {
    fn default() -> Self {
        Self::new()
    }
}
