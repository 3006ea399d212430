//! Theme and styling configuration.

use std::sync::OnceLock;

use ratatui::style::Color;

/// Color theme for the application.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Primary foreground color.
    pub fg: Color,
    /// Dimmed text (hints, placeholders).
    pub dim: Color,
    /// Accent color for titles and focus.
    pub accent: Color,
    /// Border color.
    pub border: Color,
    /// Border color of the focused widget.
    pub border_focused: Color,
    /// Table header background.
    pub header_bg: Color,
    /// Background of even table rows.
    pub row_even_bg: Color,
    /// Background of odd table rows.
    pub row_odd_bg: Color,
    /// Foreground of the selected row.
    pub selection_fg: Color,
    /// Background of the selected row.
    pub selection_bg: Color,
    /// Input text color.
    pub input_fg: Color,
    /// Placeholder text color.
    pub input_placeholder: Color,
    /// Success color.
    pub success: Color,
    /// Error color.
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            fg: Color::White,
            dim: Color::DarkGray,
            accent: Color::Cyan,
            border: Color::DarkGray,
            border_focused: Color::Yellow,
            header_bg: Color::Rgb(0xe0, 0x55, 0x96),
            row_even_bg: Color::Rgb(0x3a, 0x22, 0x30),
            row_odd_bg: Color::Rgb(0x2a, 0x24, 0x3d),
            selection_fg: Color::Black,
            selection_bg: Color::Cyan,
            input_fg: Color::White,
            input_placeholder: Color::DarkGray,
            success: Color::Green,
            error: Color::Red,
        }
    }
}

static THEME: OnceLock<Theme> = OnceLock::new();

/// Get the active theme.
pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}
