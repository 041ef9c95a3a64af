// Theme for the TUI
//
// A single resolved palette: every component reads its colors from here
// instead of hardcoding them in render code.

use ratatui::style::Color;
use ratatui::widgets::BorderType;

/// Resolved color palette ready for use in the TUI.
#[derive(Debug, Clone)]
pub struct Theme {
    // ─── Feed card colors ────────────────────────────────────
    pub timestamp: Color,
    pub content_type: Color,
    pub source_ip: Color,
    pub truncated_badge: Color,
    pub body: Color,

    // ─── UI element colors ───────────────────────────────────
    pub title: Color,
    pub border: Color,
    pub border_focused: Color,
    pub status_bar: Color,
    pub muted: Color,
    pub error: Color,
    pub live: Color,
    pub paused: Color,

    // ─── Selection ───────────────────────────────────────────
    pub selection: Color,
    pub selection_fg: Color,

    // ─── Terminal colors ─────────────────────────────────────
    pub background: Color,
    pub foreground: Color,

    pub border_type: BorderType,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Built-in dark palette.
    pub fn dark() -> Self {
        Self {
            timestamp: Color::DarkGray,
            content_type: Color::Cyan,
            source_ip: Color::Magenta,
            truncated_badge: Color::Yellow,
            body: Color::Gray,
            title: Color::Cyan,
            border: Color::DarkGray,
            border_focused: Color::Cyan,
            status_bar: Color::DarkGray,
            muted: Color::DarkGray,
            error: Color::Red,
            live: Color::Green,
            paused: Color::Yellow,
            selection: Color::Rgb(45, 55, 72),
            selection_fg: Color::White,
            background: Color::Reset,
            foreground: Color::Gray,
            border_type: BorderType::Rounded,
        }
    }
}
