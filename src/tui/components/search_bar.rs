// Search bar component
//
// A single input line above the feed. The filter applies live as the user
// types; the bar stays visible while a query is active even outside
// search mode, so it is always clear why events are hidden.

use crate::theme::Theme;
use crate::tui::app::InputMode;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, query: &str, mode: InputMode, theme: &Theme) {
    let editing = mode == InputMode::Search;

    let label_style = if editing {
        Style::default().fg(theme.border_focused)
    } else {
        Style::default().fg(theme.muted)
    };

    let cursor = if editing { "▏" } else { "" };
    let line = Line::from(vec![
        Span::styled(" filter: ", label_style),
        Span::styled(
            format!("{}{}", query, cursor),
            Style::default().fg(theme.foreground),
        ),
        Span::styled(
            if editing { "  (Enter: apply, Esc: clear)" } else { "" },
            Style::default().fg(theme.muted),
        ),
    ]);

    f.render_widget(Paragraph::new(line), area);
}
