// Title bar component
//
// One line at the top: app name/version, backend storage label, whether
// the backend wants a webhook token, and the LIVE/PAUSED indicator.

use crate::config::VERSION;
use crate::model::BackendInfo;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    Frame,
};

use crate::theme::Theme;

pub fn render(f: &mut Frame, area: Rect, info: Option<&BackendInfo>, paused: bool, theme: &Theme) {
    let storage = info.map(|i| i.storage.as_str()).unwrap_or("connecting…");
    let token = match info {
        Some(i) if i.token_required => "  token required",
        _ => "",
    };

    let (state_label, state_color) = if paused {
        ("PAUSED", theme.paused)
    } else {
        ("LIVE", theme.live)
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" hookspy v{}", VERSION),
            Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  │ storage: {}{}  │ ", storage, token),
            Style::default().fg(theme.muted),
        ),
        Span::styled(
            state_label,
            Style::default().fg(state_color).add_modifier(Modifier::BOLD),
        ),
    ]);

    f.render_widget(ratatui::widgets::Paragraph::new(line), area);
}
