// Compose panel component
//
// A centered overlay holding the ad-hoc JSON payload editor. The buffer is
// validated locally before any network call; Ctrl-P re-indents it in
// place. Rendered only while compose mode is active.

use crate::theme::Theme;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, buffer: &str, theme: &Theme) {
    let popup = centered(area, 70, 60);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border_focused))
        .title(" Compose payload ")
        .title_bottom(" Ctrl-S: send  Ctrl-P: prettify  Esc: close ");

    let mut lines: Vec<Line> = buffer
        .split('\n')
        .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(theme.foreground))))
        .collect();
    // Trailing cursor marker on the last line
    if let Some(last) = lines.last_mut() {
        last.push_span(Span::styled("▏", Style::default().fg(theme.border_focused)));
    }

    let viewport = popup.height.saturating_sub(2) as usize;
    let scroll = lines.len().saturating_sub(viewport) as u16;

    let editor = Paragraph::new(lines).block(block).scroll((scroll, 0));

    f.render_widget(Clear, popup);
    f.render_widget(editor, popup);
}

/// Centered sub-rect sized as a percentage of the parent.
fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let width = area.width * percent_x / 100;
    let height = area.height * percent_y / 100;
    Rect::new(
        area.x + (area.width.saturating_sub(width)) / 2,
        area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_is_inside_parent() {
        let parent = Rect::new(0, 0, 100, 40);
        let popup = centered(parent, 70, 60);
        assert!(popup.x >= parent.x && popup.right() <= parent.right());
        assert!(popup.y >= parent.y && popup.bottom() <= parent.bottom());
        assert_eq!(popup.width, 70);
        assert_eq!(popup.height, 24);
    }
}
