// Feed panel component
//
// Draws the rebuilt FeedView: one card per surviving event, newest first.
// Each card is a header line (timestamp, content-type badge, source-ip
// badge, optional TRUNCATED badge) followed by the verbatim body. The
// whole panel is repainted from the view tree every frame.

use crate::render::{EventCard, FeedView};
use crate::theme::Theme;
use crate::util::fit_line;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(
    f: &mut Frame,
    area: Rect,
    view: &FeedView,
    selected: Option<usize>,
    theme: &Theme,
) {
    let title = format!(" Events ({}/{}) ", view.shown, view.total);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border_focused))
        .title(title);

    if view.is_empty() {
        // Empty state replaces the feed entirely
        let message = if view.total == 0 {
            "waiting for events…"
        } else {
            "no events match the filter"
        };
        let empty = Paragraph::new(message)
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.muted))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let content_width = area.width.saturating_sub(2) as usize;
    let viewport = area.height.saturating_sub(2) as usize;

    // Flatten cards into lines, remembering where each card starts so the
    // scroll can keep the selected card in view.
    let mut lines: Vec<Line> = Vec::new();
    let mut card_starts: Vec<usize> = Vec::new();

    for (idx, card) in view.cards.iter().enumerate() {
        card_starts.push(lines.len());
        let is_selected = selected == Some(idx);
        lines.push(header_line(card, is_selected, content_width, theme));

        let body_style = if is_selected {
            Style::default().fg(theme.foreground)
        } else {
            Style::default().fg(theme.body)
        };
        for body_line in card.body.lines() {
            lines.push(Line::from(Span::styled(
                fit_line(&format!("  {}", body_line), content_width),
                body_style,
            )));
        }
        lines.push(Line::default());
    }

    let scroll = scroll_offset(&card_starts, selected, lines.len(), viewport);

    let feed = Paragraph::new(lines)
        .block(block)
        .scroll((scroll as u16, 0));
    f.render_widget(feed, area);
}

fn header_line(card: &EventCard, selected: bool, width: usize, theme: &Theme) -> Line<'static> {
    let marker = if selected { "▶ " } else { "  " };

    let mut spans = vec![
        Span::styled(
            format!("{}{}", marker, card.timestamp),
            Style::default().fg(theme.timestamp),
        ),
        Span::styled(
            format!("  {}", fit_line(&card.content_type, width.saturating_sub(24))),
            Style::default().fg(theme.content_type),
        ),
        Span::styled(
            format!("  {}", card.source_ip),
            Style::default().fg(theme.source_ip),
        ),
    ];

    if card.truncated {
        spans.push(Span::styled(
            "  TRUNCATED",
            Style::default()
                .fg(theme.truncated_badge)
                .add_modifier(Modifier::BOLD),
        ));
    }

    if selected {
        Line::from(spans).style(
            Style::default()
                .bg(theme.selection)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Line::from(spans)
    }
}

/// Scroll so the selected card's first line is visible; with no selection,
/// stay pinned to the top (the feed is newest-first).
fn scroll_offset(
    card_starts: &[usize],
    selected: Option<usize>,
    total_lines: usize,
    viewport: usize,
) -> usize {
    let max_scroll = total_lines.saturating_sub(viewport);
    match selected {
        None => 0,
        Some(idx) => {
            let start = card_starts.get(idx).copied().unwrap_or(0);
            // Keep roughly a third of the viewport above the selection
            start.saturating_sub(viewport / 3).min(max_scroll)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_selection_pins_to_top() {
        assert_eq!(scroll_offset(&[0, 5, 10], None, 15, 8), 0);
    }

    #[test]
    fn selection_scrolls_into_view() {
        // Card 2 starts at line 10; viewport 6 -> offset keeps it visible
        let offset = scroll_offset(&[0, 5, 10], Some(2), 15, 6);
        assert!(offset >= 10 - 6 && offset <= 10);
    }

    #[test]
    fn scroll_clamps_to_content() {
        assert_eq!(scroll_offset(&[0], Some(0), 3, 10), 0);
    }
}
