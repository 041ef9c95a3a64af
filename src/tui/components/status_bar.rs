// Status bar component
//
// Bottom line: summary counters from the rebuilt view (shown count, last
// observed byte size, last refresh time), uptime, and key hints. When a
// recent warning sits in the log buffer its message is shown instead of
// the hints, so user-action failures stay discoverable without a modal.

use crate::logging::LogBuffer;
use crate::render::FeedView;
use crate::theme::Theme;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::time::Instant;

const KEY_HINTS: &str = "/:filter  s:sample  e:compose  y:copy  Y:curl  p:pause  c:clear  q:quit";

pub fn render(
    f: &mut Frame,
    area: Rect,
    view: &FeedView,
    log_buffer: &LogBuffer,
    start_time: Instant,
    theme: &Theme,
) {
    let status_text = format!(
        " {} shown │ last {} │ refreshed {} │ up {} │ {}",
        view.shown,
        view.last_bytes,
        view.last_refresh,
        uptime(start_time),
        trailing_segment(log_buffer),
    );

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(theme.status_bar))
        .block(Block::default().borders(Borders::TOP));

    f.render_widget(status, area);
}

fn trailing_segment(log_buffer: &LogBuffer) -> String {
    match log_buffer.last_warning() {
        Some(entry) => format!("⚠ {}", entry.message),
        None => KEY_HINTS.to_string(),
    }
}

fn uptime(start_time: Instant) -> String {
    let seconds = start_time.elapsed().as_secs();
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uptime_formats_hms() {
        let start = Instant::now();
        assert_eq!(uptime(start), "00:00:00");
    }

    #[test]
    fn hints_shown_without_warnings() {
        let buffer = LogBuffer::new();
        assert_eq!(trailing_segment(&buffer), KEY_HINTS);
    }
}
