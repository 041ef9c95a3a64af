// Renderer - pure derivation of the feed view
//
// `FeedView::build` is a pure function from (events, query, session state)
// to a view tree. It filters, then rebuilds every card from scratch on
// each pass - a full replace, not incremental diffing. The list is bounded
// (<=50), so rebuilding is cheap and keeps the renderer stateless and
// independently testable. The ratatui layer in tui/components consumes the
// tree and repaints the whole frame.

use crate::filter;
use crate::model::WebhookEvent;
use crate::poller::SessionState;
use crate::util::truncate_chars;

/// Display caps for the badge fields
const CONTENT_TYPE_MAX: usize = 48;
const SOURCE_IP_MAX: usize = 42;

/// One rendered event card.
#[derive(Debug, Clone, PartialEq)]
pub struct EventCard {
    /// Local-time display of when the backend accepted the request
    pub timestamp: String,
    /// Content-type badge, capped at 48 chars, "unknown" when absent
    pub content_type: String,
    /// Source-ip badge, capped at 42 chars, "unknown" when absent
    pub source_ip: String,
    /// Show the TRUNCATED warning badge
    pub truncated: bool,
    /// Pretty-printed body, verbatim
    pub body: String,
}

/// The full rebuilt feed plus summary counters.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedView {
    /// Surviving cards, in original (newest-first) order
    pub cards: Vec<EventCard>,
    /// Count of events that passed the filter
    pub shown: usize,
    /// Total fetched events before filtering
    pub total: usize,
    /// Last observed byte size, or a placeholder when zero/unknown
    pub last_bytes: String,
    /// Last-refresh display time, or a placeholder before the first one
    pub last_refresh: String,
}

impl FeedView {
    pub fn build(events: &[WebhookEvent], query: &str, session: &SessionState) -> Self {
        let survivors = filter::apply(events, query);
        let cards: Vec<EventCard> = survivors.iter().map(|e| card_for(e)).collect();

        let last_bytes = if session.last_bytes == 0 {
            "-".to_string()
        } else {
            format!("{} B", session.last_bytes)
        };

        let last_refresh = session
            .last_refresh_at
            .map(|t| t.format("%H:%M:%S").to_string())
            .unwrap_or_else(|| "never".to_string());

        Self {
            shown: cards.len(),
            total: events.len(),
            cards,
            last_bytes,
            last_refresh,
        }
    }

    /// The filtered list is empty; show the empty-state indicator instead
    /// of a feed.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

fn card_for(event: &WebhookEvent) -> EventCard {
    EventCard {
        timestamp: event
            .received_at
            .with_timezone(&chrono::Local)
            .format("%H:%M:%S")
            .to_string(),
        content_type: truncate_chars(
            event.content_type.as_deref().unwrap_or("unknown"),
            CONTENT_TYPE_MAX,
        ),
        source_ip: truncate_chars(event.ip.as_deref().unwrap_or("unknown"), SOURCE_IP_MAX),
        truncated: event.truncated,
        body: event.body_pretty.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::HashMap;

    fn event(ip: &str, content_type: &str, body: &str) -> WebhookEvent {
        WebhookEvent {
            id: None,
            received_at: Utc::now(),
            ip: Some(ip.into()),
            content_type: Some(content_type.into()),
            headers: HashMap::new(),
            truncated: false,
            bytes: body.len() as u64,
            body_pretty: body.into(),
        }
    }

    #[test]
    fn card_count_equals_filter_survivors() {
        let events = vec![
            event("10.0.0.1", "application/json", "{\"a\": 1}"),
            event("192.168.0.9", "text/plain", "hello"),
            event("10.0.0.2", "application/json", "{\"b\": 2}"),
        ];

        for query in ["", "10.0.0", "json", "nope", "HELLO"] {
            let view = FeedView::build(&events, query, &SessionState::default());
            assert_eq!(
                view.shown,
                crate::filter::apply(&events, query).len(),
                "query {:?}",
                query
            );
            assert_eq!(view.cards.len(), view.shown);
        }
    }

    #[test]
    fn scenario_matching_query_renders_one_card() {
        let events = vec![event("10.0.0.1", "application/json", "{\"a\":1}")];

        let view = FeedView::build(&events, "10.0.0", &SessionState::default());
        assert_eq!(view.cards.len(), 1);
        assert!(!view.is_empty());
        assert_eq!(view.cards[0].source_ip, "10.0.0.1");
        assert_eq!(view.cards[0].content_type, "application/json");
        assert_eq!(view.cards[0].body, "{\"a\":1}");
        assert!(!view.cards[0].truncated);
    }

    #[test]
    fn scenario_non_matching_query_shows_empty_state() {
        let events = vec![event("10.0.0.1", "application/json", "{\"a\":1}")];

        let view = FeedView::build(&events, "nope", &SessionState::default());
        assert_eq!(view.cards.len(), 0);
        assert!(view.is_empty());
        assert_eq!(view.total, 1);
    }

    #[test]
    fn absent_fields_default_to_unknown() {
        let mut e = event("x", "y", "body");
        e.ip = None;
        e.content_type = None;

        let view = FeedView::build(&[e], "", &SessionState::default());
        assert_eq!(view.cards[0].source_ip, "unknown");
        assert_eq!(view.cards[0].content_type, "unknown");
    }

    #[test]
    fn badges_are_display_truncated() {
        let e = event(&"9".repeat(80), &"x".repeat(80), "{}");

        let view = FeedView::build(&[e], "", &SessionState::default());
        assert_eq!(view.cards[0].content_type.chars().count(), 48);
        assert_eq!(view.cards[0].source_ip.chars().count(), 42);
    }

    #[test]
    fn truncated_flag_carries_through() {
        let mut e = event("10.0.0.1", "application/json", "{}");
        e.truncated = true;

        let view = FeedView::build(&[e], "", &SessionState::default());
        assert!(view.cards[0].truncated);
    }

    #[test]
    fn summary_placeholders_before_first_refresh() {
        let view = FeedView::build(&[], "", &SessionState::default());
        assert_eq!(view.last_bytes, "-");
        assert_eq!(view.last_refresh, "never");
    }

    #[test]
    fn summary_reflects_session_counters() {
        let session = SessionState {
            paused: false,
            last_bytes: 128,
            last_refresh_at: Some(chrono::Local::now()),
        };
        let view = FeedView::build(&[], "", &session);
        assert_eq!(view.last_bytes, "128 B");
        assert_ne!(view.last_refresh, "never");
    }
}
