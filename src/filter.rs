// Free-text search filter
//
// A blank query matches everything. Otherwise the query matches iff the
// lower-cased JSON text of the whole event (every field, not just the ones
// the feed displays) contains the lower-cased query as a substring.
//
// There is no index and no caching: the predicate is recomputed against the
// full fetched set on every render pass. That is correct and fast enough
// for the bounded display window (<=50 events); it is not meant to scale
// past it.

use crate::model::WebhookEvent;

/// Does `event` match the free-text `query`?
pub fn matches(event: &WebhookEvent, query: &str) -> bool {
    let query = query.trim();
    if query.is_empty() {
        return true;
    }

    // Serialization of a plain data struct cannot fail; fall back to the
    // body text if it somehow does, so a match is still possible.
    let haystack = serde_json::to_string(event)
        .unwrap_or_else(|_| event.body_pretty.clone())
        .to_lowercase();

    haystack.contains(&query.to_lowercase())
}

/// Apply the filter to a fetched set, preserving order.
pub fn apply<'a>(events: &'a [WebhookEvent], query: &str) -> Vec<&'a WebhookEvent> {
    events.iter().filter(|e| matches(e, query)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::HashMap;

    fn sample_event() -> WebhookEvent {
        WebhookEvent {
            id: Some("evt-1".into()),
            received_at: Utc::now(),
            ip: Some("10.0.0.1".into()),
            content_type: Some("application/json".into()),
            headers: HashMap::from([("user-agent".to_string(), "TestAgent/1.0".to_string())]),
            truncated: false,
            bytes: 7,
            body_pretty: "{\"a\": 1}".into(),
        }
    }

    #[test]
    fn blank_query_matches_everything() {
        let event = sample_event();
        assert!(matches(&event, ""));
        assert!(matches(&event, "   "));
    }

    #[test]
    fn query_is_case_insensitive() {
        let event = sample_event();
        assert!(matches(&event, "application/json"));
        assert!(matches(&event, "APPLICATION/JSON"));
        assert_eq!(
            matches(&event, "testagent"),
            matches(&event, "TESTAGENT"),
        );
    }

    #[test]
    fn matches_non_displayed_fields() {
        // Headers are not rendered on cards but still searchable
        let event = sample_event();
        assert!(matches(&event, "testagent/1.0"));
        assert!(matches(&event, "evt-1"));
    }

    #[test]
    fn no_match_for_absent_text() {
        let event = sample_event();
        assert!(!matches(&event, "nope"));
    }

    #[test]
    fn apply_preserves_order() {
        let mut a = sample_event();
        a.ip = Some("10.0.0.1".into());
        let mut b = sample_event();
        b.ip = Some("192.168.0.9".into());
        let events = vec![a, b];

        let hits = apply(&events, "10.0.0");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].ip.as_deref(), Some("10.0.0.1"));

        let all = apply(&events, "");
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].ip.as_deref(), Some("10.0.0.1"));
        assert_eq!(all[1].ip.as_deref(), Some("192.168.0.9"));
    }
}
