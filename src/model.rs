// Wire types for the webhook-capture backend
//
// These mirror the JSON the backend serves on /api/info and /api/events.
// Events are read-only once fetched: the dashboard never mutates a record,
// it only drops records from the display set (clear view / filtering).
//
// Deserialization is deliberately tolerant: the backend emits degraded
// records (only id/received_at/body_pretty) when a stored entry fails to
// parse, so everything else defaults.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One captured webhook request, as issued by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookEvent {
    /// Backend-assigned identifier (surfaced on send confirmation only)
    #[serde(default)]
    pub id: Option<String>,

    /// When the backend accepted the request
    pub received_at: DateTime<Utc>,

    /// Source address as seen by the backend (forwarded-for aware)
    #[serde(default)]
    pub ip: Option<String>,

    /// Content type of the captured request
    #[serde(default)]
    pub content_type: Option<String>,

    /// Subset of request headers the backend chose to keep
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// True when the backend capped payload capture
    #[serde(default)]
    pub truncated: bool,

    /// Size in bytes of the captured body
    #[serde(default)]
    pub bytes: u64,

    /// Pretty-printed textual rendering of the payload; always present,
    /// even when the capture was truncated
    #[serde(default)]
    pub body_pretty: String,
}

/// Response envelope for GET /api/events
#[derive(Debug, Clone, Deserialize)]
pub struct EventsResponse {
    pub events: Vec<WebhookEvent>,
}

/// Backend metadata from GET /api/info
#[derive(Debug, Clone, Deserialize)]
pub struct BackendInfo {
    /// Storage backend label ("memory", "upstash", ...)
    pub storage: String,

    /// Whether the backend requires a webhook token on POST /api/webhook
    #[serde(default)]
    pub token_required: bool,
}

/// Success payload from POST /api/webhook
#[derive(Debug, Clone, Deserialize)]
pub struct SendReceipt {
    #[serde(default)]
    pub id: Option<String>,
}

/// Error payload the backend attaches to non-2xx webhook responses
#[derive(Debug, Clone, Deserialize)]
pub struct SendFailure {
    #[serde(default)]
    pub detail: Option<String>,
}
