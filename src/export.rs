// Clipboard export text synthesis
//
// Two exports exist per event: the raw pretty-printed body, verbatim, and
// an equivalent `curl` invocation against the backend's webhook endpoint.
// The curl body is single-quoted for the shell, so every literal single
// quote in the payload must be escaped as '\'' (close quote, escaped
// quote, reopen quote) or the pasted command would end the string early.
//
// Actually writing to the clipboard lives in tui::clipboard; this module
// is pure text synthesis so it stays independently testable.

use crate::model::WebhookEvent;
use anyhow::{Context, Result};

/// Raw-body export: the pretty-printed payload, verbatim.
pub fn raw_body(event: &WebhookEvent) -> String {
    event.body_pretty.clone()
}

/// Synthesize a `curl` command that replays `body` against the webhook
/// endpoint of the dashboard's own backend.
pub fn curl_command(webhook_url: &str, body: &str) -> String {
    format!(
        "curl -X POST {} -H 'Content-Type: application/json' -d '{}'",
        webhook_url,
        shell_single_quote(body)
    )
}

/// Per-event curl export.
pub fn curl_for_event(webhook_url: &str, event: &WebhookEvent) -> String {
    curl_command(webhook_url, &event.body_pretty)
}

/// Escape text for inclusion inside a shell single-quoted string.
fn shell_single_quote(text: &str) -> String {
    text.replace('\'', "'\\''")
}

/// Re-indent a JSON document. Fails on invalid JSON (the caller surfaces
/// that as a local error, no network involved).
pub fn prettify_json(text: &str) -> Result<String> {
    let value: serde_json::Value =
        serde_json::from_str(text).context("Payload is not valid JSON")?;
    serde_json::to_string_pretty(&value).context("Failed to re-serialize payload")
}
