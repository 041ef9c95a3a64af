// Backend HTTP client
//
// The webhook-capture backend is an opaque HTTP service with three routes:
//   GET  /api/info            -> { storage, token_required }
//   GET  /api/events?limit=N  -> { events: [...] }, newest first
//   POST /api/webhook         -> 2xx { id? } or non-2xx { detail? }
//
// Access goes through the `Backend` trait so the poller can be tested with
// a counting stub instead of a live server. Fetch failures are a typed
// `FetchError` rather than a blanket catch: the poller's fail-quiet policy
// becomes a visible, testable branch.

use crate::config::Config;
use crate::model::{BackendInfo, EventsResponse, SendFailure, SendReceipt, WebhookEvent};
use anyhow::{Context, Result};
use reqwest::header;
use std::fmt;
use std::time::Duration;

/// Why a refresh cycle failed. Background cycles swallow these (logged at
/// debug, nothing user-visible); the distinction still matters for tests
/// and tracing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Network-level failure (connect, timeout, ...)
    Transport(String),
    /// Backend answered with a non-success status
    Status(u16),
    /// Body did not parse as the expected shape
    Malformed(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Transport(msg) => write!(f, "transport error: {}", msg),
            FetchError::Status(code) => write!(f, "unexpected status {}", code),
            FetchError::Malformed(msg) => write!(f, "malformed response: {}", msg),
        }
    }
}

/// Why a user-initiated send failed. Unlike fetch errors these are surfaced
/// in a toast.
#[derive(Debug, Clone)]
pub enum SendError {
    /// Network-level failure
    Transport(String),
    /// Backend rejected the payload; `detail` is its own explanation when
    /// it gave one
    Rejected { status: u16, detail: Option<String> },
}

impl fmt::Display for SendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SendError::Transport(msg) => write!(f, "send failed: {}", msg),
            SendError::Rejected {
                status,
                detail: Some(detail),
            } => write!(f, "backend rejected ({}): {}", status, detail),
            SendError::Rejected { status, .. } => {
                write!(f, "backend rejected the payload (HTTP {})", status)
            }
        }
    }
}

/// The backend surface the dashboard consumes.
pub trait Backend: Clone + Send + Sync + 'static {
    fn fetch_info(&self) -> impl std::future::Future<Output = Result<BackendInfo, FetchError>> + Send;
    fn fetch_events(
        &self,
        limit: usize,
    ) -> impl std::future::Future<Output = Result<Vec<WebhookEvent>, FetchError>> + Send;
    fn send_webhook(
        &self,
        payload: serde_json::Value,
    ) -> impl std::future::Future<Output = Result<SendReceipt, SendError>> + Send;
}

/// Live reqwest-backed client.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    webhook_token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.backend_url.clone(),
            webhook_token: config.webhook_token.clone(),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: String) -> Result<T, FetchError> {
        // no-cache: every poll must revalidate with the origin, never a
        // cached snapshot
        let response = self
            .client
            .get(url)
            .header(header::CACHE_CONTROL, "no-cache")
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| FetchError::Malformed(e.to_string()))
    }
}

impl Backend for ApiClient {
    async fn fetch_info(&self) -> Result<BackendInfo, FetchError> {
        self.get_json(format!("{}/api/info", self.base_url)).await
    }

    async fn fetch_events(&self, limit: usize) -> Result<Vec<WebhookEvent>, FetchError> {
        let url = format!("{}/api/events?limit={}", self.base_url, limit);
        let response: EventsResponse = self.get_json(url).await?;
        Ok(response.events)
    }

    async fn send_webhook(&self, payload: serde_json::Value) -> Result<SendReceipt, SendError> {
        let mut request = self
            .client
            .post(format!("{}/api/webhook", self.base_url))
            .json(&payload);

        if let Some(token) = &self.webhook_token {
            request = request.header("x-webhook-token", token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SendError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            // A 2xx with an unreadable body still counts as delivered
            let receipt = response.json::<SendReceipt>().await.unwrap_or(SendReceipt { id: None });
            return Ok(receipt);
        }

        // Surface the backend's own error detail when it provides one
        let detail = response
            .json::<SendFailure>()
            .await
            .ok()
            .and_then(|f| f.detail);

        Err(SendError::Rejected {
            status: status.as_u16(),
            detail,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_messages() {
        assert_eq!(
            FetchError::Status(503).to_string(),
            "unexpected status 503"
        );
        assert!(FetchError::Transport("refused".into())
            .to_string()
            .contains("refused"));
    }

    #[test]
    fn send_error_prefers_backend_detail() {
        let err = SendError::Rejected {
            status: 401,
            detail: Some("Invalid webhook token".into()),
        };
        assert_eq!(err.to_string(), "backend rejected (401): Invalid webhook token");

        let generic = SendError::Rejected {
            status: 500,
            detail: None,
        };
        assert_eq!(
            generic.to_string(),
            "backend rejected the payload (HTTP 500)"
        );
    }
}
