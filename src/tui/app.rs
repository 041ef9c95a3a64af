// TUI application state
//
// App owns the poller (and through it the session state and display set),
// the free-text query, the compose buffer, and transient UI state (toast,
// selection, input mode).
//
// Input handling is an explicit dispatch table: key events map to an
// Action through `action_for(mode, key)`, and `apply` consumes actions.
// No behavior hides in ad-hoc match arms spread over the event loop.

use crate::backend::{Backend, SendError};
use crate::export;
use crate::filter;
use crate::logging::LogBuffer;
use crate::model::{SendReceipt, WebhookEvent};
use crate::poller::{CycleOutcome, Poller};
use crate::theme::Theme;
use crate::tui::clipboard;
use crate::tui::components::Toast;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;
use tokio::sync::mpsc;

/// Which part of the UI owns keystrokes right now
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Feed,
    Search,
    Compose,
}

/// Everything a keystroke can mean. The dispatch table below is the only
/// place keys are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    TogglePause,
    ClearView,
    EnterSearch,
    EnterCompose,
    LeaveMode,
    AcceptSearch,
    SendSample,
    SendCompose,
    PrettifyCompose,
    CopyRaw,
    CopyCurl,
    SelectUp,
    SelectDown,
    ClearSelection,
    Insert(char),
    Backspace,
    Newline,
}

/// Map a key event to an action for the current input mode.
pub fn action_for(mode: InputMode, key: KeyEvent) -> Option<Action> {
    match mode {
        InputMode::Feed => match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => Some(Action::Quit),
            KeyCode::Char('p') | KeyCode::Char(' ') => Some(Action::TogglePause),
            KeyCode::Char('c') => Some(Action::ClearView),
            KeyCode::Char('/') => Some(Action::EnterSearch),
            KeyCode::Char('e') => Some(Action::EnterCompose),
            KeyCode::Char('s') => Some(Action::SendSample),
            KeyCode::Char('y') => Some(Action::CopyRaw),
            KeyCode::Char('Y') => Some(Action::CopyCurl),
            KeyCode::Up | KeyCode::Char('k') => Some(Action::SelectUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::SelectDown),
            KeyCode::Esc => Some(Action::ClearSelection),
            _ => None,
        },
        InputMode::Search => match key.code {
            KeyCode::Esc => Some(Action::LeaveMode),
            KeyCode::Enter => Some(Action::AcceptSearch),
            KeyCode::Backspace => Some(Action::Backspace),
            KeyCode::Char(c) => Some(Action::Insert(c)),
            _ => None,
        },
        InputMode::Compose => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                return match key.code {
                    KeyCode::Char('s') => Some(Action::SendCompose),
                    KeyCode::Char('p') => Some(Action::PrettifyCompose),
                    _ => None,
                };
            }
            match key.code {
                KeyCode::Esc => Some(Action::LeaveMode),
                KeyCode::Enter => Some(Action::Newline),
                KeyCode::Backspace => Some(Action::Backspace),
                KeyCode::Char(c) => Some(Action::Insert(c)),
                _ => None,
            }
        }
    }
}

/// Completions fed back into the event loop from spawned tasks
#[derive(Debug)]
pub enum Feedback {
    /// A refresh cycle finished
    Cycle(CycleOutcome),
    /// A webhook send finished
    SendDone(Result<SendReceipt, SendError>),
}

/// The fixed sample payload: a constant marker field plus a timestamp.
pub fn sample_payload() -> serde_json::Value {
    serde_json::json!({
        "sample": true,
        "message": "hello from hookspy",
        "sent_at": chrono::Utc::now().to_rfc3339(),
    })
}

/// Main application state for the TUI
pub struct App<B: Backend> {
    /// Refresh controller; owns the display set and session state
    pub poller: Poller<B>,

    /// Backend handle for user-initiated sends
    backend: B,

    /// Webhook endpoint URL, embedded in synthesized curl commands
    webhook_url: String,

    /// Current input mode
    pub mode: InputMode,

    /// Free-text filter, applied live on every render pass
    pub query: String,

    /// Ad-hoc payload editor buffer
    pub compose: String,

    /// Selected card index into the filtered list (None = follow newest)
    pub selected: Option<usize>,

    /// Active transient notification, if any
    pub toast: Option<Toast>,

    /// Whether the app should quit
    pub should_quit: bool,

    pub theme: Theme,

    /// System logs for the status line warning slot
    pub log_buffer: LogBuffer,

    /// When the app started (for uptime display)
    pub start_time: Instant,
}

impl<B: Backend> App<B> {
    pub fn new(backend: B, webhook_url: String, event_limit: usize, log_buffer: LogBuffer) -> Self {
        Self {
            poller: Poller::new(backend.clone(), event_limit),
            backend,
            webhook_url,
            mode: InputMode::default(),
            query: String::new(),
            compose: "{\n  \"hello\": \"world\"\n}".to_string(),
            selected: None,
            toast: None,
            should_quit: false,
            theme: Theme::default(),
            log_buffer,
            start_time: Instant::now(),
        }
    }

    /// Handle one key event through the dispatch table.
    pub fn handle_key(&mut self, key: KeyEvent, tx: &mpsc::Sender<Feedback>) {
        if let Some(action) = action_for(self.mode, key) {
            self.apply(action, tx);
        }
    }

    /// Apply one action.
    pub fn apply(&mut self, action: Action, tx: &mpsc::Sender<Feedback>) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::TogglePause => {
                self.poller.toggle_pause();
            }
            Action::ClearView => {
                self.poller.clear_view();
                self.selected = None;
            }
            Action::EnterSearch => self.mode = InputMode::Search,
            Action::EnterCompose => self.mode = InputMode::Compose,
            Action::LeaveMode => {
                // Esc in search abandons the query; in compose it just
                // closes the editor, keeping the draft
                if self.mode == InputMode::Search {
                    self.query.clear();
                }
                self.mode = InputMode::Feed;
            }
            Action::AcceptSearch => self.mode = InputMode::Feed,
            Action::SendSample => self.dispatch_send(sample_payload(), tx),
            Action::SendCompose => match serde_json::from_str::<serde_json::Value>(&self.compose) {
                Ok(payload) => {
                    self.dispatch_send(payload, tx);
                    self.mode = InputMode::Feed;
                }
                Err(e) => {
                    // Local validation failure: no network call is made
                    self.toast = Some(Toast::error(format!("✗ Invalid JSON: {}", e)));
                }
            },
            Action::PrettifyCompose => match export::prettify_json(&self.compose) {
                Ok(pretty) => self.compose = pretty,
                Err(e) => self.toast = Some(Toast::error(format!("✗ {}", e))),
            },
            Action::CopyRaw => {
                if let Some(event) = self.selected_event() {
                    let text = export::raw_body(event);
                    self.copy_with_toast(&text, "✓ Copied body");
                } else {
                    self.toast = Some(Toast::info("nothing to copy"));
                }
            }
            Action::CopyCurl => {
                if let Some(event) = self.selected_event() {
                    let text = export::curl_for_event(&self.webhook_url, event);
                    self.copy_with_toast(&text, "✓ Copied curl command");
                } else {
                    self.toast = Some(Toast::info("nothing to copy"));
                }
            }
            Action::SelectUp => {
                self.selected = Some(
                    self.selected
                        .map(|i| i.saturating_sub(1))
                        .unwrap_or_default(),
                );
            }
            Action::SelectDown => {
                let last = self.filtered_len().saturating_sub(1);
                self.selected = Some(self.selected.map(|i| (i + 1).min(last)).unwrap_or_default());
            }
            Action::ClearSelection => {
                if self.selected.is_some() {
                    self.selected = None;
                } else {
                    self.query.clear();
                }
            }
            Action::Insert(c) => match self.mode {
                InputMode::Search => self.query.push(c),
                InputMode::Compose => self.compose.push(c),
                InputMode::Feed => {}
            },
            Action::Backspace => match self.mode {
                InputMode::Search => {
                    self.query.pop();
                }
                InputMode::Compose => {
                    self.compose.pop();
                }
                InputMode::Feed => {}
            },
            Action::Newline => {
                if self.mode == InputMode::Compose {
                    self.compose.push('\n');
                }
            }
        }
    }

    /// Apply a completed background task.
    pub fn handle_feedback(&mut self, feedback: Feedback) {
        match feedback {
            Feedback::Cycle(outcome) => {
                self.poller.finish_cycle(outcome);
                self.clamp_selection();
            }
            Feedback::SendDone(Ok(receipt)) => {
                let message = match receipt.id {
                    Some(id) => format!("✓ delivered (id {})", id),
                    None => "✓ delivered".to_string(),
                };
                self.toast = Some(Toast::info(message));
            }
            Feedback::SendDone(Err(e)) => {
                tracing::warn!("webhook send failed: {}", e);
                self.toast = Some(Toast::error(format!("✗ {}", e)));
            }
        }
    }

    /// Drop the toast once it has run its course (called each frame).
    pub fn expire_toast(&mut self) {
        if self.toast.as_ref().is_some_and(|t| t.is_expired()) {
            self.toast = None;
        }
    }

    /// The event behind the current selection (newest when following).
    pub fn selected_event(&self) -> Option<&WebhookEvent> {
        let survivors = filter::apply(self.poller.events(), &self.query);
        survivors.get(self.selected.unwrap_or(0)).copied()
    }

    fn filtered_len(&self) -> usize {
        filter::apply(self.poller.events(), &self.query).len()
    }

    fn clamp_selection(&mut self) {
        let len = self.filtered_len();
        if let Some(idx) = self.selected {
            if len == 0 {
                self.selected = None;
            } else if idx >= len {
                self.selected = Some(len - 1);
            }
        }
    }

    fn copy_with_toast(&mut self, text: &str, success: &str) {
        match clipboard::copy_to_clipboard(text) {
            Ok(()) => self.toast = Some(Toast::info(success)),
            Err(e) => {
                tracing::warn!("clipboard copy failed: {:#}", e);
                self.toast = Some(Toast::error("✗ Failed to copy"));
            }
        }
    }

    fn dispatch_send(&self, payload: serde_json::Value, tx: &mpsc::Sender<Feedback>) {
        let backend = self.backend.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = backend.send_webhook(payload).await;
            let _ = tx.send(Feedback::SendDone(result)).await;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::FetchError;
    use crate::model::BackendInfo;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Clone)]
    struct StubBackend {
        sends: Arc<AtomicUsize>,
    }

    impl StubBackend {
        fn new() -> Self {
            Self {
                sends: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn send_count(&self) -> usize {
            self.sends.load(Ordering::SeqCst)
        }
    }

    impl Backend for StubBackend {
        async fn fetch_info(&self) -> Result<BackendInfo, FetchError> {
            Ok(BackendInfo {
                storage: "memory".into(),
                token_required: false,
            })
        }

        async fn fetch_events(&self, _limit: usize) -> Result<Vec<WebhookEvent>, FetchError> {
            Ok(Vec::new())
        }

        async fn send_webhook(
            &self,
            _payload: serde_json::Value,
        ) -> Result<SendReceipt, SendError> {
            self.sends.fetch_add(1, Ordering::SeqCst);
            Ok(SendReceipt {
                id: Some("stub-id".into()),
            })
        }
    }

    fn app() -> App<StubBackend> {
        App::new(
            StubBackend::new(),
            "http://localhost:8000/api/webhook".into(),
            50,
            LogBuffer::new(),
        )
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn feed_keys_dispatch_through_the_table() {
        assert_eq!(
            action_for(InputMode::Feed, key(KeyCode::Char('q'))),
            Some(Action::Quit)
        );
        assert_eq!(
            action_for(InputMode::Feed, key(KeyCode::Char('p'))),
            Some(Action::TogglePause)
        );
        assert_eq!(
            action_for(InputMode::Feed, key(KeyCode::Char('/'))),
            Some(Action::EnterSearch)
        );
        assert_eq!(
            action_for(InputMode::Feed, key(KeyCode::Char('Y'))),
            Some(Action::CopyCurl)
        );
        // Unbound key maps to nothing
        assert_eq!(action_for(InputMode::Feed, key(KeyCode::Char('z'))), None);
    }

    #[test]
    fn search_mode_captures_text() {
        assert_eq!(
            action_for(InputMode::Search, key(KeyCode::Char('q'))),
            Some(Action::Insert('q')),
            "text keys must not trigger feed actions while searching"
        );
        assert_eq!(
            action_for(InputMode::Search, key(KeyCode::Esc)),
            Some(Action::LeaveMode)
        );
    }

    #[test]
    fn compose_send_uses_ctrl_modifier() {
        let ctrl_s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(
            action_for(InputMode::Compose, ctrl_s),
            Some(Action::SendCompose)
        );
        assert_eq!(
            action_for(InputMode::Compose, key(KeyCode::Char('s'))),
            Some(Action::Insert('s'))
        );
    }

    #[tokio::test]
    async fn invalid_compose_json_never_reaches_the_network() {
        let mut app = app();
        let backend = app.backend.clone();
        let (tx, _rx) = mpsc::channel(8);

        app.mode = InputMode::Compose;
        app.compose = "{not json".to_string();
        app.apply(Action::SendCompose, &tx);

        // Local abort: error toast, editor stays open, no send dispatched
        assert!(app.toast.as_ref().is_some_and(|t| t.is_error));
        assert_eq!(app.mode, InputMode::Compose);
        tokio::task::yield_now().await;
        assert_eq!(backend.send_count(), 0);
    }

    #[tokio::test]
    async fn valid_compose_json_is_sent_and_receipt_surfaces() {
        let mut app = app();
        let (tx, mut rx) = mpsc::channel(8);

        app.mode = InputMode::Compose;
        app.compose = r#"{"a": 1}"#.to_string();
        app.apply(Action::SendCompose, &tx);
        assert_eq!(app.mode, InputMode::Feed);

        let feedback = rx.recv().await.expect("send task reports back");
        app.handle_feedback(feedback);

        let toast = app.toast.expect("receipt toast");
        assert!(!toast.is_error);
        assert!(toast.message.contains("stub-id"));
    }

    #[tokio::test]
    async fn sample_payload_carries_marker_and_timestamp() {
        let payload = sample_payload();
        assert_eq!(payload["sample"], serde_json::json!(true));
        assert!(payload["sent_at"].as_str().is_some());

        let mut app = app();
        let backend = app.backend.clone();
        let (tx, mut rx) = mpsc::channel(8);
        app.apply(Action::SendSample, &tx);

        rx.recv().await.expect("sample send reports back");
        assert_eq!(backend.send_count(), 1);
    }

    #[tokio::test]
    async fn rejected_send_surfaces_backend_detail() {
        let mut app = app();
        app.handle_feedback(Feedback::SendDone(Err(SendError::Rejected {
            status: 401,
            detail: Some("Invalid webhook token".into()),
        })));

        let toast = app.toast.expect("error toast");
        assert!(toast.is_error);
        assert!(toast.message.contains("Invalid webhook token"));
    }

    #[tokio::test]
    async fn clear_view_action_resets_selection() {
        let mut app = app();
        let (tx, _rx) = mpsc::channel(8);
        app.selected = Some(3);
        app.apply(Action::ClearView, &tx);
        assert!(app.selected.is_none());
        assert!(app.poller.events().is_empty());
    }

    #[tokio::test]
    async fn prettify_action_rewrites_compose_buffer() {
        let mut app = app();
        let (tx, _rx) = mpsc::channel(8);
        app.mode = InputMode::Compose;
        app.compose = r#"{"b":2,"a":1}"#.to_string();

        app.apply(Action::PrettifyCompose, &tx);
        assert!(app.compose.contains("\n"));

        let before = app.compose.clone();
        app.apply(Action::PrettifyCompose, &tx);
        assert_eq!(app.compose, before, "prettify is idempotent");
    }

    #[tokio::test]
    async fn esc_clears_selection_then_query() {
        let mut app = app();
        let (tx, _rx) = mpsc::channel(8);
        app.query = "json".to_string();
        app.selected = Some(1);

        app.apply(Action::ClearSelection, &tx);
        assert!(app.selected.is_none());
        assert_eq!(app.query, "json");

        app.apply(Action::ClearSelection, &tx);
        assert!(app.query.is_empty());
    }
}
