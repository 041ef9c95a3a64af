// Poller - the timer-driven refresh controller
//
// On each timer tick the poller may dispatch one refresh cycle: fetch the
// backend info, fetch the bounded recent-events window, and on success
// replace the display set and update the session counters. The cycle is
// split into begin_cycle/finish_cycle so the event loop can run the fetch
// on a spawned task while input stays responsive:
//
//   begin_cycle()  -> Some(future) when a cycle should run, None when
//                     paused or another cycle is still in flight
//   finish_cycle() -> applies the outcome and clears the in-flight flag
//
// The in-flight gate is what keeps renders in send order: without it a
// slow early response could overwrite a fast later one. Pause is checked
// only at dispatch time - a cycle already in flight when the user pauses
// still applies when it completes.
//
// Failed cycles are discarded silently (debug log only). The dashboard
// must never flicker into an error state on a transient backend hiccup,
// so the last good feed and counters stay untouched.

use crate::backend::{Backend, FetchError};
use crate::model::{BackendInfo, WebhookEvent};
use chrono::{DateTime, Local};
use std::future::Future;

/// Mutable session record owned by the poller. Read by the renderer and
/// the status display; written only by finish_cycle and the two explicit
/// user actions (pause toggle, clear view).
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// Pause flag: LIVE when false, PAUSED when true
    pub paused: bool,
    /// Byte size of the newest event seen on the last good refresh
    pub last_bytes: u64,
    /// When the last good refresh completed
    pub last_refresh_at: Option<DateTime<Local>>,
}

/// Everything one refresh cycle brings back.
#[derive(Debug, Clone)]
pub struct CycleData {
    pub info: BackendInfo,
    pub events: Vec<WebhookEvent>,
}

pub type CycleOutcome = Result<CycleData, FetchError>;

pub struct Poller<B: Backend> {
    backend: B,
    limit: usize,
    state: SessionState,
    events: Vec<WebhookEvent>,
    info: Option<BackendInfo>,
    in_flight: bool,
}

impl<B: Backend> Poller<B> {
    pub fn new(backend: B, limit: usize) -> Self {
        Self {
            backend,
            limit,
            state: SessionState::default(),
            events: Vec::new(),
            info: None,
            in_flight: false,
        }
    }

    /// Start a refresh cycle if one should run on this tick.
    ///
    /// Returns None while paused (no network activity at all) and while a
    /// previous cycle is still in flight (overlapping ticks are skipped,
    /// not queued). The returned future performs no shared-state mutation;
    /// its outcome must be handed back to `finish_cycle`.
    pub fn begin_cycle(&mut self) -> Option<impl Future<Output = CycleOutcome> + Send + 'static> {
        if self.state.paused || self.in_flight {
            return None;
        }
        self.in_flight = true;

        let backend = self.backend.clone();
        let limit = self.limit;
        Some(async move {
            let info = backend.fetch_info().await?;
            let events = backend.fetch_events(limit).await?;
            Ok(CycleData { info, events })
        })
    }

    /// Apply a completed cycle.
    ///
    /// Deliberately does not re-check `paused`: a cycle dispatched before
    /// the user paused still renders once it completes.
    pub fn finish_cycle(&mut self, outcome: CycleOutcome) {
        self.in_flight = false;

        match outcome {
            Ok(data) => {
                self.state.last_bytes = data.events.first().map(|e| e.bytes).unwrap_or(0);
                self.state.last_refresh_at = Some(Local::now());
                tracing::debug!(
                    events = data.events.len(),
                    storage = %data.info.storage,
                    "refresh cycle applied"
                );
                self.info = Some(data.info);
                self.events = data.events;
            }
            Err(err) => {
                // Fail-quiet: keep the last good feed and counters
                tracing::debug!("refresh cycle discarded: {}", err);
            }
        }
    }

    /// Toggle LIVE <-> PAUSED. The only transition in the pause machine.
    /// Resuming does not fetch out of cycle; the next tick picks it up.
    pub fn toggle_pause(&mut self) -> bool {
        self.state.paused = !self.state.paused;
        tracing::info!(paused = self.state.paused, "pause toggled");
        self.state.paused
    }

    /// Drop the client-side display set and reset the summary counters.
    /// Backend records are untouched; the next refresh repopulates.
    pub fn clear_view(&mut self) {
        self.events.clear();
        self.state.last_bytes = 0;
        self.state.last_refresh_at = None;
    }

    pub fn events(&self) -> &[WebhookEvent] {
        &self.events
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn info(&self) -> Option<&BackendInfo> {
        self.info.as_ref()
    }

    pub fn paused(&self) -> bool {
        self.state.paused
    }
}
