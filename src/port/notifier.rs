//! Per-entry lifecycle state machine.
//!
//! Wraps a [`TradeStatusSink`] and enforces the event contract: at most one
//! initialize, exactly one terminal event, silence after a terminal event,
//! and a finish hook that fires at most once. Out-of-order events are
//! dropped with a debug log rather than surfaced - a late callback from a
//! worker is not an error the requester should see.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::domain::{SeedSearchReport, TradeEntry, TradePayload};

use super::sink::TradeStatusSink;

/// Lifecycle phase of a queued trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradePhase {
    Created,
    Initializing,
    Searching,
    Finished,
    Canceled,
}

impl TradePhase {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Finished | Self::Canceled)
    }
}

type FinishHook = Box<dyn FnOnce() + Send>;

/// The callback capability bound 1:1 to a [`TradeEntry`] at admission time.
///
/// Events are delivered to the sink under the phase lock, which is what
/// makes "no events after terminal" airtight; sinks are required to be
/// non-blocking for exactly this reason.
pub struct LifecycleNotifier {
    sink: Arc<dyn TradeStatusSink>,
    phase: Mutex<TradePhase>,
    finish_hook: Mutex<Option<FinishHook>>,
}

impl LifecycleNotifier {
    #[must_use]
    pub fn new(sink: Arc<dyn TradeStatusSink>) -> Self {
        Self {
            sink,
            phase: Mutex::new(TradePhase::Created),
            finish_hook: Mutex::new(None),
        }
    }

    /// Install a hook that releases UI-bound resources. Runs once, before
    /// the terminal event reaches the sink.
    pub fn set_finish_hook(&self, hook: impl FnOnce() + Send + 'static) {
        *self.finish_hook.lock() = Some(Box::new(hook));
    }

    #[must_use]
    pub fn phase(&self) -> TradePhase {
        *self.phase.lock()
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.phase().is_terminal()
    }

    /// Fired once when a worker takes the entry and presents its code.
    pub fn initializing(&self, entry: &TradeEntry) {
        let mut phase = self.phase.lock();
        if *phase != TradePhase::Created {
            debug!(trade_id = %entry.id(), phase = ?*phase, "dropping repeat initialize event");
            return;
        }
        *phase = TradePhase::Initializing;
        self.sink.on_initialize(entry);
    }

    /// Fired when the worker is waiting at the trade screen.
    pub fn searching(&self, entry: &TradeEntry, in_game_name: &str) {
        let mut phase = self.phase.lock();
        if phase.is_terminal() {
            debug!(trade_id = %entry.id(), "dropping searching event after terminal state");
            return;
        }
        *phase = TradePhase::Searching;
        self.sink.on_searching(entry, in_game_name);
    }

    /// Incidental progress text; valid in any non-terminal phase and does
    /// not change state.
    pub fn notify(&self, entry: &TradeEntry, message: &str) {
        let phase = self.phase.lock();
        if phase.is_terminal() {
            debug!(trade_id = %entry.id(), "dropping notification after terminal state");
            return;
        }
        self.sink.on_notify(entry, message);
    }

    /// A seed-search result; valid in any non-terminal phase.
    pub fn report(&self, entry: &TradeEntry, report: &SeedSearchReport) {
        let phase = self.phase.lock();
        if phase.is_terminal() {
            debug!(trade_id = %entry.id(), "dropping report after terminal state");
            return;
        }
        self.sink.on_report(entry, report);
    }

    /// Terminal: the trade completed. The finish hook runs first, then the
    /// sink hears about the success.
    pub fn finished(&self, entry: &TradeEntry, received: &TradePayload) {
        let mut phase = self.phase.lock();
        if phase.is_terminal() {
            debug!(trade_id = %entry.id(), "dropping second terminal event (finished)");
            return;
        }
        *phase = TradePhase::Finished;
        self.run_finish_hook();
        self.sink.on_finished(entry, received);
    }

    /// Terminal: the trade was abandoned. The finish hook releases UI
    /// resources before the requester learns the reason.
    pub fn canceled(&self, entry: &TradeEntry, reason: &str) {
        let mut phase = self.phase.lock();
        if phase.is_terminal() {
            debug!(trade_id = %entry.id(), "dropping second terminal event (canceled)");
            return;
        }
        *phase = TradePhase::Canceled;
        self.run_finish_hook();
        self.sink.on_canceled(entry, reason);
    }

    fn run_finish_hook(&self) {
        if let Some(hook) = self.finish_hook.lock().take() {
            hook();
        }
    }
}
