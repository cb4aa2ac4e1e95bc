//! Recording sink for asserting on lifecycle events.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::domain::{SeedSearchReport, TradeEntry, TradePayload};
use crate::port::TradeStatusSink;

/// Which sink callback fired, without its arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordedEvent {
    Initialize,
    Searching,
    Canceled,
    Finished,
    Notify,
    Report,
}

/// Thread-safe sink that records every event it receives. Clones share the
/// same log, so a test can hand one copy to an entry and keep another for
/// assertions.
#[derive(Clone, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<RecordedEvent>>>,
    texts: Arc<Mutex<Vec<String>>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Events in delivery order.
    #[must_use]
    pub fn kinds(&self) -> Vec<RecordedEvent> {
        self.events.lock().clone()
    }

    /// Free-text arguments (cancel reasons, notify messages) in delivery
    /// order.
    #[must_use]
    pub fn texts(&self) -> Vec<String> {
        self.texts.lock().clone()
    }

    fn record(&self, event: RecordedEvent) {
        self.events.lock().push(event);
    }
}

impl TradeStatusSink for RecordingSink {
    fn on_initialize(&self, _entry: &TradeEntry) {
        self.record(RecordedEvent::Initialize);
    }

    fn on_searching(&self, _entry: &TradeEntry, _in_game_name: &str) {
        self.record(RecordedEvent::Searching);
    }

    fn on_canceled(&self, _entry: &TradeEntry, reason: &str) {
        self.record(RecordedEvent::Canceled);
        self.texts.lock().push(reason.to_string());
    }

    fn on_finished(&self, _entry: &TradeEntry, _received: &TradePayload) {
        self.record(RecordedEvent::Finished);
    }

    fn on_notify(&self, _entry: &TradeEntry, message: &str) {
        self.record(RecordedEvent::Notify);
        self.texts.lock().push(message.to_string());
    }

    fn on_report(&self, _entry: &TradeEntry, _report: &SeedSearchReport) {
        self.record(RecordedEvent::Report);
    }
}
