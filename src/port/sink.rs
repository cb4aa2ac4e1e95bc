//! Status sink - where lifecycle events become user-facing messages.

use tracing::info;

use crate::domain::{SeedSearchReport, TradeEntry, TradePayload};

/// Receiver for the lifecycle events of one trade entry.
///
/// The presentation layer implements this trait; the core only calls it,
/// always through a [`LifecycleNotifier`](super::LifecycleNotifier) that
/// enforces event ordering.
///
/// # Implementation Notes
///
/// - Implementations must be thread-safe (`Send + Sync`)
/// - Methods must return quickly; slow delivery (HTTP, chat APIs) belongs in
///   a spawned task. Delivery failure must never propagate back into the
///   queue - log it and move on.
pub trait TradeStatusSink: Send + Sync {
    /// The entry was handed to a worker and its code should be presented.
    fn on_initialize(&self, entry: &TradeEntry);

    /// The worker is waiting at the trade screen under `in_game_name`.
    fn on_searching(&self, entry: &TradeEntry, in_game_name: &str);

    /// Terminal: the trade was abandoned for `reason`.
    fn on_canceled(&self, entry: &TradeEntry, reason: &str);

    /// Terminal: the trade completed and `received` is what the requester
    /// traded in.
    fn on_finished(&self, entry: &TradeEntry, received: &TradePayload);

    /// Incidental progress text.
    fn on_notify(&self, entry: &TradeEntry, message: &str);

    /// A seed-search result, rendered as its own block.
    fn on_report(&self, entry: &TradeEntry, report: &SeedSearchReport);
}

/// A no-op sink for testing or when notifications are disabled.
pub struct NullSink;

impl TradeStatusSink for NullSink {
    fn on_initialize(&self, _entry: &TradeEntry) {}
    fn on_searching(&self, _entry: &TradeEntry, _in_game_name: &str) {}
    fn on_canceled(&self, _entry: &TradeEntry, _reason: &str) {}
    fn on_finished(&self, _entry: &TradeEntry, _received: &TradePayload) {}
    fn on_notify(&self, _entry: &TradeEntry, _message: &str) {}
    fn on_report(&self, _entry: &TradeEntry, _report: &SeedSearchReport) {}
}

/// A sink that logs events via tracing, useful for headless operation.
pub struct LogSink;

impl TradeStatusSink for LogSink {
    fn on_initialize(&self, entry: &TradeEntry) {
        info!(trade_id = %entry.id(), code = %entry.code(), "Trade initializing");
    }

    fn on_searching(&self, entry: &TradeEntry, in_game_name: &str) {
        info!(trade_id = %entry.id(), in_game_name, "Searching for partner");
    }

    fn on_canceled(&self, entry: &TradeEntry, reason: &str) {
        info!(trade_id = %entry.id(), reason, "Trade canceled");
    }

    fn on_finished(&self, entry: &TradeEntry, received: &TradePayload) {
        info!(trade_id = %entry.id(), received = %received, "Trade finished");
    }

    fn on_notify(&self, entry: &TradeEntry, message: &str) {
        info!(trade_id = %entry.id(), message, "Trade notification");
    }

    fn on_report(&self, entry: &TradeEntry, report: &SeedSearchReport) {
        info!(trade_id = %entry.id(), seed = %report.seed_hex(), "Seed search result");
    }
}
