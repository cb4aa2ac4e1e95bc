//! Automation-device port - the black-box console connection.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::domain::{TradeEntry, TradePayload};
use crate::error::ExecutionError;

/// What the device reports once a trade attempt ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TradeOutcome {
    /// The trade went through; `received` is what the partner gave us.
    Completed { received: TradePayload },
    /// The device gave up (partner never showed, wrong code, and so on).
    Aborted { reason: String },
}

/// A console-automation connection that can execute one trade at a time.
///
/// Implementations drive the actual hardware and call back into
/// `entry.notifier()` at the searching/notify lifecycle points; the worker
/// loop owns the initialize and terminal events. Cancellation is
/// cooperative - implementations must poll the token between automation
/// steps and abort promptly when it fires.
#[async_trait]
pub trait AutomationDevice: Send + Sync {
    /// Stable name used in logs and worker identification.
    fn name(&self) -> &str;

    /// Execute the entry's trade to completion, abort, or cancellation.
    async fn execute(
        &self,
        entry: Arc<TradeEntry>,
        cancel: CancellationToken,
    ) -> Result<TradeOutcome, ExecutionError>;
}
