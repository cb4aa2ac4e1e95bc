//! The per-device worker loop.
//!
//! Each automation-connected device runs one worker. The worker claims the
//! next unclaimed entry across the queue partitions it services, fires the
//! initialize event, drives the device, and maps the outcome to exactly one
//! terminal event. The entry leaves the queue before that terminal event is
//! delivered, so a requester who hears "finished" can immediately queue
//! again.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::domain::{RoutineKind, TradeEntry, TradeId};
use crate::port::{AutomationDevice, TradeOutcome};
use crate::queue::QueueManager;

/// Cancellation tokens of trades currently being executed.
///
/// Once a worker has claimed an entry, this registry is the only way to
/// cancel it; the worker observes the token cooperatively and the requester
/// hears about it through the `Canceled` event alone.
#[derive(Default)]
pub struct ActiveTrades {
    tokens: Mutex<HashMap<TradeId, CancellationToken>>,
}

impl ActiveTrades {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn register(&self, id: TradeId, token: CancellationToken) {
        self.tokens.lock().insert(id, token);
    }

    fn unregister(&self, id: TradeId) {
        self.tokens.lock().remove(&id);
    }

    /// Request cooperative cancellation of a claimed trade. Returns false
    /// when the trade is not currently executing.
    pub fn cancel(&self, id: TradeId) -> bool {
        match self.tokens.lock().get(&id) {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.lock().is_empty()
    }
}

/// Drives one automation device against one or more queue partitions.
///
/// Partitions are polled in the order given; earlier routines win when
/// several have work.
pub struct TradeWorker {
    device: Arc<dyn AutomationDevice>,
    queues: Arc<QueueManager>,
    routines: Vec<RoutineKind>,
    active: Arc<ActiveTrades>,
    shutdown: CancellationToken,
    idle_poll: Duration,
}

impl TradeWorker {
    #[must_use]
    pub fn new(
        device: Arc<dyn AutomationDevice>,
        queues: Arc<QueueManager>,
        routines: Vec<RoutineKind>,
        active: Arc<ActiveTrades>,
        shutdown: CancellationToken,
        idle_poll: Duration,
    ) -> Self {
        Self {
            device,
            queues,
            routines,
            active,
            shutdown,
            idle_poll,
        }
    }

    /// Run until shutdown. Never holds a queue lock across device I/O.
    pub async fn run(self) {
        info!(device = self.device.name(), "worker started");
        loop {
            if self.shutdown.is_cancelled() {
                break;
            }

            let Some(entry) = self.claim_next() else {
                tokio::select! {
                    () = self.shutdown.cancelled() => break,
                    () = tokio::time::sleep(self.idle_poll) => continue,
                }
            };

            self.process(entry).await;
        }
        info!(device = self.device.name(), "worker stopped");
    }

    fn claim_next(&self) -> Option<Arc<TradeEntry>> {
        self.routines
            .iter()
            .find_map(|routine| self.queues.queue(*routine).claim_next())
    }

    /// Execute one claimed entry through to its terminal event.
    pub async fn process(&self, entry: Arc<TradeEntry>) {
        let token = self.shutdown.child_token();
        self.active.register(entry.id(), token.clone());

        entry.notifier().initializing(&entry);
        let outcome = self.device.execute(Arc::clone(&entry), token).await;

        self.active.unregister(entry.id());
        // Remove before the terminal event so a requester who hears it can
        // requeue without tripping the multiplicity rule.
        self.queues.queue(entry.routine()).remove(entry.id());

        match outcome {
            Ok(TradeOutcome::Completed { received }) => {
                info!(device = self.device.name(), trade_id = %entry.id(), "trade finished");
                entry.notifier().finished(&entry, &received);
            }
            Ok(TradeOutcome::Aborted { reason }) => {
                warn!(device = self.device.name(), trade_id = %entry.id(), reason,
                    "trade aborted");
                entry.notifier().canceled(&entry, &reason);
            }
            Err(err) => {
                warn!(device = self.device.name(), trade_id = %entry.id(), error = %err,
                    "device reported an execution error");
                entry.notifier().canceled(&entry, &err.to_string());
            }
        }
    }
}
