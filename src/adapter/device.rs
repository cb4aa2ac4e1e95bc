//! Loopback automation device.
//!
//! Stands in for real console hardware: it walks the lifecycle with a
//! configurable delay and hands back a canned partner payload. Useful for
//! exercising the queue end to end without a console attached.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tokio_util::sync::CancellationToken;

use crate::domain::{ReportDetail, RoutineKind, SeedSearchReport, TradeEntry, TradePayload};
use crate::error::ExecutionError;
use crate::port::{AutomationDevice, TradeOutcome};

pub struct LoopbackDevice {
    name: String,
    in_game_name: String,
    delay: Duration,
}

impl LoopbackDevice {
    #[must_use]
    pub fn new(name: impl Into<String>, in_game_name: impl Into<String>, delay: Duration) -> Self {
        Self {
            name: name.into(),
            in_game_name: in_game_name.into(),
            delay,
        }
    }

    async fn pause(&self, cancel: &CancellationToken, entry: &TradeEntry) -> Result<(), ExecutionError> {
        tokio::select! {
            () = cancel.cancelled() => Err(ExecutionError::Canceled(format!(
                "trade {} canceled by request", entry.id()
            ))),
            () = tokio::time::sleep(self.delay) => Ok(()),
        }
    }
}

#[async_trait]
impl AutomationDevice for LoopbackDevice {
    fn name(&self) -> &str {
        &self.name
    }

    async fn execute(
        &self,
        entry: Arc<TradeEntry>,
        cancel: CancellationToken,
    ) -> Result<TradeOutcome, ExecutionError> {
        self.pause(&cancel, &entry).await?;
        entry.notifier().searching(&entry, &self.in_game_name);
        self.pause(&cancel, &entry).await?;

        if entry.routine() == RoutineKind::SeedCheck {
            let seed: u64 = rand::thread_rng().gen();
            let report = SeedSearchReport::new(
                seed,
                vec![ReportDetail::new("Source", "loopback")],
            );
            entry.notifier().report(&entry, &report);
            return Ok(TradeOutcome::Completed {
                received: TradePayload::empty(),
            });
        }

        Ok(TradeOutcome::Completed {
            received: TradePayload::new(132, "Ditto"),
        })
    }
}
