//! Scripted automation device for worker tests.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use crate::domain::{TradeEntry, TradePayload};
use crate::error::ExecutionError;
use crate::port::{AutomationDevice, TradeOutcome};

/// One pre-planned device reaction.
pub enum Script {
    /// Complete immediately, handing back the given payload.
    Complete(TradePayload),
    /// Abort immediately with the given reason.
    Abort(String),
    /// Fail with a device error.
    Fail(ExecutionError),
    /// Park until the cancellation token fires, then report cancellation.
    BlockUntilCanceled,
}

/// Device whose `execute` calls play back a fixed script in order.
pub struct ScriptedDevice {
    name: String,
    script: Mutex<VecDeque<Script>>,
}

impl ScriptedDevice {
    #[must_use]
    pub fn new(name: impl Into<String>, script: Vec<Script>) -> Self {
        Self {
            name: name.into(),
            script: Mutex::new(script.into()),
        }
    }

    /// A device that completes every trade with the same payload.
    #[must_use]
    pub fn always_completing(name: impl Into<String>, received: TradePayload, times: usize) -> Self {
        Self::new(
            name,
            (0..times).map(|_| Script::Complete(received.clone())).collect(),
        )
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.lock().len()
    }
}

#[async_trait]
impl AutomationDevice for ScriptedDevice {
    fn name(&self) -> &str {
        &self.name
    }

    async fn execute(
        &self,
        _entry: Arc<TradeEntry>,
        cancel: CancellationToken,
    ) -> Result<TradeOutcome, ExecutionError> {
        let step = self.script.lock().pop_front();
        match step {
            Some(Script::Complete(received)) => Ok(TradeOutcome::Completed { received }),
            Some(Script::Abort(reason)) => Ok(TradeOutcome::Aborted { reason }),
            Some(Script::Fail(err)) => Err(err),
            Some(Script::BlockUntilCanceled) => {
                cancel.cancelled().await;
                Err(ExecutionError::Canceled("canceled by request".to_string()))
            }
            None => Err(ExecutionError::Device("script exhausted".to_string())),
        }
    }
}
