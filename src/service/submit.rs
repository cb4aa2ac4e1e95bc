//! The admission entry point.
//!
//! Validates a candidate request through the collaborator ports, constructs
//! the entry and its bound notifier, submits through the admission gate, and
//! returns a structured result the presentation layer can render. All
//! rejections happen before any queue mutation.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::{BatchInfo, EntryFlags, RequesterId, RoutineKind, Significance, TradeCode,
    TradeEntry, TradeId, TradeKind, TradePayload, TrainerInfo, VisualCode};
use crate::error::SubmitError;
use crate::port::{LifecycleNotifier, TradeStatusSink, TradeValidator, Verdict};
use crate::queue::{allow_multiple, EtaEstimator, QueueAddResult, QueueCheckResult, QueueManager};

/// One candidate trade request.
pub struct SubmitRequest {
    payload: TradePayload,
    code: Option<u32>,
    trainer_name: String,
    requester: RequesterId,
    significance: Significance,
    routine: RoutineKind,
    kind: TradeKind,
    batch: BatchInfo,
    flags: EntryFlags,
    sink: Arc<dyn TradeStatusSink>,
}

impl SubmitRequest {
    pub fn new(
        payload: TradePayload,
        requester: RequesterId,
        trainer_name: impl Into<String>,
        routine: RoutineKind,
        sink: Arc<dyn TradeStatusSink>,
    ) -> Self {
        Self {
            payload,
            code: None,
            trainer_name: trainer_name.into(),
            requester,
            significance: Significance::None,
            routine,
            kind: TradeKind::Specific,
            batch: BatchInfo::SINGLE,
            flags: EntryFlags::default(),
            sink,
        }
    }

    /// Use a caller-chosen trade code instead of a random one.
    #[must_use]
    pub fn with_code(mut self, code: u32) -> Self {
        self.code = Some(code);
        self
    }

    #[must_use]
    pub fn with_significance(mut self, significance: Significance) -> Self {
        self.significance = significance;
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: TradeKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_batch(mut self, batch: BatchInfo) -> Self {
        self.batch = batch;
        self
    }

    #[must_use]
    pub fn with_flags(mut self, flags: EntryFlags) -> Self {
        self.flags = flags;
        self
    }
}

/// Everything the caller needs to confirm an admitted request.
#[derive(Debug, Clone)]
pub struct Acceptance {
    pub trade_id: TradeId,
    pub code: TradeCode,
    pub visual_code: Option<VisualCode>,
    pub position: usize,
    pub eta_minutes: f64,
}

/// Structured result of a submit call.
#[derive(Debug)]
pub enum SubmitOutcome {
    Accepted(Acceptance),
    Rejected(SubmitError),
}

impl SubmitOutcome {
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// The queue helper: validates, admits, and reports.
pub struct SubmitService {
    queues: Arc<QueueManager>,
    validator: Arc<dyn TradeValidator>,
    ids: crate::domain::TradeIdSequence,
    estimator: EtaEstimator,
}

impl SubmitService {
    #[must_use]
    pub fn new(
        queues: Arc<QueueManager>,
        validator: Arc<dyn TradeValidator>,
        estimator: EtaEstimator,
    ) -> Self {
        Self {
            queues,
            validator,
            ids: crate::domain::TradeIdSequence::new(),
            estimator,
        }
    }

    /// Validate and admit one request.
    pub async fn submit(&self, request: SubmitRequest) -> SubmitOutcome {
        let code = match request.code {
            Some(raw) => match TradeCode::new(raw) {
                Ok(code) => code,
                Err(err) => {
                    debug!(requester = %request.requester, raw, "rejecting request: bad code");
                    return SubmitOutcome::Rejected(err);
                }
            },
            None => TradeCode::random(),
        };

        if !self.validator.is_tradeable(&request.payload).await {
            debug!(requester = %request.requester, "rejecting request: not tradeable");
            return SubmitOutcome::Rejected(SubmitError::NotTradeable(
                request.payload.to_string(),
            ));
        }
        if let Verdict::Invalid(details) = self.validator.validate(&request.payload).await {
            debug!(requester = %request.requester, details, "rejecting request: invalid payload");
            return SubmitOutcome::Rejected(SubmitError::InvalidPayload(details));
        }

        let id = self.ids.next_id();
        let visual_code = request
            .payload
            .supports_visual_code()
            .then(VisualCode::random);
        let kind = if request.batch.is_batch() {
            TradeKind::Batch
        } else {
            request.kind
        };

        let trainer = TrainerInfo::new(request.trainer_name, request.requester);
        let notifier = LifecycleNotifier::new(request.sink);
        let mut entry = TradeEntry::new(
            id,
            request.payload,
            trainer,
            request.routine,
            kind,
            code,
            request.significance,
            notifier,
        )
        .with_batch(request.batch)
        .with_flags(request.flags);
        if let Some(vc) = visual_code {
            entry = entry.with_visual_code(vc);
        }
        let entry = Arc::new(entry);

        let multiple = allow_multiple(request.significance, request.batch.is_batch());
        if self.queues.add(Arc::clone(&entry), multiple) == QueueAddResult::AlreadyInQueue {
            debug!(requester = %request.requester, routine = %request.routine,
                "rejecting request: already in queue");
            return SubmitOutcome::Rejected(SubmitError::AlreadyInQueue);
        }

        let placement = self
            .queues
            .check_position(entry.requester(), entry.id(), entry.routine());
        let eta_minutes = self
            .estimator
            .display_wait_minutes(placement.position(), entry.batch().index());

        info!(
            requester = %entry.requester(),
            trade_id = %entry.id(),
            routine = %entry.routine(),
            position = placement.position(),
            eta_minutes,
            "trade request admitted"
        );

        SubmitOutcome::Accepted(Acceptance {
            trade_id: entry.id(),
            code,
            visual_code: entry.visual_code().copied(),
            position: placement.position(),
            eta_minutes,
        })
    }

    /// Answer "where am I in line" for the requester's oldest entry.
    pub fn check_status(&self, requester: RequesterId, routine: RoutineKind) -> QueueCheckResult {
        match self.queues.find(requester, routine) {
            Some(entry) => self.queues.check_position(requester, entry.id(), routine),
            None => self.queues.check_position(
                requester,
                TradeId::new(0),
                routine,
            ),
        }
    }

    /// Remove the requester's oldest unclaimed entry and deliver its
    /// terminal event. A claimed entry must be cancelled through its
    /// worker's token instead.
    pub fn cancel_pending(&self, requester: RequesterId, routine: RoutineKind) -> bool {
        match self.queues.queue(routine).remove_pending(requester) {
            Some(entry) => {
                entry
                    .notifier()
                    .canceled(&entry, "Canceled before the trade started.");
                info!(requester = %requester, trade_id = %entry.id(), "pending trade dequeued");
                true
            }
            None => false,
        }
    }

    /// The shared queue partitions, for wiring workers.
    #[must_use]
    pub fn queues(&self) -> &Arc<QueueManager> {
        &self.queues
    }
}
