//! Builders for domain fixtures.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::domain::{BatchInfo, EntryFlags, RequesterId, RoutineKind, Significance, TradeCode,
    TradeEntry, TradeId, TradeKind, TradePayload, TrainerInfo};
use crate::port::{LifecycleNotifier, NullSink, TradeStatusSink};

use super::sink::RecordingSink;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

fn next_id() -> TradeId {
    TradeId::new(NEXT_ID.fetch_add(1, Ordering::Relaxed))
}

/// A concrete payload with a species and name.
#[must_use]
pub fn payload(species: u16, name: &str) -> TradePayload {
    TradePayload::new(species, name)
}

/// A plain link-trade entry whose events go nowhere.
#[must_use]
pub fn entry_for(requester: u64, routine: RoutineKind) -> TradeEntry {
    entry_builder(requester, routine).build(Arc::new(NullSink))
}

/// An entry wired to a [`RecordingSink`] so tests can assert on events.
#[must_use]
pub fn entry_with_sink(requester: u64, routine: RoutineKind, sink: RecordingSink) -> TradeEntry {
    entry_builder(requester, routine)
        .payload(payload(25, "Pikachu"))
        .build(Arc::new(sink))
}

/// Start a builder for one entry; unset fields take sensible defaults.
#[must_use]
pub fn entry_builder(requester: u64, routine: RoutineKind) -> EntryBuilder {
    EntryBuilder {
        requester: RequesterId::new(requester),
        routine,
        payload: TradePayload::empty(),
        code: 0,
        kind: TradeKind::Specific,
        significance: Significance::None,
        batch: BatchInfo::SINGLE,
        flags: EntryFlags::default(),
        trainer_name: format!("Trainer{requester}"),
    }
}

pub struct EntryBuilder {
    requester: RequesterId,
    routine: RoutineKind,
    payload: TradePayload,
    code: u32,
    kind: TradeKind,
    significance: Significance,
    batch: BatchInfo,
    flags: EntryFlags,
    trainer_name: String,
}

impl EntryBuilder {
    #[must_use]
    pub fn payload(mut self, payload: TradePayload) -> Self {
        self.payload = payload;
        self
    }

    #[must_use]
    pub fn code(mut self, code: u32) -> Self {
        self.code = code;
        self
    }

    #[must_use]
    pub fn kind(mut self, kind: TradeKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn significance(mut self, significance: Significance) -> Self {
        self.significance = significance;
        self
    }

    #[must_use]
    pub fn batch(mut self, batch: BatchInfo) -> Self {
        self.batch = batch;
        self
    }

    #[must_use]
    pub fn flags(mut self, flags: EntryFlags) -> Self {
        self.flags = flags;
        self
    }

    #[must_use]
    pub fn trainer_name(mut self, name: impl Into<String>) -> Self {
        self.trainer_name = name.into();
        self
    }

    #[must_use]
    pub fn build(self, sink: Arc<dyn TradeStatusSink>) -> TradeEntry {
        let code = TradeCode::new(self.code).expect("fixture code within range");
        let mut entry = TradeEntry::new(
            next_id(),
            self.payload.clone(),
            TrainerInfo::new(self.trainer_name, self.requester),
            self.routine,
            if self.batch.is_batch() {
                TradeKind::Batch
            } else {
                self.kind
            },
            code,
            self.significance,
            LifecycleNotifier::new(sink),
        )
        .with_batch(self.batch)
        .with_flags(self.flags);
        if self.payload.supports_visual_code() {
            entry = entry.with_visual_code(crate::domain::VisualCode::random());
        }
        entry
    }
}
