//! One queued trade request and its bound lifecycle notifier.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::domain::{RequesterId, RoutineKind, Significance, TradeCode, TradeId, TradeKind,
    TradePayload, VisualCode};
use crate::port::LifecycleNotifier;

/// In-game trainer details of the requester.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainerInfo {
    name: String,
    requester: RequesterId,
}

impl TrainerInfo {
    pub fn new(name: impl Into<String>, requester: RequesterId) -> Self {
        Self {
            name: name.into(),
            requester,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn requester(&self) -> RequesterId {
        self.requester
    }
}

/// Placement of an entry within a multi-trade batch session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchInfo {
    index: u16,
    total: u16,
}

impl BatchInfo {
    /// A standalone, non-batch entry.
    pub const SINGLE: Self = Self { index: 1, total: 1 };

    /// Create batch placement; `index` is 1-based and must not exceed
    /// `total`.
    #[must_use]
    pub fn new(index: u16, total: u16) -> Option<Self> {
        if index == 0 || total == 0 || index > total {
            return None;
        }
        Some(Self { index, total })
    }

    #[must_use]
    pub const fn index(&self) -> u16 {
        self.index
    }

    #[must_use]
    pub const fn total(&self) -> u16 {
        self.total
    }

    /// True when this entry belongs to a multi-trade batch.
    #[must_use]
    pub const fn is_batch(&self) -> bool {
        self.total > 1
    }

    #[must_use]
    pub const fn is_first(&self) -> bool {
        self.index == 1
    }

    #[must_use]
    pub const fn is_last(&self) -> bool {
        self.index == self.total
    }
}

impl Default for BatchInfo {
    fn default() -> Self {
        Self::SINGLE
    }
}

/// Assorted request flags carried on an entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntryFlags {
    /// The request is for a surprise egg rather than a named species.
    pub mystery_egg: bool,
    /// Skip rewriting the original-trainer details onto the payload.
    pub ignore_auto_ot: bool,
    /// The requested set was auto-corrected to its closest legal form.
    pub auto_corrected: bool,
}

/// An admitted trade request.
///
/// Identity and payload are fixed at admission time. The only mutable state
/// is the claim flag a worker flips when it takes the entry; everything else
/// a worker needs flows through the bound notifier.
pub struct TradeEntry {
    id: TradeId,
    payload: TradePayload,
    trainer: TrainerInfo,
    routine: RoutineKind,
    kind: TradeKind,
    code: TradeCode,
    visual_code: Option<VisualCode>,
    significance: Significance,
    batch: BatchInfo,
    flags: EntryFlags,
    notifier: LifecycleNotifier,
    claimed: AtomicBool,
}

impl TradeEntry {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: TradeId,
        payload: TradePayload,
        trainer: TrainerInfo,
        routine: RoutineKind,
        kind: TradeKind,
        code: TradeCode,
        significance: Significance,
        notifier: LifecycleNotifier,
    ) -> Self {
        Self {
            id,
            payload,
            trainer,
            routine,
            kind,
            code,
            visual_code: None,
            significance,
            batch: BatchInfo::SINGLE,
            flags: EntryFlags::default(),
            notifier,
            claimed: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn with_batch(mut self, batch: BatchInfo) -> Self {
        self.batch = batch;
        self
    }

    #[must_use]
    pub fn with_visual_code(mut self, code: VisualCode) -> Self {
        self.visual_code = Some(code);
        self
    }

    #[must_use]
    pub fn with_flags(mut self, flags: EntryFlags) -> Self {
        self.flags = flags;
        self
    }

    #[must_use]
    pub const fn id(&self) -> TradeId {
        self.id
    }

    #[must_use]
    pub const fn payload(&self) -> &TradePayload {
        &self.payload
    }

    #[must_use]
    pub const fn trainer(&self) -> &TrainerInfo {
        &self.trainer
    }

    /// The requester that owns this entry for admission purposes.
    #[must_use]
    pub const fn requester(&self) -> RequesterId {
        self.trainer.requester()
    }

    #[must_use]
    pub const fn routine(&self) -> RoutineKind {
        self.routine
    }

    #[must_use]
    pub const fn kind(&self) -> TradeKind {
        self.kind
    }

    #[must_use]
    pub const fn code(&self) -> TradeCode {
        self.code
    }

    #[must_use]
    pub const fn visual_code(&self) -> Option<&VisualCode> {
        self.visual_code.as_ref()
    }

    #[must_use]
    pub const fn significance(&self) -> Significance {
        self.significance
    }

    #[must_use]
    pub const fn batch(&self) -> BatchInfo {
        self.batch
    }

    #[must_use]
    pub const fn flags(&self) -> EntryFlags {
        self.flags
    }

    #[must_use]
    pub const fn notifier(&self) -> &LifecycleNotifier {
        &self.notifier
    }

    /// Atomically claim the entry for execution. Returns false if another
    /// worker got there first.
    pub fn claim(&self) -> bool {
        self.claimed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    #[must_use]
    pub fn is_claimed(&self) -> bool {
        self.claimed.load(Ordering::Acquire)
    }
}

impl fmt::Debug for TradeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TradeEntry")
            .field("id", &self.id)
            .field("requester", &self.requester())
            .field("routine", &self.routine)
            .field("kind", &self.kind)
            .field("code", &self.code)
            .field("batch", &self.batch)
            .field("claimed", &self.is_claimed())
            .finish_non_exhaustive()
    }
}
