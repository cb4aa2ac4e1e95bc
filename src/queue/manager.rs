//! Per-routine queue partitions and position lookups.

use std::sync::Arc;

use crate::domain::{RequesterId, RoutineKind, TradeEntry, TradeId};

use super::trade_queue::{QueueAddResult, TradeQueue};

/// Snapshot answering "where am I in line".
///
/// Computed on demand from one consistent queue snapshot; never persisted.
#[derive(Debug)]
pub struct QueueCheckResult {
    entry: Option<Arc<TradeEntry>>,
    position: usize,
    queue_count: usize,
}

impl QueueCheckResult {
    fn absent(queue_count: usize) -> Self {
        Self {
            entry: None,
            position: 0,
            queue_count,
        }
    }

    #[must_use]
    pub fn in_queue(&self) -> bool {
        self.entry.is_some()
    }

    #[must_use]
    pub fn entry(&self) -> Option<&Arc<TradeEntry>> {
        self.entry.as_ref()
    }

    /// 1-based rank among currently-present entries; 0 when absent.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub const fn queue_count(&self) -> usize {
        self.queue_count
    }

    /// Status line for the requester.
    #[must_use]
    pub fn summary(&self) -> String {
        let Some(entry) = &self.entry else {
            return "You're not in the queue.".to_string();
        };
        let mut msg = format!(
            "You are in the {} queue. Position: {} of {}",
            entry.routine(),
            self.position,
            self.queue_count
        );
        if !entry.payload().is_empty() {
            msg.push_str(&format!(". Receiving: {}.", entry.payload().display_name()));
        }
        msg
    }
}

/// All trade queues, one per routine kind.
///
/// Constructed once at the composition root and shared by reference with
/// the submit path and the worker loops.
pub struct QueueManager {
    queues: [TradeQueue; RoutineKind::ALL.len()],
}

impl QueueManager {
    #[must_use]
    pub fn new() -> Self {
        Self {
            queues: std::array::from_fn(|_| TradeQueue::new()),
        }
    }

    /// The queue partition for a routine.
    #[must_use]
    pub fn queue(&self, routine: RoutineKind) -> &TradeQueue {
        &self.queues[routine.index()]
    }

    /// Route an entry to its partition, applying the multiplicity rule.
    pub fn add(&self, entry: Arc<TradeEntry>, allow_multiple: bool) -> QueueAddResult {
        self.queue(entry.routine()).add(entry, allow_multiple)
    }

    /// Position/presence check for one entry in one routine's queue.
    pub fn check_position(
        &self,
        requester: RequesterId,
        id: TradeId,
        routine: RoutineKind,
    ) -> QueueCheckResult {
        let queue = self.queue(routine);
        match queue.position_of(requester, id) {
            Some((position, queue_count)) => QueueCheckResult {
                entry: queue.get(id),
                position,
                queue_count,
            },
            None => QueueCheckResult::absent(queue.len()),
        }
    }

    /// The requester's oldest entry in a routine's queue, if any.
    pub fn find(&self, requester: RequesterId, routine: RoutineKind) -> Option<Arc<TradeEntry>> {
        self.queue(routine).find(requester)
    }

    /// Entries across all partitions.
    #[must_use]
    pub fn total_len(&self) -> usize {
        self.queues.iter().map(TradeQueue::len).sum()
    }
}

impl Default for QueueManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::domain::entry_for;

    #[test]
    fn partitions_are_independent() {
        let manager = QueueManager::new();
        let trade = Arc::new(entry_for(1, RoutineKind::LinkTrade));
        let seed = Arc::new(entry_for(1, RoutineKind::SeedCheck));

        assert_eq!(manager.add(trade, false), QueueAddResult::Added);
        // Same requester, different partition: no multiplicity conflict.
        assert_eq!(manager.add(seed, false), QueueAddResult::Added);

        assert_eq!(manager.queue(RoutineKind::LinkTrade).len(), 1);
        assert_eq!(manager.queue(RoutineKind::SeedCheck).len(), 1);
        assert_eq!(manager.total_len(), 2);
    }

    #[test]
    fn check_position_reports_rank_and_count() {
        let manager = QueueManager::new();
        let a = Arc::new(entry_for(1, RoutineKind::LinkTrade));
        let b = Arc::new(entry_for(2, RoutineKind::LinkTrade));
        manager.add(Arc::clone(&a), false);
        manager.add(Arc::clone(&b), false);

        let result = manager.check_position(b.requester(), b.id(), RoutineKind::LinkTrade);
        assert!(result.in_queue());
        assert_eq!(result.position(), 2);
        assert_eq!(result.queue_count(), 2);
    }

    #[test]
    fn absent_requester_reports_not_in_queue() {
        let manager = QueueManager::new();
        let result = manager.check_position(
            RequesterId::new(9),
            TradeId::new(9),
            RoutineKind::LinkTrade,
        );
        assert!(!result.in_queue());
        assert_eq!(result.position(), 0);
        assert_eq!(result.summary(), "You're not in the queue.");
    }

    #[test]
    fn summary_names_queue_position_and_payload() {
        let manager = QueueManager::new();
        let entry = Arc::new(entry_for(3, RoutineKind::LinkTrade));
        manager.add(Arc::clone(&entry), false);

        let result = manager.check_position(entry.requester(), entry.id(), RoutineKind::LinkTrade);
        let summary = result.summary();
        assert!(summary.contains("Link Trade queue"));
        assert!(summary.contains("Position: 1 of 1"));
    }
}
