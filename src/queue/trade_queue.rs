//! A single FIFO queue of trade entries.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::domain::{RequesterId, TradeEntry, TradeId};

/// Result of attempting to add an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueAddResult {
    Added,
    AlreadyInQueue,
}

/// Strictly insertion-ordered queue of trade entries.
///
/// The lock guards only the ordered sequence; callers never hold it across
/// notification delivery or device I/O. Claiming an entry flips its atomic
/// claim flag but leaves it in the sequence, so a trade being executed still
/// counts toward queue positions until its terminal event removes it.
pub struct TradeQueue {
    entries: RwLock<VecDeque<Arc<TradeEntry>>>,
}

impl TradeQueue {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(VecDeque::new()),
        }
    }

    /// Append an entry, subject to the multiplicity rule: without
    /// `allow_multiple`, a requester with any entry already present is
    /// turned away.
    pub fn add(&self, entry: Arc<TradeEntry>, allow_multiple: bool) -> QueueAddResult {
        let mut entries = self.entries.write();
        if !allow_multiple {
            let requester = entry.requester();
            if entries.iter().any(|e| e.requester() == requester) {
                return QueueAddResult::AlreadyInQueue;
            }
        }
        entries.push_back(entry);
        QueueAddResult::Added
    }

    /// Remove the entry with `id`, returning it if present.
    pub fn remove(&self, id: TradeId) -> Option<Arc<TradeEntry>> {
        let mut entries = self.entries.write();
        let index = entries.iter().position(|e| e.id() == id)?;
        entries.remove(index)
    }

    /// Remove the requester's oldest unclaimed entry, if any. Claimed
    /// entries can only leave through their worker's terminal event.
    pub fn remove_pending(&self, requester: RequesterId) -> Option<Arc<TradeEntry>> {
        let mut entries = self.entries.write();
        let index = entries
            .iter()
            .position(|e| e.requester() == requester && !e.is_claimed())?;
        entries.remove(index)
    }

    /// Look up an entry by its unique trade ID.
    pub fn get(&self, id: TradeId) -> Option<Arc<TradeEntry>> {
        self.entries.read().iter().find(|e| e.id() == id).cloned()
    }

    /// The requester's oldest entry, if any.
    pub fn find(&self, requester: RequesterId) -> Option<Arc<TradeEntry>> {
        self.entries
            .read()
            .iter()
            .find(|e| e.requester() == requester)
            .cloned()
    }

    /// 1-based rank of the entry among currently-present entries, plus the
    /// queue total, from one consistent snapshot.
    pub fn position_of(&self, requester: RequesterId, id: TradeId) -> Option<(usize, usize)> {
        let entries = self.entries.read();
        let count = entries.len();
        entries
            .iter()
            .position(|e| e.requester() == requester && e.id() == id)
            .map(|index| (index + 1, count))
    }

    /// Claim the first unclaimed entry for execution.
    pub fn claim_next(&self) -> Option<Arc<TradeEntry>> {
        let entries = self.entries.read();
        entries.iter().find(|e| e.claim()).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Snapshot of the current sequence, front first.
    pub fn snapshot(&self) -> Vec<Arc<TradeEntry>> {
        self.entries.read().iter().cloned().collect()
    }
}

impl Default for TradeQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RoutineKind;
    use crate::testkit::domain::entry_for;

    #[test]
    fn fifo_order_is_insertion_order() {
        let queue = TradeQueue::new();
        for requester in 1..=3u64 {
            let entry = Arc::new(entry_for(requester, RoutineKind::LinkTrade));
            assert_eq!(queue.add(entry, false), QueueAddResult::Added);
        }

        let order: Vec<u64> = queue
            .snapshot()
            .iter()
            .map(|e| e.requester().as_u64())
            .collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn duplicate_requester_is_rejected_without_multiplicity() {
        let queue = TradeQueue::new();
        let first = Arc::new(entry_for(7, RoutineKind::LinkTrade));
        let second = Arc::new(entry_for(7, RoutineKind::LinkTrade));

        assert_eq!(queue.add(first, false), QueueAddResult::Added);
        assert_eq!(queue.add(second, false), QueueAddResult::AlreadyInQueue);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn multiplicity_admits_coexisting_entries() {
        let queue = TradeQueue::new();
        for _ in 0..3 {
            let entry = Arc::new(entry_for(7, RoutineKind::LinkTrade));
            assert_eq!(queue.add(entry, true), QueueAddResult::Added);
        }
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn removal_shifts_positions() {
        let queue = TradeQueue::new();
        let a = Arc::new(entry_for(1, RoutineKind::LinkTrade));
        let b = Arc::new(entry_for(2, RoutineKind::LinkTrade));
        queue.add(Arc::clone(&a), false);
        queue.add(Arc::clone(&b), false);

        assert_eq!(queue.position_of(b.requester(), b.id()), Some((2, 2)));
        queue.remove(a.id());
        assert_eq!(queue.position_of(b.requester(), b.id()), Some((1, 1)));
    }

    #[test]
    fn claim_next_skips_claimed_entries() {
        let queue = TradeQueue::new();
        let a = Arc::new(entry_for(1, RoutineKind::LinkTrade));
        let b = Arc::new(entry_for(2, RoutineKind::LinkTrade));
        queue.add(Arc::clone(&a), false);
        queue.add(Arc::clone(&b), false);

        let first = queue.claim_next().unwrap();
        assert_eq!(first.id(), a.id());
        let second = queue.claim_next().unwrap();
        assert_eq!(second.id(), b.id());
        assert!(queue.claim_next().is_none());

        // Claimed entries stay in the sequence until removed.
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn remove_pending_ignores_claimed_entries() {
        let queue = TradeQueue::new();
        let entry = Arc::new(entry_for(5, RoutineKind::LinkTrade));
        queue.add(Arc::clone(&entry), false);

        queue.claim_next().unwrap();
        assert!(queue.remove_pending(entry.requester()).is_none());
        assert_eq!(queue.len(), 1);
    }
}
