//! Identifier types with proper encapsulation.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Chat-platform identity of the user who submitted a request - newtype for
/// type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequesterId(u64);

impl RequesterId {
    /// Create a new `RequesterId` from a raw platform ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw numeric ID.
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequesterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for RequesterId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Process-wide unique identifier of one queued trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TradeId(u64);

impl TradeId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TradeId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Strictly monotonic source of [`TradeId`]s.
///
/// Seeded from the wall clock so IDs remain roughly sortable across process
/// restarts, then incremented atomically. A counter guarantees uniqueness
/// under concurrent submits, which a timestamp+random scheme cannot.
#[derive(Debug)]
pub struct TradeIdSequence {
    next: AtomicU64,
}

impl TradeIdSequence {
    #[must_use]
    pub fn new() -> Self {
        let millis = chrono::Utc::now().timestamp_millis().max(0) as u64;
        Self {
            next: AtomicU64::new(millis * 1_000),
        }
    }

    /// Issue the next unique trade ID.
    pub fn next_id(&self) -> TradeId {
        TradeId(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for TradeIdSequence {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_strictly_increasing() {
        let seq = TradeIdSequence::new();
        let a = seq.next_id();
        let b = seq.next_id();
        let c = seq.next_id();
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn concurrent_ids_are_unique() {
        use std::collections::HashSet;
        use std::sync::Arc;

        let seq = Arc::new(TradeIdSequence::new());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let seq = Arc::clone(&seq);
            handles.push(std::thread::spawn(move || {
                (0..100).map(|_| seq.next_id()).collect::<Vec<_>>()
            }));
        }

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id), "duplicate trade ID issued: {id}");
            }
        }
        assert_eq!(seen.len(), 800);
    }
}
