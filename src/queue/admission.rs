//! Admission policy - the multiplicity rule.
//!
//! A requester normally holds at most one pending entry per queue, so no
//! single user can monopolize worker throughput. Batch submissions and the
//! bot owner may hold several. Favored users get neither multiplicity nor a
//! queue jump; their tier only relaxes limits elsewhere (command cooldowns,
//! capacity gates) in the surrounding layers.

use crate::domain::Significance;

/// Decide whether a request may hold multiple coexisting entries.
#[must_use]
pub fn allow_multiple(significance: Significance, is_batch: bool) -> bool {
    is_batch || significance.bypasses_multiplicity()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_users_get_one_entry() {
        assert!(!allow_multiple(Significance::None, false));
    }

    #[test]
    fn favored_users_get_no_multiplicity() {
        assert!(!allow_multiple(Significance::Favored, false));
    }

    #[test]
    fn owner_always_gets_multiplicity() {
        assert!(allow_multiple(Significance::Owner, false));
        assert!(allow_multiple(Significance::Owner, true));
    }

    #[test]
    fn batches_get_multiplicity_regardless_of_tier() {
        assert!(allow_multiple(Significance::None, true));
        assert!(allow_multiple(Significance::Favored, true));
    }
}
