//! Request routing and significance tiers.

use std::fmt;

/// Which worker routine a queued entry is destined for.
///
/// Each kind owns its own queue partition; a worker services the partition
/// matching the routine it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoutineKind {
    /// Ordinary link trade.
    LinkTrade,
    /// Duplicate whatever the partner shows.
    Clone,
    /// Dump the partner's payload data back to them.
    Dump,
    /// Repair the original-trainer details of the shown payload.
    FixOt,
    /// Check the partner's seed and report the result.
    SeedCheck,
}

impl RoutineKind {
    pub const ALL: [Self; 5] = [
        Self::LinkTrade,
        Self::Clone,
        Self::Dump,
        Self::FixOt,
        Self::SeedCheck,
    ];

    /// Stable index into per-routine queue partitions.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::LinkTrade => 0,
            Self::Clone => 1,
            Self::Dump => 2,
            Self::FixOt => 3,
            Self::SeedCheck => 4,
        }
    }
}

impl fmt::Display for RoutineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::LinkTrade => "Link Trade",
            Self::Clone => "Clone",
            Self::Dump => "Dump",
            Self::FixOt => "FixOT",
            Self::SeedCheck => "Seed Check",
        };
        write!(f, "{label}")
    }
}

/// Flavor of the request carried on the entry, as reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TradeKind {
    /// A specific requested payload.
    Specific,
    Clone,
    Dump,
    FixOt,
    Seed,
    /// One item of a multi-trade batch session.
    Batch,
}

impl fmt::Display for TradeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Specific => "Specific",
            Self::Clone => "Clone",
            Self::Dump => "Dump",
            Self::FixOt => "FixOT",
            Self::Seed => "Seed",
            Self::Batch => "Batch",
        };
        write!(f, "{label}")
    }
}

/// Admission-priority tier granted to a requester.
///
/// The tier is decided by an external predicate (favored/owner lists); the
/// core only consumes the result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Significance {
    #[default]
    None,
    Favored,
    Owner,
}

impl Significance {
    /// Whether this tier alone permits multiple coexisting entries.
    ///
    /// Only the owner bypasses the one-entry-per-requester rule; favored
    /// users get no multiplicity and no queue jump.
    #[must_use]
    pub const fn bypasses_multiplicity(self) -> bool {
        matches!(self, Self::Owner)
    }

    #[must_use]
    pub const fn is_favored(self) -> bool {
        matches!(self, Self::Favored | Self::Owner)
    }
}
