//! Seed-search results reported back through the notifier.

use std::fmt;

/// One heading/detail pair of a seed-search report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDetail {
    pub heading: String,
    pub detail: String,
}

impl ReportDetail {
    pub fn new(heading: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            detail: detail.into(),
        }
    }
}

/// Result of a seed check, rendered as its own formatted block rather than
/// plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedSearchReport {
    seed: u64,
    details: Vec<ReportDetail>,
}

impl SeedSearchReport {
    #[must_use]
    pub fn new(seed: u64, details: Vec<ReportDetail>) -> Self {
        Self { seed, details }
    }

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    #[must_use]
    pub fn details(&self) -> &[ReportDetail] {
        &self.details
    }

    /// Hex form the requester can paste elsewhere.
    #[must_use]
    pub fn seed_hex(&self) -> String {
        format!("{:016X}", self.seed)
    }
}

impl fmt::Display for SeedSearchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Seed: {}", self.seed_hex())?;
        for detail in &self.details {
            writeln!(f, "{}: {}", detail.heading, detail.detail)?;
        }
        Ok(())
    }
}
