//! Validation port - the opaque game-rule oracle.

use async_trait::async_trait;

use crate::domain::TradePayload;

/// Outcome of a legality check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Valid,
    Invalid(String),
}

impl Verdict {
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Tradeability and legality checks, supplied by an external rules engine.
///
/// The queue core never implements game rules itself; both checks run
/// before any queue mutation, so a rejection leaves no partial state.
#[async_trait]
pub trait TradeValidator: Send + Sync {
    /// Whether the payload is something the game will let change hands at
    /// all (not a fused form, not a ride companion, and so on).
    async fn is_tradeable(&self, payload: &TradePayload) -> bool;

    /// Full legality validation of the payload.
    async fn validate(&self, payload: &TradePayload) -> Verdict;
}

/// A validator that accepts everything, for tests and loopback runs.
pub struct AcceptAllValidator;

#[async_trait]
impl TradeValidator for AcceptAllValidator {
    async fn is_tradeable(&self, _payload: &TradePayload) -> bool {
        true
    }

    async fn validate(&self, _payload: &TradePayload) -> Verdict {
        Verdict::Valid
    }
}
