//! Application services - the submit path and the per-device worker loop.

mod submit;
mod worker;

pub use submit::{Acceptance, SubmitOutcome, SubmitRequest, SubmitService};
pub use worker::{ActiveTrades, TradeWorker};
