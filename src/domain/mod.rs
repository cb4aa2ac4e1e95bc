//! Core value types for trade requests.
//!
//! Everything here is plain data with no dependency on the chat platform,
//! the game-rule engine, or the console transport. Entries are immutable
//! after construction except for their claim flag.

mod code;
mod entry;
mod id;
mod payload;
mod report;
mod routine;

pub use code::{PictoSymbol, TradeCode, VisualCode, MAX_TRADE_CODE};
pub use entry::{BatchInfo, EntryFlags, TradeEntry, TrainerInfo};
pub use id::{RequesterId, TradeId, TradeIdSequence};
pub use payload::TradePayload;
pub use report::{ReportDetail, SeedSearchReport};
pub use routine::{RoutineKind, Significance, TradeKind};
