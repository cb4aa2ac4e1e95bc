//! Trait boundaries to external collaborators.
//!
//! The queue core talks to the chat platform, the game-rule engine, and the
//! console transport exclusively through these traits. Implementations live
//! in `adapter` (or in the consuming application) and are injected at the
//! composition root.

mod device;
mod notifier;
mod sink;
mod validator;

pub use device::{AutomationDevice, TradeOutcome};
pub use notifier::{LifecycleNotifier, TradePhase};
pub use sink::{LogSink, NullSink, TradeStatusSink};
pub use validator::{AcceptAllValidator, TradeValidator, Verdict};
