//! Trade queues: admission, FIFO ordering, and position/ETA estimation.
//!
//! One [`TradeQueue`] exists per routine kind, all owned by a
//! [`QueueManager`] that the composition root constructs and threads through
//! the submit path and the worker loops. There is no ambient global queue.

mod admission;
mod estimator;
mod manager;
mod trade_queue;

pub use admission::allow_multiple;
pub use estimator::EtaEstimator;
pub use manager::{QueueCheckResult, QueueManager};
pub use trade_queue::{QueueAddResult, TradeQueue};
