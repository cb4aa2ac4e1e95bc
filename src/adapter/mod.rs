//! Adapters at the presentation and hardware boundaries.
//!
//! Implements the `port` traits for concrete backends: rendering lifecycle
//! events into outbound chat messages, a loopback device for running
//! without console hardware, and a line-based operator console.

pub mod console;
pub mod device;
pub mod notifier;
