//! Linkbot - chat-driven trade queue for console link trading.
//!
//! This crate is the front end for an automated game-trading service. Users
//! request trades through a chat platform; the bot validates each request,
//! queues it, and drives a console-automation device one trade at a time per
//! worker, reporting lifecycle transitions back to the requester.
//!
//! # Architecture
//!
//! The queue core is isolated from every external collaborator by traits:
//!
//! - **`domain`** - Value types: trade entries, codes, routing, batches
//! - **`queue`** - FIFO queues with the admission policy and position/ETA
//!   estimation
//! - **`port`** - Trait boundaries: status sink, payload validator,
//!   automation device
//! - **`service`** - The submit path and the per-device worker loop
//! - **`adapter`** - Message rendering and a loopback device for running
//!   without console hardware
//!
//! The chat platform, game-rule legality, and the console transport are all
//! consumed through ports; the core never names a specific SDK.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use linkbot::config::Config;
//! use linkbot::port::AcceptAllValidator;
//! use linkbot::queue::QueueManager;
//! use linkbot::service::SubmitService;
//!
//! let config = Config::default();
//! let queues = Arc::new(QueueManager::new());
//! let service = SubmitService::new(
//!     queues,
//!     Arc::new(AcceptAllValidator),
//!     config.queue.estimator(),
//! );
//! ```

pub mod adapter;
pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod port;
pub mod queue;
pub mod service;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
