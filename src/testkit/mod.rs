//! Test fixtures shared by unit and integration tests.
//!
//! Compiled into the crate for `#[cfg(test)]` and exported behind the
//! `testkit` feature so integration tests and downstream crates can build
//! realistic entries without touching private constructors.

pub mod device;
pub mod domain;
pub mod sink;
