//! Deterministic, pure logic for plan construction.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! data structures and return deterministic outputs suitable for tests.

pub mod augment;
pub mod builder;
pub mod invariants;
pub mod method;
pub mod outline;
pub mod query;
pub mod scenario;
pub mod settings;
