//! Deterministic, pure logic for the exploration agent.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! data structures and return deterministic outputs suitable for tests.

pub mod observation;
pub mod planner;
pub mod tracker;
pub mod types;
pub mod world;
