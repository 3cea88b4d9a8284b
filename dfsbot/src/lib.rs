//! Depth-first maze exploration agent for a line-protocol arena simulator.
//!
//! The agent reads position and wall observations on stdin, keeps a growing
//! wall map of a fixed 11x11 arena, and steers cell by cell so that every
//! reachable cell is visited, backtracking along its DFS stack when a cell has
//! no unexplored open neighbor.
//!
//! - **[`core`]**: Pure, deterministic logic (world model, arrival tracking,
//!   planner, observation parsing). No I/O, fully testable in isolation.
//! - **[`io`]**: Config files, the non-blocking stdin reader, and the command
//!   emitter.
//!
//! [`step`] applies one tick's observations to the [`step::AgentState`];
//! [`session`] runs the fixed-cadence loop around it.

pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod session;
pub mod step;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
