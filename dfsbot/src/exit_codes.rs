//! Stable exit codes for the `dfsbot` binary.

/// The session reached its configured tick limit.
pub const OK: i32 = 0;
/// I/O failure on either channel, invalid configuration, or any other error.
pub const FAILURE: i32 = 1;
/// A `bot` or `wall` observation had malformed fields under the `fatal` policy.
///
/// Distinct from 2, which `clap` uses for usage errors.
pub const MALFORMED_INPUT: i32 = 3;
