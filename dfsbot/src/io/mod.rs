//! Side-effecting edges of the agent: config files, input intake, output commands.

pub mod config;
pub mod emitter;
pub mod reader;
