//! Diagnostics for the agent.
//!
//! Stdout carries the simulator protocol, so every diagnostic goes to stderr.
//! Lines are tagged with the thread name to tell the tick loop apart from the
//! `observation-reader` thread.

use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "warn";

/// Build the filter from `RUST_LOG`, falling back to [`DEFAULT_FILTER`].
fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber.
///
/// ```bash
/// RUST_LOG=dfsbot=debug dfsbot --config dfsbot.toml
/// ```
pub fn init() -> Result<()> {
    tracing_subscriber::registry()
        .with(filter())
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .with_target(false)
                .with_thread_names(true)
                .compact(),
        )
        .try_init()
        .map_err(|err| anyhow!("install tracing subscriber: {err}"))
}

