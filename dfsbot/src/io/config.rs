//! Agent configuration, optionally loaded from a TOML file.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

/// What to do with a `bot`/`wall` line whose fields do not parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    /// Stop the session with a parse error.
    #[default]
    Fatal,
    /// Log the line and keep going.
    Skip,
}

/// Agent configuration (TOML). Missing fields take their defaults; unknown
/// keys are rejected.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct BotConfig {
    /// Name sent in the `himynameis` handshake.
    pub name: String,

    /// Pause after the handshake so the first sensor batch can arrive.
    pub startup_grace_ms: u64,

    /// Sleep at the end of every tick.
    pub tick_interval_ms: u64,

    pub on_malformed: MalformedPolicy,

    /// Capacity of the queue between the stdin reader thread and the tick loop.
    pub queue_capacity: usize,

    /// Stop after this many ticks. Unset runs until terminated.
    pub max_ticks: Option<u64>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: "DFSBot".to_string(),
            startup_grace_ms: 250,
            tick_interval_ms: 125,
            on_malformed: MalformedPolicy::Fatal,
            queue_capacity: 1024,
            max_ticks: None,
        }
    }
}

impl BotConfig {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(anyhow!("name must be non-empty"));
        }
        if self.name.chars().any(char::is_whitespace) {
            return Err(anyhow!("name must not contain whitespace"));
        }
        if self.tick_interval_ms == 0 {
            return Err(anyhow!("tick_interval_ms must be > 0"));
        }
        if self.queue_capacity == 0 {
            return Err(anyhow!("queue_capacity must be > 0"));
        }
        Ok(())
    }

    pub fn startup_grace(&self) -> Duration {
        Duration::from_millis(self.startup_grace_ms)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

/// Load and validate config from a TOML file. A missing file means defaults.
pub fn load_config(path: &Path) -> Result<BotConfig> {
    let cfg = match fs::read_to_string(path) {
        Ok(contents) => toml::from_str::<BotConfig>(&contents)
            .with_context(|| format!("parse {}", path.display()))?,
        Err(err) if err.kind() == ErrorKind::NotFound => BotConfig::default(),
        Err(err) => return Err(err).with_context(|| format!("read {}", path.display())),
    };
    cfg.validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}
