//! DFS exploration agent.
//!
//! Speaks the arena simulator's line protocol on stdin/stdout: announces itself
//! with `himynameis <name>`, then every tick drains observations, advances the
//! depth-first plan, writes an optional `toward <x> <y>` and a blank heartbeat.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use dfsbot::core::observation::MalformedObservation;
use dfsbot::exit_codes;
use dfsbot::io::config::{BotConfig, MalformedPolicy, load_config};
use dfsbot::logging;
use dfsbot::session::run_session;

#[derive(Parser)]
#[command(
    name = "dfsbot",
    version,
    about = "Depth-first maze exploration agent"
)]
struct Cli {
    /// TOML config file. Missing file means defaults.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Name announced in the handshake.
    #[arg(long)]
    name: Option<String>,
    /// Poll interval in milliseconds.
    #[arg(long)]
    tick_ms: Option<u64>,
    /// Pause after the handshake, in milliseconds.
    #[arg(long)]
    startup_ms: Option<u64>,
    /// How to handle malformed `bot`/`wall` lines.
    #[arg(long, value_enum)]
    on_malformed: Option<MalformedPolicy>,
    /// Exit after this many ticks.
    #[arg(long)]
    max_ticks: Option<u64>,
}

impl Cli {
    /// Load the config file (if any) and apply command-line overrides.
    fn resolve_config(&self) -> Result<BotConfig> {
        let mut cfg = match &self.config {
            Some(path) => load_config(path)?,
            None => BotConfig::default(),
        };
        if let Some(name) = &self.name {
            cfg.name = name.clone();
        }
        if let Some(tick_ms) = self.tick_ms {
            cfg.tick_interval_ms = tick_ms;
        }
        if let Some(startup_ms) = self.startup_ms {
            cfg.startup_grace_ms = startup_ms;
        }
        if let Some(policy) = self.on_malformed {
            cfg.on_malformed = policy;
        }
        if self.max_ticks.is_some() {
            cfg.max_ticks = self.max_ticks;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

fn main() {
    if let Err(err) = logging::init() {
        eprintln!("{err:#}");
    }
    if let Err(err) = run() {
        if let Some(malformed) = err.downcast_ref::<MalformedObservation>() {
            eprintln!("fatal parse error: {malformed}");
            std::process::exit(exit_codes::MALFORMED_INPUT);
        }
        eprintln!("{:#}", err);
        std::process::exit(exit_codes::FAILURE);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let cfg = cli.resolve_config()?;
    let stdout = std::io::stdout();
    run_session(std::io::stdin(), stdout.lock(), &cfg, |_, _| {})?;
    Ok(())
}
