//! Fixed-cadence session loop: handshake, grace period, then one tick per interval.

use std::io::{Read, Write};
use std::thread;
use std::time::Instant;

use anyhow::Result;
use tracing::{debug, info, instrument};

use crate::io::config::BotConfig;
use crate::io::emitter::CommandEmitter;
use crate::io::reader::ProtocolReader;
use crate::step::{AgentState, TickOutcome};

/// Summary of a session that reached its configured tick limit.
#[derive(Debug, Clone)]
pub struct SessionOutcome {
    pub ticks: u64,
    pub targets_emitted: u64,
    pub state: AgentState,
}

/// Run the agent over `input`/`output` until `config.max_ticks` is reached.
///
/// Without a tick limit this only returns on error: a fatal malformed
/// observation or an I/O failure on either channel. Exhausting the plan is not
/// an error; the loop keeps emitting heartbeats.
#[instrument(skip_all, fields(name = %config.name, tick_ms = config.tick_interval_ms))]
pub fn run_session<R, W, F>(
    input: R,
    output: W,
    config: &BotConfig,
    mut on_tick: F,
) -> Result<SessionOutcome>
where
    R: Read + Send + 'static,
    W: Write,
    F: FnMut(u64, &TickOutcome),
{
    config.validate()?;
    let mut emitter = CommandEmitter::new(output);
    emitter.handshake(&config.name)?;
    let mut reader = ProtocolReader::spawn(input, config.queue_capacity)?;
    thread::sleep(config.startup_grace());
    info!("session started");

    let mut state = AgentState::new();
    let mut ticks = 0u64;
    let mut targets_emitted = 0u64;
    loop {
        let lines = reader.drain(Instant::now())?;
        let outcome = state.tick(lines.as_slice(), config.on_malformed)?;
        if let Some(target) = outcome.target() {
            emitter.toward(target)?;
            targets_emitted += 1;
        }
        emitter.heartbeat()?;
        ticks += 1;
        debug!(tick = ticks, lines = lines.len(), "tick complete");
        on_tick(ticks, &outcome);

        if config.max_ticks.is_some_and(|max| ticks >= max) {
            info!(
                ticks,
                targets_emitted,
                seen = state.planner.seen().len(),
                exhausted = state.planner.is_exhausted(),
                "tick limit reached"
            );
            return Ok(SessionOutcome {
                ticks,
                targets_emitted,
                state,
            });
        }
        thread::sleep(config.tick_interval());
    }
}
