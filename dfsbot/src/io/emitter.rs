//! Steering commands and heartbeats on the output channel.

use std::io::Write;

use anyhow::{Context, Result};
use tracing::debug;

use crate::core::types::Cell;

pub struct CommandEmitter<W: Write> {
    out: W,
}

impl<W: Write> CommandEmitter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Identification line, flushed immediately.
    pub fn handshake(&mut self, name: &str) -> Result<()> {
        writeln!(self.out, "himynameis {name}").context("write handshake")?;
        self.out.flush().context("flush handshake")
    }

    /// Steer toward the center of `cell`.
    pub fn toward(&mut self, cell: Cell) -> Result<()> {
        let center = cell.center();
        debug!(target_cell = %cell, "steering");
        writeln!(self.out, "toward {} {}", center.x, center.y).context("write toward command")
    }

    /// Blank line written every tick; flushes everything written this tick.
    pub fn heartbeat(&mut self) -> Result<()> {
        writeln!(self.out).context("write heartbeat")?;
        self.out.flush().context("flush output")
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
