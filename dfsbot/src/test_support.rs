//! Test-only helpers: a scripted arena simulator and controllable input streams.

use std::io::{self, Read, Write};
use std::sync::mpsc::{Receiver, Sender, channel};

use anyhow::Result;

use crate::core::planner::PlanStep;
use crate::core::types::{Cell, DIRECTIONS, Position, Wall};
use crate::core::world::{ARENA_SIZE, WorldModel};
use crate::io::config::MalformedPolicy;
use crate::step::AgentState;

/// Blocking `Read` fed chunk by chunk from a channel. EOF once the sender drops.
pub struct ChunkedInput {
    rx: Receiver<Vec<u8>>,
    chunk: Vec<u8>,
    pos: usize,
}

impl ChunkedInput {
    pub fn channel() -> (Sender<Vec<u8>>, Self) {
        let (tx, rx) = channel();
        (
            tx,
            Self {
                rx,
                chunk: Vec::new(),
                pos: 0,
            },
        )
    }
}

impl Read for ChunkedInput {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        while self.pos >= self.chunk.len() {
            match self.rx.recv() {
                Ok(chunk) => {
                    self.chunk = chunk;
                    self.pos = 0;
                }
                Err(_) => return Ok(0),
            }
        }
        let n = buf.len().min(self.chunk.len() - self.pos);
        buf[..n].copy_from_slice(&self.chunk[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

/// Horizontal walls on every interior row line, leaving a gap that alternates
/// between the right and left edge. Every cell stays reachable.
pub fn serpentine_walls() -> Vec<Wall> {
    let mut walls = Vec::new();
    for y in 1..ARENA_SIZE {
        let gap = if y % 2 == 1 { ARENA_SIZE - 1 } else { 0 };
        for x in (0..ARENA_SIZE).filter(|&x| x != gap) {
            walls.push(Wall::new(x, y, x + 1, y));
        }
    }
    walls
}

/// Cells and targets observed while driving an agent through a [`SimArena`].
#[derive(Debug, Default)]
pub struct DriveReport {
    pub ticks: u64,
    /// Every cell pushed onto the plan, in order.
    pub pushed: Vec<Cell>,
}

impl DriveReport {
    /// True if no cell was pushed more than once.
    pub fn pushed_once(&self) -> bool {
        let mut sorted = self.pushed.clone();
        sorted.sort();
        sorted.windows(2).all(|pair| pair[0] != pair[1])
    }
}

/// Simulated arena whose agent teleports to the center of each adjacent target.
///
/// Each observation reports the exact center position and the walls around the
/// current cell, formatted the way the simulator prints them.
#[derive(Debug, Clone)]
pub struct SimArena {
    truth: WorldModel,
    at: Cell,
}

impl SimArena {
    /// Arena with only the boundary walls.
    pub fn open(start: Cell) -> Self {
        Self::with_walls(start, &[])
    }

    pub fn with_walls(start: Cell, walls: &[Wall]) -> Self {
        let mut truth = WorldModel::new();
        for wall in walls {
            truth.record_wall(*wall);
        }
        Self { truth, at: start }
    }

    pub fn at(&self) -> Cell {
        self.at
    }

    pub fn observe(&self) -> Vec<String> {
        let Position { x, y } = self.at.center();
        let mut lines = vec![format!("bot {x:.6} {y:.6} 0")];
        for dir in DIRECTIONS {
            let next = self.at.neighbor(dir);
            if !self.truth.is_blocked(self.at, next) {
                continue;
            }
            if let Some(wall) = Wall::between(self.at, next) {
                let ((x0, y0), (x1, y1)) = wall.endpoints();
                lines.push(format!(
                    "wall {:.6} {:.6} {:.6} {:.6}",
                    f64::from(x0),
                    f64::from(y0),
                    f64::from(x1),
                    f64::from(y1)
                ));
            }
        }
        lines
    }

    /// Move to `target` if it is adjacent and not walled off. Returns whether it moved.
    pub fn steer(&mut self, target: Cell) -> bool {
        if self.at.is_adjacent(target) && !self.truth.is_blocked(self.at, target) {
            self.at = target;
            return true;
        }
        false
    }

    /// Run the agent tick by tick until its plan is exhausted or `max_ticks` pass.
    pub fn drive(&mut self, state: &mut AgentState, max_ticks: u64) -> Result<DriveReport> {
        let mut report = DriveReport::default();
        while report.ticks < max_ticks && !state.planner.is_exhausted() {
            let frame = self.observe();
            let outcome = state.tick(frame.as_slice(), MalformedPolicy::Fatal)?;
            report.ticks += 1;
            if let Some(PlanStep::Advance(cell)) = outcome.step {
                report.pushed.push(cell);
            }
            if let Some(target) = outcome.target() {
                self.steer(target);
            }
        }
        Ok(report)
    }
}

/// Output sink that closes the loop between a running session and a [`SimArena`].
///
/// `toward` commands steer the arena; every heartbeat (and the handshake)
/// sends a fresh observation frame back through the input channel.
pub struct SimLink {
    pub arena: SimArena,
    tx: Sender<Vec<u8>>,
    buf: Vec<u8>,
    pub transcript: Vec<String>,
}

impl SimLink {
    pub fn new(arena: SimArena, tx: Sender<Vec<u8>>) -> Self {
        Self {
            arena,
            tx,
            buf: Vec::new(),
            transcript: Vec::new(),
        }
    }

    fn handle_line(&mut self, line: String) -> io::Result<()> {
        if let Some(rest) = line.strip_prefix("toward ") {
            let mut fields = rest.split_whitespace().map(str::parse::<f64>);
            if let (Some(Ok(x)), Some(Ok(y))) = (fields.next(), fields.next()) {
                self.arena.steer(Cell::containing(Position::new(x, y)));
            }
        } else if line.is_empty() || line.starts_with("himynameis ") {
            let mut frame = self.arena.observe().join("\n");
            frame.push_str("\n\n");
            self.tx
                .send(frame.into_bytes())
                .map_err(|_| io::Error::from(io::ErrorKind::BrokenPipe))?;
        }
        self.transcript.push(line);
        Ok(())
    }
}

impl Write for SimLink {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        while let Some(end) = self.buf.iter().position(|&b| b == b'\n') {
            let raw: Vec<u8> = self.buf.drain(..=end).collect();
            let line = String::from_utf8_lossy(&raw[..end]).into_owned();
            self.handle_line(line)?;
        }
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
