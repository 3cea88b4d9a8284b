//! Arrival hysteresis: continuous position to committed tile.

use crate::core::types::{Cell, Position};
use crate::core::world::in_arena;

/// A tile is committed only once the agent is within this distance of its center.
pub const ARRIVAL_RADIUS: f64 = 0.2;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TileTracker {
    position: Option<Position>,
    current: Option<Cell>,
}

impl TileTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a position update. Returns the newly committed tile, if any.
    ///
    /// Positions outside the arena are recorded but never commit a tile.
    pub fn observe(&mut self, pos: Position) -> Option<Cell> {
        self.position = Some(pos);
        let candidate = Cell::containing(pos);
        if !in_arena(candidate) || self.current == Some(candidate) {
            return None;
        }
        if pos.distance_to(candidate.center()) >= ARRIVAL_RADIUS {
            return None;
        }
        self.current = Some(candidate);
        Some(candidate)
    }

    pub fn position(&self) -> Option<Position> {
        self.position
    }

    /// Last committed tile.
    pub fn current(&self) -> Option<Cell> {
        self.current
    }
}
