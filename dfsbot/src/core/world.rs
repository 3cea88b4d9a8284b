//! Incrementally discovered wall map.

use std::collections::HashSet;

use crate::core::types::{Cell, Wall};

/// Side length of the arena in cells.
pub const ARENA_SIZE: i32 = 11;

/// True if `cell` lies inside the arena.
pub fn in_arena(cell: Cell) -> bool {
    (0..ARENA_SIZE).contains(&cell.col) && (0..ARENA_SIZE).contains(&cell.row)
}

/// Known walls for the session. Walls are only ever added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldModel {
    walls: HashSet<Wall>,
}

impl Default for WorldModel {
    fn default() -> Self {
        Self::new()
    }
}

impl WorldModel {
    /// World seeded with the enclosing boundary of the `ARENA_SIZE` square.
    pub fn new() -> Self {
        let mut world = Self::empty();
        for i in 0..ARENA_SIZE {
            world.record_wall(Wall::new(i, 0, i + 1, 0));
            world.record_wall(Wall::new(i, ARENA_SIZE, i + 1, ARENA_SIZE));
            world.record_wall(Wall::new(0, i, 0, i + 1));
            world.record_wall(Wall::new(ARENA_SIZE, i, ARENA_SIZE, i + 1));
        }
        world
    }

    /// World with no walls at all, not even the boundary.
    pub fn empty() -> Self {
        Self {
            walls: HashSet::new(),
        }
    }

    /// Record a wall. Returns true if any unit edge was not known before.
    ///
    /// Long segments are split only where they cross the arena grid.
    pub fn record_wall(&mut self, wall: Wall) -> bool {
        let mut added = false;
        for edge in wall.unit_edges(ARENA_SIZE) {
            added |= self.walls.insert(edge);
        }
        added
    }

    /// True if the edge separating adjacent cells `a` and `b` is a known wall.
    pub fn is_blocked(&self, a: Cell, b: Cell) -> bool {
        Wall::between(a, b).is_some_and(|edge| self.walls.contains(&edge))
    }

    pub fn wall_count(&self) -> usize {
        self.walls.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{DIRECTIONS, Direction};

    #[test]
    fn boundary_blocks_every_exit_from_the_arena() {
        let world = WorldModel::new();
        assert_eq!(world.wall_count(), 4 * ARENA_SIZE as usize);
        for i in 0..ARENA_SIZE {
            assert!(world.is_blocked(Cell::new(i, 0), Cell::new(i, -1)));
            assert!(world.is_blocked(Cell::new(i, ARENA_SIZE - 1), Cell::new(i, ARENA_SIZE)));
            assert!(world.is_blocked(Cell::new(0, i), Cell::new(-1, i)));
            assert!(world.is_blocked(Cell::new(ARENA_SIZE - 1, i), Cell::new(ARENA_SIZE, i)));
        }
    }

    #[test]
    fn interior_is_open_initially() {
        let world = WorldModel::new();
        let c = Cell::new(5, 5);
        for dir in DIRECTIONS {
            assert!(!world.is_blocked(c, c.neighbor(dir)));
        }
    }

    #[test]
    fn recorded_wall_blocks_both_ways_and_is_idempotent() {
        let mut world = WorldModel::new();
        let a = Cell::new(2, 2);
        let b = a.neighbor(Direction::Down);
        let edge = Wall::between(a, b).expect("adjacent");

        assert!(world.record_wall(edge));
        assert!(world.is_blocked(a, b));
        assert!(world.is_blocked(b, a));

        let before = world.clone();
        assert!(!world.record_wall(edge));
        assert_eq!(world, before);
        assert!(world.is_blocked(a, b));
    }

    #[test]
    fn reversed_report_blocks_same_edge() {
        let mut world = WorldModel::new();
        // Right edge of (3,3) reported bottom-to-top.
        world.record_wall(Wall::new(4, 4, 4, 3));
        assert!(world.is_blocked(Cell::new(3, 3), Cell::new(4, 3)));
    }

    #[test]
    fn long_segment_blocks_every_covered_edge() {
        let mut world = WorldModel::new();
        world.record_wall(Wall::new(1, 6, 4, 6));
        for col in 1..4 {
            assert!(world.is_blocked(Cell::new(col, 5), Cell::new(col, 6)));
        }
        assert!(!world.is_blocked(Cell::new(4, 5), Cell::new(4, 6)));
    }

    #[test]
    fn huge_segment_only_adds_arena_edges() {
        let mut world = WorldModel::new();
        let before = world.wall_count();
        world.record_wall(Wall::new(i32::MIN, 5, i32::MAX, 5));
        assert_eq!(world.wall_count(), before + ARENA_SIZE as usize);
        for col in 0..ARENA_SIZE {
            assert!(world.is_blocked(Cell::new(col, 4), Cell::new(col, 5)));
        }

        // Already-known boundary edges: nothing new to add.
        assert!(!world.record_wall(Wall::new(-3_000_000, 0, 3_000_000, 0)));
    }

    #[test]
    fn off_arena_segment_is_stored_once() {
        let mut world = WorldModel::new();
        let before = world.wall_count();
        assert!(world.record_wall(Wall::new(0, 50, 50_000_000, 50)));
        assert_eq!(world.wall_count(), before + 1);
        assert!(!world.is_blocked(Cell::new(0, 49), Cell::new(0, 50)));
    }

    #[test]
    fn in_arena_covers_exactly_the_grid() {
        assert!(in_arena(Cell::new(0, 0)));
        assert!(in_arena(Cell::new(ARENA_SIZE - 1, ARENA_SIZE - 1)));
        assert!(!in_arena(Cell::new(-1, 3)));
        assert!(!in_arena(Cell::new(3, ARENA_SIZE)));
        assert!(!in_arena(Cell::new(i32::MAX, i32::MAX)));
    }

    #[test]
    fn non_adjacent_query_is_never_blocked() {
        let world = WorldModel::new();
        assert!(!world.is_blocked(Cell::new(0, 0), Cell::new(-1, -1)));
    }
}
