//! Depth-first exploration over a lazily discovered grid.
//!
//! The planner keeps the DFS stack (`plan`) from the start cell to the current
//! frontier. Each time the agent settles on the top of the stack, the planner
//! either pushes the first viable neighbor (in [`DIRECTIONS`] order) or marks
//! the top dead and pops it.

use std::collections::HashSet;

use crate::core::types::{Cell, DIRECTIONS};
use crate::core::world::WorldModel;

/// Result of a single planning transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanStep {
    /// A new frontier cell was pushed.
    Advance(Cell),
    /// The top was dead; steer back to the previous cell on the path.
    Backtrack { dead: Cell, target: Cell },
    /// The start cell itself was dead; nothing left to explore.
    Exhausted { dead: Cell },
}

impl PlanStep {
    /// Cell the agent should now steer toward, if any.
    pub fn target(self) -> Option<Cell> {
        match self {
            PlanStep::Advance(cell) => Some(cell),
            PlanStep::Backtrack { target, .. } => Some(target),
            PlanStep::Exhausted { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExplorationPlanner {
    plan: Vec<Cell>,
    seen: HashSet<Cell>,
    dead: HashSet<Cell>,
}

impl ExplorationPlanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the stack with the start cell. No-op once the plan is non-empty.
    pub fn seed(&mut self, start: Cell) {
        if self.plan.is_empty() {
            self.plan.push(start);
        }
    }

    pub fn plan(&self) -> &[Cell] {
        &self.plan
    }

    pub fn top(&self) -> Option<Cell> {
        self.plan.last().copied()
    }

    pub fn seen(&self) -> &HashSet<Cell> {
        &self.seen
    }

    pub fn dead(&self) -> &HashSet<Cell> {
        &self.dead
    }

    /// True once the stack has been emptied by backtracking past the start.
    pub fn is_exhausted(&self) -> bool {
        self.plan.is_empty() && !self.dead.is_empty()
    }

    /// Advance the DFS if the agent has settled on the top of the plan.
    ///
    /// Returns `None` when `current` is not the plan top (including when the
    /// plan is empty).
    pub fn on_arrival(&mut self, current: Cell, world: &WorldModel) -> Option<PlanStep> {
        if self.top() != Some(current) {
            return None;
        }
        self.seen.insert(current);

        let next = DIRECTIONS
            .iter()
            .map(|&dir| current.neighbor(dir))
            .find(|&cell| self.is_viable(current, cell, world));

        let step = match next {
            Some(cell) => {
                self.plan.push(cell);
                PlanStep::Advance(cell)
            }
            None => {
                self.dead.insert(current);
                self.plan.pop();
                match self.top() {
                    Some(target) => PlanStep::Backtrack {
                        dead: current,
                        target,
                    },
                    None => PlanStep::Exhausted { dead: current },
                }
            }
        };
        Some(step)
    }

    fn is_viable(&self, from: Cell, to: Cell, world: &WorldModel) -> bool {
        !self.seen.contains(&to) && !self.dead.contains(&to) && !world.is_blocked(from, to)
    }
}
