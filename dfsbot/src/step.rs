//! Per-tick state update for the exploration agent.

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::core::observation::Observation;
use crate::core::planner::{ExplorationPlanner, PlanStep};
use crate::core::tracker::TileTracker;
use crate::core::types::Cell;
use crate::core::world::WorldModel;
use crate::io::config::MalformedPolicy;

/// Everything the agent knows for the lifetime of a session.
#[derive(Debug, Clone, Default)]
pub struct AgentState {
    pub tracker: TileTracker,
    pub world: WorldModel,
    pub planner: ExplorationPlanner,
    started: bool,
}

/// What a single tick did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    /// Observations applied to position or world.
    pub applied: usize,
    /// Malformed lines dropped under [`MalformedPolicy::Skip`].
    pub skipped: usize,
    /// Tile committed during this tick, if any.
    pub arrival: Option<Cell>,
    /// Planning transition, if the agent was on the plan top.
    pub step: Option<PlanStep>,
}

impl TickOutcome {
    /// Cell to steer toward after this tick.
    pub fn target(&self) -> Option<Cell> {
        self.step.and_then(PlanStep::target)
    }
}

impl AgentState {
    /// Fresh state with the arena boundary known.
    pub fn new() -> Self {
        Self::with_world(WorldModel::new())
    }

    pub fn with_world(world: WorldModel) -> Self {
        Self {
            tracker: TileTracker::new(),
            world,
            planner: ExplorationPlanner::new(),
            started: false,
        }
    }

    /// Apply every line of the batch, then make at most one planning decision.
    pub fn tick<S: AsRef<str>>(
        &mut self,
        lines: &[S],
        policy: MalformedPolicy,
    ) -> Result<TickOutcome> {
        let mut outcome = TickOutcome::default();
        for line in lines {
            let line = line.as_ref();
            let obs = match Observation::parse(line) {
                Ok(Some(obs)) => obs,
                Ok(None) => continue,
                Err(err) => match policy {
                    MalformedPolicy::Fatal => return Err(err.into()),
                    MalformedPolicy::Skip => {
                        warn!(%err, "skipping malformed observation");
                        outcome.skipped += 1;
                        continue;
                    }
                },
            };
            outcome.applied += 1;
            if let Some(cell) = self.apply(obs) {
                outcome.arrival = Some(cell);
            }
        }

        if let Some(current) = self.tracker.current() {
            outcome.step = self.planner.on_arrival(current, &self.world);
        }
        match outcome.step {
            Some(PlanStep::Advance(next)) => {
                info!(seen = self.planner.seen().len(), next = %next, "advancing");
            }
            Some(PlanStep::Backtrack { dead, target }) => {
                info!(dead = %dead, back_to = %target, "backtracking");
            }
            Some(PlanStep::Exhausted { dead }) => {
                info!(
                    dead = %dead,
                    seen = self.planner.seen().len(),
                    "exploration exhausted; idling"
                );
            }
            None => {}
        }
        Ok(outcome)
    }

    /// Apply one observation. Returns a newly committed tile.
    fn apply(&mut self, obs: Observation) -> Option<Cell> {
        match obs {
            Observation::Position(pos) => {
                let cell = self.tracker.observe(pos)?;
                debug!(tile = %cell, "arrived");
                if !self.started {
                    self.planner.seed(cell);
                    self.started = true;
                }
                Some(cell)
            }
            Observation::Wall(wall) => {
                if self.world.record_wall(wall) {
                    debug!(wall = %wall, "wall discovered");
                }
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::observation::MalformedObservation;
    use crate::core::types::Position;
    use crate::core::world::ARENA_SIZE;
    use crate::test_support::SimArena;

    #[test]
    fn first_position_seeds_plan_and_moves_down() {
        let mut state = AgentState::new();
        let outcome = state
            .tick(&["bot 0.5 0.5"], MalformedPolicy::Fatal)
            .expect("tick");

        assert_eq!(outcome.arrival, Some(Cell::new(0, 0)));
        assert_eq!(outcome.target(), Some(Cell::new(0, 1)));
        assert_eq!(state.planner.plan(), &[Cell::new(0, 0), Cell::new(0, 1)]);
    }

    #[test]
    fn walls_in_same_batch_apply_before_planning() {
        let mut state = AgentState::new();
        let outcome = state
            .tick(
                &["bot 0.5 0.5 0", "wall 0 1 1 1", "coin 3 3"],
                MalformedPolicy::Fatal,
            )
            .expect("tick");
        assert_eq!(outcome.applied, 2);
        assert_eq!(outcome.target(), Some(Cell::new(1, 0)));
    }

    #[test]
    fn planning_sees_final_position_of_batch() {
        let mut state = AgentState::new();
        let outcome = state
            .tick(&["bot 0.5 0.5", "bot 0.5 1.5"], MalformedPolicy::Fatal)
            .expect("tick");
        // Plan top was (0,0) when seeded, but the agent is already on (0,1).
        assert_eq!(outcome.arrival, Some(Cell::new(0, 1)));
        assert_eq!(outcome.step, None);
        assert_eq!(state.planner.plan(), &[Cell::new(0, 0)]);
    }

    #[test]
    fn no_position_means_no_plan() {
        let mut state = AgentState::new();
        let outcome = state
            .tick(&["wall 3 3 4 3", ""], MalformedPolicy::Fatal)
            .expect("tick");
        assert_eq!(outcome.step, None);
        assert!(state.planner.plan().is_empty());
        assert_eq!(state.tracker.position(), None);
    }

    #[test]
    fn malformed_line_is_fatal_by_default() {
        let mut state = AgentState::new();
        let err = state
            .tick(&["bot 0.5 nope"], MalformedPolicy::Fatal)
            .expect_err("fatal");
        assert!(err.downcast_ref::<MalformedObservation>().is_some());
    }

    #[test]
    fn malformed_line_can_be_skipped() {
        let mut state = AgentState::new();
        let outcome = state
            .tick(&["wall 1 x 2 2", "bot 0.5 0.5"], MalformedPolicy::Skip)
            .expect("tick");
        assert_eq!(outcome.skipped, 1);
        assert_eq!(outcome.target(), Some(Cell::new(0, 1)));
    }

    #[test]
    fn enclosed_start_idles_without_targets() {
        let mut state = AgentState::new();
        let outcome = state
            .tick(
                &["bot 0.5 0.5", "wall 1 0 1 1", "wall 0 1 1 1"],
                MalformedPolicy::Fatal,
            )
            .expect("tick");
        assert_eq!(
            outcome.step,
            Some(PlanStep::Exhausted {
                dead: Cell::new(0, 0)
            })
        );
        assert_eq!(outcome.target(), None);

        for _ in 0..3 {
            let idle = state
                .tick(&["bot 0.52 0.48"], MalformedPolicy::Fatal)
                .expect("tick");
            assert_eq!(idle.step, None);
        }
        assert!(state.planner.is_exhausted());
    }

    #[test]
    fn exhausted_planner_is_not_reseeded_by_new_tiles() {
        let mut state = AgentState::new();
        state
            .tick(
                &["bot 0.5 0.5", "wall 1 0 1 1", "wall 0 1 1 1"],
                MalformedPolicy::Fatal,
            )
            .expect("tick");
        let outcome = state
            .tick(&["bot 4.5 4.5"], MalformedPolicy::Fatal)
            .expect("tick");
        assert_eq!(outcome.arrival, Some(Cell::new(4, 4)));
        assert_eq!(outcome.step, None);
        assert!(state.planner.plan().is_empty());
    }

    #[test]
    fn extreme_position_is_ignored() {
        let mut state = AgentState::new();
        let outcome = state
            .tick(&["bot 2147483647.5 2147483647.5"], MalformedPolicy::Fatal)
            .expect("tick");
        assert_eq!(outcome.applied, 1);
        assert_eq!(outcome.arrival, None);
        assert_eq!(outcome.step, None);
        assert!(state.planner.plan().is_empty());

        let outcome = state
            .tick(&["bot 0.5 0.5"], MalformedPolicy::Fatal)
            .expect("tick");
        assert_eq!(outcome.target(), Some(Cell::new(0, 1)));
    }

    #[test]
    fn extreme_wall_only_touches_arena_edges() {
        let mut state = AgentState::new();
        let boundary = state.world.wall_count();
        state
            .tick(
                &[
                    "wall -3000000000 0 3000000000 0",
                    "wall 0 0 50000000 0",
                    "wall 3 -1e12 3 1e12",
                ],
                MalformedPolicy::Fatal,
            )
            .expect("tick");
        assert_eq!(state.world.wall_count(), boundary + ARENA_SIZE as usize);
        assert!(state.world.is_blocked(Cell::new(2, 7), Cell::new(3, 7)));
    }

    #[test]
    fn simulated_open_arena_is_fully_covered() {
        let mut arena = SimArena::open(Cell::new(0, 0));
        let mut state = AgentState::new();
        let report = arena.drive(&mut state, 2_000).expect("drive");

        let total = (ARENA_SIZE * ARENA_SIZE) as usize;
        assert!(state.planner.is_exhausted());
        assert_eq!(state.planner.seen().len(), total);
        assert_eq!(report.pushed.len(), total - 1);
        assert!(report.pushed_once());
    }

    #[test]
    fn off_center_position_delays_arrival() {
        let mut state = AgentState::new();
        let off_center = Position::new(0.5, 1.1);
        state.tick(&["bot 0.5 0.5"], MalformedPolicy::Fatal).expect("tick");
        let outcome = state
            .tick(
                &[format!("bot {} {}", off_center.x, off_center.y)],
                MalformedPolicy::Fatal,
            )
            .expect("tick");
        assert_eq!(outcome.step, None);
        let outcome = state
            .tick(&["bot 0.5 1.5"], MalformedPolicy::Fatal)
            .expect("tick");
        assert_eq!(outcome.target(), Some(Cell::new(0, 2)));
        assert!(!state.world.is_blocked(Cell::new(0, 1), Cell::new(0, 2)));
        assert!(state.world.is_blocked(Cell::new(0, 1), Cell::new(-1, 1)));
    }
}
