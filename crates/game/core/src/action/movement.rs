//! Directional input: Bump and Move.

use super::{ActionError, Command, CommandContext, CommandTransition, Outcome, living_actor};
use crate::ai::AiState;
use crate::state::{Direction, EntityId, GameState};

/// Ambiguous directional input, resolved into Attack, Wriggle or Move.
///
/// Bump never mutates state and never fails for a living actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BumpCommand {
    pub actor: EntityId,
    pub direction: Direction,
}

impl BumpCommand {
    pub fn new(actor: EntityId, direction: Direction) -> Self {
        Self { actor, direction }
    }
}

impl CommandTransition for BumpCommand {
    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, _ctx: &CommandContext<'_>) -> Result<(), ActionError> {
        living_actor(state, self.actor).map(|_| ())
    }

    fn apply(
        &self,
        state: &mut GameState,
        ctx: &mut CommandContext<'_>,
    ) -> Result<Outcome, ActionError> {
        let actor = living_actor(state, self.actor)?;

        // Confused monsters already stumble inside their AI.
        let mut direction = self.direction;
        if actor.is_player() && matches!(actor.ai, Some(AiState::Confused { .. })) {
            direction = ctx
                .rolls
                .choose(&Direction::COMPASS)
                .copied()
                .unwrap_or(direction);
        }

        let destination = actor.position.step(direction);
        let follow_up = if state.actor_at(destination).is_some() {
            Command::attack(self.actor, direction)
        } else if actor.is_trapped() {
            Command::wriggle(self.actor)
        } else {
            Command::move_to(self.actor, direction)
        };
        Ok(Outcome::new().then(follow_up))
    }
}

/// Step one tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveCommand {
    pub actor: EntityId,
    pub direction: Direction,
}

impl MoveCommand {
    pub fn new(actor: EntityId, direction: Direction) -> Self {
        Self { actor, direction }
    }
}

impl CommandTransition for MoveCommand {
    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, ctx: &CommandContext<'_>) -> Result<(), ActionError> {
        let actor = living_actor(state, self.actor)?;
        let map = ctx.env.map()?;
        let destination = actor.position.step(self.direction);

        if !state.in_bounds(map, destination) {
            return Err(ActionError::OutOfBounds);
        }
        if !state.can_enter(map, destination) {
            return Err(ActionError::Blocked);
        }
        if actor.is_trapped() {
            return Err(ActionError::Trapped);
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut GameState,
        _ctx: &mut CommandContext<'_>,
    ) -> Result<Outcome, ActionError> {
        let actor = state.actor_mut(self.actor)?;
        let destination = actor.position.step(self.direction);
        actor.position = destination;

        let mut outcome = Outcome::new();
        outcome.recompute_fov = self.actor.is_player();
        if state.trap_at(destination).is_some() {
            outcome.follow_up(Command::trigger_trap(self.actor, destination));
        }
        Ok(outcome)
    }
}
