use super::{AiError, AiState};
use crate::action::Command;
use crate::config::GameConfig;
use crate::env::{GameEnv, RollContext, Topology};
use crate::state::{Direction, EntityId, GameState, Position};

impl AiState {
    /// Chooses the next command for `actor`.
    ///
    /// Overrides count down here: after exactly `turns` activations the
    /// displaced state is back in place. An override found already at zero is
    /// restored first and the restored state decides instead.
    ///
    /// # Errors
    ///
    /// `PlayerControlled` for [`AiState::PlayerProxy`]; oracle errors when the
    /// map or pathfinder is missing from `env`.
    pub fn decide(
        &mut self,
        actor: EntityId,
        state: &GameState,
        env: &GameEnv<'_>,
        config: &GameConfig,
        rolls: &mut RollContext<'_>,
    ) -> Result<Command, AiError> {
        if self.override_turns() == Some(0) {
            self.restore();
            return self.decide(actor, state, env, config, rolls);
        }

        let command = match self {
            AiState::Stationary => Command::wait(actor),
            AiState::Approach { path } => {
                chase(actor, path, Topology::EightWay, state, env, config)?
            }
            AiState::GridMove { path } => {
                chase(actor, path, Topology::FourWay, state, env, config)?
            }
            AiState::Confused { .. } => {
                let direction = rolls
                    .choose(&Direction::ALL)
                    .copied()
                    .unwrap_or(Direction::Here);
                tracing::trace!(%actor, ?direction, "confused actor stumbles");
                Command::bump(actor, direction)
            }
            AiState::Paralyzed { .. } => Command::wait(actor),
            AiState::PlayerProxy => return Err(AiError::PlayerControlled(actor)),
        };

        self.tick_override();
        Ok(command)
    }
}

/// Attack the player when adjacent, otherwise step along a fresh path.
///
/// Only runs while the actor stands in the player's field of view; a hidden
/// monster waits instead of stockpiling moves.
fn chase(
    actor_id: EntityId,
    path: &mut Vec<Position>,
    topology: Topology,
    state: &GameState,
    env: &GameEnv<'_>,
    config: &GameConfig,
) -> Result<Command, AiError> {
    let wait = Command::wait(actor_id);
    let actor = state
        .entities
        .actor(actor_id)
        .ok_or(AiError::ActorNotFound(actor_id))?;
    let Some(target) = state.player().filter(|player| player.is_alive()) else {
        return Ok(wait);
    };
    if !state.world.is_visible(actor.position) {
        return Ok(wait);
    }

    if topology.distance(actor.position, target.position) <= 1 {
        let direction = actor.position.direction_to(target.position);
        return Ok(Command::attack(actor_id, direction));
    }

    let map = env.map()?;
    let grid = state.cost_grid(map, config);
    *path = env
        .path()?
        .find_path(&grid, actor.position, target.position, topology);
    if path.is_empty() {
        return Ok(wait);
    }

    let next = path.remove(0);
    let step = Direction::from_delta(next.x - actor.position.x, next.y - actor.position.y);
    match step {
        Some(direction) if direction != Direction::Here => Ok(Command::move_to(actor_id, direction)),
        _ => {
            tracing::debug!(%actor_id, %next, "path step is not adjacent; waiting");
            path.clear();
            Ok(wait)
        }
    }
}
