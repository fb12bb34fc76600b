//! Energy-based turn scheduling.

use std::sync::Arc;

use super::hook::{EndOfTurnHook, HookContext, default_hooks, sorted};
use super::{ChainFailure, Dispatcher, EngineError};
use crate::action::Command;
use crate::ai::AiState;
use crate::config::GameConfig;
use crate::env::{GameEnv, MessageSink, RollContext};
use crate::state::{EntityId, FloorChange, GameState};

/// What one call to [`TurnEngine::submit`] did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TurnReport {
    /// World ticks run before the player could act again.
    pub ticks: u32,
    /// Whether the player's energy was spent on this input.
    pub consumed_turn: bool,
    /// Why the player's chain stopped early, if it did.
    pub failure: Option<ChainFailure>,
    /// Staircase taken by the player; the host must load the new floor.
    pub floor_change: Option<FloorChange>,
    pub player_dead: bool,
    pub recomputed_fov: bool,
}

/// Drives the player's commands and the world ticks they pay for.
///
/// The engine owns no game state. Every call receives the state, the
/// collaborators and the message sink from the host, so a session can swap
/// floors or oracles between inputs.
pub struct TurnEngine {
    config: GameConfig,
    hooks: Arc<[Arc<dyn EndOfTurnHook>]>,
}

impl TurnEngine {
    /// Creates an engine running the default end-of-turn hooks.
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            hooks: default_hooks(),
        }
    }

    /// Creates an engine with a custom hook set, ordered by priority.
    pub fn with_hooks(config: GameConfig, hooks: Vec<Arc<dyn EndOfTurnHook>>) -> Self {
        Self {
            config,
            hooks: sorted(hooks),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn hooks(&self) -> &[Arc<dyn EndOfTurnHook>] {
        &self.hooks
    }

    /// Prepares a fresh floor: the player can act and sees its surroundings.
    ///
    /// # Errors
    ///
    /// `PlayerNotFound` without a player; oracle errors when vision is missing.
    pub fn start(&self, state: &mut GameState, env: GameEnv<'_>) -> Result<(), EngineError> {
        let player = state
            .entities
            .player_mut()
            .ok_or(EngineError::PlayerNotFound)?;
        player.energy.energy = player.energy.energy.max(player.energy.threshold);
        state.turn.recompute_fov = true;
        self.refresh_fov(state, &env)?;
        tracing::debug!(depth = state.world.depth, "floor started");
        Ok(())
    }

    /// Resolves one player input and every world tick it pays for.
    ///
    /// A chain refused at any step costs nothing unless `charge_failed_commands`
    /// is set, and its reason goes to `sink`. Taking the stairs stops right
    /// after the player's chain so the host can swap floors.
    ///
    /// # Errors
    ///
    /// `GameOver` once the player is dead, `NotPlayerCommand` for monster
    /// commands, `PlayerCannotAct` when the player never regains energy, and
    /// any internal error raised while resolving commands.
    pub fn submit(
        &self,
        state: &mut GameState,
        env: GameEnv<'_>,
        sink: &mut dyn MessageSink,
        command: Command,
    ) -> Result<TurnReport, EngineError> {
        let player = state.player().ok_or(EngineError::PlayerNotFound)?;
        if !player.is_alive() {
            return Err(EngineError::GameOver);
        }
        if !command.actor().is_player() {
            return Err(EngineError::NotPlayerCommand {
                actor: command.actor(),
            });
        }
        let command = if player.ai.as_ref().is_some_and(AiState::is_paralyzed) {
            sink.add_message("You can't move!");
            Command::wait(EntityId::PLAYER)
        } else {
            command
        };

        let mut report = TurnReport::default();
        let nonce = state.turn.nonce;
        let chain = Dispatcher::new(env, &self.config).dispatch(state, sink, command)?;
        if let Some(failure) = &chain.failure {
            sink.add_message(&failure.error.to_string());
        }
        report.consumed_turn = chain.succeeded() || self.config.charge_failed_commands;
        report.failure = chain.failure;
        if !report.consumed_turn {
            // a free refusal leaves the roll stream untouched
            state.turn.nonce = nonce;
        }

        if report.consumed_turn {
            if let Some(player) = state.entities.player_mut() {
                player.energy.burn_turn();
            }
        }

        if let Some(change) = state.world.pending_floor.take() {
            tracing::info!(from = change.from_depth, to = change.to_depth, "floor change requested");
            report.floor_change = Some(change);
            return Ok(report);
        }
        report.recomputed_fov = self.refresh_fov(state, &env)?;

        while Self::player_waiting(state) {
            if report.ticks >= self.config.max_catchup_ticks {
                return Err(EngineError::PlayerCannotAct {
                    ticks: report.ticks,
                });
            }
            report.recomputed_fov |= self.world_tick(state, env, sink)?;
            report.ticks += 1;
        }

        report.player_dead = !state.is_player_alive();
        Ok(report)
    }

    /// Runs one world tick: refill, monster turns, end-of-turn hooks, FOV.
    ///
    /// Returns whether the field of view was recomputed.
    pub fn world_tick(
        &self,
        state: &mut GameState,
        env: GameEnv<'_>,
        sink: &mut dyn MessageSink,
    ) -> Result<bool, EngineError> {
        state.turn.turn += 1;
        let span = tracing::debug_span!("tick", turn = state.turn.turn);
        let _guard = span.enter();

        for id in state.entities.living_actor_ids() {
            if let Some(actor) = state.entities.actor_mut(id) {
                actor.energy.add_energy();
            }
        }

        let mut dispatcher = Dispatcher::new(env, &self.config);
        for id in state.entities.living_actor_ids() {
            if id.is_player() {
                continue;
            }
            self.activate(state, env, &mut dispatcher, sink, id)?;
            if !state.is_player_alive() {
                tracing::debug!(%id, "player died; remaining monsters skip this tick");
                break;
            }
        }

        self.run_hooks(state, env, sink)?;
        self.refresh_fov(state, &env)
    }

    /// Recomputes the player's field of view if a command asked for it.
    pub fn refresh_fov(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<bool, EngineError> {
        if !state.turn.recompute_fov {
            return Ok(false);
        }
        let Some(origin) = state.player().map(|player| player.position) else {
            return Ok(false);
        };
        let map = env.map()?;
        let grid = state.transparency_grid(map);
        state.world.visible = env
            .vision()?
            .compute_visible(&grid, origin, self.config.fov_radius);
        state.turn.recompute_fov = false;
        Ok(true)
    }

    /// Lets one monster spend all of its energy.
    fn activate(
        &self,
        state: &mut GameState,
        env: GameEnv<'_>,
        dispatcher: &mut Dispatcher<'_>,
        sink: &mut dyn MessageSink,
        id: EntityId,
    ) -> Result<(), EngineError> {
        let rng = env.rng()?;
        loop {
            let Some(actor) = state.entities.actor_mut(id) else {
                return Ok(());
            };
            if !actor.is_alive() || actor.ai.is_none() || !actor.energy.burn_turn() {
                return Ok(());
            }
            let Some(mut ai) = actor.ai.take() else {
                return Ok(());
            };

            let nonce = state.turn.nonce;
            state.turn.nonce += 1;
            let mut rolls = RollContext::new(rng, state.game_seed, nonce, id);
            let decision = ai.decide(id, state, &env, &self.config, &mut rolls);
            if let Some(actor) = state.entities.actor_mut(id) {
                actor.ai = Some(ai);
            }
            let command = decision?;

            let chain = dispatcher.dispatch(state, sink, command)?;
            if let Some(failure) = chain.failure {
                tracing::debug!(
                    %id,
                    command = failure.command,
                    reason = %failure.error,
                    "monster command refused"
                );
            }
        }
    }

    fn run_hooks(
        &self,
        state: &mut GameState,
        env: GameEnv<'_>,
        sink: &mut dyn MessageSink,
    ) -> Result<(), EngineError> {
        let rng = env.rng()?;
        for hook in self.hooks.iter() {
            let nonce = state.turn.nonce;
            state.turn.nonce += 1;
            let mut ctx = HookContext {
                env,
                config: &self.config,
                rolls: RollContext::new(rng, state.game_seed, nonce, EntityId::PLAYER),
                sink: &mut *sink,
            };
            tracing::trace!(hook = hook.name(), "running end-of-turn hook");
            hook.apply(state, &mut ctx)?;
        }
        Ok(())
    }

    fn player_waiting(state: &GameState) -> bool {
        state
            .player()
            .is_some_and(|player| player.is_alive() && player.energy.burned_out())
    }
}
