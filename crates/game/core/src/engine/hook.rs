//! End-of-turn hooks that run once per world tick, after every actor has spent
//! its energy.
//!
//! Hooks mutate the game state directly and may narrate through the message
//! sink. They run in priority order (lower values first).

use std::sync::Arc;

use super::EngineError;
use crate::config::GameConfig;
use crate::env::{GameEnv, MessageSink, OracleError, RollContext, pick_weighted, total_weight};
use crate::state::{GameState, Position};

/// Everything a hook may consult while it runs.
pub struct HookContext<'a> {
    pub env: GameEnv<'a>,
    pub config: &'a GameConfig,
    pub rolls: RollContext<'a>,
    pub sink: &'a mut dyn MessageSink,
}

/// A hook applied at the end of every world tick.
pub trait EndOfTurnHook: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Returns the priority of this hook. Lower values execute first.
    /// Default priority is 0.
    fn priority(&self) -> i32 {
        0
    }

    fn apply(&self, state: &mut GameState, ctx: &mut HookContext<'_>) -> Result<(), EngineError>;
}

/// Counts down the player's confusion/paralysis and every actor's trap hold.
///
/// Monster overrides tick inside their AI instead, one per activation.
#[derive(Debug)]
pub struct TimerHook;

impl EndOfTurnHook for TimerHook {
    fn name(&self) -> &'static str {
        "timers"
    }

    fn priority(&self) -> i32 {
        -10
    }

    fn apply(&self, state: &mut GameState, ctx: &mut HookContext<'_>) -> Result<(), EngineError> {
        if let Some(player) = state.entities.player_mut().filter(|player| player.is_alive()) {
            if let Some(ai) = player.ai.as_mut() {
                let was_paralyzed = ai.is_paralyzed();
                if ai.tick_override() && !ai.is_override() {
                    ctx.sink.add_message(if was_paralyzed {
                        "You can move again."
                    } else {
                        "You feel less confused."
                    });
                }
            }
        }

        for id in state.entities.living_actor_ids() {
            let Some(actor) = state.entities.actor_mut(id) else {
                continue;
            };
            if actor.trapped_turns == 0 {
                continue;
            }
            actor.trapped_turns -= 1;
            if actor.trapped_turns == 0 && actor.is_player() {
                ctx.sink.add_message("You pull free of the bear trap.");
            }
        }
        Ok(())
    }
}

/// Regenerating actors recover one hit point with `regen_chance` percent per tick.
#[derive(Debug)]
pub struct RegenerationHook;

impl EndOfTurnHook for RegenerationHook {
    fn name(&self) -> &'static str {
        "regeneration"
    }

    fn apply(&self, state: &mut GameState, ctx: &mut HookContext<'_>) -> Result<(), EngineError> {
        for id in state.entities.living_actor_ids() {
            let Some(fighter) = state
                .entities
                .actor_mut(id)
                .filter(|actor| actor.regenerates)
                .and_then(|actor| actor.fighter.as_mut())
            else {
                continue;
            };
            if !fighter.is_full_health() && ctx.rolls.percent(ctx.config.regen_chance) {
                fighter.heal(1);
            }
        }
        Ok(())
    }
}

/// With `spawn_chance` per mille, a monster from the depth's spawn table
/// appears on a free tile the player cannot see.
#[derive(Debug)]
pub struct SpawnHook;

impl SpawnHook {
    fn candidate_tiles(state: &GameState, ctx: &HookContext<'_>) -> Result<Vec<Position>, EngineError> {
        let map = ctx.env.map()?;
        Ok(map
            .dimensions()
            .positions()
            .filter(|position| !state.world.is_visible(*position))
            .filter(|position| state.can_enter(map, *position))
            .filter(|position| state.trap_at(*position).is_none())
            .collect())
    }
}

impl EndOfTurnHook for SpawnHook {
    fn name(&self) -> &'static str {
        "spawn"
    }

    fn priority(&self) -> i32 {
        10
    }

    fn apply(&self, state: &mut GameState, ctx: &mut HookContext<'_>) -> Result<(), EngineError> {
        if !ctx.rolls.per_mille(ctx.config.spawn_chance) {
            return Ok(());
        }

        let actors = ctx.env.actors()?;
        let table = actors.spawn_table(state.world.depth);
        let total = total_weight(&table);
        if total == 0 {
            return Ok(());
        }
        let roll = ctx.rolls.range(0, total - 1);
        let Some(entry) = pick_weighted(&table, roll) else {
            return Ok(());
        };
        let template = actors
            .template(&entry.key)
            .ok_or_else(|| OracleError::ActorTemplateNotFound(entry.key.clone()))?;

        let tiles = Self::candidate_tiles(state, ctx)?;
        let Some(&position) = ctx.rolls.choose(&tiles) else {
            tracing::debug!(key = %entry.key, "no free tile out of sight; skipping spawn");
            return Ok(());
        };
        let id = state.spawn_actor(&template, position, ctx.config)?;
        tracing::debug!(%id, key = %entry.key, %position, "monster spawned");
        Ok(())
    }
}

/// Returns the default set of hooks that should run at the end of every tick.
/// Hooks are returned in an Arc for efficient sharing without cloning.
pub fn default_hooks() -> Arc<[Arc<dyn EndOfTurnHook>]> {
    let hooks: Vec<Arc<dyn EndOfTurnHook>> = vec![
        Arc::new(TimerHook),
        Arc::new(RegenerationHook),
        Arc::new(SpawnHook),
    ];
    sorted(hooks)
}

/// Orders `hooks` by priority (lower values first).
pub fn sorted(mut hooks: Vec<Arc<dyn EndOfTurnHook>>) -> Arc<[Arc<dyn EndOfTurnHook>]> {
    hooks.sort_by_key(|hook| hook.priority());
    hooks.into()
}
