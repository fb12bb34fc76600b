//! Traps: searching for them, springing them, and struggling free.

use super::{ActionError, Command, CommandContext, CommandTransition, Outcome, living_actor};
use crate::ai::AiState;
use crate::combat::{DiceSpec, conjugate};
use crate::state::{Direction, EntityId, GameState, Position, TrapKind};

/// Damage dealt by a dart trap.
const DART_DAMAGE: DiceSpec = DiceSpec::new(1, 4);

/// Reveals hidden traps on the eight surrounding tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchCommand {
    pub actor: EntityId,
}

impl SearchCommand {
    pub fn new(actor: EntityId) -> Self {
        Self { actor }
    }
}

impl CommandTransition for SearchCommand {
    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, _ctx: &CommandContext<'_>) -> Result<(), ActionError> {
        living_actor(state, self.actor).map(|_| ())
    }

    fn apply(
        &self,
        state: &mut GameState,
        _ctx: &mut CommandContext<'_>,
    ) -> Result<Outcome, ActionError> {
        let actor = living_actor(state, self.actor)?;
        let is_player = actor.is_player();
        let origin = actor.position;

        let mut found = Vec::new();
        for direction in Direction::COMPASS {
            if let Some(trap) = state.world.traps.get_mut(&origin.step(direction)) {
                if trap.hidden {
                    trap.hidden = false;
                    found.push(trap.kind);
                }
            }
        }

        let mut outcome = Outcome::new();
        if is_player {
            if found.is_empty() {
                outcome.message("You search the area but find nothing.");
            }
            for kind in found {
                outcome.message(format!("You find a {}!", kind.describe()));
            }
        }
        Ok(outcome)
    }
}

/// Springs the armed trap at `position` on `actor`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TriggerTrapCommand {
    pub actor: EntityId,
    pub position: Position,
}

impl TriggerTrapCommand {
    pub fn new(actor: EntityId, position: Position) -> Self {
        Self { actor, position }
    }
}

impl CommandTransition for TriggerTrapCommand {
    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, _ctx: &CommandContext<'_>) -> Result<(), ActionError> {
        living_actor(state, self.actor)?;
        state
            .trap_at(self.position)
            .map(|_| ())
            .ok_or(ActionError::NothingHere)
    }

    fn apply(
        &self,
        state: &mut GameState,
        ctx: &mut CommandContext<'_>,
    ) -> Result<Outcome, ActionError> {
        let trap = state
            .world
            .traps
            .get_mut(&self.position)
            .filter(|trap| trap.armed)
            .ok_or(ActionError::NothingHere)?;
        trap.hidden = false;
        if trap.kind.is_single_use() {
            trap.armed = false;
        }
        let kind = trap.kind;

        let narrate = self.actor.is_player() || state.world.is_visible(self.position);
        let actor = state.actor_mut(self.actor)?;
        let mut outcome = Outcome::new();

        let text = match kind {
            TrapKind::BearTrap => {
                actor.trapped_turns = ctx.config.bear_trap_turns;
                format!("A bear trap snaps shut on {}!", actor.display_name())
            }
            TrapKind::Dart => {
                let damage = DART_DAMAGE.roll(&mut ctx.rolls);
                let fighter = actor.fighter.as_mut().ok_or(ActionError::MissingComponent {
                    actor: self.actor,
                    component: "fighter",
                })?;
                fighter.take_damage(damage);
                if fighter.is_dead() {
                    outcome.follow_up(Command::die(self.actor, None));
                }
                format!(
                    "A dart shoots out and hits {} for {damage} damage!",
                    actor.display_name()
                )
            }
            TrapKind::SleepingGas => {
                let current = actor.ai.take().unwrap_or(AiState::Stationary);
                actor.ai = Some(current.paralyzed(ctx.config.gas_trap_turns));
                format!(
                    "A cloud of sleeping gas billows up! {} {} asleep.",
                    actor.subject_name(),
                    conjugate(actor, "fall", "falls")
                )
            }
            TrapKind::ConfusionGas => {
                let current = actor.ai.take().unwrap_or(AiState::Stationary);
                actor.ai = Some(current.confused(ctx.config.gas_trap_turns));
                format!(
                    "A cloud of shimmering gas billows up! {} {} confused.",
                    actor.subject_name(),
                    conjugate(actor, "feel", "looks")
                )
            }
        };
        if narrate {
            outcome.message(text);
        }
        Ok(outcome)
    }
}

/// Struggle against a bear trap. Always succeeds as a command; escaping is a roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WriggleCommand {
    pub actor: EntityId,
}

impl WriggleCommand {
    pub fn new(actor: EntityId) -> Self {
        Self { actor }
    }
}

impl CommandTransition for WriggleCommand {
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
        let actor = state.actor_mut(self.actor)?;
        let mut outcome = Outcome::new();
        if !actor.is_trapped() {
            return Ok(outcome);
        }

        if ctx.rolls.percent(ctx.config.wriggle_escape_chance) {
            actor.trapped_turns = 0;
            outcome.message(format!(
                "{} {} free!",
                actor.subject_name(),
                conjugate(actor, "wriggle", "wriggles")
            ));
        } else if actor.is_player() {
            outcome.message("You struggle against the bear trap.");
        }
        Ok(outcome)
    }
}
