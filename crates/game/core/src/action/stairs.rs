use super::{ActionError, CommandContext, CommandTransition, Outcome, living_actor};
use crate::state::{EntityId, FloorChange, GameState, StairDirection};

/// Requests a floor change from the staircase under the player.
///
/// The command only records the request in `WorldState::pending_floor`; the
/// host builds the destination floor and calls `GameState::enter_floor`.
/// Monsters never use stairs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TakeStairsCommand {
    pub actor: EntityId,
}

impl TakeStairsCommand {
    pub fn new(actor: EntityId) -> Self {
        Self { actor }
    }

    fn floor_change(
        &self,
        state: &GameState,
        ctx: &CommandContext<'_>,
    ) -> Result<FloorChange, ActionError> {
        let actor = living_actor(state, self.actor)?;
        let direction = ctx
            .env
            .map()?
            .tile(actor.position)
            .and_then(|tile| tile.stairs())
            .filter(|_| actor.is_player())
            .ok_or(ActionError::NoStairsHere)?;

        let from_depth = state.world.depth;
        let to_depth = match direction {
            StairDirection::Down => from_depth.saturating_add(1),
            StairDirection::Up if from_depth > 1 => from_depth - 1,
            StairDirection::Up => return Err(ActionError::NoStairsHere),
        };
        Ok(FloorChange {
            actor: self.actor,
            from_depth,
            to_depth,
            direction,
        })
    }
}

impl CommandTransition for TakeStairsCommand {
    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, ctx: &CommandContext<'_>) -> Result<(), ActionError> {
        self.floor_change(state, ctx).map(|_| ())
    }

    fn apply(
        &self,
        state: &mut GameState,
        ctx: &mut CommandContext<'_>,
    ) -> Result<Outcome, ActionError> {
        let change = self.floor_change(state, ctx)?;
        state.world.pending_floor = Some(change);

        let text = match change.direction {
            StairDirection::Down => "You descend the staircase.",
            StairDirection::Up => "You climb the staircase.",
        };
        Ok(Outcome::new().with_message(text))
    }
}
