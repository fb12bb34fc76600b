use super::{ActionError, CommandContext, CommandTransition, Outcome};
use crate::state::{EntityId, GameState};

/// Passes the action slot. Always succeeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaitCommand {
    pub actor: EntityId,
}

impl WaitCommand {
    pub fn new(actor: EntityId) -> Self {
        Self { actor }
    }
}

impl CommandTransition for WaitCommand {
    fn actor(&self) -> EntityId {
        self.actor
    }

    fn apply(
        &self,
        _state: &mut GameState,
        _ctx: &mut CommandContext<'_>,
    ) -> Result<Outcome, ActionError> {
        Ok(Outcome::new())
    }
}
