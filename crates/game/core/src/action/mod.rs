//! Command domain.
//!
//! Every thing an actor can attempt is one variant of the closed [`Command`]
//! enum. Each variant wraps a small struct implementing [`CommandTransition`]:
//! `pre_validate` performs every check that can fail with an `Impossible`
//! reason against the untouched state, and `apply` mutates the state and
//! reports an [`Outcome`] (messages, follow-up commands, FOV flag).
//!
//! # Module Structure
//!
//! - `movement`: Bump, Move
//! - `combat`: Attack, Die
//! - `inventory`: Pickup, Drop, Equip
//! - `use_item`: UseItem and the item effects
//! - `traps`: Search, TriggerTrap, Wriggle
//! - `wait` / `stairs`: Wait, TakeStairs

pub mod combat;
pub mod error;
pub mod inventory;
pub mod movement;
pub mod stairs;
pub mod traps;
pub mod use_item;
pub mod wait;

pub use combat::{AttackCommand, DieCommand};
pub use error::ActionError;
pub use inventory::{DropCommand, EquipCommand, PickupCommand};
pub use movement::{BumpCommand, MoveCommand};
pub use stairs::TakeStairsCommand;
pub use traps::{SearchCommand, TriggerTrapCommand, WriggleCommand};
pub use use_item::UseItemCommand;
pub use wait::WaitCommand;

use crate::config::GameConfig;
use crate::env::{GameEnv, ItemDefinition, OracleError, RollContext};
use crate::state::{ActorState, Direction, EntityId, EquipSlot, GameState, Position};

/// Everything a command needs besides the state it mutates.
pub struct CommandContext<'a> {
    pub env: GameEnv<'a>,
    pub config: &'a GameConfig,
    pub rolls: RollContext<'a>,
}

impl<'a> CommandContext<'a> {
    pub fn new(env: GameEnv<'a>, config: &'a GameConfig, rolls: RollContext<'a>) -> Self {
        Self { env, config, rolls }
    }

    /// Catalog entry for a carried or floor item.
    pub fn item_definition(
        &self,
        state: &GameState,
        item: EntityId,
    ) -> Result<ItemDefinition, ActionError> {
        let handle = state.item(item)?.handle;
        self.env
            .items()?
            .definition(handle)
            .ok_or(ActionError::Oracle(OracleError::ItemNotFound(handle)))
    }
}

/// Defines how a concrete command variant mutates game state.
///
/// `pre_validate` must reject every `Impossible` case so that `apply` never
/// fails half way. `apply` may still return internal errors (missing
/// components, dangling ids) before it starts mutating.
pub trait CommandTransition {
    /// Returns the entity performing this command.
    fn actor(&self) -> EntityId;

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(
        &self,
        _state: &GameState,
        _ctx: &CommandContext<'_>,
    ) -> Result<(), ActionError> {
        Ok(())
    }

    /// Applies the command by mutating the game state directly.
    fn apply(
        &self,
        state: &mut GameState,
        ctx: &mut CommandContext<'_>,
    ) -> Result<Outcome, ActionError>;
}

/// Successful resolution of a single command.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Outcome {
    pub messages: Vec<String>,
    pub follow_ups: Vec<Command>,
    /// The player's view changed; the engine must ask for a fresh FOV.
    pub recompute_fov: bool,
}

impl Outcome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(&mut self, text: impl Into<String>) {
        self.messages.push(text.into());
    }

    pub fn follow_up(&mut self, command: Command) {
        self.follow_ups.push(command);
    }

    #[must_use]
    pub fn with_message(mut self, text: impl Into<String>) -> Self {
        self.message(text);
        self
    }

    #[must_use]
    pub fn then(mut self, command: Command) -> Self {
        self.follow_up(command);
        self
    }
}

/// Closed set of commands understood by the dispatcher.
#[derive(Clone, Debug, PartialEq, Eq, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Command {
    Bump(BumpCommand),
    Move(MoveCommand),
    Attack(AttackCommand),
    Pickup(PickupCommand),
    Drop(DropCommand),
    Equip(EquipCommand),
    UseItem(UseItemCommand),
    Wait(WaitCommand),
    TakeStairs(TakeStairsCommand),
    Die(DieCommand),
    Search(SearchCommand),
    TriggerTrap(TriggerTrapCommand),
    Wriggle(WriggleCommand),
}

impl Command {
    pub fn bump(actor: EntityId, direction: Direction) -> Self {
        Self::Bump(BumpCommand::new(actor, direction))
    }

    pub fn move_to(actor: EntityId, direction: Direction) -> Self {
        Self::Move(MoveCommand::new(actor, direction))
    }

    pub fn attack(actor: EntityId, direction: Direction) -> Self {
        Self::Attack(AttackCommand::new(actor, direction))
    }

    pub fn pickup(actor: EntityId) -> Self {
        Self::Pickup(PickupCommand::new(actor))
    }

    pub fn drop_item(actor: EntityId, item: EntityId) -> Self {
        Self::Drop(DropCommand::new(actor, item))
    }

    pub fn equip(actor: EntityId, item: EntityId, slot: Option<EquipSlot>) -> Self {
        Self::Equip(EquipCommand::new(actor, item, slot))
    }

    pub fn use_item(actor: EntityId, item: EntityId, target: Option<Position>) -> Self {
        Self::UseItem(UseItemCommand::new(actor, item, target))
    }

    pub fn wait(actor: EntityId) -> Self {
        Self::Wait(WaitCommand::new(actor))
    }

    pub fn take_stairs(actor: EntityId) -> Self {
        Self::TakeStairs(TakeStairsCommand::new(actor))
    }

    pub fn die(victim: EntityId, cause: Option<EntityId>) -> Self {
        Self::Die(DieCommand::new(victim, cause))
    }

    pub fn search(actor: EntityId) -> Self {
        Self::Search(SearchCommand::new(actor))
    }

    pub fn trigger_trap(actor: EntityId, position: Position) -> Self {
        Self::TriggerTrap(TriggerTrapCommand::new(actor, position))
    }

    pub fn wriggle(actor: EntityId) -> Self {
        Self::Wriggle(WriggleCommand::new(actor))
    }

    /// Variant name, for logs.
    pub fn name(&self) -> &'static str {
        self.into()
    }

    pub fn actor(&self) -> EntityId {
        self.transition().actor()
    }

    fn transition(&self) -> &dyn CommandTransition {
        match self {
            Command::Bump(command) => command,
            Command::Move(command) => command,
            Command::Attack(command) => command,
            Command::Pickup(command) => command,
            Command::Drop(command) => command,
            Command::Equip(command) => command,
            Command::UseItem(command) => command,
            Command::Wait(command) => command,
            Command::TakeStairs(command) => command,
            Command::Die(command) => command,
            Command::Search(command) => command,
            Command::TriggerTrap(command) => command,
            Command::Wriggle(command) => command,
        }
    }

    /// Validates and applies this command.
    ///
    /// On `Err`, the state is exactly as it was before the call.
    pub fn attempt(
        &self,
        state: &mut GameState,
        ctx: &mut CommandContext<'_>,
    ) -> Result<Outcome, ActionError> {
        let transition = self.transition();
        transition.pre_validate(state, ctx)?;
        transition.apply(state, ctx)
    }
}

/// Looks up an actor that must be alive to perform a command.
pub(crate) fn living_actor(state: &GameState, id: EntityId) -> Result<&ActorState, ActionError> {
    let actor = state.actor(id)?;
    if actor.is_alive() {
        Ok(actor)
    } else {
        Err(ActionError::ActorIsDead(id))
    }
}

/// "the healing potion", or "the dart (x3)" for stacks.
pub(crate) fn item_label(definition: &ItemDefinition, quantity: u16) -> String {
    if quantity > 1 {
        format!("the {} (x{quantity})", definition.name)
    } else {
        format!("the {}", definition.name)
    }
}
