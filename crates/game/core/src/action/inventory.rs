//! Pickup, Drop and Equip.

use super::{
    ActionError, CommandContext, CommandTransition, Outcome, item_label, living_actor,
};
use crate::combat::conjugate;
use crate::state::{EntityId, EquipSlot, GameState};

/// Picks up the lowest-id item on the actor's tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PickupCommand {
    pub actor: EntityId,
}

/// Where a picked-up item ends up.
enum PickupPlan {
    /// Merge into this carried stack.
    Merge(EntityId),
    /// Take a fresh inventory letter.
    NewSlot,
}

impl PickupCommand {
    pub fn new(actor: EntityId) -> Self {
        Self { actor }
    }

    fn plan(
        &self,
        state: &GameState,
        ctx: &CommandContext<'_>,
    ) -> Result<(EntityId, PickupPlan), ActionError> {
        let actor = living_actor(state, self.actor)?;
        let item = state
            .items_at(actor.position)
            .next()
            .ok_or(ActionError::NothingHere)?;
        let definition = ctx.item_definition(state, item.id)?;

        if definition.is_stackable() {
            let stack = actor.inventory.items().find(|carried| {
                state
                    .entities
                    .item(*carried)
                    .is_some_and(|carried| carried.handle == item.handle)
            });
            if let Some(stack) = stack {
                return Ok((item.id, PickupPlan::Merge(stack)));
            }
        }

        if actor.inventory.is_full(ctx.config.inventory_slots()) {
            return Err(ActionError::InventoryFull);
        }
        Ok((item.id, PickupPlan::NewSlot))
    }
}

impl CommandTransition for PickupCommand {
    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, ctx: &CommandContext<'_>) -> Result<(), ActionError> {
        self.plan(state, ctx).map(|_| ())
    }

    fn apply(
        &self,
        state: &mut GameState,
        ctx: &mut CommandContext<'_>,
    ) -> Result<Outcome, ActionError> {
        let (item_id, plan) = self.plan(state, ctx)?;
        let definition = ctx.item_definition(state, item_id)?;
        let quantity = state.item(item_id)?.quantity;

        match plan {
            PickupPlan::Merge(stack) => {
                state.entities.remove_item(item_id);
                let stack = state
                    .entities
                    .item_mut(stack)
                    .ok_or(ActionError::ItemNotFound(stack))?;
                stack.quantity = stack.quantity.saturating_add(quantity);
            }
            PickupPlan::NewSlot => {
                let capacity = ctx.config.inventory_slots();
                state
                    .actor_mut(self.actor)?
                    .inventory
                    .insert(item_id, capacity)
                    .ok_or(ActionError::InventoryFull)?;
                if let Some(item) = state.entities.item_mut(item_id) {
                    item.position = None;
                }
            }
        }

        let actor = state.actor(self.actor)?;
        Ok(Outcome::new().with_message(format!(
            "{} {} up {}.",
            actor.subject_name(),
            conjugate(actor, "pick", "picks"),
            item_label(&definition, quantity)
        )))
    }
}

/// Drops a carried item onto the actor's tile, unequipping it first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DropCommand {
    pub actor: EntityId,
    pub item: EntityId,
}

impl DropCommand {
    pub fn new(actor: EntityId, item: EntityId) -> Self {
        Self { actor, item }
    }
}

impl CommandTransition for DropCommand {
    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, _ctx: &CommandContext<'_>) -> Result<(), ActionError> {
        let actor = living_actor(state, self.actor)?;
        if !actor.inventory.contains(self.item) {
            return Err(ActionError::NotCarried);
        }
        state.item(self.item).map(|_| ())
    }

    fn apply(
        &self,
        state: &mut GameState,
        ctx: &mut CommandContext<'_>,
    ) -> Result<Outcome, ActionError> {
        let definition = ctx.item_definition(state, self.item)?;
        let quantity = state.item(self.item)?.quantity;
        let label = item_label(&definition, quantity);
        let mut outcome = Outcome::new();

        let actor = state.actor_mut(self.actor)?;
        if actor.equipment.unequip(self.item).is_some() {
            outcome.message(format!(
                "{} {} {label}.",
                actor.subject_name(),
                conjugate(actor, "unequip", "unequips")
            ));
        }
        actor.inventory.remove(self.item);
        let position = actor.position;
        outcome.message(format!(
            "{} {} {label}.",
            actor.subject_name(),
            conjugate(actor, "drop", "drops")
        ));

        if let Some(item) = state.entities.item_mut(self.item) {
            item.position = Some(position);
        }
        Ok(outcome)
    }
}

/// Toggles an item in or out of its equipment slot.
///
/// `slot` is the slot the caller asked for; `None` means "wherever it goes".
/// Equipping into an occupied slot swaps the previous item out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquipCommand {
    pub actor: EntityId,
    pub item: EntityId,
    pub slot: Option<EquipSlot>,
}

impl EquipCommand {
    pub fn new(actor: EntityId, item: EntityId, slot: Option<EquipSlot>) -> Self {
        Self { actor, item, slot }
    }

    fn required_slot(
        &self,
        state: &GameState,
        ctx: &CommandContext<'_>,
    ) -> Result<EquipSlot, ActionError> {
        let actor = living_actor(state, self.actor)?;
        if !actor.inventory.contains(self.item) {
            return Err(ActionError::NotCarried);
        }
        let definition = ctx.item_definition(state, self.item)?;
        let expected = definition
            .equip_data()
            .map(|equip| equip.slot)
            .ok_or(ActionError::NotEquippable)?;
        match self.slot {
            Some(requested) if requested != expected => {
                Err(ActionError::SlotMismatch { expected, requested })
            }
            _ => Ok(expected),
        }
    }
}

impl CommandTransition for EquipCommand {
    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, ctx: &CommandContext<'_>) -> Result<(), ActionError> {
        self.required_slot(state, ctx).map(|_| ())
    }

    fn apply(
        &self,
        state: &mut GameState,
        ctx: &mut CommandContext<'_>,
    ) -> Result<Outcome, ActionError> {
        let slot = self.required_slot(state, ctx)?;
        let definition = ctx.item_definition(state, self.item)?;

        let previous_label = {
            let actor = state.actor(self.actor)?;
            match actor.equipment.get(slot) {
                Some(previous) if previous != self.item => {
                    Some(item_label(&ctx.item_definition(state, previous)?, 1))
                }
                _ => None,
            }
        };

        let mut outcome = Outcome::new();
        let actor = state.actor_mut(self.actor)?;
        let subject = actor.subject_name();

        if actor.equipment.unequip(self.item).is_some() {
            outcome.message(format!(
                "{subject} {} {}.",
                conjugate(actor, "unequip", "unequips"),
                item_label(&definition, 1)
            ));
            return Ok(outcome);
        }

        actor.equipment.set(slot, Some(self.item));
        if let Some(previous) = previous_label {
            outcome.message(format!(
                "{subject} {} {previous}.",
                conjugate(actor, "unequip", "unequips")
            ));
        }
        outcome.message(format!(
            "{subject} {} {}.",
            conjugate(actor, "equip", "equips"),
            item_label(&definition, 1)
        ));
        Ok(outcome)
    }
}
