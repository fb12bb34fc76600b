use std::collections::BTreeMap;

use super::{ActorState, EntityId, ItemState, Position};

/// All entities on the current floor, keyed by id so iteration order is stable.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntitiesState {
    actors: BTreeMap<EntityId, ActorState>,
    items: BTreeMap<EntityId, ItemState>,
}

impl EntitiesState {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn actor(&self, id: EntityId) -> Option<&ActorState> {
        self.actors.get(&id)
    }

    pub fn actor_mut(&mut self, id: EntityId) -> Option<&mut ActorState> {
        self.actors.get_mut(&id)
    }

    pub fn player(&self) -> Option<&ActorState> {
        self.actor(EntityId::PLAYER)
    }

    pub fn player_mut(&mut self) -> Option<&mut ActorState> {
        self.actor_mut(EntityId::PLAYER)
    }

    pub fn insert_actor(&mut self, actor: ActorState) -> Option<ActorState> {
        self.actors.insert(actor.id, actor)
    }

    pub fn remove_actor(&mut self, id: EntityId) -> Option<ActorState> {
        self.actors.remove(&id)
    }

    pub fn actors(&self) -> impl Iterator<Item = &ActorState> + '_ {
        self.actors.values()
    }

    /// Ids of living actors in ascending order.
    pub fn living_actor_ids(&self) -> Vec<EntityId> {
        self.actors
            .values()
            .filter(|actor| actor.is_alive())
            .map(|actor| actor.id)
            .collect()
    }

    /// Living actor standing on `position`, if any.
    pub fn living_actor_at(&self, position: Position) -> Option<&ActorState> {
        self.actors
            .values()
            .find(|actor| actor.position == position && actor.is_alive())
    }

    pub fn item(&self, id: EntityId) -> Option<&ItemState> {
        self.items.get(&id)
    }

    pub fn item_mut(&mut self, id: EntityId) -> Option<&mut ItemState> {
        self.items.get_mut(&id)
    }

    pub fn insert_item(&mut self, item: ItemState) -> Option<ItemState> {
        self.items.insert(item.id, item)
    }

    pub fn remove_item(&mut self, id: EntityId) -> Option<ItemState> {
        self.items.remove(&id)
    }

    pub fn items(&self) -> impl Iterator<Item = &ItemState> + '_ {
        self.items.values()
    }

    /// Items lying on `position`, lowest id first.
    pub fn items_at(&self, position: Position) -> impl Iterator<Item = &ItemState> + '_ {
        self.items
            .values()
            .filter(move |item| item.position == Some(position))
    }

    /// Drops every actor except `keep` and every item not carried by it.
    pub fn retain_only(&mut self, keep: EntityId) {
        let carried: Vec<EntityId> = self
            .actors
            .get(&keep)
            .map(|actor| actor.inventory.items().collect())
            .unwrap_or_default();
        self.actors.retain(|id, _| *id == keep);
        self.items.retain(|id, _| carried.contains(id));
    }
}
