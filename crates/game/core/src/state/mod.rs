//! Authoritative game state representation.
//!
//! This module owns the data structures that describe entities, turn
//! bookkeeping and world overlays, plus the read-only world queries commands
//! and AI use. Runtime layers clone or query this state but mutate it
//! exclusively through the turn engine (or `enter_floor` between floors).
pub mod error;
pub mod types;

use std::collections::BTreeMap;

pub use error::StateError;
pub use types::{
    ActorState, Direction, EnergyMeter, EntitiesState, EntityId, EquipSlot, Equipment, Fighter,
    FloorChange, Inventory, InventorySlot, ItemHandle, ItemState, Level, Position, RenderOrder,
    StairDirection, TrapKind, TrapState, TurnState, WorldState,
};

use crate::action::ActionError;
use crate::config::GameConfig;
use crate::env::{ActorTemplate, CostGrid, Grid, MapOracle, TransparencyGrid};

/// Canonical snapshot of the deterministic game state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// RNG seed for deterministic random generation.
    ///
    /// Set once at game initialization and never modified.
    /// Combined with `turn.nonce` to generate unique seeds for each random event.
    pub game_seed: u64,

    /// Sequential entity ID allocator (monotonically increasing).
    ///
    /// Never reused. ID 0 (PLAYER) is reserved.
    next_entity_id: u32,

    /// Turn bookkeeping: world tick counter, roll nonce, FOV flag.
    pub turn: TurnState,
    /// All entities on the current floor: actors and items.
    pub entities: EntitiesState,
    /// Runtime world data layered on top of the static map.
    pub world: WorldState,
}

impl GameState {
    /// Creates an empty state at depth 1 with no entities.
    pub fn new(game_seed: u64) -> Self {
        Self {
            game_seed,
            next_entity_id: 1, // Start at 1 (0 is reserved for PLAYER)
            turn: TurnState::default(),
            entities: EntitiesState::empty(),
            world: WorldState::default(),
        }
    }

    /// Allocates a new unique EntityId.
    ///
    /// # Errors
    ///
    /// Returns `StateError::EntityIdOverflow` once every id has been handed out.
    pub fn allocate_entity_id(&mut self) -> Result<EntityId, StateError> {
        let current = self.next_entity_id;
        self.next_entity_id = current
            .checked_add(1)
            .ok_or(StateError::EntityIdOverflow { current })?;
        Ok(EntityId(current))
    }

    /// Adds the player from `template`, primed so the first input can act.
    pub fn add_player(
        &mut self,
        template: &ActorTemplate,
        position: Position,
        config: &GameConfig,
    ) -> Result<(), StateError> {
        let mut actor = template.to_actor(EntityId::PLAYER, position, config);
        actor.energy = actor.energy.primed();
        self.entities.insert_actor(actor);
        self.turn.recompute_fov = true;
        Ok(())
    }

    /// Adds a monster from `template` with automatic ID allocation.
    ///
    /// The monster's meter starts empty; it first acts after the next world tick.
    pub fn spawn_actor(
        &mut self,
        template: &ActorTemplate,
        position: Position,
        config: &GameConfig,
    ) -> Result<EntityId, StateError> {
        if let Some(occupant) = self.blocking_entity_at(position) {
            return Err(StateError::PositionOccupied {
                position,
                occupant,
            });
        }
        let id = self.allocate_entity_id()?;
        self.entities
            .insert_actor(template.to_actor(id, position, config));
        Ok(id)
    }

    /// Places a stack of `quantity` items on the floor.
    pub fn spawn_item(
        &mut self,
        handle: ItemHandle,
        quantity: u16,
        position: Position,
    ) -> Result<EntityId, StateError> {
        let id = self.allocate_entity_id()?;
        self.entities
            .insert_item(ItemState::new(id, handle, quantity.max(1), Some(position)));
        Ok(id)
    }

    /// Puts a new item straight into an actor's pack (starting kit).
    pub fn give_item(
        &mut self,
        owner: EntityId,
        handle: ItemHandle,
        quantity: u16,
        capacity: usize,
    ) -> Result<EntityId, StateError> {
        if self.entities.actor(owner).is_none() {
            return Err(StateError::ActorNotFound(owner));
        }
        let id = self.allocate_entity_id()?;
        let actor = self
            .entities
            .actor_mut(owner)
            .ok_or(StateError::ActorNotFound(owner))?;
        actor
            .inventory
            .insert(id, capacity)
            .ok_or(StateError::InventoryFull(owner))?;
        self.entities
            .insert_item(ItemState::new(id, handle, quantity.max(1), None));
        Ok(id)
    }

    /// Moves the player onto a freshly generated floor.
    ///
    /// Every other actor and every item not in the player's pack is dropped,
    /// traps are replaced, and the field of view is flagged for recompute.
    pub fn enter_floor(
        &mut self,
        depth: u32,
        arrival: Position,
        traps: BTreeMap<Position, TrapState>,
    ) -> Result<(), StateError> {
        self.entities.retain_only(EntityId::PLAYER);
        let player = self
            .entities
            .player_mut()
            .ok_or(StateError::ActorNotFound(EntityId::PLAYER))?;
        player.position = arrival;
        player.trapped_turns = 0;

        self.world = WorldState {
            depth,
            traps,
            ..WorldState::new(depth)
        };
        self.turn.recompute_fov = true;
        Ok(())
    }
}

// ============================================================================
// Entity lookups
// ============================================================================

impl GameState {
    /// Actor by id.
    ///
    /// # Errors
    ///
    /// A missing actor is a programming error (`ActionError::ActorNotFound`).
    pub fn actor(&self, id: EntityId) -> Result<&ActorState, ActionError> {
        self.entities.actor(id).ok_or(ActionError::ActorNotFound(id))
    }

    pub fn actor_mut(&mut self, id: EntityId) -> Result<&mut ActorState, ActionError> {
        self.entities
            .actor_mut(id)
            .ok_or(ActionError::ActorNotFound(id))
    }

    pub fn item(&self, id: EntityId) -> Result<&ItemState, ActionError> {
        self.entities.item(id).ok_or(ActionError::ItemNotFound(id))
    }

    pub fn player(&self) -> Option<&ActorState> {
        self.entities.player()
    }

    pub fn is_player_alive(&self) -> bool {
        self.player().is_some_and(ActorState::is_alive)
    }
}

// ============================================================================
// World queries
// ============================================================================

impl GameState {
    pub fn in_bounds<M>(&self, map: &M, position: Position) -> bool
    where
        M: MapOracle + ?Sized,
    {
        map.contains(position)
    }

    /// Whether the terrain at `position` can be stood on, ignoring occupants.
    pub fn is_walkable<M>(&self, map: &M, position: Position) -> bool
    where
        M: MapOracle + ?Sized,
    {
        map.contains(position) && map.tile(position).is_some_and(|tile| tile.is_passable())
    }

    /// Living actor standing on `position`.
    pub fn actor_at(&self, position: Position) -> Option<&ActorState> {
        self.entities.living_actor_at(position)
    }

    /// Entity that prevents others from entering `position`.
    pub fn blocking_entity_at(&self, position: Position) -> Option<EntityId> {
        self.entities
            .actors()
            .find(|actor| actor.blocks_movement && actor.position == position)
            .map(|actor| actor.id)
    }

    /// Armed trap at `position`, hidden or not.
    pub fn trap_at(&self, position: Position) -> Option<&TrapState> {
        self.world.armed_trap(position)
    }

    pub fn items_at(&self, position: Position) -> impl Iterator<Item = &ItemState> + '_ {
        self.entities.items_at(position)
    }

    /// Walkable terrain with no blocking occupant.
    pub fn can_enter<M>(&self, map: &M, position: Position) -> bool
    where
        M: MapOracle + ?Sized,
    {
        self.is_walkable(map, position) && self.blocking_entity_at(position).is_none()
    }

    /// Movement costs for the path collaborator: walkable tiles cost 1, tiles
    /// holding a blocking actor cost `1 + occupied_tile_penalty`, the rest are
    /// impassable.
    pub fn cost_grid<M>(&self, map: &M, config: &GameConfig) -> CostGrid
    where
        M: MapOracle + ?Sized,
    {
        let mut grid: CostGrid = Grid::from_fn(map.dimensions(), |position| {
            self.is_walkable(map, position).then_some(1)
        });
        for actor in self.entities.actors().filter(|actor| actor.blocks_movement) {
            if let Some(Some(cost)) = grid.get(actor.position).copied() {
                grid.set(
                    actor.position,
                    Some(cost.saturating_add(config.occupied_tile_penalty)),
                );
            }
        }
        grid
    }

    /// Light-passing tiles for the vision collaborator.
    pub fn transparency_grid<M>(&self, map: &M) -> TransparencyGrid
    where
        M: MapOracle + ?Sized,
    {
        Grid::from_fn(map.dimensions(), |position| {
            map.tile(position).is_some_and(|tile| tile.is_transparent())
        })
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(0)
    }
}
