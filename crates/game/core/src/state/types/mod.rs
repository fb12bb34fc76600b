//! Plain data types that make up [`GameState`](super::GameState).

pub mod actor;
mod common;
mod energy;
mod entities;
mod fighter;
mod item;
mod turn;
mod world;

pub use actor::{
    ActorState, EquipSlot, Equipment, Inventory, InventorySlot, Level, RenderOrder,
};
pub use common::{Direction, EntityId, Position};
pub use energy::EnergyMeter;
pub use entities::EntitiesState;
pub use fighter::Fighter;
pub use item::{ItemHandle, ItemState};
pub use turn::TurnState;
pub use world::{FloorChange, StairDirection, TrapKind, TrapState, WorldState};
