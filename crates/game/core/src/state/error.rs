//! State management errors.
//!
//! Errors raised while populating a floor: id allocation, placement and
//! inventory seeding. Command failures live in `ActionError` instead.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, Position};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateError {
    /// Entity ID allocation overflow (all IDs exhausted).
    #[error("Entity ID overflow (current: {current})")]
    EntityIdOverflow {
        /// Current ID value when overflow occurred.
        current: u32,
    },

    /// Position is already occupied by a blocking entity.
    #[error("Position {position} is already occupied by entity {occupant}")]
    PositionOccupied {
        position: Position,
        occupant: EntityId,
    },

    /// Position is outside the map bounds or not walkable.
    #[error("Position {position} cannot hold an actor")]
    PositionNotWalkable { position: Position },

    /// The actor to modify does not exist.
    #[error("actor {0} not found")]
    ActorNotFound(EntityId),

    /// The actor has no free inventory letter left.
    #[error("inventory of {0} is full")]
    InventoryFull(EntityId),
}

impl GameError for StateError {
    fn severity(&self) -> ErrorSeverity {
        use StateError::*;
        match self {
            // ID overflow is a fatal error - cannot continue
            EntityIdOverflow { .. } => ErrorSeverity::Fatal,

            // Placement problems mean the floor data or planner is wrong
            PositionOccupied { .. }
            | PositionNotWalkable { .. }
            | ActorNotFound(_)
            | InventoryFull(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use StateError::*;
        match self {
            EntityIdOverflow { .. } => "STATE_ENTITY_ID_OVERFLOW",
            PositionOccupied { .. } => "STATE_POSITION_OCCUPIED",
            PositionNotWalkable { .. } => "STATE_POSITION_NOT_WALKABLE",
            ActorNotFound(_) => "STATE_ACTOR_NOT_FOUND",
            InventoryFull(_) => "STATE_INVENTORY_FULL",
        }
    }
}
