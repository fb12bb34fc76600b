use super::{EntityId, Position};

/// Index into the item catalog served by [`ItemOracle`](crate::env::ItemOracle).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemHandle(pub u16);

/// Runtime item instance; lying on the floor when `position` is set, carried otherwise.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemState {
    pub id: EntityId,
    pub handle: ItemHandle,
    pub quantity: u16,
    pub position: Option<Position>,
}

impl ItemState {
    pub fn new(id: EntityId, handle: ItemHandle, quantity: u16, position: Option<Position>) -> Self {
        Self {
            id,
            handle,
            quantity,
            position,
        }
    }

    pub fn on_floor(id: EntityId, handle: ItemHandle, position: Position) -> Self {
        Self::new(id, handle, 1, Some(position))
    }

    pub fn is_on_floor(&self) -> bool {
        self.position.is_some()
    }
}
