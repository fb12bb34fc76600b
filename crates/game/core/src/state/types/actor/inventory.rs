//! Inventory system for actors.
//!
//! Items keep their own entity ids while carried; the inventory only maps
//! letters to those ids.

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::state::types::EntityId;

/// Inventory slot binding a letter to a carried item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventorySlot {
    pub letter: char,
    pub item: EntityId,
}

impl InventorySlot {
    pub fn new(letter: char, item: EntityId) -> Self {
        Self { letter, item }
    }
}

/// Letter-indexed item storage.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inventory {
    slots: ArrayVec<InventorySlot, { GameConfig::MAX_INVENTORY_SLOTS }>,
}

impl Inventory {
    pub fn empty() -> Self {
        Self {
            slots: ArrayVec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// True when no further slot fits within `capacity`.
    pub fn is_full(&self, capacity: usize) -> bool {
        self.slots.len() >= capacity.min(GameConfig::MAX_INVENTORY_SLOTS)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InventorySlot> + '_ {
        self.slots.iter()
    }

    pub fn items(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.slots.iter().map(|slot| slot.item)
    }

    pub fn contains(&self, item: EntityId) -> bool {
        self.slots.iter().any(|slot| slot.item == item)
    }

    pub fn letter_of(&self, item: EntityId) -> Option<char> {
        self.slots
            .iter()
            .find(|slot| slot.item == item)
            .map(|slot| slot.letter)
    }

    pub fn item_at(&self, letter: char) -> Option<EntityId> {
        self.slots
            .iter()
            .find(|slot| slot.letter == letter)
            .map(|slot| slot.item)
    }

    /// Lowest letter not currently in use.
    pub fn next_free_letter(&self) -> Option<char> {
        ('a'..='z').find(|letter| self.item_at(*letter).is_none())
    }

    /// Stores `item` under the next free letter, returning the letter.
    ///
    /// Returns `None` (and stores nothing) when the inventory is full.
    pub fn insert(&mut self, item: EntityId, capacity: usize) -> Option<char> {
        if self.is_full(capacity) {
            return None;
        }
        let letter = self.next_free_letter()?;
        self.slots.try_push(InventorySlot::new(letter, item)).ok()?;
        Some(letter)
    }

    /// Removes `item`, returning its slot. Remaining letters are kept stable.
    pub fn remove(&mut self, item: EntityId) -> Option<InventorySlot> {
        let index = self.slots.iter().position(|slot| slot.item == item)?;
        Some(self.slots.remove(index))
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}
