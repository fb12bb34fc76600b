//! Equipment slots for actors.
//!
//! Equipment only records which carried item sits in which slot. Bonuses are
//! read from item definitions when effective stats are derived.

use crate::state::types::EntityId;

/// Body location an equippable item occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum EquipSlot {
    MainHand,
    OffHand,
    Body,
}

impl EquipSlot {
    pub const ALL: [EquipSlot; 3] = [EquipSlot::MainHand, EquipSlot::OffHand, EquipSlot::Body];

    /// Phrase used in equip messages.
    pub fn describe(self) -> &'static str {
        match self {
            EquipSlot::MainHand => "main hand",
            EquipSlot::OffHand => "off hand",
            EquipSlot::Body => "body",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Equipment {
    main_hand: Option<EntityId>,
    off_hand: Option<EntityId>,
    body: Option<EntityId>,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipSlot) -> Option<EntityId> {
        match slot {
            EquipSlot::MainHand => self.main_hand,
            EquipSlot::OffHand => self.off_hand,
            EquipSlot::Body => self.body,
        }
    }

    /// Puts `item` into `slot`, returning whatever was there before.
    pub fn set(&mut self, slot: EquipSlot, item: Option<EntityId>) -> Option<EntityId> {
        let cell = match slot {
            EquipSlot::MainHand => &mut self.main_hand,
            EquipSlot::OffHand => &mut self.off_hand,
            EquipSlot::Body => &mut self.body,
        };
        core::mem::replace(cell, item)
    }

    pub fn slot_of(&self, item: EntityId) -> Option<EquipSlot> {
        EquipSlot::ALL
            .into_iter()
            .find(|slot| self.get(*slot) == Some(item))
    }

    pub fn is_equipped(&self, item: EntityId) -> bool {
        self.slot_of(item).is_some()
    }

    /// Clears whichever slot holds `item`. Returns the slot it occupied.
    pub fn unequip(&mut self, item: EntityId) -> Option<EquipSlot> {
        let slot = self.slot_of(item)?;
        self.set(slot, None);
        Some(slot)
    }

    /// Iterates occupied slots.
    pub fn iter(&self) -> impl Iterator<Item = (EquipSlot, EntityId)> + '_ {
        EquipSlot::ALL
            .into_iter()
            .filter_map(|slot| self.get(slot).map(|item| (slot, item)))
    }
}
