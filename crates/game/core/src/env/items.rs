use bitflags::bitflags;

use crate::combat::DiceSpec;
use crate::state::{EquipSlot, ItemHandle};

pub trait ItemOracle: Send + Sync {
    fn definition(&self, handle: ItemHandle) -> Option<ItemDefinition>;

    /// Returns all item definitions available in this oracle.
    fn all_definitions(&self) -> Vec<ItemDefinition>;
}

bitflags! {
    /// Capabilities an item offers to the command layer.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct ItemFlags: u8 {
        const EQUIPPABLE = 1 << 0;
        const USABLE     = 1 << 1;
        const STACKABLE  = 1 << 2;
    }
}

/// Item definition served by the catalog.
///
/// # Capabilities
///
/// `flags` decides which commands accept the item; `equip` and `effect` carry
/// the data those commands need. An item flagged `EQUIPPABLE` without `equip`
/// data (or `USABLE` without `effect`) is treated as lacking the capability.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub handle: ItemHandle,
    pub name: String,
    pub glyph: char,
    #[cfg_attr(feature = "serde", serde(default))]
    pub flags: ItemFlags,
    #[cfg_attr(feature = "serde", serde(default))]
    pub equip: Option<EquipData>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effect: Option<ItemEffect>,
}

impl ItemDefinition {
    pub fn new(handle: ItemHandle, name: impl Into<String>, glyph: char) -> Self {
        Self {
            handle,
            name: name.into(),
            glyph,
            flags: ItemFlags::empty(),
            equip: None,
            effect: None,
        }
    }

    #[must_use]
    pub fn with_equip(mut self, equip: EquipData) -> Self {
        self.flags |= ItemFlags::EQUIPPABLE;
        self.equip = Some(equip);
        self
    }

    #[must_use]
    pub fn with_effect(mut self, effect: ItemEffect) -> Self {
        self.flags |= ItemFlags::USABLE;
        self.effect = Some(effect);
        self
    }

    #[must_use]
    pub fn stackable(mut self) -> Self {
        self.flags |= ItemFlags::STACKABLE;
        self
    }

    pub fn equip_data(&self) -> Option<&EquipData> {
        self.equip
            .as_ref()
            .filter(|_| self.flags.contains(ItemFlags::EQUIPPABLE))
    }

    pub fn usable_effect(&self) -> Option<&ItemEffect> {
        self.effect
            .as_ref()
            .filter(|_| self.flags.contains(ItemFlags::USABLE))
    }

    pub fn is_stackable(&self) -> bool {
        self.flags.contains(ItemFlags::STACKABLE)
    }

    /// Weapon dice when this item is a wieldable weapon.
    pub fn weapon_attacks(&self) -> Option<&[DiceSpec]> {
        self.equip_data()
            .filter(|equip| equip.slot == EquipSlot::MainHand && !equip.attacks.is_empty())
            .map(|equip| equip.attacks.as_slice())
    }
}

/// What equipping the item does.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquipData {
    pub slot: EquipSlot,
    #[cfg_attr(feature = "serde", serde(default))]
    pub power_bonus: i32,
    /// Armor-class improvement; subtracted from the wearer's AC.
    #[cfg_attr(feature = "serde", serde(default))]
    pub ac_bonus: i32,
    /// Weapon damage dice, replacing natural attacks while wielded.
    #[cfg_attr(feature = "serde", serde(default))]
    pub attacks: Vec<DiceSpec>,
}

impl EquipData {
    pub fn new(slot: EquipSlot) -> Self {
        Self {
            slot,
            power_bonus: 0,
            ac_bonus: 0,
            attacks: Vec::new(),
        }
    }
}

/// Effect of using a consumable.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemEffect {
    /// Restore hit points to the user.
    Heal { dice: DiceSpec },

    /// Strike the closest visible hostile within `range`.
    Lightning { dice: DiceSpec, range: u32 },

    /// Damage every living actor within `radius` of a chosen target tile.
    Fireball { dice: DiceSpec, radius: u32 },

    /// Confuse the closest visible hostile within `range`.
    Confuse { turns: u32, range: u32 },

    /// Paralyze the closest visible hostile within `range`.
    Paralyze { turns: u32, range: u32 },
}

impl ItemEffect {
    pub fn needs_target(&self) -> bool {
        matches!(self, ItemEffect::Fireball { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capability_requires_flag_and_data() {
        let mut sword = ItemDefinition::new(ItemHandle(1), "sword", '/').with_equip(EquipData {
            attacks: vec![DiceSpec::new(1, 8)],
            ..EquipData::new(EquipSlot::MainHand)
        });
        assert!(sword.weapon_attacks().is_some());

        sword.flags.remove(ItemFlags::EQUIPPABLE);
        assert!(sword.equip_data().is_none());
        assert!(sword.weapon_attacks().is_none());
    }

    #[test]
    fn shields_are_not_weapons() {
        let shield = ItemDefinition::new(ItemHandle(2), "shield", '[').with_equip(EquipData {
            ac_bonus: 1,
            ..EquipData::new(EquipSlot::OffHand)
        });
        assert!(shield.weapon_attacks().is_none());
    }
}
