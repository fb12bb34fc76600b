//! Item catalog loader.

use std::collections::HashSet;
use std::path::Path;

use delve_core::env::ItemFlags;
use delve_core::ItemDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Item catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCatalog {
    pub items: Vec<ItemDefinition>,
}

/// Loader for item catalog from RON files.
pub struct ItemLoader;

impl ItemLoader {
    /// Load item catalog from a RON file.
    ///
    /// Capability flags follow the data: an entry with `equip` data is
    /// equippable and one with an `effect` is usable, whatever `flags` says.
    /// `flags` is still where `STACKABLE` is declared.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing ItemCatalog
    pub fn load(path: &Path) -> LoadResult<Vec<ItemDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<ItemDefinition>> {
        let catalog: ItemCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;

        let mut handles = HashSet::new();
        let mut items = catalog.items;
        for item in &mut items {
            if !handles.insert(item.handle) {
                anyhow::bail!("Duplicate item handle {:?} ('{}')", item.handle, item.name);
            }
            if item.equip.is_some() {
                item.flags |= ItemFlags::EQUIPPABLE;
            }
            if item.effect.is_some() {
                item.flags |= ItemFlags::USABLE;
            }
        }

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use delve_core::{EquipSlot, ItemEffect, ItemHandle};

    use super::*;

    #[test]
    fn infers_capabilities_from_data() {
        let catalog = r#"(items: [
            (handle: ItemHandle(1), name: "healing potion", glyph: '!', flags: "STACKABLE",
             effect: Some(Heal(dice: (count: 4, sides: 4)))),
            (handle: ItemHandle(2), name: "sword", glyph: '/',
             equip: Some((slot: MainHand, attacks: [(count: 1, sides: 8)]))),
        ])"#;
        let items = ItemLoader::parse(catalog).unwrap();

        let potion = &items[0];
        assert_eq!(potion.handle, ItemHandle(1));
        assert!(potion.is_stackable());
        assert!(matches!(potion.usable_effect(), Some(ItemEffect::Heal { .. })));

        let sword = &items[1];
        assert_eq!(sword.equip_data().map(|equip| equip.slot), Some(EquipSlot::MainHand));
        assert!(sword.weapon_attacks().is_some());
        assert!(!sword.is_stackable());
    }

    #[test]
    fn rejects_duplicate_handles() {
        let catalog = r#"(items: [
            (handle: ItemHandle(3), name: "a", glyph: '?'),
            (handle: ItemHandle(3), name: "b", glyph: '?'),
        ])"#;
        assert!(ItemLoader::parse(catalog).is_err());
    }
}
