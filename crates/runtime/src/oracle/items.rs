//! Minimal [`delve_core::ItemOracle`] backed by an in-memory map.
use std::collections::HashMap;

use delve_core::{ItemDefinition, ItemHandle, ItemOracle};

/// ItemOracle implementation with static item definitions
#[derive(Clone, Debug, Default)]
pub struct ItemCatalog {
    definitions: HashMap<ItemHandle, ItemDefinition>,
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_definitions(definitions: impl IntoIterator<Item = ItemDefinition>) -> Self {
        let mut catalog = Self::new();
        for definition in definitions {
            catalog.add_definition(definition);
        }
        catalog
    }

    /// Add an item definition
    pub fn add_definition(&mut self, def: ItemDefinition) {
        self.definitions.insert(def.handle, def);
    }

    /// Handle of the item called `name`, used to resolve spawn table keys.
    pub fn handle_by_name(&self, name: &str) -> Option<ItemHandle> {
        self.definitions
            .values()
            .find(|def| def.name == name)
            .map(|def| def.handle)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl ItemOracle for ItemCatalog {
    fn definition(&self, handle: ItemHandle) -> Option<ItemDefinition> {
        self.definitions.get(&handle).cloned()
    }

    fn all_definitions(&self) -> Vec<ItemDefinition> {
        let mut definitions: Vec<_> = self.definitions.values().cloned().collect();
        definitions.sort_by_key(|def| def.handle);
        definitions
    }
}
