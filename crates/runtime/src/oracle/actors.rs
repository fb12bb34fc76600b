//! Actor oracle implementing [`delve_core::ActorOracle`].

use std::collections::HashMap;

use delve_core::{ActorOracle, ActorTemplate, SpawnEntry};

/// Oracle providing actor templates and the monster spawn table.
#[derive(Clone, Debug, Default)]
pub struct ActorCatalog {
    templates: HashMap<String, ActorTemplate>,
    spawns: Vec<SpawnEntry>,
}

impl ActorCatalog {
    /// Create an empty oracle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an actor template to the oracle.
    ///
    /// # Arguments
    ///
    /// * `id` - Actor definition ID (e.g., "orc", "player")
    /// * `template` - Actor template
    pub fn add(&mut self, id: impl Into<String>, template: ActorTemplate) {
        self.templates.insert(id.into(), template);
    }

    /// Replaces the monster spawn table. Entries keep their order, which
    /// decides how weighted rolls map onto keys.
    pub fn set_spawn_table(&mut self, spawns: Vec<SpawnEntry>) {
        self.spawns = spawns;
    }

    /// Check if an actor exists.
    pub fn contains(&self, id: &str) -> bool {
        self.templates.contains_key(id)
    }

    /// Get number of actors in catalog.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Check if catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl ActorOracle for ActorCatalog {
    fn template(&self, def_id: &str) -> Option<ActorTemplate> {
        self.templates.get(def_id).cloned()
    }

    fn spawn_table(&self, depth: u32) -> Vec<SpawnEntry> {
        self.spawns
            .iter()
            .filter(|entry| entry.allows_depth(depth) && self.templates.contains_key(&entry.key))
            .cloned()
            .collect()
    }

    fn all_keys(&self) -> Vec<String> {
        let mut keys: Vec<_> = self.templates.keys().cloned().collect();
        keys.sort();
        keys
    }
}
