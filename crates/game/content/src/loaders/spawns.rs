//! Depth-banded spawn table loader.

use std::path::Path;

use delve_core::SpawnEntry;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// What populates a floor.
///
/// Monster keys refer to actor catalog ids; item keys refer to item names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnTables {
    #[serde(default)]
    pub monsters: Vec<SpawnEntry>,
    #[serde(default)]
    pub items: Vec<SpawnEntry>,
    /// Monsters placed when a floor is generated.
    #[serde(default)]
    pub monsters_per_floor: u32,
    /// Items placed when a floor is generated.
    #[serde(default)]
    pub items_per_floor: u32,
}

impl SpawnTables {
    pub fn monsters_at(&self, depth: u32) -> Vec<SpawnEntry> {
        filter_depth(&self.monsters, depth)
    }

    pub fn items_at(&self, depth: u32) -> Vec<SpawnEntry> {
        filter_depth(&self.items, depth)
    }
}

fn filter_depth(entries: &[SpawnEntry], depth: u32) -> Vec<SpawnEntry> {
    entries
        .iter()
        .filter(|entry| entry.allows_depth(depth))
        .cloned()
        .collect()
}

/// Loader for spawn tables from RON files.
pub struct SpawnTableLoader;

impl SpawnTableLoader {
    pub fn load(path: &Path) -> LoadResult<SpawnTables> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<SpawnTables> {
        let tables: SpawnTables = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse spawn table RON: {}", e))?;

        for entry in tables.monsters.iter().chain(&tables.items) {
            if let Some(max) = entry.max_depth.filter(|max| *max < entry.min_depth) {
                anyhow::bail!(
                    "Spawn entry '{}' has max_depth {} below min_depth {}",
                    entry.key,
                    max,
                    entry.min_depth
                );
            }
        }

        Ok(tables)
    }
}
