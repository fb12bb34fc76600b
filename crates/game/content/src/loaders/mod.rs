//! Content loaders for reading game data from files.
//!
//! This module provides loaders that convert RON/TOML files into delve-core
//! types and the [`crate::FloorLayout`] used by the runtime map.

pub mod actors;
pub mod config;
pub mod factory;
pub mod floor;
pub mod item;
pub mod spawns;

pub use actors::ActorLoader;
pub use config::ConfigLoader;
pub use factory::{ContentBundle, ContentFactory};
pub use floor::FloorLoader;
pub use item::ItemLoader;
pub use spawns::{SpawnTableLoader, SpawnTables};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
