//! Actor catalog loader.
//!
//! Loads actors (both the player and monsters) from RON files.

use std::collections::HashSet;
use std::path::Path;

use delve_core::ActorTemplate;

use crate::loaders::{LoadResult, read_file};

/// Loader for actor catalog from RON files.
pub struct ActorLoader;

impl ActorLoader {
    /// Template key the runtime uses for the player.
    pub const PLAYER_KEY: &'static str = "player";

    /// Load actor catalog from a RON file.
    ///
    /// RON format: `Vec<(String, ActorTemplate)>`
    ///
    /// # Returns
    ///
    /// Returns a Vec of (actor_id, ActorTemplate) in file order.
    pub fn load(path: &Path) -> LoadResult<Vec<(String, ActorTemplate)>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<(String, ActorTemplate)>> {
        let actors: Vec<(String, ActorTemplate)> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse actor catalog RON: {}", e))?;

        let mut seen = HashSet::new();
        for (actor_id, template) in &actors {
            if !seen.insert(actor_id.as_str()) {
                anyhow::bail!("Duplicate actor id '{}'", actor_id);
            }
            if template.max_hp == 0 {
                anyhow::bail!("Actor '{}' must have at least 1 max_hp", actor_id);
            }
        }
        if !seen.contains(Self::PLAYER_KEY) {
            anyhow::bail!("Actor catalog has no '{}' entry", Self::PLAYER_KEY);
        }

        Ok(actors)
    }
}
