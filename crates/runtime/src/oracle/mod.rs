//! Runtime implementations of the core's collaborator traits.
//!
//! These implementations expose `delve-core` oracle traits and bundle them into
//! an [`OracleManager`] so the session can build [`delve_core::Env`] snapshots
//! on demand. The data is immutable while a floor is played; dynamic state
//! lives in [`delve_core::GameState`].
mod actors;
mod items;
mod map;
mod path;
mod vision;

use std::sync::Arc;

use delve_core::{Env, GameEnv, PcgRng};

pub use actors::ActorCatalog;
pub use items::ItemCatalog;
pub use map::GridMap;
pub use path::AStarPathfinder;
pub use vision::RaycastVision;

/// Manages all oracle implementations and provides unified access
#[derive(Clone)]
pub struct OracleManager {
    pub(crate) map: Arc<GridMap>,
    pub(crate) items: Arc<ItemCatalog>,
    pub(crate) actors: Arc<ActorCatalog>,
    pub(crate) path: AStarPathfinder,
    pub(crate) vision: RaycastVision,
    pub(crate) rng: PcgRng,
}

impl OracleManager {
    /// Creates a new oracle manager
    pub fn new(map: Arc<GridMap>, items: Arc<ItemCatalog>, actors: Arc<ActorCatalog>) -> Self {
        Self {
            map,
            items,
            actors,
            path: AStarPathfinder,
            vision: RaycastVision,
            rng: PcgRng, // PcgRng is stateless
        }
    }

    /// Converts oracle manager into GameEnv for delve-core
    pub fn as_game_env(&self) -> GameEnv<'_> {
        Env::with_all(
            self.map.as_ref(),
            self.items.as_ref(),
            self.actors.as_ref(),
            &self.path,
            &self.vision,
            &self.rng,
        )
        .as_game_env()
    }

    /// Swaps in the layout of a new floor.
    pub fn set_map(&mut self, map: GridMap) {
        self.map = Arc::new(map);
    }

    pub fn map(&self) -> &GridMap {
        &self.map
    }

    pub fn items(&self) -> &ItemCatalog {
        &self.items
    }

    pub fn actors(&self) -> &ActorCatalog {
        &self.actors
    }

    pub fn rng(&self) -> &PcgRng {
        &self.rng
    }
}
