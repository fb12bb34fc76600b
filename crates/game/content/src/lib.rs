//! Data-driven content definitions and loaders.
//!
//! This crate houses static game content and provides loaders for RON/TOML data files:
//! - Game configuration (data-driven via TOML)
//! - Actor templates, the player included (data-driven via RON)
//! - Item catalogs (data-driven via RON)
//! - Depth-banded spawn tables (data-driven via RON)
//! - Floor layouts drawn as ASCII rows (data-driven via RON)
//!
//! Content is consumed by runtime oracles and never appears in game state.
//!
//! All loaders use delve-core types directly with serde for RON/TOML deserialization.

pub mod floor;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use floor::{FloorLayout, LayoutError, TrapPlacement};

#[cfg(feature = "loaders")]
pub use loaders::{
    ActorLoader, ConfigLoader, ContentBundle, ContentFactory, FloorLoader, ItemLoader,
    SpawnTableLoader, SpawnTables,
};

/// The content shipped with the game, relative to this crate.
pub const DEFAULT_DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data");
