//! Runtime collaborators and session driver for the deterministic game core.
//!
//! This crate supplies reference implementations of every collaborator the
//! core consults (map, items, actors, pathfinding, vision, message log),
//! plans and populates floors from loaded content, and wraps it all in a
//! synchronous [`Session`] that feeds player commands to the turn engine.
//!
//! Modules are organized by responsibility:
//! - [`oracle`] implements the core's oracle traits and bundles them
//! - [`messages`] keeps the bounded player-facing log
//! - [`planner`] turns layouts and spawn tables into populated floors
//! - [`session`] owns the game and performs floor changes
pub mod error;
pub mod messages;
pub mod oracle;
pub mod planner;
pub mod session;

pub use error::{Result, RuntimeError};
pub use messages::{MessageEntry, MessageLog};
pub use oracle::{
    AStarPathfinder, ActorCatalog, GridMap, ItemCatalog, OracleManager, RaycastVision,
};
pub use planner::{FloorPlanner, PlannedFloor};
pub use session::{Session, SessionConfig};
