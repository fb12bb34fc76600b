//! Deterministic rules of the dungeon crawl.
//!
//! `delve-core` decides who acts and how often (energy meters), what a
//! command does (the [`action`] model), how fights are rolled ([`combat`]) and
//! how monsters choose their moves ([`ai`]). Time only advances through
//! [`engine::TurnEngine`]. Maps, pathfinding, vision, catalogs and dice are
//! injected through the oracle traits in [`env`]; the crate performs no I/O.
pub mod action;
pub mod ai;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use action::{ActionError, Command, CommandContext, CommandTransition, Outcome};
pub use ai::{AiBehavior, AiError, AiState};
pub use combat::{AttackResult, AttackStyle, CombatStats, DiceSpec};
pub use config::GameConfig;
pub use engine::{
    ChainFailure, Dispatcher, EndOfTurnHook, EngineError, TurnEngine, TurnReport, default_hooks,
};
pub use env::{
    ActorOracle, ActorTemplate, CostGrid, Env, GameEnv, ItemDefinition, ItemEffect, ItemOracle,
    MapDimensions, MapOracle, MessageSink, OracleError, PathOracle, PcgRng, RngOracle,
    RollContext, SpawnEntry, StaticTile, TerrainKind, Topology, TransparencyGrid, VisionOracle,
};
pub use error::{ErrorSeverity, GameError};
pub use state::{
    ActorState, Direction, EnergyMeter, EntityId, EquipSlot, Fighter, FloorChange, GameState,
    ItemHandle, ItemState, Position, StairDirection, StateError, TrapKind, TrapState,
};
