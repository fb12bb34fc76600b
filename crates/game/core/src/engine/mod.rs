//! Turn scheduling and command resolution.
//!
//! The [`TurnEngine`] is the only place that advances time. A player input is
//! resolved as a chain by the [`Dispatcher`]; when the player runs out of
//! energy the engine runs world ticks in which every monster spends its own
//! energy, followed by the end-of-turn [hooks](hook).
//!
//! All randomness of a tick flows through [`RollContext`](crate::env::RollContext)s
//! keyed by the state's nonce, so replaying the same inputs against the same
//! seed reproduces the same game.

mod dispatch;
mod errors;
pub mod hook;
mod turns;

pub use dispatch::{ChainFailure, ChainReport, Dispatcher};
pub use errors::EngineError;
pub use hook::{EndOfTurnHook, HookContext, RegenerationHook, SpawnHook, TimerHook, default_hooks};
pub use turns::{TurnEngine, TurnReport};
