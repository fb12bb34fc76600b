//! Error types for the dispatcher and turn engine.

use crate::action::ActionError;
use crate::ai::AiError;
use crate::env::OracleError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, StateError};

/// Errors surfaced by [`TurnEngine`](super::TurnEngine) and [`Dispatcher`](super::Dispatcher).
///
/// `Impossible` command failures never show up here; they are part of normal
/// play and come back inside the reports instead.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// A command chain produced more follow-ups than the configured bound.
    #[error("command chain exceeded {limit} commands")]
    ChainTooLong { limit: usize },

    #[error("player is not present in the game state")]
    PlayerNotFound,

    #[error("the player is dead")]
    GameOver,

    /// Only the player's commands are submitted from outside the engine.
    #[error("submitted command belongs to {actor}, not the player")]
    NotPlayerCommand { actor: EntityId },

    /// The player never regained enough energy to act (refill too low).
    #[error("player still cannot act after {ticks} world ticks")]
    PlayerCannotAct { ticks: u32 },

    /// A command hit a programming error; state may be inconsistent.
    #[error("{command} failed internally: {error}")]
    Internal {
        command: &'static str,
        error: ActionError,
    },

    #[error("AI failed: {0}")]
    Ai(#[from] AiError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for EngineError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            EngineError::GameOver | EngineError::NotPlayerCommand { .. } => {
                ErrorSeverity::Impossible
            }
            EngineError::ChainTooLong { .. }
            | EngineError::PlayerNotFound
            | EngineError::PlayerCannotAct { .. } => ErrorSeverity::Internal,
            EngineError::Internal { error, .. } => error.severity(),
            EngineError::Ai(error) => error.severity(),
            EngineError::State(error) => error.severity(),
            EngineError::Oracle(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            EngineError::ChainTooLong { .. } => "ENGINE_CHAIN_TOO_LONG",
            EngineError::PlayerNotFound => "ENGINE_PLAYER_NOT_FOUND",
            EngineError::GameOver => "ENGINE_GAME_OVER",
            EngineError::NotPlayerCommand { .. } => "ENGINE_NOT_PLAYER_COMMAND",
            EngineError::PlayerCannotAct { .. } => "ENGINE_PLAYER_CANNOT_ACT",
            EngineError::Internal { error, .. } => error.error_code(),
            EngineError::Ai(error) => error.error_code(),
            EngineError::State(error) => error.error_code(),
            EngineError::Oracle(error) => error.error_code(),
        }
    }
}
