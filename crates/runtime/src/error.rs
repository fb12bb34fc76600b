//! Unified error type surfaced by the session.
//!
//! Wraps failures from content loading, floor planning and the turn engine
//! so clients can bubble them up with consistent context.
use delve_core::{EngineError, ErrorSeverity, GameError, StateError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("failed to load content: {0:#}")]
    Content(anyhow::Error),

    #[error("content has no '{0}' actor template")]
    MissingTemplate(String),

    #[error("no floor layout allows depth {0}")]
    NoLayout(u32),

    #[error("floor '{0}' has no tile for the player to arrive on")]
    NoArrival(String),

    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl RuntimeError {
    /// True for errors that end the game rather than signal a bug.
    pub fn is_game_over(&self) -> bool {
        matches!(self, RuntimeError::Engine(EngineError::GameOver))
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::Engine(error) => error.severity(),
            RuntimeError::State(error) => error.severity(),
            _ => ErrorSeverity::Fatal,
        }
    }
}
