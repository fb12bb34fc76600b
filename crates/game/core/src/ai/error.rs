use crate::env::OracleError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::EntityId;

/// Failures while choosing a command for an actor.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AiError {
    /// The player's commands come from input, never from the AI.
    #[error("actor {0} is controlled by the player")]
    PlayerControlled(EntityId),

    #[error("actor {0} not found")]
    ActorNotFound(EntityId),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for AiError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            AiError::PlayerControlled(_) | AiError::ActorNotFound(_) => ErrorSeverity::Internal,
            AiError::Oracle(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AiError::PlayerControlled(_) => "AI_PLAYER_CONTROLLED",
            AiError::ActorNotFound(_) => "AI_ACTOR_NOT_FOUND",
            AiError::Oracle(error) => error.error_code(),
        }
    }
}
