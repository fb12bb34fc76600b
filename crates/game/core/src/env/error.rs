//! Oracle access errors.
//!
//! Errors related to oracle availability and data access.

use crate::error::{ErrorSeverity, GameError};
use crate::state::ItemHandle;

/// Errors that occur when accessing Oracle data.
///
/// A missing oracle means the host wired the engine incorrectly and is fatal;
/// a missing definition means some state refers to content that does not exist.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    /// MapOracle is not available in the environment.
    #[error("MapOracle not available")]
    MapNotAvailable,

    /// ItemOracle is not available in the environment.
    #[error("ItemOracle not available")]
    ItemsNotAvailable,

    /// ActorOracle is not available in the environment.
    #[error("ActorOracle not available")]
    ActorsNotAvailable,

    /// PathOracle is not available in the environment.
    #[error("PathOracle not available")]
    PathNotAvailable,

    /// VisionOracle is not available in the environment.
    #[error("VisionOracle not available")]
    VisionNotAvailable,

    /// RngOracle is not available in the environment.
    #[error("RngOracle not available")]
    RngNotAvailable,

    /// Item definition was not found by handle.
    #[error("item definition {0:?} not found")]
    ItemNotFound(ItemHandle),

    /// Actor template was not found by key.
    #[error("actor template '{0}' not found")]
    ActorTemplateNotFound(String),
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        use OracleError::*;
        match self {
            // Missing oracles are fatal - engine cannot proceed
            MapNotAvailable | ItemsNotAvailable | ActorsNotAvailable | PathNotAvailable
            | VisionNotAvailable | RngNotAvailable => ErrorSeverity::Fatal,

            // Dangling content references are bugs in state or data
            ItemNotFound(_) | ActorTemplateNotFound(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            MapNotAvailable => "ORACLE_MAP_NOT_AVAILABLE",
            ItemsNotAvailable => "ORACLE_ITEMS_NOT_AVAILABLE",
            ActorsNotAvailable => "ORACLE_ACTORS_NOT_AVAILABLE",
            PathNotAvailable => "ORACLE_PATH_NOT_AVAILABLE",
            VisionNotAvailable => "ORACLE_VISION_NOT_AVAILABLE",
            RngNotAvailable => "ORACLE_RNG_NOT_AVAILABLE",
            ItemNotFound(_) => "ORACLE_ITEM_NOT_FOUND",
            ActorTemplateNotFound(_) => "ORACLE_ACTOR_TEMPLATE_NOT_FOUND",
        }
    }
}
