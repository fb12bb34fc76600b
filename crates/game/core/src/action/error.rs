//! Command failures.
//!
//! `Impossible`-class variants are the normal "you can't do that" answers of
//! the rules; their `Display` text is what the player reads. Everything else
//! indicates inconsistent state or wiring and must propagate.

use crate::env::OracleError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, EquipSlot};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    // ===== impossible: reported to the player, no state change =====
    #[error("That way is out of bounds.")]
    OutOfBounds,

    #[error("That way is blocked.")]
    Blocked,

    #[error("You are stuck fast.")]
    Trapped,

    #[error("There is nothing there to attack.")]
    NoTarget,

    #[error("There is nothing here to pick up.")]
    NothingHere,

    #[error("Your inventory is full.")]
    InventoryFull,

    #[error("You are not carrying that.")]
    NotCarried,

    #[error("That cannot be equipped.")]
    NotEquippable,

    #[error(
        "That goes in the {} slot, not the {} slot.",
        .expected.describe(),
        .requested.describe()
    )]
    SlotMismatch {
        expected: EquipSlot,
        requested: EquipSlot,
    },

    #[error("That cannot be used.")]
    NotUsable,

    #[error("You are already at full health.")]
    AlreadyFullHealth,

    #[error("No enemy is close enough to target.")]
    NoTargetInRange,

    #[error("You must select a target.")]
    TargetRequired,

    #[error("You cannot target an area that you cannot see.")]
    TargetNotVisible,

    #[error("There are no stairs here.")]
    NoStairsHere,

    // ===== internal: inconsistent state or wiring =====
    #[error("actor {0} not found")]
    ActorNotFound(EntityId),

    #[error("actor {0} is dead and cannot act")]
    ActorIsDead(EntityId),

    #[error("item {0} not found")]
    ItemNotFound(EntityId),

    #[error("actor {actor} has no {component} component")]
    MissingComponent {
        actor: EntityId,
        component: &'static str,
    },

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        use ActionError::*;
        match self {
            OutOfBounds | Blocked | Trapped | NoTarget | NothingHere | InventoryFull
            | NotCarried | NotEquippable | SlotMismatch { .. } | NotUsable | AlreadyFullHealth
            | NoTargetInRange | TargetRequired | TargetNotVisible | NoStairsHere => {
                ErrorSeverity::Impossible
            }
            ActorNotFound(_) | ActorIsDead(_) | ItemNotFound(_) | MissingComponent { .. } => {
                ErrorSeverity::Internal
            }
            Oracle(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        use ActionError::*;
        match self {
            OutOfBounds => "ACTION_OUT_OF_BOUNDS",
            Blocked => "ACTION_BLOCKED",
            Trapped => "ACTION_TRAPPED",
            NoTarget => "ACTION_NO_TARGET",
            NothingHere => "ACTION_NOTHING_HERE",
            InventoryFull => "ACTION_INVENTORY_FULL",
            NotCarried => "ACTION_NOT_CARRIED",
            NotEquippable => "ACTION_NOT_EQUIPPABLE",
            SlotMismatch { .. } => "ACTION_SLOT_MISMATCH",
            NotUsable => "ACTION_NOT_USABLE",
            AlreadyFullHealth => "ACTION_ALREADY_FULL_HEALTH",
            NoTargetInRange => "ACTION_NO_TARGET_IN_RANGE",
            TargetRequired => "ACTION_TARGET_REQUIRED",
            TargetNotVisible => "ACTION_TARGET_NOT_VISIBLE",
            NoStairsHere => "ACTION_NO_STAIRS_HERE",
            ActorNotFound(_) => "ACTION_ACTOR_NOT_FOUND",
            ActorIsDead(_) => "ACTION_ACTOR_IS_DEAD",
            ItemNotFound(_) => "ACTION_ITEM_NOT_FOUND",
            MissingComponent { .. } => "ACTION_MISSING_COMPONENT",
            Oracle(error) => error.error_code(),
        }
    }
}

impl ActionError {
    /// Expected game condition rather than a bug.
    pub fn is_impossible(&self) -> bool {
        self.severity().is_recoverable()
    }
}
