use std::collections::{BTreeMap, BTreeSet};

use super::{EntityId, Position};

/// Mechanism triggered when an actor steps on a trap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TrapKind {
    /// Holds the victim in place for a few turns.
    BearTrap,
    /// Fires a dart for light damage.
    Dart,
    /// Single-use; paralyzes the victim.
    SleepingGas,
    /// Single-use; confuses the victim.
    ConfusionGas,
}

impl TrapKind {
    pub fn describe(self) -> &'static str {
        match self {
            TrapKind::BearTrap => "bear trap",
            TrapKind::Dart => "dart trap",
            TrapKind::SleepingGas => "sleeping gas trap",
            TrapKind::ConfusionGas => "confusion gas trap",
        }
    }

    pub fn is_single_use(self) -> bool {
        matches!(self, TrapKind::SleepingGas | TrapKind::ConfusionGas)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrapState {
    pub kind: TrapKind,
    pub armed: bool,
    pub hidden: bool,
}

impl TrapState {
    pub fn hidden(kind: TrapKind) -> Self {
        Self {
            kind,
            armed: true,
            hidden: true,
        }
    }
}

/// Which way a staircase leads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StairDirection {
    Down,
    Up,
}

/// Floor transition requested by a staircase and carried out by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FloorChange {
    pub actor: EntityId,
    pub from_depth: u32,
    pub to_depth: u32,
    pub direction: StairDirection,
}

/// Aggregated world-level state layered on top of the static map.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldState {
    /// Current dungeon depth, starting at 1.
    pub depth: u32,
    pub traps: BTreeMap<Position, TrapState>,
    /// Tiles in the player's field of view, as last reported by the vision collaborator.
    pub visible: BTreeSet<Position>,
    pub pending_floor: Option<FloorChange>,
}

impl WorldState {
    pub fn new(depth: u32) -> Self {
        Self {
            depth,
            traps: BTreeMap::new(),
            visible: BTreeSet::new(),
            pending_floor: None,
        }
    }

    pub fn is_visible(&self, position: Position) -> bool {
        self.visible.contains(&position)
    }

    pub fn armed_trap(&self, position: Position) -> Option<&TrapState> {
        self.traps.get(&position).filter(|trap| trap.armed)
    }
}

impl Default for WorldState {
    fn default() -> Self {
        Self::new(1)
    }
}
