//! Actor-related state types.
//!
//! This module contains all types specific to actors:
//! - ActorState: main actor structure
//! - Equipment: slot assignments for carried items
//! - Inventory: letter-indexed item storage

pub mod equipment;
pub mod inventory;

pub use equipment::{EquipSlot, Equipment};
pub use inventory::{Inventory, InventorySlot};

use super::{EnergyMeter, EntityId, Fighter, Position};
use crate::ai::AiState;

/// Draw layering hint consumed by renderers; corpses sit below items and actors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RenderOrder {
    Corpse,
    Item,
    Actor,
}

/// Experience level of an actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Level {
    pub level: u32,
    pub xp: u32,
}

impl Level {
    pub const fn new(level: u32) -> Self {
        Self { level, xp: 0 }
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Complete actor state.
///
/// # Invariants
///
/// - A living actor has a `fighter` with `hp > 0`; corpses keep their fighter at
///   `hp == 0` but lose `ai`, `blocks_movement` and energy refill.
/// - Every id in `inventory` refers to an item whose `position` is `None`.
/// - Every id in `equipment` is also present in `inventory`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorState {
    pub id: EntityId,
    pub name: String,
    pub glyph: char,
    pub position: Position,
    pub blocks_movement: bool,
    pub render_order: RenderOrder,

    pub fighter: Option<Fighter>,
    pub energy: EnergyMeter,
    pub ai: Option<AiState>,
    pub inventory: Inventory,
    pub equipment: Equipment,
    pub level: Level,

    /// Remaining turns held by a bear trap; zero when free.
    pub trapped_turns: u32,
    /// Whether the regeneration hook may restore hit points.
    pub regenerates: bool,
    /// Experience granted to whoever kills this actor.
    pub xp_award: u32,
}

impl ActorState {
    pub fn new(
        id: EntityId,
        name: impl Into<String>,
        glyph: char,
        position: Position,
        energy: EnergyMeter,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            glyph,
            position,
            blocks_movement: true,
            render_order: RenderOrder::Actor,
            fighter: None,
            energy,
            ai: None,
            inventory: Inventory::empty(),
            equipment: Equipment::new(),
            level: Level::default(),
            trapped_turns: 0,
            regenerates: false,
            xp_award: 0,
        }
    }

    #[must_use]
    pub fn with_fighter(mut self, fighter: Fighter) -> Self {
        self.fighter = Some(fighter);
        self
    }

    #[must_use]
    pub fn with_ai(mut self, ai: AiState) -> Self {
        self.ai = Some(ai);
        self
    }

    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Quick check if actor is alive.
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.fighter.as_ref().is_some_and(|fighter| !fighter.is_dead())
    }

    pub fn is_trapped(&self) -> bool {
        self.trapped_turns > 0
    }

    pub fn is_player(&self) -> bool {
        self.id.is_player()
    }

    /// Name with a definite article, or "you" for the player.
    pub fn display_name(&self) -> String {
        if self.is_player() {
            "you".to_string()
        } else {
            format!("the {}", self.name)
        }
    }

    /// Capitalised form of [`display_name`](Self::display_name) for sentence starts.
    pub fn subject_name(&self) -> String {
        capitalize(&self.display_name())
    }

    /// Mutable access to the AI slot's current state, if any.
    pub fn ai_mut(&mut self) -> Option<&mut AiState> {
        self.ai.as_mut()
    }
}

pub(crate) fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::DiceSpec;

    #[test]
    fn display_names_depend_on_player() {
        let player = ActorState::new(
            EntityId::PLAYER,
            "hero",
            '@',
            Position::ORIGIN,
            EnergyMeter::new(100, 100),
        );
        let orc = ActorState::new(
            EntityId(3),
            "orc",
            'o',
            Position::ORIGIN,
            EnergyMeter::new(100, 100),
        );
        assert_eq!(player.subject_name(), "You");
        assert_eq!(orc.subject_name(), "The orc");
        assert_eq!(orc.display_name(), "the orc");
    }

    #[test]
    fn actor_without_fighter_is_not_alive() {
        let statue = ActorState::new(
            EntityId(7),
            "statue",
            '\'',
            Position::ORIGIN,
            EnergyMeter::new(0, 100),
        );
        assert!(!statue.is_alive());

        let golem = statue.with_fighter(Fighter::new(5, 0, 5, vec![DiceSpec::new(1, 2)]));
        assert!(golem.is_alive());
    }
}
