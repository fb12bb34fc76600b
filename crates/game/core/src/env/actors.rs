//! Actor template definitions and oracle interface.
//!
//! This module provides `ActorTemplate` for defining all actors (including the
//! player) in a data-driven way. Templates can be deserialized from RON files
//! and spawned into `ActorState` instances.
//!
//! The `ActorOracle` trait allows runtime systems to provide actor templates
//! by key (e.g., "player", "orc") and the weighted spawn table of a depth.

use crate::ai::{AiBehavior, AiState};
use crate::combat::DiceSpec;
use crate::config::GameConfig;
use crate::state::{ActorState, EnergyMeter, EntityId, Fighter, Level, Position};

/// Actor template defining every `ActorState` field except id and position.
///
/// # Energy
///
/// `refill` falls back to `GameConfig::default_refill` when omitted. A refill
/// of 0 produces an actor that never acts.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorTemplate {
    pub name: String,
    pub glyph: char,
    pub max_hp: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub power: i32,
    pub ac: i32,
    /// Natural attacks used when no weapon is wielded.
    pub attacks: Vec<DiceSpec>,
    #[cfg_attr(feature = "serde", serde(default = "default_level"))]
    pub level: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub refill: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub behavior: AiBehavior,
    #[cfg_attr(feature = "serde", serde(default))]
    pub xp_award: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub regenerates: bool,
}

#[cfg(feature = "serde")]
fn default_level() -> u32 {
    1
}

impl ActorTemplate {
    /// Create a new actor from this template with the given id and position.
    ///
    /// The actor starts with an empty energy meter, so it first acts after the
    /// next world tick refills it. Use [`EnergyMeter::primed`] on the result to
    /// let it act immediately.
    pub fn to_actor(&self, id: EntityId, position: Position, config: &GameConfig) -> ActorState {
        let refill = self.refill.unwrap_or(config.default_refill);
        let energy = EnergyMeter::new(refill, config.energy_threshold);
        let fighter = Fighter::new(self.max_hp, self.power, self.ac, self.attacks.clone());

        let mut actor = ActorState::new(id, self.name.clone(), self.glyph, position, energy)
            .with_fighter(fighter)
            .with_level(Level::new(self.level));
        actor.ai = Some(if id.is_player() {
            AiState::PlayerProxy
        } else {
            self.behavior.initial_state()
        });
        actor.xp_award = self.xp_award;
        actor.regenerates = self.regenerates;
        actor
    }

    /// Create a builder for constructing actor templates
    pub fn builder(name: impl Into<String>, glyph: char) -> ActorTemplateBuilder {
        ActorTemplateBuilder::new(name, glyph)
    }
}

/// Builder for constructing actor templates.
pub struct ActorTemplateBuilder {
    template: ActorTemplate,
}

impl ActorTemplateBuilder {
    fn new(name: impl Into<String>, glyph: char) -> Self {
        Self {
            template: ActorTemplate {
                name: name.into(),
                glyph,
                max_hp: 1,
                power: 0,
                ac: 10,
                attacks: vec![DiceSpec::new(1, 2)],
                level: 1,
                refill: None,
                behavior: AiBehavior::default(),
                xp_award: 0,
                regenerates: false,
            },
        }
    }

    pub fn hp(mut self, max_hp: u32) -> Self {
        self.template.max_hp = max_hp;
        self
    }

    pub fn power(mut self, power: i32) -> Self {
        self.template.power = power;
        self
    }

    pub fn ac(mut self, ac: i32) -> Self {
        self.template.ac = ac;
        self
    }

    pub fn attacks(mut self, attacks: Vec<DiceSpec>) -> Self {
        self.template.attacks = attacks;
        self
    }

    pub fn level(mut self, level: u32) -> Self {
        self.template.level = level;
        self
    }

    pub fn refill(mut self, refill: u32) -> Self {
        self.template.refill = Some(refill);
        self
    }

    pub fn behavior(mut self, behavior: AiBehavior) -> Self {
        self.template.behavior = behavior;
        self
    }

    pub fn xp_award(mut self, xp: u32) -> Self {
        self.template.xp_award = xp;
        self
    }

    pub fn regenerates(mut self, regenerates: bool) -> Self {
        self.template.regenerates = regenerates;
        self
    }

    /// Build the actor template
    pub fn build(self) -> ActorTemplate {
        self.template
    }
}

/// Weighted entry in a depth-banded spawn table.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnEntry {
    /// Template key understood by [`ActorOracle::template`].
    pub key: String,
    pub weight: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub min_depth: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_depth: Option<u32>,
}

impl SpawnEntry {
    pub fn allows_depth(&self, depth: u32) -> bool {
        depth >= self.min_depth && self.max_depth.is_none_or(|max| depth <= max)
    }
}

/// Picks the entry whose cumulative weight band contains `roll`.
///
/// `roll` is expected in `[0, total_weight)`; returns `None` for an empty or
/// zero-weight table.
pub fn pick_weighted(entries: &[SpawnEntry], roll: u32) -> Option<&SpawnEntry> {
    let mut remaining = roll;
    for entry in entries.iter().filter(|entry| entry.weight > 0) {
        if remaining < entry.weight {
            return Some(entry);
        }
        remaining -= entry.weight;
    }
    None
}

pub fn total_weight(entries: &[SpawnEntry]) -> u32 {
    entries.iter().map(|entry| entry.weight).sum()
}

/// Oracle providing actor template data for entity creation.
///
/// Runtime systems implement this to provide static actor data from
/// configuration files.
pub trait ActorOracle: Send + Sync {
    /// Returns the actor template for a given key (e.g. "player", "orc").
    fn template(&self, key: &str) -> Option<ActorTemplate>;

    /// Monsters that may appear at `depth`, already filtered by depth band.
    fn spawn_table(&self, depth: u32) -> Vec<SpawnEntry>;

    /// Returns all available template keys.
    fn all_keys(&self) -> Vec<String> {
        Vec::new()
    }
}
