//! Effective combat numbers derived from base stats and equipment.
//!
//! Equipment does not own any stats; bonuses are aggregated on demand from
//! the item catalog so that equipping and unequipping never drift.

use super::dice::DiceSpec;
use crate::action::ActionError;
use crate::env::{ItemDefinition, ItemOracle, OracleError};
use crate::state::{ActorState, EntityId, GameState};

/// Numbers the resolver needs from either side of an attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatStats {
    pub power: i32,
    /// Armor class after equipment; lower is better.
    pub ac: i32,
    pub level: u32,
}

/// Which attack list an attacker swings with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum AttackStyle {
    /// Natural or bare-handed attacks from the fighter.
    Melee,
    /// Dice of the wielded main-hand weapon.
    Weapon,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttackProfile {
    pub style: AttackStyle,
    pub stats: CombatStats,
    pub attacks: Vec<DiceSpec>,
}

fn equipped_definitions(
    state: &GameState,
    actor: &ActorState,
    items: &(impl ItemOracle + ?Sized),
) -> Result<Vec<ItemDefinition>, ActionError> {
    actor
        .equipment
        .iter()
        .map(|(_, item_id)| {
            let item = state
                .entities
                .item(item_id)
                .ok_or(ActionError::ItemNotFound(item_id))?;
            items
                .definition(item.handle)
                .ok_or(ActionError::Oracle(OracleError::ItemNotFound(item.handle)))
        })
        .collect()
}

/// Effective power, AC and level of `actor_id`.
pub fn combat_stats(
    state: &GameState,
    actor_id: EntityId,
    items: &(impl ItemOracle + ?Sized),
) -> Result<CombatStats, ActionError> {
    let actor = state.actor(actor_id)?;
    let fighter = actor
        .fighter
        .as_ref()
        .ok_or(ActionError::MissingComponent {
            actor: actor_id,
            component: "fighter",
        })?;

    let mut stats = CombatStats {
        power: fighter.base_power,
        ac: fighter.base_ac,
        level: actor.level.level,
    };
    for definition in equipped_definitions(state, actor, items)? {
        if let Some(equip) = definition.equip_data() {
            stats.power += equip.power_bonus;
            stats.ac -= equip.ac_bonus;
        }
    }
    Ok(stats)
}

/// Attack style, effective stats and dice list for `actor_id`.
///
/// A main-hand weapon with damage dice selects [`AttackStyle::Weapon`];
/// otherwise the fighter's natural attacks are used.
pub fn attack_profile(
    state: &GameState,
    actor_id: EntityId,
    items: &(impl ItemOracle + ?Sized),
) -> Result<AttackProfile, ActionError> {
    let stats = combat_stats(state, actor_id, items)?;
    let actor = state.actor(actor_id)?;

    let weapon = match actor.equipment.get(crate::state::EquipSlot::MainHand) {
        Some(item_id) => {
            let item = state
                .entities
                .item(item_id)
                .ok_or(ActionError::ItemNotFound(item_id))?;
            let definition = items
                .definition(item.handle)
                .ok_or(ActionError::Oracle(OracleError::ItemNotFound(item.handle)))?;
            definition.weapon_attacks().map(<[DiceSpec]>::to_vec)
        }
        None => None,
    };

    Ok(match weapon {
        Some(attacks) => AttackProfile {
            style: AttackStyle::Weapon,
            stats,
            attacks,
        },
        None => AttackProfile {
            style: AttackStyle::Melee,
            stats,
            attacks: actor
                .fighter
                .as_ref()
                .map(|fighter| fighter.attacks.clone())
                .unwrap_or_default(),
        },
    })
}
