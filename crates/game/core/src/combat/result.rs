//! Combat result types and attack resolution.

use super::damage::{mitigate_damage, raw_damage};
use super::dice::DiceSpec;
use super::hit::{check_hit, effective_ac, target_number};
use super::profile::CombatStats;
use crate::config::GameConfig;
use crate::env::RollContext;

/// Outcome of an attack attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackOutcome {
    /// Attack missed the target.
    Miss,
    /// Attack hit the target.
    Hit,
}

/// Every random input of one attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct AttackRolls {
    /// Hit die result in `[1, hit_die_sides]`.
    pub hit_roll: u32,
    /// Draw used to randomise a negative defender AC.
    pub evasion_roll: u32,
    /// Total of the attack's damage dice.
    pub dice_total: u32,
    /// Draw used to soak damage against a negative defender AC.
    pub reduction_roll: u32,
}

/// Result of a combat resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackResult {
    pub outcome: AttackOutcome,
    pub hit_roll: u32,
    pub target: i32,
    /// Mitigated damage; zero on a miss.
    pub damage: u32,
}

impl AttackResult {
    pub fn is_hit(&self) -> bool {
        self.outcome == AttackOutcome::Hit
    }
}

/// Resolve a complete attack (hit check + damage) from explicit rolls.
pub fn resolve_attack(
    config: &GameConfig,
    attacker: &CombatStats,
    defender: &CombatStats,
    rolls: AttackRolls,
) -> AttackResult {
    let ac = effective_ac(defender.ac, rolls.evasion_roll);
    let target = target_number(config.base_target, ac, attacker.level);

    if !check_hit(rolls.hit_roll, target) {
        return AttackResult {
            outcome: AttackOutcome::Miss,
            hit_roll: rolls.hit_roll,
            target,
            damage: 0,
        };
    }

    let damage = mitigate_damage(
        raw_damage(rolls.dice_total, attacker.power),
        defender.ac,
        rolls.reduction_roll,
    );
    AttackResult {
        outcome: AttackOutcome::Hit,
        hit_roll: rolls.hit_roll,
        target,
        damage,
    }
}

/// Draws the rolls for one attack and resolves it.
///
/// Draw order: hit die, evasion (negative AC only), then on a hit the damage
/// dice followed by the soak roll (negative AC only).
pub fn roll_attack(
    config: &GameConfig,
    attacker: &CombatStats,
    defender: &CombatStats,
    dice: &DiceSpec,
    ctx: &mut RollContext<'_>,
) -> AttackResult {
    let negative_ac = defender.ac < 0;
    let mut rolls = AttackRolls {
        hit_roll: ctx.roll_die(config.hit_die_sides),
        ..AttackRolls::default()
    };
    if negative_ac {
        rolls.evasion_roll = ctx.range(1, defender.ac.unsigned_abs());
    }

    let ac = effective_ac(defender.ac, rolls.evasion_roll);
    if check_hit(rolls.hit_roll, target_number(config.base_target, ac, attacker.level)) {
        rolls.dice_total = dice.roll(ctx);
        if negative_ac {
            rolls.reduction_roll = ctx.range(1, defender.ac.unsigned_abs());
        }
    }

    resolve_attack(config, attacker, defender, rolls)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(power: i32, ac: i32, level: u32) -> CombatStats {
        CombatStats { power, ac, level }
    }

    #[test]
    fn scripted_rolls_hit_and_miss_at_the_boundary() {
        let config = GameConfig::default();
        let attacker = stats(0, 10, 1);
        let defender = stats(0, 7, 1);

        let hit = resolve_attack(
            &config,
            &attacker,
            &defender,
            AttackRolls {
                hit_roll: 17,
                dice_total: 3,
                ..AttackRolls::default()
            },
        );
        assert_eq!(hit.target, 18);
        assert!(hit.is_hit());
        assert_eq!(hit.damage, 3);

        let miss = resolve_attack(
            &config,
            &attacker,
            &defender,
            AttackRolls {
                hit_roll: 18,
                dice_total: 3,
                ..AttackRolls::default()
            },
        );
        assert_eq!(miss.outcome, AttackOutcome::Miss);
        assert_eq!(miss.damage, 0);
    }

    #[test]
    fn power_adds_to_dice_before_soak() {
        let config = GameConfig::default();
        let result = resolve_attack(
            &config,
            &stats(2, 10, 1),
            &stats(0, -3, 1),
            AttackRolls {
                hit_roll: 1,
                evasion_roll: 3,
                dice_total: 4,
                reduction_roll: 3,
            },
        );
        // target = 10 - 3 + 1 = 8, damage = (4 + 2) - 3
        assert_eq!(result.target, 8);
        assert_eq!(result.damage, 3);
    }
}
