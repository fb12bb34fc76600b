//! Combat resolution system.
//!
//! This module provides pure functions for resolving melee attacks. Every
//! function that depends on chance takes its rolls as explicit arguments; the
//! only place rolls are drawn is [`roll_attack`], which reads them from a
//! [`RollContext`](crate::env::RollContext) in a fixed order.
//!
//! # Core Functions
//!
//! - `target_number`: `base + AC' + attacker level`, never below 1
//! - `check_hit`: a hit lands when the roll is strictly below the target
//! - `mitigate_damage`: negative AC soaks damage, never below 1
//! - `resolve_attack`: complete attack resolution from a set of rolls

pub mod damage;
pub mod dice;
pub mod hit;
pub mod message;
pub mod profile;
pub mod result;

pub use damage::{mitigate_damage, raw_damage};
pub use dice::DiceSpec;
pub use hit::{check_hit, effective_ac, target_number};
pub use message::{attack_message, conjugate};
pub use profile::{AttackProfile, AttackStyle, CombatStats, attack_profile, combat_stats};
pub use result::{AttackOutcome, AttackResult, AttackRolls, resolve_attack, roll_attack};
