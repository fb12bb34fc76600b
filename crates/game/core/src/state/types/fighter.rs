//! Combat statistics owned by an actor.

use crate::combat::DiceSpec;

/// Hit points and combat stats of an actor.
///
/// # Invariants
///
/// - `0 <= hp <= max_hp` at all times; [`take_damage`](Self::take_damage) and
///   [`heal`](Self::heal) are the only mutators of `hp` and both clamp.
/// - Lower `base_ac` means better armour. Effective values that include
///   equipment are derived by [`ActorState`](super::ActorState), never stored here.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fighter {
    hp: u32,
    max_hp: u32,
    pub base_power: i32,
    pub base_ac: i32,
    /// Bare-handed (natural) attacks, rolled in order on every melee attack.
    pub attacks: Vec<DiceSpec>,
}

impl Fighter {
    pub fn new(max_hp: u32, base_power: i32, base_ac: i32, attacks: Vec<DiceSpec>) -> Self {
        Self {
            hp: max_hp,
            max_hp,
            base_power,
            base_ac,
            attacks,
        }
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    pub fn is_dead(&self) -> bool {
        self.hp == 0
    }

    pub fn is_full_health(&self) -> bool {
        self.hp == self.max_hp
    }

    /// Reduces hp by `amount`, clamping at zero. Returns the hp actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.hp);
        self.hp -= lost;
        lost
    }

    /// Restores up to `amount` hp, clamping at `max_hp`. Returns the hp actually gained.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let gained = amount.min(self.max_hp - self.hp);
        self.hp += gained;
        gained
    }

    /// Raises the hp ceiling; current hp follows by the same amount.
    pub fn raise_max_hp(&mut self, amount: u32) {
        self.max_hp = self.max_hp.saturating_add(amount);
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
    }

    /// Restores hp to the maximum.
    pub fn restore(&mut self) {
        self.hp = self.max_hp;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn fighter(max_hp: u32) -> Fighter {
        Fighter::new(max_hp, 0, 7, vec![DiceSpec::new(1, 4)])
    }

    #[test]
    fn damage_clamps_at_zero() {
        let mut f = fighter(10);
        assert_eq!(f.take_damage(25), 10);
        assert_eq!(f.hp(), 0);
        assert!(f.is_dead());
    }

    #[test]
    fn heal_clamps_at_max() {
        let mut f = fighter(10);
        f.take_damage(3);
        assert_eq!(f.heal(50), 3);
        assert!(f.is_full_health());
    }

    proptest! {
        #[test]
        fn hp_stays_in_range(max_hp in 1u32..200, ops in proptest::collection::vec((any::<bool>(), 0u32..300), 0..40)) {
            let mut f = fighter(max_hp);
            for (is_damage, amount) in ops {
                if is_damage {
                    f.take_damage(amount);
                } else {
                    f.heal(amount);
                }
                prop_assert!(f.hp() <= f.max_hp());
            }
        }
    }
}
