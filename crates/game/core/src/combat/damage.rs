//! Damage calculation.

/// Damage before mitigation: rolled dice total plus attacker power, floored at 0.
pub fn raw_damage(dice_total: u32, power: i32) -> u32 {
    (dice_total as i64 + power as i64).max(0) as u32
}

/// Applies armor soak.
///
/// Non-negative AC leaves damage unchanged. Negative AC subtracts
/// `reduction_roll` (a draw from `uniform(1, |AC|)`) but a landed blow always
/// deals at least 1, even one whose raw damage was already 0.
pub fn mitigate_damage(damage: u32, defender_ac: i32, reduction_roll: u32) -> u32 {
    if defender_ac >= 0 {
        return damage;
    }
    let reduction = reduction_roll.clamp(1, defender_ac.unsigned_abs());
    damage.saturating_sub(reduction).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn heavy_armor_cannot_zero_a_single_point() {
        for roll in 1..=20 {
            assert_eq!(mitigate_damage(1, -20, roll), 1);
        }
    }

    #[test]
    fn feeble_blow_still_scratches_negative_ac() {
        let damage = raw_damage(2, -5);
        assert_eq!(damage, 0);
        assert_eq!(mitigate_damage(damage, -3, 2), 1);
        assert_eq!(mitigate_damage(damage, 4, 1), 0);
    }

    #[test]
    fn positive_ac_does_not_soak() {
        assert_eq!(mitigate_damage(6, 3, 3), 6);
        assert_eq!(raw_damage(4, -10), 0);
        assert_eq!(raw_damage(4, 2), 6);
    }

    proptest! {
        #[test]
        fn mitigated_damage_is_at_least_one(
            damage in 1u32..1000,
            ac in -100i32..0,
            roll in 0u32..200,
        ) {
            let mitigated = mitigate_damage(damage, ac, roll);
            prop_assert!(mitigated >= 1);
            prop_assert!(mitigated <= damage);
        }
    }
}
