//! Hit determination.

/// Defender AC as seen by a single attack.
///
/// Non-negative AC is used as-is. Negative AC is replaced by
/// `-uniform(1, |AC|)`; `evasion_roll` is that uniform draw and is ignored
/// for non-negative AC.
pub fn effective_ac(ac: i32, evasion_roll: u32) -> i32 {
    if ac >= 0 {
        ac
    } else {
        let bound = ac.unsigned_abs();
        -(evasion_roll.clamp(1, bound) as i32)
    }
}

/// Number the hit roll must fall strictly below.
///
/// # Formula
///
/// ```text
/// target = base_target + AC' + attacker_level, clamped to >= 1
/// ```
pub fn target_number(base_target: i32, effective_ac: i32, attacker_level: u32) -> i32 {
    (base_target + effective_ac + attacker_level as i32).max(1)
}

/// Returns `true` if `hit_roll` lands against `target`.
pub fn check_hit(hit_roll: u32, target: i32) -> bool {
    (hit_roll as i64) < target as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ac_seven_level_one_needs_under_eighteen() {
        let target = target_number(10, effective_ac(7, 0), 1);
        assert_eq!(target, 18);
        assert!(check_hit(17, target));
        assert!(!check_hit(18, target));
    }

    #[test]
    fn negative_ac_is_randomised_within_its_magnitude() {
        assert_eq!(effective_ac(-4, 3), -3);
        assert_eq!(effective_ac(-4, 9), -4);
        assert_eq!(effective_ac(-4, 0), -1);
    }

    #[test]
    fn target_number_never_drops_below_one() {
        let target = target_number(10, effective_ac(-40, 40), 1);
        assert_eq!(target, 1);
        assert!(!check_hit(1, target));
    }
}
