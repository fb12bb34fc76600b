//! Combat narration.

use super::result::AttackResult;
use crate::state::ActorState;

/// Picks the verb form agreeing with `actor` ("you hit" / "the orc hits").
pub fn conjugate<'a>(actor: &ActorState, second_person: &'a str, third_person: &'a str) -> &'a str {
    if actor.is_player() {
        second_person
    } else {
        third_person
    }
}

/// Sentence describing one attack from the point of view of the player.
pub fn attack_message(attacker: &ActorState, target: &ActorState, result: &AttackResult) -> String {
    let subject = attacker.subject_name();
    let object = target.display_name();
    if result.is_hit() {
        format!(
            "{subject} {} {object} for {} damage.",
            conjugate(attacker, "hit", "hits"),
            result.damage
        )
    } else {
        format!("{subject} {} {object}.", conjugate(attacker, "miss", "misses"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::AttackOutcome;
    use crate::state::{EnergyMeter, EntityId, Position};

    fn actor(id: u32, name: &str) -> ActorState {
        ActorState::new(EntityId(id), name, 'x', Position::ORIGIN, EnergyMeter::new(100, 100))
    }

    fn result(outcome: AttackOutcome, damage: u32) -> AttackResult {
        AttackResult {
            outcome,
            hit_roll: 5,
            target: 10,
            damage,
        }
    }

    #[test]
    fn message_variants_follow_player_role() {
        let player = actor(0, "hero");
        let orc = actor(1, "orc");
        let goblin = actor(2, "goblin");

        assert_eq!(
            attack_message(&player, &orc, &result(AttackOutcome::Hit, 4)),
            "You hit the orc for 4 damage."
        );
        assert_eq!(
            attack_message(&orc, &player, &result(AttackOutcome::Miss, 0)),
            "The orc misses you."
        );
        assert_eq!(
            attack_message(&orc, &goblin, &result(AttackOutcome::Hit, 2)),
            "The orc hits the goblin for 2 damage."
        );
    }
}
