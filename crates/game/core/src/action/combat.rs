//! Attack and Die.

use super::{ActionError, Command, CommandContext, CommandTransition, Outcome, living_actor};
use crate::combat::{attack_message, attack_profile, combat_stats, conjugate, roll_attack};
use crate::state::{Direction, EntityId, GameState, RenderOrder};

/// Melee attack against whoever stands one step away.
///
/// Uses the wielded weapon's dice when there is one, otherwise the natural
/// attack list of the fighter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackCommand {
    pub actor: EntityId,
    pub direction: Direction,
}

impl AttackCommand {
    pub fn new(actor: EntityId, direction: Direction) -> Self {
        Self { actor, direction }
    }

    fn target(&self, state: &GameState) -> Result<EntityId, ActionError> {
        let actor = living_actor(state, self.actor)?;
        state
            .actor_at(actor.position.step(self.direction))
            .map(|target| target.id)
            .ok_or(ActionError::NoTarget)
    }
}

impl CommandTransition for AttackCommand {
    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, _ctx: &CommandContext<'_>) -> Result<(), ActionError> {
        let actor = living_actor(state, self.actor)?;
        if actor.fighter.is_none() {
            return Err(ActionError::MissingComponent {
                actor: self.actor,
                component: "fighter",
            });
        }
        self.target(state).map(|_| ())
    }

    fn apply(
        &self,
        state: &mut GameState,
        ctx: &mut CommandContext<'_>,
    ) -> Result<Outcome, ActionError> {
        let target_id = self.target(state)?;
        if target_id == self.actor {
            let actor = state.actor(self.actor)?;
            let text = format!(
                "{} {} at the air.",
                actor.subject_name(),
                conjugate(actor, "flail", "flails")
            );
            return Ok(Outcome::new()
                .with_message(text)
                .then(Command::wait(self.actor)));
        }

        let items = ctx.env.items()?;
        let profile = attack_profile(state, self.actor, items)?;
        let defense = combat_stats(state, target_id, items)?;

        let mut outcome = Outcome::new();
        for dice in &profile.attacks {
            let result = roll_attack(ctx.config, &profile.stats, &defense, dice, &mut ctx.rolls);

            let text = attack_message(state.actor(self.actor)?, state.actor(target_id)?, &result);
            outcome.message(text);

            if result.is_hit() {
                let target = state.actor_mut(target_id)?;
                let fighter = target.fighter.as_mut().ok_or(ActionError::MissingComponent {
                    actor: target_id,
                    component: "fighter",
                })?;
                fighter.take_damage(result.damage);
                if fighter.is_dead() {
                    outcome.follow_up(Command::die(target_id, Some(self.actor)));
                    break;
                }
            }
        }
        Ok(outcome)
    }
}

/// Turns an actor into a corpse.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DieCommand {
    pub victim: EntityId,
    /// Entity credited with the kill; `None` for traps and other hazards.
    pub cause: Option<EntityId>,
}

impl DieCommand {
    pub fn new(victim: EntityId, cause: Option<EntityId>) -> Self {
        Self { victim, cause }
    }

    fn award_experience(
        &self,
        state: &mut GameState,
        ctx: &CommandContext<'_>,
        xp: u32,
        outcome: &mut Outcome,
    ) -> Result<(), ActionError> {
        let Some(killer_id) = self.cause.filter(|cause| *cause != self.victim) else {
            return Ok(());
        };
        let Some(killer) = state.entities.actor_mut(killer_id) else {
            return Ok(());
        };
        if !killer.is_alive() || xp == 0 {
            return Ok(());
        }

        killer.level.xp = killer.level.xp.saturating_add(xp);
        if killer.is_player() {
            outcome.message(format!("You gain {xp} experience points."));
        }

        loop {
            let needed = ctx.config.xp_to_next(killer.level.level);
            if killer.level.xp < needed {
                break;
            }
            killer.level.xp -= needed;
            killer.level.level += 1;
            if let Some(fighter) = killer.fighter.as_mut() {
                fighter.raise_max_hp(ctx.config.level_up_hp);
                fighter.restore();
            }
            if killer.is_player() {
                outcome.message(format!(
                    "Your battle skills grow stronger! You reach level {}!",
                    killer.level.level
                ));
            } else {
                outcome.message(format!("{} looks more experienced.", killer.subject_name()));
            }
        }
        Ok(())
    }
}

impl CommandTransition for DieCommand {
    fn actor(&self) -> EntityId {
        self.victim
    }

    fn pre_validate(&self, state: &GameState, _ctx: &CommandContext<'_>) -> Result<(), ActionError> {
        state.actor(self.victim).map(|_| ())
    }

    fn apply(
        &self,
        state: &mut GameState,
        ctx: &mut CommandContext<'_>,
    ) -> Result<Outcome, ActionError> {
        let mut outcome = Outcome::new();
        let victim = state.actor_mut(self.victim)?;
        if victim.render_order == RenderOrder::Corpse {
            return Ok(outcome);
        }

        outcome.message(if victim.is_player() {
            "You died!".to_string()
        } else {
            format!("{} is dead!", victim.subject_name())
        });

        if let Some(fighter) = victim.fighter.as_mut() {
            let remaining = fighter.hp();
            fighter.take_damage(remaining);
        }
        victim.glyph = '%';
        victim.name = format!("remains of {}", victim.name);
        victim.render_order = RenderOrder::Corpse;
        victim.blocks_movement = false;
        victim.ai = None;
        victim.energy.drain();
        victim.trapped_turns = 0;
        victim.regenerates = false;
        let xp = victim.xp_award;
        let position = victim.position;

        // Monsters drop whatever they carried.
        if !victim.is_player() {
            let carried: Vec<EntityId> = victim.inventory.items().collect();
            victim.inventory.clear();
            victim.equipment = Default::default();
            for item_id in carried {
                if let Some(item) = state.entities.item_mut(item_id) {
                    item.position = Some(position);
                }
            }
        }

        self.award_experience(state, ctx, xp, &mut outcome)?;
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::AiState;
    use crate::env::ActorTemplate;
    use crate::state::{EquipSlot, Position};
    use crate::testing::{DAGGER, Fixture, basic_template};

    fn duel(target_hp: u32) -> (Fixture, EntityId) {
        let mut fixture = Fixture::new(5, 5);
        fixture.add_player(Position::new(1, 1));
        let orc = ActorTemplate::builder("orc", 'o')
            .hp(target_hp)
            .ac(7)
            .xp_award(35)
            .build();
        let orc_id = fixture.spawn(&orc, Position::new(2, 1));
        (fixture, orc_id)
    }

    #[test]
    fn attack_without_target_fails() {
        let (mut fixture, _) = duel(5);
        assert_eq!(
            fixture.attempt(Command::attack(EntityId::PLAYER, Direction::South)),
            Err(ActionError::NoTarget)
        );
    }

    #[test]
    fn hit_applies_damage_and_message() {
        let (mut fixture, orc) = duel(10);
        // hit roll 17 vs target 18, then 1d4 rolls 3
        fixture.rng.push([17, 3]);

        let outcome = fixture
            .attempt(Command::attack(EntityId::PLAYER, Direction::East))
            .unwrap();
        assert_eq!(outcome.messages, vec!["You hit the orc for 3 damage."]);
        assert!(outcome.follow_ups.is_empty());
        let hp = fixture.state.entities.actor(orc).unwrap().fighter.as_ref().unwrap().hp();
        assert_eq!(hp, 7);
    }

    #[test]
    fn miss_at_target_number() {
        let (mut fixture, orc) = duel(10);
        fixture.rng.push([18]);

        let outcome = fixture
            .attempt(Command::attack(EntityId::PLAYER, Direction::East))
            .unwrap();
        assert_eq!(outcome.messages, vec!["You miss the orc."]);
        assert!(fixture.state.entities.actor(orc).unwrap().fighter.as_ref().unwrap().is_full_health());
    }

    #[test]
    fn overkill_yields_exactly_one_die() {
        let (mut fixture, orc) = duel(2);
        let player = fixture.state.entities.player_mut().unwrap();
        player.fighter.as_mut().unwrap().attacks = vec![
            crate::combat::DiceSpec::new(1, 4),
            crate::combat::DiceSpec::new(1, 4),
        ];
        fixture.rng.push([1, 4]);

        let outcome = fixture
            .attempt(Command::attack(EntityId::PLAYER, Direction::East))
            .unwrap();
        assert_eq!(
            outcome.follow_ups,
            vec![Command::die(orc, Some(EntityId::PLAYER))]
        );
        let fighter = fixture.state.entities.actor(orc).unwrap().fighter.clone().unwrap();
        assert_eq!(fighter.hp(), 0);
    }

    #[test]
    fn wielded_weapon_replaces_natural_attacks() {
        let (mut fixture, orc) = duel(20);
        let dagger = fixture.give(EntityId::PLAYER, DAGGER);
        fixture
            .state
            .entities
            .player_mut()
            .unwrap()
            .equipment
            .set(EquipSlot::MainHand, Some(dagger));
        // natural attack list would be 1d4; dagger is 1d4+1
        fixture.rng.push([1, 4]);

        fixture
            .attempt(Command::attack(EntityId::PLAYER, Direction::East))
            .unwrap();
        let hp = fixture.state.entities.actor(orc).unwrap().fighter.as_ref().unwrap().hp();
        assert_eq!(hp, 15);
    }

    #[test]
    fn self_attack_becomes_flavour_and_wait() {
        let (mut fixture, _) = duel(5);
        let outcome = fixture
            .attempt(Command::attack(EntityId::PLAYER, Direction::Here))
            .unwrap();
        assert_eq!(outcome.messages, vec!["You flail at the air."]);
        assert_eq!(outcome.follow_ups, vec![Command::wait(EntityId::PLAYER)]);
    }

    #[test]
    fn die_makes_corpse_and_awards_xp() {
        let (mut fixture, orc) = duel(5);
        fixture.config.level_up_base = 30;
        fixture.config.level_up_factor = 0;

        let outcome = fixture
            .attempt(Command::die(orc, Some(EntityId::PLAYER)))
            .unwrap();
        let corpse = fixture.state.entities.actor(orc).unwrap();
        assert_eq!(corpse.glyph, '%');
        assert_eq!(corpse.name, "remains of orc");
        assert!(!corpse.blocks_movement);
        assert!(corpse.ai.is_none());
        assert_eq!(corpse.energy.refill, 0);

        let player = fixture.state.player().unwrap();
        assert_eq!(player.level.level, 2);
        assert_eq!(player.level.xp, 5);
        assert_eq!(outcome.messages[0], "The orc is dead!");
        assert!(outcome.messages.iter().any(|m| m.contains("level 2")));
    }

    #[test]
    fn self_inflicted_death_awards_nothing() {
        let (mut fixture, orc) = duel(5);
        fixture.attempt(Command::die(orc, Some(orc))).unwrap();
        assert_eq!(fixture.state.entities.actor(orc).unwrap().level.xp, 0);
    }

    #[test]
    fn monster_corpse_drops_inventory() {
        let mut fixture = Fixture::new(5, 5);
        fixture.add_player(Position::new(0, 0));
        let goblin = fixture.spawn(&basic_template("goblin"), Position::new(3, 3));
        let dagger = fixture.give(goblin, DAGGER);
        fixture.state.entities.actor_mut(goblin).unwrap().ai = Some(AiState::Stationary);

        fixture.attempt(Command::die(goblin, None)).unwrap();
        let item = fixture.state.entities.item(dagger).unwrap();
        assert_eq!(item.position, Some(Position::new(3, 3)));
        assert!(fixture.state.entities.actor(goblin).unwrap().inventory.is_empty());
    }
}
