//! UseItem and the consumable effects it delegates to.

use super::{ActionError, Command, CommandContext, CommandTransition, Outcome, living_actor};
use crate::ai::AiState;
use crate::combat::conjugate;
use crate::env::ItemEffect;
use crate::state::{ActorState, EntityId, GameState, Position};

/// Uses a carried consumable; one unit is consumed on success.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UseItemCommand {
    pub actor: EntityId,
    pub item: EntityId,
    /// Tile chosen by the user for area effects.
    pub target: Option<Position>,
}

/// Resolved target of an effect, computed once during validation.
enum EffectTarget {
    User,
    Actor(EntityId),
    Area(Position),
}

impl UseItemCommand {
    pub fn new(actor: EntityId, item: EntityId, target: Option<Position>) -> Self {
        Self {
            actor,
            item,
            target,
        }
    }

    fn resolve(
        &self,
        state: &GameState,
        ctx: &CommandContext<'_>,
    ) -> Result<(ItemEffect, EffectTarget), ActionError> {
        let user = living_actor(state, self.actor)?;
        if !user.inventory.contains(self.item) {
            return Err(ActionError::NotCarried);
        }
        let definition = ctx.item_definition(state, self.item)?;
        let effect = definition
            .usable_effect()
            .cloned()
            .ok_or(ActionError::NotUsable)?;

        let target = match &effect {
            ItemEffect::Heal { .. } => {
                let fighter = user.fighter.as_ref().ok_or(ActionError::MissingComponent {
                    actor: self.actor,
                    component: "fighter",
                })?;
                if fighter.is_full_health() {
                    return Err(ActionError::AlreadyFullHealth);
                }
                EffectTarget::User
            }
            ItemEffect::Lightning { range, .. } => {
                closest_visible_target(state, user, *range, |_| true)
                    .map(EffectTarget::Actor)
                    .ok_or(ActionError::NoTargetInRange)?
            }
            ItemEffect::Confuse { range, .. } | ItemEffect::Paralyze { range, .. } => {
                closest_visible_target(state, user, *range, |actor| actor.ai.is_some())
                    .map(EffectTarget::Actor)
                    .ok_or(ActionError::NoTargetInRange)?
            }
            ItemEffect::Fireball { .. } => {
                let position = self.target.ok_or(ActionError::TargetRequired)?;
                if !state.world.is_visible(position) {
                    return Err(ActionError::TargetNotVisible);
                }
                EffectTarget::Area(position)
            }
        };
        Ok((effect, target))
    }

    fn consume_one(&self, state: &mut GameState) -> Result<(), ActionError> {
        let item = state
            .entities
            .item_mut(self.item)
            .ok_or(ActionError::ItemNotFound(self.item))?;
        item.quantity = item.quantity.saturating_sub(1);
        if item.quantity > 0 {
            return Ok(());
        }
        state.entities.remove_item(self.item);
        let user = state.actor_mut(self.actor)?;
        user.equipment.unequip(self.item);
        user.inventory.remove(self.item);
        Ok(())
    }
}

/// Nearest living actor other than `user` within `range` that is in view.
///
/// Ties on distance go to the lower id.
fn closest_visible_target(
    state: &GameState,
    user: &ActorState,
    range: u32,
    accept: impl Fn(&ActorState) -> bool,
) -> Option<EntityId> {
    state
        .entities
        .actors()
        .filter(|actor| actor.id != user.id && actor.is_alive())
        .filter(|actor| state.world.is_visible(actor.position))
        .filter(|actor| user.position.chebyshev(actor.position) <= range)
        .filter(|actor| accept(actor))
        .min_by_key(|actor| (user.position.chebyshev(actor.position), actor.id))
        .map(|actor| actor.id)
}

/// Deals `damage` to `target`, returning a Die follow-up when it kills.
fn harm(
    state: &mut GameState,
    target: EntityId,
    damage: u32,
    cause: EntityId,
) -> Result<Option<Command>, ActionError> {
    let actor = state.actor_mut(target)?;
    let fighter = actor.fighter.as_mut().ok_or(ActionError::MissingComponent {
        actor: target,
        component: "fighter",
    })?;
    let was_alive = !fighter.is_dead();
    fighter.take_damage(damage);
    Ok((was_alive && fighter.is_dead()).then(|| Command::die(target, Some(cause))))
}

impl CommandTransition for UseItemCommand {
    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, ctx: &CommandContext<'_>) -> Result<(), ActionError> {
        self.resolve(state, ctx).map(|_| ())
    }

    fn apply(
        &self,
        state: &mut GameState,
        ctx: &mut CommandContext<'_>,
    ) -> Result<Outcome, ActionError> {
        let (effect, target) = self.resolve(state, ctx)?;
        let mut outcome = Outcome::new();

        match (effect, target) {
            (ItemEffect::Heal { dice }, _) => {
                let amount = dice.roll(&mut ctx.rolls);
                let user = state.actor_mut(self.actor)?;
                let gained = user
                    .fighter
                    .as_mut()
                    .map(|fighter| fighter.heal(amount))
                    .unwrap_or_default();
                outcome.message(if user.is_player() {
                    format!("Your wounds start to feel better! You recover {gained} hit points.")
                } else {
                    format!("{} looks healthier.", user.subject_name())
                });
            }
            (ItemEffect::Lightning { dice, .. }, EffectTarget::Actor(target)) => {
                let damage = dice.roll(&mut ctx.rolls);
                let name = state.actor(target)?.display_name();
                outcome.message(format!(
                    "A lightning bolt strikes {name} with a loud thunder, for {damage} damage!"
                ));
                if let Some(die) = harm(state, target, damage, self.actor)? {
                    outcome.follow_up(die);
                }
            }
            (ItemEffect::Fireball { dice, radius }, EffectTarget::Area(center)) => {
                outcome.message(format!(
                    "The fireball explodes, burning everything within {radius} tiles!"
                ));
                let caught: Vec<EntityId> = state
                    .entities
                    .actors()
                    .filter(|actor| actor.is_alive() && actor.position.chebyshev(center) <= radius)
                    .map(|actor| actor.id)
                    .collect();
                for target in caught {
                    let damage = dice.roll(&mut ctx.rolls);
                    let actor = state.actor(target)?;
                    outcome.message(format!(
                        "{} {} engulfed in a fiery explosion, taking {damage} damage!",
                        actor.subject_name(),
                        conjugate(actor, "are", "is")
                    ));
                    if let Some(die) = harm(state, target, damage, self.actor)? {
                        outcome.follow_up(die);
                    }
                }
            }
            (ItemEffect::Confuse { turns, .. }, EffectTarget::Actor(target)) => {
                let actor = state.actor_mut(target)?;
                let current = actor.ai.take().unwrap_or(AiState::Stationary);
                actor.ai = Some(current.confused(turns));
                outcome.message(format!(
                    "The eyes of {} look vacant, as {} {} to stumble around!",
                    actor.display_name(),
                    if actor.is_player() { "you" } else { "it" },
                    conjugate(actor, "start", "starts")
                ));
            }
            (ItemEffect::Paralyze { turns, .. }, EffectTarget::Actor(target)) => {
                let actor = state.actor_mut(target)?;
                let current = actor.ai.take().unwrap_or(AiState::Stationary);
                actor.ai = Some(current.paralyzed(turns));
                outcome.message(format!(
                    "{} {} frozen in place!",
                    actor.subject_name(),
                    conjugate(actor, "are", "is")
                ));
            }
            // `resolve` pairs every effect with its target kind.
            _ => {
                return Err(ActionError::MissingComponent {
                    actor: self.actor,
                    component: "effect target",
                });
            }
        }

        self.consume_one(state)?;
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::ActorTemplate;
    use crate::testing::{
        CONFUSION_SCROLL, FIREBALL_SCROLL, Fixture, HEALING_POTION, LIGHTNING_SCROLL,
        PARALYSIS_SCROLL, SWORD,
    };

    fn setup() -> Fixture {
        let mut fixture = Fixture::new(9, 9);
        fixture.add_player(Position::new(4, 4));
        fixture
    }

    fn weak_orc() -> ActorTemplate {
        ActorTemplate::builder("orc", 'o').hp(5).ac(7).build()
    }

    #[test]
    fn heal_at_full_health_is_refused_and_keeps_potion() {
        let mut fixture = setup();
        let potion = fixture.give(EntityId::PLAYER, HEALING_POTION);
        assert_eq!(
            fixture.attempt(Command::use_item(EntityId::PLAYER, potion, None)),
            Err(ActionError::AlreadyFullHealth)
        );
        assert!(fixture.state.player().unwrap().inventory.contains(potion));
    }

    #[test]
    fn heal_restores_and_consumes() {
        let mut fixture = setup();
        let potion = fixture.give(EntityId::PLAYER, HEALING_POTION);
        fixture
            .state
            .entities
            .player_mut()
            .unwrap()
            .fighter
            .as_mut()
            .unwrap()
            .take_damage(6);
        fixture.rng.push([1, 1, 1, 1]);

        fixture
            .attempt(Command::use_item(EntityId::PLAYER, potion, None))
            .unwrap();
        let player = fixture.state.player().unwrap();
        assert_eq!(player.fighter.as_ref().unwrap().hp(), 8);
        assert!(!player.inventory.contains(potion));
        assert!(fixture.state.entities.item(potion).is_none());
    }

    #[test]
    fn non_usable_item_is_rejected() {
        let mut fixture = setup();
        let sword = fixture.give(EntityId::PLAYER, SWORD);
        assert_eq!(
            fixture.attempt(Command::use_item(EntityId::PLAYER, sword, None)),
            Err(ActionError::NotUsable)
        );
    }

    #[test]
    fn lightning_needs_a_visible_target_in_range() {
        let mut fixture = setup();
        let scroll = fixture.give(EntityId::PLAYER, LIGHTNING_SCROLL);
        let orc = fixture.spawn(&weak_orc(), Position::new(6, 4));

        assert_eq!(
            fixture.attempt(Command::use_item(EntityId::PLAYER, scroll, None)),
            Err(ActionError::NoTargetInRange)
        );

        fixture.reveal_all();
        let outcome = fixture
            .attempt(Command::use_item(EntityId::PLAYER, scroll, None))
            .unwrap();
        assert_eq!(outcome.follow_ups, vec![Command::die(orc, Some(EntityId::PLAYER))]);
    }

    #[test]
    fn fireball_requires_target_and_hits_the_user_too() {
        let mut fixture = setup();
        fixture.reveal_all();
        let scroll = fixture.give(EntityId::PLAYER, FIREBALL_SCROLL);
        let orc = fixture.spawn(&weak_orc(), Position::new(5, 4));

        assert_eq!(
            fixture.attempt(Command::use_item(EntityId::PLAYER, scroll, None)),
            Err(ActionError::TargetRequired)
        );

        // 1d6 per victim: player first (id 0), then the orc
        fixture.rng.push([2, 6]);
        let outcome = fixture
            .attempt(Command::use_item(
                EntityId::PLAYER,
                scroll,
                Some(Position::new(5, 4)),
            ))
            .unwrap();
        assert_eq!(outcome.messages.len(), 3);
        assert_eq!(
            outcome.messages[1],
            "You are engulfed in a fiery explosion, taking 2 damage!"
        );
        assert_eq!(outcome.follow_ups, vec![Command::die(orc, Some(EntityId::PLAYER))]);
    }

    #[test]
    fn confusion_wraps_the_current_ai() {
        let mut fixture = setup();
        fixture.reveal_all();
        let scroll = fixture.give(EntityId::PLAYER, CONFUSION_SCROLL);
        let orc = fixture.spawn(&weak_orc(), Position::new(5, 5));
        let original = fixture.state.entities.actor(orc).unwrap().ai.clone().unwrap();

        fixture
            .attempt(Command::use_item(EntityId::PLAYER, scroll, None))
            .unwrap();
        assert_eq!(
            fixture.state.entities.actor(orc).unwrap().ai,
            Some(original.confused(10))
        );
    }

    #[test]
    fn paralysis_wraps_the_current_ai() {
        let mut fixture = setup();
        fixture.reveal_all();
        let scroll = fixture.give(EntityId::PLAYER, PARALYSIS_SCROLL);
        let orc = fixture.spawn(&weak_orc(), Position::new(3, 3));

        let outcome = fixture
            .attempt(Command::use_item(EntityId::PLAYER, scroll, None))
            .unwrap();
        assert_eq!(outcome.messages, vec!["The orc is frozen in place!"]);
        assert!(matches!(
            fixture.state.entities.actor(orc).unwrap().ai,
            Some(AiState::Paralyzed { .. })
        ));
    }
}
