//! Scripted player that drives a session without input.
//!
//! The autopilot looks only at what a player could reasonably know: its own
//! pack, the tiles in view and the layout of the current floor. It never
//! reads monster AI state.
use std::sync::atomic::{AtomicBool, Ordering};

use delve_core::{
    ActorState, Command, EntityId, GameState, ItemDefinition, ItemEffect, ItemOracle, MapOracle,
    PathOracle, Position, TerrainKind, Topology,
};
use delve_runtime::{AStarPathfinder, Result, Session};

/// Priority list of simple survival rules.
#[derive(Clone, Copy, Debug, Default)]
pub struct Autopilot {
    pathfinder: AStarPathfinder,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Picks the player's next command.
    ///
    /// In order: drink a healing potion when badly hurt, fight adjacent
    /// monsters, zap distant ones, wear new gear, pick things up, take the
    /// stairs down, then walk toward loot, monsters or the stairs.
    pub fn next_command(&self, session: &Session) -> Command {
        let state = session.state();
        let Some(player) = state.player() else {
            return Command::wait(EntityId::PLAYER);
        };
        let pack = Pack::of(player, state, session.oracles().items());

        if is_badly_hurt(player) {
            if let Some(potion) = pack.find(|effect| matches!(effect, ItemEffect::Heal { .. })) {
                tracing::debug!(%potion, "drinking");
                return Command::use_item(EntityId::PLAYER, potion, None);
            }
        }

        let monsters = visible_monsters(state);
        if let Some(adjacent) = monsters
            .iter()
            .find(|monster| monster.position.chebyshev(player.position) == 1)
        {
            let direction = player.position.direction_to(adjacent.position);
            return Command::attack(EntityId::PLAYER, direction);
        }

        if let Some(closest) = monsters
            .iter()
            .map(|monster| monster.position.chebyshev(player.position))
            .min()
        {
            let wand = pack.find(
                |effect| matches!(effect, ItemEffect::Lightning { range, .. } if closest < *range),
            );
            if let Some(wand) = wand {
                return Command::use_item(EntityId::PLAYER, wand, None);
            }
        }

        if let Some((item, slot)) = pack.unworn_gear(player) {
            return Command::equip(EntityId::PLAYER, item, Some(slot));
        }

        let capacity = session.config().inventory_slots();
        let here_has_loot = state.items_at(player.position).next().is_some();
        if here_has_loot && !player.inventory.is_full(capacity) {
            return Command::pickup(EntityId::PLAYER);
        }

        let map = session.map();
        let standing_on = map.tile(player.position).map(|tile| tile.terrain());
        if standing_on == Some(TerrainKind::StairsDown) && monsters.is_empty() {
            return Command::take_stairs(EntityId::PLAYER);
        }

        let goal = self
            .visible_loot(state, player.position, here_has_loot)
            .or_else(|| monsters.first().map(|monster| monster.position))
            .or_else(|| stairs_down(map));
        let Some(goal) = goal else {
            return Command::wait(EntityId::PLAYER);
        };

        let grid = state.cost_grid(map, session.config());
        let path = self
            .pathfinder
            .find_path(&grid, player.position, goal, Topology::EightWay);
        match path.first() {
            Some(next) => Command::bump(EntityId::PLAYER, player.position.direction_to(*next)),
            None => Command::wait(EntityId::PLAYER),
        }
    }

    fn visible_loot(
        &self,
        state: &GameState,
        origin: Position,
        skip_here: bool,
    ) -> Option<Position> {
        state
            .entities
            .items()
            .filter_map(|item| item.position)
            .filter(|position| state.world.is_visible(*position))
            .filter(|position| !(skip_here && *position == origin))
            .min_by_key(|position| (position.chebyshev(origin), *position))
    }
}

/// Carried items with their definitions.
struct Pack {
    items: Vec<(EntityId, ItemDefinition)>,
}

impl Pack {
    fn of(player: &ActorState, state: &GameState, catalog: &dyn ItemOracle) -> Self {
        let items = player
            .inventory
            .items()
            .filter_map(|id| {
                let item = state.entities.item(id)?;
                Some((id, catalog.definition(item.handle)?))
            })
            .collect();
        Self { items }
    }

    fn find(&self, wanted: impl Fn(&ItemEffect) -> bool) -> Option<EntityId> {
        self.items
            .iter()
            .find(|(_, definition)| definition.usable_effect().is_some_and(&wanted))
            .map(|(id, _)| *id)
    }

    fn unworn_gear(&self, player: &ActorState) -> Option<(EntityId, delve_core::EquipSlot)> {
        self.items.iter().find_map(|(id, definition)| {
            let slot = definition.equip_data()?.slot;
            let free = player.equipment.get(slot).is_none();
            (free && !player.equipment.is_equipped(*id)).then_some((*id, slot))
        })
    }
}

fn is_badly_hurt(player: &ActorState) -> bool {
    player
        .fighter
        .as_ref()
        .is_some_and(|fighter| fighter.hp() * 3 <= fighter.max_hp())
}

/// Living monsters in view, nearest first.
fn visible_monsters<'s>(state: &'s GameState) -> Vec<&'s ActorState> {
    let Some(origin) = state.player().map(|player| player.position) else {
        return Vec::new();
    };
    let mut monsters: Vec<&ActorState> = state
        .entities
        .actors()
        .filter(|actor| !actor.is_player() && actor.is_alive() && actor.ai.is_some())
        .filter(|actor| state.world.is_visible(actor.position))
        .collect();
    monsters.sort_by_key(|actor| (actor.position.chebyshev(origin), actor.id));
    monsters
}

fn stairs_down(map: &dyn MapOracle) -> Option<Position> {
    map.dimensions()
        .positions()
        .find(|position| {
            map.tile(*position)
                .is_some_and(|tile| tile.terrain() == TerrainKind::StairsDown)
        })
}

/// How a run ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub commands: u32,
    pub world_turns: u64,
    pub depth: u32,
    pub player_alive: bool,
    pub interrupted: bool,
}

/// Feeds autopilot commands into `session` until the player dies, `max_commands`
/// have been submitted, or `stop` is raised.
pub fn play(
    session: &mut Session,
    autopilot: &Autopilot,
    max_commands: u32,
    stop: &AtomicBool,
) -> Result<RunSummary> {
    let mut commands = 0;
    let mut interrupted = false;
    while commands < max_commands && !session.is_over() {
        if stop.load(Ordering::Relaxed) {
            interrupted = true;
            break;
        }
        let command = autopilot.next_command(session);
        tracing::trace!(command = command.name(), "autopilot");
        session.submit(command)?;
        commands += 1;
    }

    let summary = RunSummary {
        commands,
        world_turns: session.state().turn.turn,
        depth: session.depth(),
        player_alive: !session.is_over(),
        interrupted,
    };
    tracing::info!(?summary, "run finished");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use delve_content::{ContentBundle, FloorLayout, SpawnTables};
    use delve_core::{
        ActorTemplate, AiBehavior, DiceSpec, Direction, GameConfig, SpawnEntry,
    };

    use super::*;

    fn corridor(monsters_per_floor: u32) -> ContentBundle {
        let hero = ActorTemplate::builder("you", '@')
            .hp(40)
            .power(5)
            .ac(5)
            .attacks(vec![DiceSpec::new(1, 6)])
            .build();
        let dummy = ActorTemplate::builder("training dummy", 'd')
            .hp(3)
            .ac(10)
            .behavior(AiBehavior::Stationary)
            .build();
        let upper = FloorLayout::from_rows("upper", &["##########", "#.......>#", "##########"])
            .unwrap()
            .with_depths(1, Some(1))
            .with_start(Position::new(1, 1))
            .unwrap();
        let lower = FloorLayout::from_rows("lower", &["#####", "#<..#", "#####"])
            .unwrap()
            .with_depths(2, None);
        ContentBundle {
            config: GameConfig {
                spawn_chance: 0,
                ..GameConfig::default()
            },
            actors: vec![("player".into(), hero), ("dummy".into(), dummy)],
            items: Vec::new(),
            spawns: SpawnTables {
                monsters: vec![SpawnEntry {
                    key: "dummy".into(),
                    weight: 1,
                    min_depth: 1,
                    max_depth: Some(1),
                }],
                monsters_per_floor,
                ..SpawnTables::default()
            },
            floors: vec![upper, lower],
        }
    }

    #[test]
    fn heads_for_the_stairs_on_an_empty_floor() {
        let session = Session::from_content(corridor(0), 3, 16).unwrap();
        let command = Autopilot::new().next_command(&session);
        assert_eq!(command, Command::bump(EntityId::PLAYER, Direction::East));
    }

    #[test]
    fn walks_down_an_empty_corridor() {
        let mut session = Session::from_content(corridor(0), 3, 16).unwrap();
        let stop = AtomicBool::new(false);
        let mut commands = 0;
        while session.depth() == 1 && commands < 20 {
            let command = Autopilot::new().next_command(&session);
            session.submit(command).unwrap();
            commands += 1;
        }
        assert_eq!(session.depth(), 2);
        // seven steps and the stairs
        assert_eq!(commands, 8);

        let summary = play(&mut session, &Autopilot::new(), 5, &stop).unwrap();
        assert_eq!(summary.commands, 5);
        assert!(summary.player_alive);
    }

    #[test]
    fn clears_a_monster_in_the_way() {
        let mut session = Session::from_content(corridor(1), 11, 64).unwrap();
        let stop = AtomicBool::new(false);
        let summary = play(&mut session, &Autopilot::new(), 60, &stop).unwrap();
        assert!(summary.player_alive);
        assert_eq!(summary.depth, 2);
        assert!(session.messages().iter().any(|entry| entry.text.contains("dead")));
    }

    #[test]
    fn raised_stop_flag_interrupts_the_run() {
        let mut session = Session::from_content(corridor(0), 3, 16).unwrap();
        let stop = AtomicBool::new(true);
        let summary = play(&mut session, &Autopilot::new(), 10, &stop).unwrap();
        assert!(summary.interrupted);
        assert_eq!(summary.commands, 0);
    }
}
