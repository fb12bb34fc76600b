//! Scripted collaborators and a small world fixture for unit tests.

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::sync::Mutex;

use crate::action::{ActionError, Command, CommandContext, Outcome};
use crate::ai::AiBehavior;
use crate::combat::DiceSpec;
use crate::config::GameConfig;
use crate::env::{
    ActorOracle, ActorTemplate, CostGrid, EquipData, Env, GameEnv, ItemDefinition, ItemEffect,
    ItemOracle, MapDimensions, MapOracle, PathOracle, RngOracle, RollContext, SpawnEntry,
    StaticTile, TerrainKind, Topology, TransparencyGrid, VisionOracle,
};
use crate::state::{EntityId, EquipSlot, GameState, ItemHandle, Position};

pub const HEALING_POTION: ItemHandle = ItemHandle(1);
pub const SWORD: ItemHandle = ItemHandle(2);
pub const DAGGER: ItemHandle = ItemHandle(3);
pub const LEATHER_ARMOR: ItemHandle = ItemHandle(4);
pub const LIGHTNING_SCROLL: ItemHandle = ItemHandle(5);
pub const FIREBALL_SCROLL: ItemHandle = ItemHandle(6);
pub const CONFUSION_SCROLL: ItemHandle = ItemHandle(7);
pub const PARALYSIS_SCROLL: ItemHandle = ItemHandle(8);

/// RNG that replays queued rolls.
///
/// Each queued value is clamped into the requested range. Once the queue is
/// empty dice roll their maximum and ranges their minimum.
#[derive(Debug, Default)]
pub struct ScriptedRng {
    rolls: Mutex<VecDeque<u32>>,
}

impl ScriptedRng {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, rolls: impl IntoIterator<Item = u32>) {
        self.rolls.lock().unwrap().extend(rolls);
    }

    fn pop(&self) -> Option<u32> {
        self.rolls.lock().unwrap().pop_front()
    }
}

impl RngOracle for ScriptedRng {
    fn next_u32(&self, _seed: u64) -> u32 {
        self.pop().unwrap_or(0)
    }

    fn roll_die(&self, _seed: u64, sides: u32) -> u32 {
        if sides == 0 {
            return 0;
        }
        self.pop().map_or(sides, |roll| roll.clamp(1, sides))
    }

    fn range(&self, _seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        self.pop().map_or(min, |roll| roll.clamp(min, max))
    }
}

/// Open floor surrounded by nothing, with optional terrain overrides.
#[derive(Clone, Debug)]
pub struct FlatMap {
    dimensions: MapDimensions,
    overrides: BTreeMap<Position, TerrainKind>,
}

impl FlatMap {
    pub fn open(width: u32, height: u32) -> Self {
        Self {
            dimensions: MapDimensions::new(width, height),
            overrides: BTreeMap::new(),
        }
    }

    pub fn with_wall(self, position: Position) -> Self {
        self.with_terrain(position, TerrainKind::Wall)
    }

    pub fn with_terrain(mut self, position: Position, terrain: TerrainKind) -> Self {
        self.overrides.insert(position, terrain);
        self
    }
}

impl MapOracle for FlatMap {
    fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    fn tile(&self, position: Position) -> Option<StaticTile> {
        if !self.dimensions.contains(position) {
            return None;
        }
        let terrain = self
            .overrides
            .get(&position)
            .copied()
            .unwrap_or(TerrainKind::Floor);
        Some(StaticTile::new(terrain))
    }
}

#[derive(Debug)]
pub struct TestItems {
    definitions: Vec<ItemDefinition>,
}

impl Default for TestItems {
    fn default() -> Self {
        let definitions = vec![
            ItemDefinition::new(HEALING_POTION, "healing potion", '!')
                .with_effect(ItemEffect::Heal {
                    dice: DiceSpec::new(4, 4),
                })
                .stackable(),
            ItemDefinition::new(SWORD, "sword", '/').with_equip(EquipData {
                attacks: vec![DiceSpec::new(1, 8)],
                ..EquipData::new(EquipSlot::MainHand)
            }),
            ItemDefinition::new(DAGGER, "dagger", '-').with_equip(EquipData {
                attacks: vec![DiceSpec::new(1, 4).with_bonus(1)],
                ..EquipData::new(EquipSlot::MainHand)
            }),
            ItemDefinition::new(LEATHER_ARMOR, "leather armor", '[').with_equip(EquipData {
                ac_bonus: 1,
                ..EquipData::new(EquipSlot::Body)
            }),
            ItemDefinition::new(LIGHTNING_SCROLL, "scroll of lightning", '?').with_effect(
                ItemEffect::Lightning {
                    dice: DiceSpec::new(4, 6),
                    range: 5,
                },
            ),
            ItemDefinition::new(FIREBALL_SCROLL, "scroll of fireball", '?').with_effect(
                ItemEffect::Fireball {
                    dice: DiceSpec::new(1, 6),
                    radius: 1,
                },
            ),
            ItemDefinition::new(CONFUSION_SCROLL, "scroll of confusion", '?')
                .with_effect(ItemEffect::Confuse { turns: 10, range: 5 }),
            ItemDefinition::new(PARALYSIS_SCROLL, "scroll of paralysis", '?')
                .with_effect(ItemEffect::Paralyze { turns: 5, range: 5 }),
        ];
        Self { definitions }
    }
}

impl ItemOracle for TestItems {
    fn definition(&self, handle: ItemHandle) -> Option<ItemDefinition> {
        self.definitions
            .iter()
            .find(|definition| definition.handle == handle)
            .cloned()
    }

    fn all_definitions(&self) -> Vec<ItemDefinition> {
        self.definitions.clone()
    }
}

#[derive(Debug)]
pub struct TestActors {
    templates: BTreeMap<String, ActorTemplate>,
    spawns: Vec<SpawnEntry>,
}

impl Default for TestActors {
    fn default() -> Self {
        let mut templates = BTreeMap::new();
        templates.insert("hero".to_string(), basic_template("hero"));
        templates.insert("orc".to_string(), basic_template("orc"));
        let spawns = vec![SpawnEntry {
            key: "orc".into(),
            weight: 1,
            min_depth: 1,
            max_depth: None,
        }];
        Self { templates, spawns }
    }
}

impl ActorOracle for TestActors {
    fn template(&self, key: &str) -> Option<ActorTemplate> {
        self.templates.get(key).cloned()
    }

    fn spawn_table(&self, depth: u32) -> Vec<SpawnEntry> {
        self.spawns
            .iter()
            .filter(|entry| entry.allows_depth(depth))
            .cloned()
            .collect()
    }

    fn all_keys(&self) -> Vec<String> {
        self.templates.keys().cloned().collect()
    }
}

/// Breadth-first search that honours the cost grid's passability only.
#[derive(Debug, Default)]
pub struct BfsPath;

impl PathOracle for BfsPath {
    fn find_path(
        &self,
        grid: &CostGrid,
        start: Position,
        goal: Position,
        topology: Topology,
    ) -> Vec<Position> {
        let mut came_from = BTreeMap::new();
        let mut frontier = VecDeque::from([start]);
        came_from.insert(start, start);

        while let Some(current) = frontier.pop_front() {
            if current == goal {
                break;
            }
            for &direction in topology.directions() {
                let next = current.step(direction);
                let enterable = next == goal || grid.cost(next).is_some();
                if grid.contains(next) && enterable && !came_from.contains_key(&next) {
                    came_from.insert(next, current);
                    frontier.push_back(next);
                }
            }
        }

        if !came_from.contains_key(&goal) || goal == start {
            return Vec::new();
        }
        let mut path = vec![goal];
        let mut cursor = goal;
        while let Some(&previous) = came_from.get(&cursor) {
            if previous == start {
                break;
            }
            path.push(previous);
            cursor = previous;
        }
        path.reverse();
        path
    }
}

/// Sees every tile within radius, ignoring walls.
#[derive(Debug, Default)]
pub struct OmniscientVision;

impl VisionOracle for OmniscientVision {
    fn compute_visible(
        &self,
        grid: &TransparencyGrid,
        origin: Position,
        radius: u32,
    ) -> BTreeSet<Position> {
        grid.dimensions()
            .positions()
            .filter(|position| origin.chebyshev(*position) <= radius)
            .collect()
    }
}

/// Hit points 10, AC 7, a single 1d4 attack, chases the player.
pub fn basic_template(name: &str) -> ActorTemplate {
    ActorTemplate::builder(name, name.chars().next().unwrap_or('?'))
        .hp(10)
        .ac(7)
        .attacks(vec![DiceSpec::new(1, 4)])
        .behavior(AiBehavior::Approach)
        .build()
}

/// A state plus every collaborator, wired together the way the engine does it.
pub struct Fixture {
    pub state: GameState,
    pub map: FlatMap,
    pub items: TestItems,
    pub actors: TestActors,
    pub path: BfsPath,
    pub vision: OmniscientVision,
    pub rng: ScriptedRng,
    pub config: GameConfig,
}

impl Fixture {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            state: GameState::new(7),
            map: FlatMap::open(width, height),
            items: TestItems::default(),
            actors: TestActors::default(),
            path: BfsPath,
            vision: OmniscientVision,
            rng: ScriptedRng::new(),
            config: GameConfig::default(),
        }
    }

    pub fn env(&self) -> GameEnv<'_> {
        Env::with_all(
            &self.map,
            &self.items,
            &self.actors,
            &self.path,
            &self.vision,
            &self.rng,
        )
        .as_game_env()
    }

    pub fn add_player(&mut self, position: Position) {
        self.state
            .add_player(&basic_template("hero"), position, &self.config)
            .unwrap();
    }

    pub fn spawn(&mut self, template: &ActorTemplate, position: Position) -> EntityId {
        self.state
            .spawn_actor(template, position, &self.config)
            .unwrap()
    }

    pub fn give(&mut self, owner: EntityId, handle: ItemHandle) -> EntityId {
        self.state
            .give_item(owner, handle, 1, self.config.inventory_capacity)
            .unwrap()
    }

    pub fn drop_on_floor(&mut self, handle: ItemHandle, position: Position) -> EntityId {
        self.state.spawn_item(handle, 1, position).unwrap()
    }

    /// Marks every tile of the map as seen by the player.
    pub fn reveal_all(&mut self) {
        self.state.world.visible = self.map.dimensions().positions().collect();
    }

    /// Attempts one command the way the dispatcher would, without queueing follow-ups.
    pub fn attempt(&mut self, command: Command) -> Result<Outcome, ActionError> {
        let env = Env::with_all(
            &self.map,
            &self.items,
            &self.actors,
            &self.path,
            &self.vision,
            &self.rng,
        )
        .as_game_env();
        let rolls = RollContext::new(&self.rng, self.state.game_seed, 0, command.actor());
        let mut ctx = CommandContext::new(env, &self.config, rolls);
        command.attempt(&mut self.state, &mut ctx)
    }
}
