//! Floor selection and population.
//!
//! The planner is the collaborator the engine hands a
//! [`FloorChange`](delve_core::FloorChange) to. It picks a layout for the
//! destination depth and scatters monsters and items over it, drawing every
//! choice from the game seed so a seed always produces the same dungeon.

use delve_content::{FloorLayout, SpawnTables};
use delve_core::env::{pick_weighted, total_weight};
use delve_core::{
    ActorOracle, EntityId, GameConfig, GameState, ItemHandle, Position, RngOracle, RollContext,
    SpawnEntry, StairDirection, TerrainKind,
};

use crate::error::{Result, RuntimeError};
use crate::oracle::{GridMap, ItemCatalog};

/// Roll stream reserved for floor planning, apart from every actor's stream.
const PLANNER_STREAM: EntityId = EntityId(u32::MAX);

/// Monsters are not placed this close (Chebyshev) to the arrival tile.
const ARRIVAL_CLEARANCE: u32 = 2;

/// A floor ready to be entered.
#[derive(Clone, Debug)]
pub struct PlannedFloor {
    pub depth: u32,
    pub name: String,
    pub map: GridMap,
    pub arrival: Position,
    pub layout: FloorLayout,
    /// Actor template keys and where they stand.
    pub monsters: Vec<(String, Position)>,
    pub items: Vec<(ItemHandle, Position)>,
}

pub struct FloorPlanner {
    floors: Vec<FloorLayout>,
    spawns: SpawnTables,
    /// Item spawn entries with their names resolved to handles.
    item_handles: Vec<(SpawnEntry, ItemHandle)>,
}

impl FloorPlanner {
    /// Creates a planner; item spawn entries naming unknown items are dropped.
    pub fn new(floors: Vec<FloorLayout>, spawns: SpawnTables, items: &ItemCatalog) -> Self {
        let item_handles = spawns
            .items
            .iter()
            .filter_map(|entry| {
                let handle = items.handle_by_name(&entry.key);
                if handle.is_none() {
                    tracing::warn!(key = %entry.key, "spawn table names an unknown item");
                }
                handle.map(|handle| (entry.clone(), handle))
            })
            .collect();
        Self {
            floors,
            spawns,
            item_handles,
        }
    }

    pub fn floors(&self) -> &[FloorLayout] {
        &self.floors
    }

    /// Plans the floor at `depth`, reached through `travelled` stairs (or
    /// none at the start of a game).
    ///
    /// # Errors
    ///
    /// `NoLayout` when no layout covers the depth, `NoArrival` when the chosen
    /// layout has no tile to put the player on.
    pub fn plan(
        &self,
        rng: &dyn RngOracle,
        game_seed: u64,
        depth: u32,
        travelled: Option<StairDirection>,
    ) -> Result<PlannedFloor> {
        let mut rolls = RollContext::new(rng, game_seed, u64::from(depth), PLANNER_STREAM);

        let candidates: Vec<&FloorLayout> = self
            .floors
            .iter()
            .filter(|floor| floor.allows_depth(depth))
            .collect();
        let layout = *rolls
            .choose(&candidates)
            .ok_or(RuntimeError::NoLayout(depth))?;
        let arrival = layout
            .arrival(travelled)
            .ok_or_else(|| RuntimeError::NoArrival(layout.name.clone()))?;

        let trapped: Vec<Position> = layout.traps().iter().map(|trap| trap.position).collect();
        let mut open: Vec<Position> = layout
            .positions_of(TerrainKind::Floor)
            .filter(|position| *position != arrival && !trapped.contains(position))
            .collect();

        let mut monsters = Vec::new();
        let monster_table = self.spawns.monsters_at(depth);
        for _ in 0..self.spawns.monsters_per_floor {
            let Some(entry) = pick(&mut rolls, &monster_table) else {
                break;
            };
            let far_enough: Vec<Position> = open
                .iter()
                .copied()
                .filter(|position| position.chebyshev(arrival) > ARRIVAL_CLEARANCE)
                .collect();
            let Some(&position) = rolls.choose(&far_enough) else {
                break;
            };
            open.retain(|tile| *tile != position);
            monsters.push((entry.key.clone(), position));
        }

        let mut items = Vec::new();
        let item_table: Vec<SpawnEntry> = self
            .item_handles
            .iter()
            .filter(|(entry, _)| entry.allows_depth(depth))
            .map(|(entry, _)| entry.clone())
            .collect();
        for _ in 0..self.spawns.items_per_floor {
            let Some(entry) = pick(&mut rolls, &item_table) else {
                break;
            };
            let Some(handle) = self.handle_for(&entry.key) else {
                continue;
            };
            let Some(&position) = rolls.choose(&open) else {
                break;
            };
            open.retain(|tile| *tile != position);
            items.push((handle, position));
        }

        tracing::debug!(
            depth,
            layout = %layout.name,
            monsters = monsters.len(),
            items = items.len(),
            "floor planned"
        );
        Ok(PlannedFloor {
            depth,
            name: layout.name.clone(),
            map: GridMap::from_layout(layout),
            arrival,
            layout: layout.clone(),
            monsters,
            items,
        })
    }

    fn handle_for(&self, key: &str) -> Option<ItemHandle> {
        self.item_handles
            .iter()
            .find(|(entry, _)| entry.key == key)
            .map(|(_, handle)| *handle)
    }

    /// Places the planned monsters and items into `state`, which must
    /// already be on the planned floor.
    ///
    /// Monsters whose template is unknown are skipped with a warning.
    pub fn populate(
        &self,
        state: &mut GameState,
        floor: &PlannedFloor,
        actors: &dyn ActorOracle,
        config: &GameConfig,
    ) -> Result<()> {
        for (key, position) in &floor.monsters {
            let Some(template) = actors.template(key) else {
                tracing::warn!(%key, "no template for planned monster");
                continue;
            };
            state.spawn_actor(&template, *position, config)?;
        }
        for (handle, position) in &floor.items {
            state.spawn_item(*handle, 1, *position)?;
        }
        Ok(())
    }
}

fn pick<'t>(rolls: &mut RollContext<'_>, table: &'t [SpawnEntry]) -> Option<&'t SpawnEntry> {
    let total = total_weight(table);
    if total == 0 {
        return None;
    }
    let roll = rolls.range(0, total - 1);
    pick_weighted(table, roll)
}

#[cfg(test)]
mod tests {
    use delve_content::TrapPlacement;
    use delve_core::{ItemDefinition, PcgRng, TrapKind};

    use super::*;

    fn tables(monsters_per_floor: u32, items_per_floor: u32) -> SpawnTables {
        SpawnTables {
            monsters: vec![SpawnEntry {
                key: "orc".into(),
                weight: 1,
                min_depth: 1,
                max_depth: None,
            }],
            items: vec![SpawnEntry {
                key: "healing potion".into(),
                weight: 1,
                min_depth: 1,
                max_depth: None,
            }],
            monsters_per_floor,
            items_per_floor,
        }
    }

    fn catalog() -> ItemCatalog {
        ItemCatalog::from_definitions([ItemDefinition::new(ItemHandle(1), "healing potion", '!')])
    }

    fn hall() -> FloorLayout {
        FloorLayout::from_rows(
            "hall",
            &["##########", "#<.......#", "#........#", "#.......>#", "##########"],
        )
        .unwrap()
    }

    #[test]
    fn same_seed_same_floor() {
        let planner = FloorPlanner::new(vec![hall()], tables(3, 2), &catalog());
        let first = planner.plan(&PcgRng, 42, 1, None).unwrap();
        let second = planner.plan(&PcgRng, 42, 1, None).unwrap();
        assert_eq!(first.monsters, second.monsters);
        assert_eq!(first.items, second.items);
        assert_eq!(first.monsters.len(), 3);
        assert_eq!(first.items.len(), 2);
    }

    #[test]
    fn placements_avoid_arrival_traps_and_each_other() {
        let trap = TrapPlacement {
            position: Position::new(5, 2),
            kind: TrapKind::Dart,
            hidden: true,
        };
        let layout = hall().with_traps([trap]).unwrap();
        let planner = FloorPlanner::new(vec![layout], tables(6, 6), &catalog());
        let floor = planner.plan(&PcgRng, 7, 1, Some(StairDirection::Down)).unwrap();

        assert_eq!(floor.arrival, Position::new(1, 1));
        let mut taken: Vec<Position> = floor.monsters.iter().map(|(_, p)| *p).collect();
        taken.extend(floor.items.iter().map(|(_, p)| *p));
        for position in &taken {
            assert_ne!(*position, floor.arrival);
            assert_ne!(*position, trap.position);
            assert_eq!(floor.layout.terrain(*position), Some(TerrainKind::Floor));
        }
        let mut unique = taken.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), taken.len());
        for (_, position) in &floor.monsters {
            assert!(position.chebyshev(floor.arrival) > ARRIVAL_CLEARANCE);
        }
    }

    #[test]
    fn missing_layout_for_depth_is_an_error() {
        let layout = hall().with_depths(3, None);
        let planner = FloorPlanner::new(vec![layout], tables(0, 0), &catalog());
        let error = planner.plan(&PcgRng, 1, 1, None).unwrap_err();
        assert!(matches!(error, RuntimeError::NoLayout(1)));
    }

    #[test]
    fn unknown_item_keys_are_dropped() {
        let mut spawns = tables(0, 3);
        spawns.items[0].key = "mystery".into();
        let planner = FloorPlanner::new(vec![hall()], spawns, &catalog());
        let floor = planner.plan(&PcgRng, 3, 1, None).unwrap();
        assert!(floor.items.is_empty());
    }
}
