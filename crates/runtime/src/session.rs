//! A playable game: state, collaborators and the turn engine wired together.
use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use delve_content::{ActorLoader, ContentBundle, ContentFactory, DEFAULT_DATA_DIR};
use delve_core::{
    ActorOracle, ActorState, Command, FloorChange, GameConfig, GameEnv, GameState, TurnEngine,
    TurnReport,
};

use crate::error::{Result, RuntimeError};
use crate::messages::MessageLog;
use crate::oracle::{ActorCatalog, GridMap, ItemCatalog, OracleManager};
use crate::planner::{FloorPlanner, PlannedFloor};

/// Where content comes from and how a session is seeded.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub data_dir: PathBuf,
    pub seed: u64,
    pub message_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            seed: 0xDE1F,
            message_capacity: 64,
        }
    }
}

impl SessionConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `DELVE_DATA_DIR` - Content directory (default: the shipped data)
    /// - `DELVE_SEED` - Game seed (default: 0xDE1F)
    /// - `DELVE_MESSAGE_CAPACITY` - Message log capacity (default: 64)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("DELVE_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }

        if let Some(seed) = read_env::<u64>("DELVE_SEED") {
            config.seed = seed;
        }

        if let Some(capacity) = read_env::<usize>("DELVE_MESSAGE_CAPACITY") {
            config.message_capacity = capacity.max(1);
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

/// One game from the first floor to the player's death.
///
/// The session owns the state and hands the engine a fresh [`GameEnv`] for
/// every input. When the engine reports a staircase, the session plans the
/// destination floor, swaps the map oracle and primes the player before
/// returning.
pub struct Session {
    state: GameState,
    oracles: OracleManager,
    engine: TurnEngine,
    planner: FloorPlanner,
    messages: MessageLog,
    floor_name: String,
}

impl Session {
    /// Loads content from `config.data_dir` and starts a game on depth 1.
    pub fn load(config: &SessionConfig) -> Result<Self> {
        let bundle = ContentFactory::new(&config.data_dir)
            .load_all()
            .map_err(RuntimeError::Content)?;
        Self::from_content(bundle, config.seed, config.message_capacity)
    }

    /// Starts a game on depth 1 from already loaded content.
    ///
    /// # Errors
    ///
    /// Fails when the content has no player template, no floor for depth 1,
    /// or the first floor cannot be populated.
    pub fn from_content(bundle: ContentBundle, seed: u64, message_capacity: usize) -> Result<Self> {
        let ContentBundle {
            config,
            actors,
            items,
            spawns,
            floors,
        } = bundle;

        let items = ItemCatalog::from_definitions(items);
        let mut catalog = ActorCatalog::new();
        for (id, template) in actors {
            catalog.add(id, template);
        }
        catalog.set_spawn_table(spawns.monsters.clone());
        let player = catalog
            .template(ActorLoader::PLAYER_KEY)
            .ok_or_else(|| RuntimeError::MissingTemplate(ActorLoader::PLAYER_KEY.to_owned()))?;

        let planner = FloorPlanner::new(floors, spawns, &items);
        let oracles = OracleManager::new(
            Arc::new(GridMap::open(1, 1)),
            Arc::new(items),
            Arc::new(catalog),
        );
        let first = planner.plan(oracles.rng(), seed, 1, None)?;

        let mut state = GameState::new(seed);
        state.add_player(&player, first.arrival, &config)?;

        let mut session = Self {
            state,
            oracles,
            engine: TurnEngine::new(config),
            planner,
            messages: MessageLog::new(message_capacity),
            floor_name: String::new(),
        };
        session.enter(first)?;
        tracing::info!(seed, floor = %session.floor_name, "session started");
        Ok(session)
    }

    /// Resolves one player command and every world tick it pays for.
    ///
    /// Once the player is dead every further call fails with a game-over
    /// error (see [`RuntimeError::is_game_over`]).
    pub fn submit(&mut self, command: Command) -> Result<TurnReport> {
        let report = self.engine.submit(
            &mut self.state,
            self.oracles.as_game_env(),
            &mut self.messages,
            command,
        )?;

        if let Some(change) = report.floor_change {
            self.change_floor(change)?;
        }
        if report.player_dead {
            tracing::info!(
                depth = self.state.world.depth,
                turn = self.state.turn.turn,
                "player died"
            );
        }
        Ok(report)
    }

    fn change_floor(&mut self, change: FloorChange) -> Result<()> {
        let floor = self.planner.plan(
            self.oracles.rng(),
            self.state.game_seed,
            change.to_depth,
            Some(change.direction),
        )?;
        self.enter(floor)
    }

    fn enter(&mut self, floor: PlannedFloor) -> Result<()> {
        self.oracles.set_map(floor.map.clone());
        self.state
            .enter_floor(floor.depth, floor.arrival, floor.layout.trap_states())?;
        self.planner.populate(
            &mut self.state,
            &floor,
            self.oracles.actors(),
            self.engine.config(),
        )?;
        self.engine
            .start(&mut self.state, self.oracles.as_game_env())?;

        tracing::info!(
            depth = floor.depth,
            floor = %floor.name,
            monsters = floor.monsters.len(),
            items = floor.items.len(),
            "entered floor"
        );
        self.floor_name = floor.name;
        Ok(())
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn player(&self) -> Option<&ActorState> {
        self.state.player()
    }

    pub fn is_over(&self) -> bool {
        !self.state.is_player_alive()
    }

    pub fn depth(&self) -> u32 {
        self.state.world.depth
    }

    pub fn floor_name(&self) -> &str {
        &self.floor_name
    }

    pub fn map(&self) -> &GridMap {
        self.oracles.map()
    }

    pub fn oracles(&self) -> &OracleManager {
        &self.oracles
    }

    pub fn env(&self) -> GameEnv<'_> {
        self.oracles.as_game_env()
    }

    pub fn config(&self) -> &GameConfig {
        self.engine.config()
    }

    pub fn messages(&self) -> &MessageLog {
        &self.messages
    }

    pub fn messages_mut(&mut self) -> &mut MessageLog {
        &mut self.messages
    }
}
