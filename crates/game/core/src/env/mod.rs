//! Traits describing the collaborators that surround the rules.
//!
//! Oracles expose static map geometry, item definitions, actor templates,
//! pathfinding, visibility and randomness. The [`Env`] aggregate bundles them
//! so the engine can access everything it needs without hard coupling to
//! concrete implementations. Message output is not an oracle: it is written to,
//! so the engine takes a [`MessageSink`] separately.
mod actors;
mod error;
mod grid;
mod items;
mod map;
mod messages;
mod path;
mod rng;
mod vision;

pub use actors::{
    ActorOracle, ActorTemplate, ActorTemplateBuilder, SpawnEntry, pick_weighted, total_weight,
};
pub use error::OracleError;
pub use grid::{CostGrid, Grid, TransparencyGrid};
pub use items::{EquipData, ItemDefinition, ItemEffect, ItemFlags, ItemOracle};
pub use map::{MapDimensions, MapOracle, StaticTile, TerrainKind};
pub use messages::MessageSink;
pub use path::{PathOracle, Topology};
pub use rng::{PcgRng, RngOracle, RollContext, compute_seed};
pub use vision::VisionOracle;

/// Aggregates read-only oracles required by commands, AI and the turn engine.
pub struct Env<'a, M, I, A, P, V, R>
where
    M: MapOracle + ?Sized,
    I: ItemOracle + ?Sized,
    A: ActorOracle + ?Sized,
    P: PathOracle + ?Sized,
    V: VisionOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    map: Option<&'a M>,
    items: Option<&'a I>,
    actors: Option<&'a A>,
    path: Option<&'a P>,
    vision: Option<&'a V>,
    rng: Option<&'a R>,
}

pub type GameEnv<'a> = Env<
    'a,
    dyn MapOracle + 'a,
    dyn ItemOracle + 'a,
    dyn ActorOracle + 'a,
    dyn PathOracle + 'a,
    dyn VisionOracle + 'a,
    dyn RngOracle + 'a,
>;

// Manual impls: derives would demand `M: Copy` and rule out trait objects.
impl<M, I, A, P, V, R> Clone for Env<'_, M, I, A, P, V, R>
where
    M: MapOracle + ?Sized,
    I: ItemOracle + ?Sized,
    A: ActorOracle + ?Sized,
    P: PathOracle + ?Sized,
    V: VisionOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<M, I, A, P, V, R> Copy for Env<'_, M, I, A, P, V, R>
where
    M: MapOracle + ?Sized,
    I: ItemOracle + ?Sized,
    A: ActorOracle + ?Sized,
    P: PathOracle + ?Sized,
    V: VisionOracle + ?Sized,
    R: RngOracle + ?Sized,
{
}

impl<'a, M, I, A, P, V, R> Env<'a, M, I, A, P, V, R>
where
    M: MapOracle + ?Sized,
    I: ItemOracle + ?Sized,
    A: ActorOracle + ?Sized,
    P: PathOracle + ?Sized,
    V: VisionOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    pub fn new(
        map: Option<&'a M>,
        items: Option<&'a I>,
        actors: Option<&'a A>,
        path: Option<&'a P>,
        vision: Option<&'a V>,
        rng: Option<&'a R>,
    ) -> Self {
        Self {
            map,
            items,
            actors,
            path,
            vision,
            rng,
        }
    }

    pub fn with_all(
        map: &'a M,
        items: &'a I,
        actors: &'a A,
        path: &'a P,
        vision: &'a V,
        rng: &'a R,
    ) -> Self {
        Self::new(
            Some(map),
            Some(items),
            Some(actors),
            Some(path),
            Some(vision),
            Some(rng),
        )
    }

    pub fn empty() -> Self {
        Self {
            map: None,
            items: None,
            actors: None,
            path: None,
            vision: None,
            rng: None,
        }
    }

    /// Returns the MapOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::MapNotAvailable` if no map oracle was provided.
    pub fn map(&self) -> Result<&'a M, OracleError> {
        self.map.ok_or(OracleError::MapNotAvailable)
    }

    /// Returns the ItemOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::ItemsNotAvailable` if no items oracle was provided.
    pub fn items(&self) -> Result<&'a I, OracleError> {
        self.items.ok_or(OracleError::ItemsNotAvailable)
    }

    /// Returns the ActorOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::ActorsNotAvailable` if no actors oracle was provided.
    pub fn actors(&self) -> Result<&'a A, OracleError> {
        self.actors.ok_or(OracleError::ActorsNotAvailable)
    }

    /// Returns the PathOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::PathNotAvailable` if no path oracle was provided.
    pub fn path(&self) -> Result<&'a P, OracleError> {
        self.path.ok_or(OracleError::PathNotAvailable)
    }

    /// Returns the VisionOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::VisionNotAvailable` if no vision oracle was provided.
    pub fn vision(&self) -> Result<&'a V, OracleError> {
        self.vision.ok_or(OracleError::VisionNotAvailable)
    }

    /// Returns the RngOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::RngNotAvailable` if no rng oracle was provided.
    pub fn rng(&self) -> Result<&'a R, OracleError> {
        self.rng.ok_or(OracleError::RngNotAvailable)
    }
}

impl<'a, M, I, A, P, V, R> Env<'a, M, I, A, P, V, R>
where
    M: MapOracle + 'a,
    I: ItemOracle + 'a,
    A: ActorOracle + 'a,
    P: PathOracle + 'a,
    V: VisionOracle + 'a,
    R: RngOracle + 'a,
{
    /// Converts this environment into a trait-object based `GameEnv` (borrows self).
    ///
    /// Use this when you need to convert multiple times (e.g., in a loop).
    pub fn as_game_env(&self) -> GameEnv<'a> {
        let map: Option<&'a dyn MapOracle> = self.map.map(|map| map as _);
        let items: Option<&'a dyn ItemOracle> = self.items.map(|items| items as _);
        let actors: Option<&'a dyn ActorOracle> = self.actors.map(|actors| actors as _);
        let path: Option<&'a dyn PathOracle> = self.path.map(|path| path as _);
        let vision: Option<&'a dyn VisionOracle> = self.vision.map(|vision| vision as _);
        let rng: Option<&'a dyn RngOracle> = self.rng.map(|rng| rng as _);
        Env::new(map, items, actors, path, vision, rng)
    }
}
