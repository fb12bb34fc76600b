//! Static floor layout served through [`delve_core::MapOracle`].
use delve_content::FloorLayout;
use delve_core::{MapDimensions, MapOracle, Position, StaticTile, TerrainKind};

/// MapOracle implementation with static map data
///
/// Holds immutable map structure that doesn't change during gameplay.
/// Traps and occupants live in `GameState`.
#[derive(Clone, Debug)]
pub struct GridMap {
    dimensions: MapDimensions,
    tiles: Vec<StaticTile>,
}

impl GridMap {
    pub fn new(dimensions: MapDimensions, mut tile_at: impl FnMut(Position) -> TerrainKind) -> Self {
        let tiles = dimensions
            .positions()
            .map(|position| StaticTile::new(tile_at(position)))
            .collect();
        Self { dimensions, tiles }
    }

    pub fn from_layout(layout: &FloorLayout) -> Self {
        Self::new(layout.dimensions(), |position| {
            layout.terrain(position).unwrap_or(TerrainKind::Wall)
        })
    }

    /// Creates a simple test map (all floor tiles).
    pub fn open(width: u32, height: u32) -> Self {
        Self::new(MapDimensions::new(width, height), |_| TerrainKind::Floor)
    }

    /// Replaces the terrain of a single tile; out-of-bounds positions are ignored.
    #[must_use]
    pub fn with_terrain(mut self, position: Position, terrain: TerrainKind) -> Self {
        if let Some(index) = self.index(position) {
            self.tiles[index] = StaticTile::new(terrain);
        }
        self
    }

    fn index(&self, position: Position) -> Option<usize> {
        self.dimensions.contains(position).then(|| {
            position.y as usize * self.dimensions.width as usize + position.x as usize
        })
    }
}

impl MapOracle for GridMap {
    fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    fn tile(&self, position: Position) -> Option<StaticTile> {
        self.index(position).and_then(|index| self.tiles.get(index).copied())
    }
}
