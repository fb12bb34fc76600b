use crate::state::{Position, StairDirection};

/// Static map oracle exposing the immutable layout of the current floor.
pub trait MapOracle: Send + Sync {
    fn dimensions(&self) -> MapDimensions;
    fn tile(&self, position: Position) -> Option<StaticTile>;

    fn contains(&self, position: Position) -> bool {
        self.dimensions().contains(position)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }

    /// Number of tiles covered by these dimensions.
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Every position inside the bounds, row by row.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let (width, height) = (self.width as i32, self.height as i32);
        (0..height).flat_map(move |y| (0..width).map(move |x| Position::new(x, y)))
    }
}

/// Immutable descriptor for a tile in the static layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StaticTile {
    terrain: TerrainKind,
}

impl StaticTile {
    /// Creates a tile with the given base terrain. Traps and occupants belong to
    /// runtime state rather than the map oracle.
    pub const fn new(terrain: TerrainKind) -> Self {
        Self { terrain }
    }

    pub fn terrain(self) -> TerrainKind {
        self.terrain
    }

    pub fn is_passable(self) -> bool {
        self.terrain.is_passable()
    }

    pub fn is_transparent(self) -> bool {
        self.terrain.is_transparent()
    }

    pub fn stairs(self) -> Option<StairDirection> {
        self.terrain.stairs()
    }
}

/// Canonical terrain classes for static map tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerrainKind {
    Floor,
    Wall,
    Door,
    StairsDown,
    StairsUp,
    Water,
}

impl TerrainKind {
    pub fn is_passable(self) -> bool {
        matches!(
            self,
            TerrainKind::Floor | TerrainKind::Door | TerrainKind::StairsDown | TerrainKind::StairsUp
        )
    }

    /// Walls and closed doors stop line of sight.
    pub fn is_transparent(self) -> bool {
        !matches!(self, TerrainKind::Wall | TerrainKind::Door)
    }

    pub fn stairs(self) -> Option<StairDirection> {
        match self {
            TerrainKind::StairsDown => Some(StairDirection::Down),
            TerrainKind::StairsUp => Some(StairDirection::Up),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_reject_negative_and_overflowing_positions() {
        let dims = MapDimensions::new(4, 3);
        assert!(dims.contains(Position::new(0, 0)));
        assert!(dims.contains(Position::new(3, 2)));
        assert!(!dims.contains(Position::new(4, 0)));
        assert!(!dims.contains(Position::new(0, -1)));
        assert_eq!(dims.positions().count(), dims.area());
    }

    #[test]
    fn stairs_are_walkable_and_report_direction() {
        let tile = StaticTile::new(TerrainKind::StairsDown);
        assert!(tile.is_passable());
        assert_eq!(tile.stairs(), Some(StairDirection::Down));
        assert!(!StaticTile::new(TerrainKind::Water).is_passable());
        assert!(StaticTile::new(TerrainKind::Water).is_transparent());
    }
}
