use super::MapDimensions;
use crate::state::Position;

/// Dense row-major grid covering a whole floor.
///
/// The core builds these from the map and entity state and hands them to the
/// path and vision collaborators, which never see `GameState` directly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid<T> {
    dimensions: MapDimensions,
    cells: Vec<T>,
}

/// Movement cost per tile; `None` marks an impassable tile.
pub type CostGrid = Grid<Option<u32>>;

/// Whether light passes through each tile.
pub type TransparencyGrid = Grid<bool>;

impl<T: Clone> Grid<T> {
    pub fn filled(dimensions: MapDimensions, value: T) -> Self {
        Self {
            dimensions,
            cells: vec![value; dimensions.area()],
        }
    }
}

impl<T> Grid<T> {
    pub fn from_fn(dimensions: MapDimensions, mut f: impl FnMut(Position) -> T) -> Self {
        let cells = dimensions.positions().map(&mut f).collect();
        Self { dimensions, cells }
    }

    pub fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    pub fn contains(&self, position: Position) -> bool {
        self.dimensions.contains(position)
    }

    pub fn get(&self, position: Position) -> Option<&T> {
        self.index(position).map(|index| &self.cells[index])
    }

    pub fn set(&mut self, position: Position, value: T) -> bool {
        match self.index(position) {
            Some(index) => {
                self.cells[index] = value;
                true
            }
            None => false,
        }
    }

    fn index(&self, position: Position) -> Option<usize> {
        self.contains(position)
            .then(|| position.y as usize * self.dimensions.width as usize + position.x as usize)
    }
}

impl CostGrid {
    pub fn cost(&self, position: Position) -> Option<u32> {
        self.get(position).copied().flatten()
    }
}

impl TransparencyGrid {
    pub fn is_transparent(&self, position: Position) -> bool {
        self.get(position).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_reads_are_none() {
        let mut grid = Grid::filled(MapDimensions::new(2, 2), 0u8);
        assert!(grid.set(Position::new(1, 1), 7));
        assert!(!grid.set(Position::new(2, 0), 7));
        assert_eq!(grid.get(Position::new(1, 1)), Some(&7));
        assert_eq!(grid.get(Position::new(-1, 0)), None);
    }

    #[test]
    fn cost_grid_treats_missing_cells_as_impassable() {
        let grid: CostGrid =
            Grid::from_fn(MapDimensions::new(3, 1), |pos| (pos.x != 1).then_some(1));
        assert_eq!(grid.cost(Position::new(0, 0)), Some(1));
        assert_eq!(grid.cost(Position::new(1, 0)), None);
        assert_eq!(grid.cost(Position::new(9, 0)), None);
    }
}
