//! Line-of-sight field of view.

use std::collections::BTreeSet;

use delve_core::{Position, TransparencyGrid, VisionOracle};

/// VisionOracle casting a Bresenham line to every tile inside a circular radius.
///
/// A tile is visible when every tile strictly between it and the origin lets
/// light through, so the faces of walls are lit but nothing behind them.
#[derive(Clone, Copy, Debug, Default)]
pub struct RaycastVision;

impl RaycastVision {
    fn line_is_clear(grid: &TransparencyGrid, from: Position, to: Position) -> bool {
        bresenham(from, to)
            .into_iter()
            .filter(|step| *step != from && *step != to)
            .all(|step| grid.is_transparent(step))
    }
}

impl VisionOracle for RaycastVision {
    fn compute_visible(
        &self,
        grid: &TransparencyGrid,
        origin: Position,
        radius: u32,
    ) -> BTreeSet<Position> {
        let mut visible = BTreeSet::new();
        if !grid.contains(origin) {
            return visible;
        }
        visible.insert(origin);

        let reach = radius as i32;
        let radius_sq = reach * reach;
        for dy in -reach..=reach {
            for dx in -reach..=reach {
                if dx * dx + dy * dy > radius_sq {
                    continue;
                }
                let target = origin.offset(dx, dy);
                if grid.contains(target) && Self::line_is_clear(grid, origin, target) {
                    visible.insert(target);
                }
            }
        }
        visible
    }
}

/// Tiles on the line from `from` to `to`, both ends included.
fn bresenham(from: Position, to: Position) -> Vec<Position> {
    let (dx, dy) = ((to.x - from.x).abs(), -(to.y - from.y).abs());
    let (sx, sy) = ((to.x - from.x).signum(), (to.y - from.y).signum());
    let mut error = dx + dy;
    let mut current = from;
    let mut line = vec![current];

    while current != to {
        let doubled = 2 * error;
        if doubled >= dy {
            error += dy;
            current.x += sx;
        }
        if doubled <= dx {
            error += dx;
            current.y += sy;
        }
        line.push(current);
    }
    line
}

#[cfg(test)]
mod tests {
    use delve_core::MapDimensions;
    use delve_core::env::Grid;

    use super::*;

    #[test]
    fn line_includes_both_ends() {
        let line = bresenham(Position::new(0, 0), Position::new(3, 1));
        assert_eq!(line.first(), Some(&Position::new(0, 0)));
        assert_eq!(line.last(), Some(&Position::new(3, 1)));
        assert_eq!(line.len(), 4);
    }

    #[test]
    fn open_room_is_fully_visible_within_radius() {
        let grid: TransparencyGrid = Grid::filled(MapDimensions::new(5, 5), true);
        let visible = RaycastVision.compute_visible(&grid, Position::new(2, 2), 2);
        assert!(visible.contains(&Position::new(2, 0)));
        assert!(visible.contains(&Position::new(3, 3)));
        // corners are outside the circle
        assert!(!visible.contains(&Position::new(0, 0)));
    }

    #[test]
    fn walls_block_sight_but_are_seen() {
        let mut grid: TransparencyGrid = Grid::filled(MapDimensions::new(5, 1), true);
        grid.set(Position::new(2, 0), false);
        let visible = RaycastVision.compute_visible(&grid, Position::new(0, 0), 8);
        assert!(visible.contains(&Position::new(1, 0)));
        assert!(visible.contains(&Position::new(2, 0)));
        assert!(!visible.contains(&Position::new(3, 0)));
        assert!(!visible.contains(&Position::new(4, 0)));
    }
}
