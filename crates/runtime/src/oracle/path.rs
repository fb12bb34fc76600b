//! A* pathfinding over the core's cost grid.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use delve_core::{CostGrid, PathOracle, Position, Topology};

/// PathOracle implementation running A* with the topology's own distance as
/// heuristic (Chebyshev for eight-way, Manhattan for four-way).
///
/// Every step costs the entered tile's grid cost, which is at least 1, so the
/// heuristic never overestimates.
#[derive(Clone, Copy, Debug, Default)]
pub struct AStarPathfinder;

/// A* node for the priority queue
#[derive(Clone, Copy, Eq, PartialEq)]
struct Node {
    position: Position,
    g_cost: u32,
    f_cost: u32,
}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior; position breaks ties so
        // equal-cost paths come out the same on every run.
        other
            .f_cost
            .cmp(&self.f_cost)
            .then_with(|| self.g_cost.cmp(&other.g_cost))
            .then_with(|| other.position.cmp(&self.position))
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PathOracle for AStarPathfinder {
    fn find_path(
        &self,
        grid: &CostGrid,
        start: Position,
        goal: Position,
        topology: Topology,
    ) -> Vec<Position> {
        if start == goal || !grid.contains(start) || !grid.contains(goal) {
            return Vec::new();
        }

        let step_cost = |position: Position| -> Option<u32> {
            if position == goal {
                Some(grid.cost(position).unwrap_or(1))
            } else {
                grid.cost(position)
            }
        };

        let mut open = BinaryHeap::new();
        let mut g_scores: HashMap<Position, u32> = HashMap::new();
        let mut came_from: HashMap<Position, Position> = HashMap::new();

        g_scores.insert(start, 0);
        open.push(Node {
            position: start,
            g_cost: 0,
            f_cost: topology.distance(start, goal),
        });

        while let Some(current) = open.pop() {
            if current.position == goal {
                return reconstruct(&came_from, start, goal);
            }
            if g_scores
                .get(&current.position)
                .is_some_and(|best| current.g_cost > *best)
            {
                continue;
            }

            for &direction in topology.directions() {
                let next = current.position.step(direction);
                let Some(cost) = step_cost(next) else {
                    continue;
                };
                let g_cost = current.g_cost.saturating_add(cost);
                if g_scores.get(&next).is_some_and(|best| g_cost >= *best) {
                    continue;
                }
                g_scores.insert(next, g_cost);
                came_from.insert(next, current.position);
                open.push(Node {
                    position: next,
                    g_cost,
                    f_cost: g_cost.saturating_add(topology.distance(next, goal)),
                });
            }
        }

        Vec::new()
    }
}

fn reconstruct(
    came_from: &HashMap<Position, Position>,
    start: Position,
    goal: Position,
) -> Vec<Position> {
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

#[cfg(test)]
mod tests {
    use delve_core::MapDimensions;
    use delve_core::env::Grid;
    use proptest::prelude::*;

    use super::*;

    fn open_grid(width: u32, height: u32) -> CostGrid {
        Grid::filled(MapDimensions::new(width, height), Some(1))
    }

    #[test]
    fn diagonal_line_in_open_room() {
        let path = AStarPathfinder.find_path(
            &open_grid(5, 5),
            Position::new(0, 0),
            Position::new(3, 3),
            Topology::EightWay,
        );
        assert_eq!(
            path,
            vec![Position::new(1, 1), Position::new(2, 2), Position::new(3, 3)]
        );
    }

    #[test]
    fn four_way_paths_take_cardinal_steps() {
        let path = AStarPathfinder.find_path(
            &open_grid(5, 5),
            Position::new(0, 0),
            Position::new(2, 2),
            Topology::FourWay,
        );
        assert_eq!(path.len(), 4);
        let mut previous = Position::new(0, 0);
        for step in path {
            assert_eq!(previous.manhattan(step), 1);
            previous = step;
        }
    }

    #[test]
    fn walls_are_routed_around() {
        let mut grid = open_grid(3, 3);
        grid.set(Position::new(1, 0), None);
        grid.set(Position::new(1, 1), None);
        let path = AStarPathfinder.find_path(
            &grid,
            Position::new(0, 0),
            Position::new(2, 0),
            Topology::EightWay,
        );
        assert_eq!(path.first(), Some(&Position::new(0, 1)));
        assert_eq!(path.get(1), Some(&Position::new(1, 2)));
        assert_eq!(path.last(), Some(&Position::new(2, 0)));
        assert_eq!(path.len(), 4);
    }

    #[test]
    fn occupied_tiles_are_avoided_when_cheaper() {
        let mut grid = open_grid(3, 3);
        // a corridor blocker costing more than the detour
        grid.set(Position::new(1, 1), Some(11));
        grid.set(Position::new(1, 0), Some(11));
        let path = AStarPathfinder.find_path(
            &grid,
            Position::new(0, 1),
            Position::new(2, 1),
            Topology::EightWay,
        );
        assert_eq!(path, vec![Position::new(1, 2), Position::new(2, 1)]);
    }

    #[test]
    fn occupied_goal_is_still_reached() {
        let mut grid = open_grid(3, 1);
        grid.set(Position::new(2, 0), None);
        let path = AStarPathfinder.find_path(
            &grid,
            Position::new(0, 0),
            Position::new(2, 0),
            Topology::FourWay,
        );
        assert_eq!(path, vec![Position::new(1, 0), Position::new(2, 0)]);
    }

    #[test]
    fn unreachable_goal_yields_empty_path() {
        let mut grid = open_grid(3, 3);
        for y in 0..3 {
            grid.set(Position::new(1, y), None);
        }
        let path = AStarPathfinder.find_path(
            &grid,
            Position::new(0, 1),
            Position::new(2, 1),
            Topology::EightWay,
        );
        assert!(path.is_empty());
    }

    proptest! {
        #[test]
        fn open_grid_paths_are_shortest_and_contiguous(
            (sx, sy, gx, gy) in (0i32..8, 0i32..8, 0i32..8, 0i32..8),
            eight_way in any::<bool>(),
        ) {
            let topology = if eight_way { Topology::EightWay } else { Topology::FourWay };
            let start = Position::new(sx, sy);
            let goal = Position::new(gx, gy);
            let path = AStarPathfinder.find_path(&open_grid(8, 8), start, goal, topology);

            prop_assert_eq!(path.len() as u32, topology.distance(start, goal));
            let mut previous = start;
            for step in &path {
                prop_assert_eq!(topology.distance(previous, *step), 1);
                previous = *step;
            }
            if start != goal {
                prop_assert_eq!(path.last(), Some(&goal));
            }
        }
    }
}
