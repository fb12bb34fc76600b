use super::CostGrid;
use crate::state::{Direction, Position};

/// Which neighbours a path may step to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Topology {
    /// Cardinal steps only.
    FourWay,
    /// Cardinal and diagonal steps.
    EightWay,
}

impl Topology {
    pub fn directions(self) -> &'static [Direction] {
        match self {
            Topology::FourWay => &Direction::CARDINAL,
            Topology::EightWay => &Direction::COMPASS,
        }
    }

    /// Admissible distance estimate between two tiles under this topology.
    pub fn distance(self, from: Position, to: Position) -> u32 {
        match self {
            Topology::FourWay => from.manhattan(to),
            Topology::EightWay => from.chebyshev(to),
        }
    }
}

/// Pathfinding collaborator.
pub trait PathOracle: Send + Sync {
    /// Returns the waypoints from `start` (exclusive) to `goal` (inclusive).
    ///
    /// An unreachable goal yields an empty path. The goal tile itself is always
    /// considered enterable so a path may end on an occupied tile.
    fn find_path(
        &self,
        grid: &CostGrid,
        start: Position,
        goal: Position,
        topology: Topology,
    ) -> Vec<Position>;
}
