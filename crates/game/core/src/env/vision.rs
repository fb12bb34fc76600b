use std::collections::BTreeSet;

use super::TransparencyGrid;
use crate::state::Position;

/// Field-of-view collaborator.
///
/// The core never computes visibility itself; it stores whatever set this
/// returns in `WorldState::visible` and reads it to gate AI target acquisition.
pub trait VisionOracle: Send + Sync {
    fn compute_visible(
        &self,
        grid: &TransparencyGrid,
        origin: Position,
        radius: u32,
    ) -> BTreeSet<Position>;
}
