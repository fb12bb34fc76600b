//! Hand-drawn floor layouts.
//!
//! A layout is a grid of terrain drawn as ASCII rows plus the traps buried in
//! it. The runtime turns layouts into map oracles; the layout itself never
//! changes once loaded.

use std::collections::BTreeMap;

use delve_core::{MapDimensions, Position, StairDirection, TerrainKind, TrapKind, TrapState};

/// Maps a layout glyph to its terrain.
///
/// `#` wall, `.` floor, `+` door, `>` stairs down, `<` stairs up, `~` water.
pub fn terrain_for_glyph(glyph: char) -> Option<TerrainKind> {
    match glyph {
        '#' => Some(TerrainKind::Wall),
        '.' => Some(TerrainKind::Floor),
        '+' => Some(TerrainKind::Door),
        '>' => Some(TerrainKind::StairsDown),
        '<' => Some(TerrainKind::StairsUp),
        '~' => Some(TerrainKind::Water),
        _ => None,
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("layout '{0}' has no rows")]
    Empty(String),

    #[error("row {row} is {found} tiles wide, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown glyph '{glyph}' at {position}")]
    UnknownGlyph { glyph: char, position: Position },

    #[error("trap at {0} is not on a walkable tile")]
    TrapOutOfPlace(Position),

    #[error("start {0} is not on a walkable tile")]
    StartOutOfPlace(Position),
}

/// A trap buried in a layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrapPlacement {
    pub position: Position,
    pub kind: TrapKind,
    pub hidden: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FloorLayout {
    pub name: String,
    /// Shallowest depth this layout is used for.
    pub min_depth: u32,
    pub max_depth: Option<u32>,
    dimensions: MapDimensions,
    terrain: Vec<TerrainKind>,
    traps: Vec<TrapPlacement>,
    start: Option<Position>,
}

impl FloorLayout {
    /// Parses `rows` (top row first) into a layout usable at every depth.
    ///
    /// # Errors
    ///
    /// Empty or ragged rows and glyphs outside the legend are rejected.
    pub fn from_rows<S: AsRef<str>>(
        name: impl Into<String>,
        rows: &[S],
    ) -> Result<Self, LayoutError> {
        let name = name.into();
        let width = rows.first().map_or(0, |row| row.as_ref().chars().count());
        if width == 0 {
            return Err(LayoutError::Empty(name));
        }

        let mut terrain = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            let found = row.as_ref().chars().count();
            if found != width {
                return Err(LayoutError::Ragged {
                    row: y,
                    expected: width,
                    found,
                });
            }
            for (x, glyph) in row.as_ref().chars().enumerate() {
                let kind = terrain_for_glyph(glyph).ok_or(LayoutError::UnknownGlyph {
                    glyph,
                    position: Position::new(x as i32, y as i32),
                })?;
                terrain.push(kind);
            }
        }

        Ok(Self {
            name,
            min_depth: 1,
            max_depth: None,
            dimensions: MapDimensions::new(width as u32, rows.len() as u32),
            terrain,
            traps: Vec::new(),
            start: None,
        })
    }

    /// Restricts the layout to depths `min..=max` (`max` of `None` is open-ended).
    #[must_use]
    pub fn with_depths(mut self, min_depth: u32, max_depth: Option<u32>) -> Self {
        self.min_depth = min_depth;
        self.max_depth = max_depth;
        self
    }

    /// Buries `traps` in the layout.
    ///
    /// # Errors
    ///
    /// `TrapOutOfPlace` when a trap sits outside the grid or on a tile nobody
    /// can step on.
    pub fn with_traps(
        mut self,
        traps: impl IntoIterator<Item = TrapPlacement>,
    ) -> Result<Self, LayoutError> {
        for trap in traps {
            if !self.is_passable(trap.position) {
                return Err(LayoutError::TrapOutOfPlace(trap.position));
            }
            self.traps.push(trap);
        }
        Ok(self)
    }

    /// Fixes where the player appears when the floor is entered without stairs.
    ///
    /// # Errors
    ///
    /// `StartOutOfPlace` for a tile nobody can stand on.
    pub fn with_start(mut self, start: Position) -> Result<Self, LayoutError> {
        if !self.is_passable(start) {
            return Err(LayoutError::StartOutOfPlace(start));
        }
        self.start = Some(start);
        Ok(self)
    }

    pub fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    pub fn terrain(&self, position: Position) -> Option<TerrainKind> {
        if !self.dimensions.contains(position) {
            return None;
        }
        let index = position.y as usize * self.dimensions.width as usize + position.x as usize;
        self.terrain.get(index).copied()
    }

    fn is_passable(&self, position: Position) -> bool {
        self.terrain(position).is_some_and(TerrainKind::is_passable)
    }

    /// Every tile with its terrain, row by row.
    pub fn tiles(&self) -> impl Iterator<Item = (Position, TerrainKind)> + '_ {
        self.dimensions.positions().zip(self.terrain.iter().copied())
    }

    pub fn positions_of(&self, kind: TerrainKind) -> impl Iterator<Item = Position> + '_ {
        self.tiles()
            .filter(move |(_, terrain)| *terrain == kind)
            .map(|(position, _)| position)
    }

    pub fn traps(&self) -> &[TrapPlacement] {
        &self.traps
    }

    /// Armed trap state keyed by position, ready for `GameState::enter_floor`.
    pub fn trap_states(&self) -> BTreeMap<Position, TrapState> {
        self.traps
            .iter()
            .map(|trap| {
                let state = TrapState {
                    hidden: trap.hidden,
                    ..TrapState::hidden(trap.kind)
                };
                (trap.position, state)
            })
            .collect()
    }

    pub fn allows_depth(&self, depth: u32) -> bool {
        depth >= self.min_depth && self.max_depth.is_none_or(|max| depth <= max)
    }

    /// Where the player lands.
    ///
    /// Descending arrives on the up staircase and climbing on the down
    /// staircase; otherwise the explicit start, then the first floor tile.
    pub fn arrival(&self, travelled: Option<StairDirection>) -> Option<Position> {
        let stairs = match travelled {
            Some(StairDirection::Down) => self.positions_of(TerrainKind::StairsUp).next(),
            Some(StairDirection::Up) => self.positions_of(TerrainKind::StairsDown).next(),
            None => None,
        };
        stairs
            .or(self.start)
            .or_else(|| self.positions_of(TerrainKind::Floor).next())
    }
}
