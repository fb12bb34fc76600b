//! Floor layout loader.
//!
//! Layouts are drawn as ASCII rows; see [`crate::floor::terrain_for_glyph`]
//! for the legend. Traps are listed separately so the drawing stays readable.

use std::path::Path;

use delve_core::{Position, TrapKind};
use serde::{Deserialize, Serialize};

use crate::floor::{FloorLayout, TrapPlacement};
use crate::loaders::{LoadResult, read_file};

/// Floor data structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct FloorDataRon {
    name: String,
    #[serde(default = "first_floor")]
    min_depth: u32,
    #[serde(default)]
    max_depth: Option<u32>,
    rows: Vec<String>,
    #[serde(default)]
    traps: Vec<TrapRon>,
    #[serde(default)]
    start: Option<(i32, i32)>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TrapRon {
    x: i32,
    y: i32,
    kind: TrapKind,
    #[serde(default = "hidden_by_default")]
    hidden: bool,
}

fn first_floor() -> u32 {
    1
}

fn hidden_by_default() -> bool {
    true
}

/// Loader for floor layouts from RON files.
pub struct FloorLoader;

impl FloorLoader {
    /// Load a floor layout from a RON file.
    pub fn load(path: &Path) -> LoadResult<FloorLayout> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid floor {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<FloorLayout> {
        let data: FloorDataRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse floor RON: {}", e))?;

        let traps = data.traps.iter().map(|trap| TrapPlacement {
            position: Position::new(trap.x, trap.y),
            kind: trap.kind,
            hidden: trap.hidden,
        });
        let mut layout = FloorLayout::from_rows(data.name, data.rows.as_slice())?
            .with_depths(data.min_depth, data.max_depth)
            .with_traps(traps)?;
        if let Some((x, y)) = data.start {
            layout = layout.with_start(Position::new(x, y))?;
        }

        Ok(layout)
    }
}
