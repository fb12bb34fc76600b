//! Content factory for loading every data file of a game.

use std::path::{Path, PathBuf};

use delve_core::{ActorTemplate, GameConfig, ItemDefinition};

use crate::floor::FloorLayout;
use crate::loaders::{
    ActorLoader, ConfigLoader, FloorLoader, ItemLoader, LoadResult, SpawnTableLoader, SpawnTables,
};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── actors.ron
/// ├── items.ron
/// ├── spawns.ron
/// └── floors/
///     ├── 01_entrance.ron
///     └── 02_cellars.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

/// Everything loaded from one data directory, cross-checked.
#[derive(Debug, Clone)]
pub struct ContentBundle {
    pub config: GameConfig,
    pub actors: Vec<(String, ActorTemplate)>,
    pub items: Vec<ItemDefinition>,
    pub spawns: SpawnTables,
    pub floors: Vec<FloorLayout>,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    ///
    /// # Arguments
    ///
    /// * `data_dir` - Path to the directory containing data files
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`.
    ///
    /// A missing file yields the default configuration.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(GameConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load actor catalog from `actors.ron`.
    pub fn load_actors(&self) -> LoadResult<Vec<(String, ActorTemplate)>> {
        let path = self.data_dir.join("actors.ron");
        ActorLoader::load(&path)
    }

    /// Load item catalog from `items.ron`.
    pub fn load_items(&self) -> LoadResult<Vec<ItemDefinition>> {
        let path = self.data_dir.join("items.ron");
        ItemLoader::load(&path)
    }

    /// Load spawn tables from `spawns.ron`.
    pub fn load_spawns(&self) -> LoadResult<SpawnTables> {
        let path = self.data_dir.join("spawns.ron");
        SpawnTableLoader::load(&path)
    }

    /// Load a floor from `floors/{floor_name}.ron`.
    ///
    /// # Arguments
    ///
    /// * `floor_name` - Name of the floor file (without `.ron` extension)
    pub fn load_floor(&self, floor_name: &str) -> LoadResult<FloorLayout> {
        let path = self.floors_dir().join(format!("{}.ron", floor_name));
        FloorLoader::load(&path)
    }

    /// Load every `*.ron` file under `floors/`, ordered by file name.
    pub fn load_floors(&self) -> LoadResult<Vec<FloorLayout>> {
        let dir = self.floors_dir();
        let entries = std::fs::read_dir(&dir)
            .map_err(|e| anyhow::anyhow!("Failed to read directory {}: {}", dir.display(), e))?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "ron") {
                paths.push(path);
            }
        }
        paths.sort();

        paths.iter().map(|path| FloorLoader::load(path)).collect()
    }

    /// Load and cross-check the whole directory.
    ///
    /// Spawn table keys must name known actors and items, and some floor
    /// must be usable on depth 1.
    pub fn load_all(&self) -> LoadResult<ContentBundle> {
        let bundle = ContentBundle {
            config: self.load_config()?,
            actors: self.load_actors()?,
            items: self.load_items()?,
            spawns: self.load_spawns()?,
            floors: self.load_floors()?,
        };

        for entry in &bundle.spawns.monsters {
            if !bundle.actors.iter().any(|(key, _)| *key == entry.key) {
                anyhow::bail!("Spawn table names unknown actor '{}'", entry.key);
            }
        }
        for entry in &bundle.spawns.items {
            if !bundle.items.iter().any(|item| item.name == entry.key) {
                anyhow::bail!("Spawn table names unknown item '{}'", entry.key);
            }
        }
        if !bundle.floors.iter().any(|floor| floor.allows_depth(1)) {
            anyhow::bail!("No floor layout allows depth 1");
        }

        Ok(bundle)
    }

    fn floors_dir(&self) -> PathBuf {
        self.data_dir.join("floors")
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn shipped_content_loads() {
        let bundle = ContentFactory::new(crate::DEFAULT_DATA_DIR).load_all().unwrap();
        assert!(bundle.actors.iter().any(|(key, _)| key == ActorLoader::PLAYER_KEY));
        assert!(!bundle.items.is_empty());
        assert!(bundle.spawns.monsters_per_floor > 0);
        assert!(bundle.floors.len() >= 2);
    }

    fn write(dir: &Path, name: &str, content: &str) {
        std::fs::write(dir.join(name), content).unwrap();
    }

    fn minimal_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "actors.ron",
            r#"[("player", (name: "you", glyph: '@', max_hp: 10, ac: 7, attacks: []))]"#,
        );
        write(dir.path(), "items.ron", "(items: [])");
        write(dir.path(), "spawns.ron", "(monsters: [])");
        std::fs::create_dir(dir.path().join("floors")).unwrap();
        write(
            &dir.path().join("floors"),
            "b.ron",
            r#"(name: "b", min_depth: 2, rows: ["..."])"#,
        );
        write(&dir.path().join("floors"), "a.ron", r#"(name: "a", rows: ["..."])"#);
        write(&dir.path().join("floors"), "notes.txt", "ignored");
        dir
    }

    #[test]
    fn floors_load_in_file_name_order() {
        let dir = minimal_dir();
        let bundle = ContentFactory::new(dir.path()).load_all().unwrap();
        let names: Vec<_> = bundle.floors.iter().map(|floor| floor.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(bundle.config, GameConfig::default());
    }

    #[test]
    fn unknown_spawn_key_is_rejected() {
        let dir = minimal_dir();
        write(dir.path(), "spawns.ron", r#"(monsters: [(key: "dragon", weight: 1)])"#);
        let error = ContentFactory::new(dir.path()).load_all().unwrap_err();
        assert!(error.to_string().contains("dragon"));
    }
}
