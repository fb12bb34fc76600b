//! Game configuration loader.

use std::path::Path;

use delve_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Keys left out of the file keep their [`GameConfig::default`] values.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML file containing GameConfig
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse and validate a TOML document.
    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.hit_die_sides == 0 {
            anyhow::bail!("hit_die_sides must be at least 1");
        }
        if config.energy_threshold == 0 {
            anyhow::bail!("energy_threshold must be at least 1");
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config = ConfigLoader::parse("regen_chance = 50\ncharge_failed_commands = true\n").unwrap();
        assert_eq!(config.regen_chance, 50);
        assert!(config.charge_failed_commands);
        assert_eq!(config.energy_threshold, GameConfig::DEFAULT_ENERGY_THRESHOLD);
    }

    #[test]
    fn rejects_zero_sided_hit_die() {
        let error = ConfigLoader::parse("hit_die_sides = 0").unwrap_err();
        assert!(error.to_string().contains("hit_die_sides"));
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "fov_radius = 5\n").unwrap();

        let config = ConfigLoader::load(&path).unwrap();
        assert_eq!(config.fov_radius, 5);
    }

    #[test]
    fn missing_file_names_the_path() {
        let error = ConfigLoader::load(Path::new("/nonexistent/config.toml")).unwrap_err();
        assert!(error.to_string().contains("/nonexistent/config.toml"));
    }
}
