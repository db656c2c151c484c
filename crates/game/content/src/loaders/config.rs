//! Game configuration loader.

use std::path::Path;

use game_core::{GameConfig, SoundProfile};

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing sections and fields keep their defaults. Sound presets are
    /// validated so a bad file fails here rather than at the first emission.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML file containing GameConfig
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config {}: {}", path.display(), e))
    }

    /// Parse config data from TOML text.
    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        validate_preset("footstep", &config.sound.footstep)?;
        validate_preset("gunshot", &config.sound.gunshot)?;
        if config.agent.max_energy < 0.0 || config.agent.sight_range < 0.0 {
            anyhow::bail!("agent max_energy and sight_range must be non-negative");
        }

        Ok(config)
    }
}

fn validate_preset(name: &str, profile: &SoundProfile) -> LoadResult<()> {
    profile
        .validate()
        .map_err(|e| anyhow::anyhow!("sound preset '{}': {}", name, e))
}
