//! Content factory for loading a data directory.

use std::path::{Path, PathBuf};

use game_core::GameConfig;

use crate::loaders::{BrainCatalog, BrainLoader, ConfigLoader, LoadResult};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── game.toml
/// └── brains.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub const CONFIG_FILE: &'static str = "game.toml";
    pub const BRAINS_FILE: &'static str = "brains.ron";

    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the data files shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load game configuration from `game.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        ConfigLoader::load(&self.data_dir.join(Self::CONFIG_FILE))
    }

    /// Load brain presets from `brains.ron`.
    pub fn load_brains(&self) -> LoadResult<BrainCatalog> {
        BrainLoader::load(&self.data_dir.join(Self::BRAINS_FILE))
    }
}
