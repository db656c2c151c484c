//! Brain preset loader.

use std::collections::HashSet;
use std::path::Path;

use game_core::BrainPreset;

use crate::loaders::{LoadResult, read_file};

/// Loader for brain presets from RON files.
pub struct BrainLoader;

impl BrainLoader {
    /// Load brain presets from a RON file.
    ///
    /// RON format: `Vec<BrainPreset>`
    pub fn load(path: &Path) -> LoadResult<BrainCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid brain presets {}: {}", path.display(), e))
    }

    /// Parse brain presets from RON text.
    pub fn parse(content: &str) -> LoadResult<BrainCatalog> {
        let presets: Vec<BrainPreset> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse brain presets RON: {}", e))?;

        let mut names = HashSet::new();
        for preset in &presets {
            if preset.name.is_empty() {
                anyhow::bail!("brain preset with empty name");
            }
            if !names.insert(preset.name.as_str()) {
                anyhow::bail!("duplicate brain preset '{}'", preset.name);
            }
            if preset.actions.is_empty() {
                anyhow::bail!("brain preset '{}' has no actions", preset.name);
            }
        }

        Ok(BrainCatalog { presets })
    }
}

/// Named brain presets available to a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BrainCatalog {
    presets: Vec<BrainPreset>,
}

impl BrainCatalog {
    pub fn presets(&self) -> &[BrainPreset] {
        &self.presets
    }

    pub fn get(&self, name: &str) -> Option<&BrainPreset> {
        self.presets.iter().find(|p| p.name == name)
    }

    /// Preset named `name`, falling back to the built-in stalker.
    pub fn get_or_default(&self, name: &str) -> BrainPreset {
        self.get(name).cloned().unwrap_or_default()
    }
}

impl Default for BrainCatalog {
    fn default() -> Self {
        Self {
            presets: vec![BrainPreset::stalker()],
        }
    }
}
