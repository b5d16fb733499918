//! Engine settings loader.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Engine settings as written in `engine.toml`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Directory holding the augment catalog.
    pub data_dir: Option<PathBuf>,
    /// Catalog file name inside `data_dir`.
    pub file_name: Option<String>,
    /// Skip modifiers with unknown filter names instead of using the wildcard.
    pub strict_vocabulary: Option<bool>,
}

/// Loader for engine settings from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load settings from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML file containing EngineSettings
    pub fn load(path: &Path) -> LoadResult<EngineSettings> {
        let content = read_file(path)?;
        let settings: EngineSettings = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse engine settings TOML: {}", e))?;

        Ok(settings)
    }

    /// Load settings if the file exists, or the empty settings otherwise.
    pub fn load_optional(path: &Path) -> LoadResult<EngineSettings> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(EngineSettings::default())
        }
    }
}
