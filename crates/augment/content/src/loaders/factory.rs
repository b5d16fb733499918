//! Content factory for loading augment data from a data directory.

use std::path::{Path, PathBuf};

use crate::loaders::{AugmentLoader, ConfigLoader, EngineSettings, LoadOptions, LoadReport, LoadResult};

/// Settings file name looked up inside the data directory.
pub const SETTINGS_FILE: &str = "engine.toml";

/// Content factory that loads augment content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── engine.toml      (optional)
/// └── augments.ron     (or any .ron / .toml catalog)
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load optional engine settings from `engine.toml`.
    pub fn load_settings(&self) -> LoadResult<EngineSettings> {
        ConfigLoader::load_optional(&self.data_dir.join(SETTINGS_FILE))
    }

    /// Load and resolve the catalog `file_name`.
    pub fn load_augments(&self, file_name: &str, options: LoadOptions) -> LoadResult<LoadReport> {
        AugmentLoader::load(&self.augment_path(file_name), options)
    }

    /// Full path of the catalog `file_name`.
    pub fn augment_path(&self, file_name: &str) -> PathBuf {
        self.data_dir.join(file_name)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
