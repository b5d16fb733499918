//! Sources feeding the augment registry.
//!
//! The registry never reads files itself; it asks an [`AugmentSource`] for a
//! resolved [`LoadReport`]. That keeps document I/O outside the registry lock
//! and lets tests feed catalogs directly.

use std::path::{Path, PathBuf};

use augment_content::{AugmentCatalog, AugmentLoader, ContentFactory, LoadOptions, LoadReport, LoadResult};

use crate::config::EngineConfig;

/// Produces a fresh set of augment definitions on every call.
pub trait AugmentSource: Send + Sync {
    /// Human-readable origin, for logs and errors.
    fn describe(&self) -> String;

    /// Reads and resolves the catalog.
    ///
    /// An `Err` means the whole document failed; per-entry problems belong in
    /// the report.
    fn load(&self) -> LoadResult<LoadReport>;
}

/// Catalog file inside a data directory.
pub struct FileSource {
    factory: ContentFactory,
    file_name: String,
    options: LoadOptions,
}

impl FileSource {
    pub fn new(data_dir: impl Into<PathBuf>, file_name: impl Into<String>, options: LoadOptions) -> Self {
        Self {
            factory: ContentFactory::new(data_dir),
            file_name: file_name.into(),
            options,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(
            config.data_dir.clone(),
            config.file_name.clone(),
            config.load_options(),
        )
    }

    pub fn path(&self) -> PathBuf {
        self.factory.augment_path(&self.file_name)
    }

    pub fn data_dir(&self) -> &Path {
        self.factory.data_dir()
    }
}

impl AugmentSource for FileSource {
    fn describe(&self) -> String {
        self.path().display().to_string()
    }

    fn load(&self) -> LoadResult<LoadReport> {
        self.factory.load_augments(&self.file_name, self.options)
    }
}

/// Catalog held in memory, resolved again on every load.
pub struct StaticSource {
    label: String,
    catalog: AugmentCatalog,
    options: LoadOptions,
}

impl StaticSource {
    pub fn new(label: impl Into<String>, catalog: AugmentCatalog, options: LoadOptions) -> Self {
        Self {
            label: label.into(),
            catalog,
            options,
        }
    }

    /// The sample catalog bundled with `augment-content`.
    pub fn embedded(options: LoadOptions) -> LoadResult<Self> {
        Ok(Self::new("embedded catalog", AugmentLoader::embedded()?, options))
    }

    /// Parses a RON catalog once and serves it from memory.
    pub fn from_ron(label: impl Into<String>, content: &str, options: LoadOptions) -> LoadResult<Self> {
        Ok(Self::new(label, AugmentLoader::from_ron_str(content)?, options))
    }
}

impl AugmentSource for StaticSource {
    fn describe(&self) -> String {
        self.label.clone()
    }

    fn load(&self) -> LoadResult<LoadReport> {
        Ok(AugmentLoader::resolve(&self.catalog, self.options))
    }
}
