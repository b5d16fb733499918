//! Content loaders for reading augment data from files.
//!
//! Documents are RON or TOML, selected by file extension (see [`DocumentFormat`]).

pub mod augments;
pub mod config;
pub mod factory;

pub use augments::{
    AugmentCatalog, AugmentDefinition, AugmentLoader, Fallback, LoadIssue, LoadOptions,
    LoadReport, ModifierDefinition,
};
pub use config::{ConfigLoader, EngineSettings};
pub use factory::ContentFactory;

use std::path::Path;

use serde::de::DeserializeOwned;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Serialization format of a content document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentFormat {
    Ron,
    Toml,
}

impl DocumentFormat {
    /// Picks the format from the file extension (`.ron` or `.toml`).
    pub fn from_path(path: &Path) -> LoadResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("ron") => Ok(Self::Ron),
            Some("toml") => Ok(Self::Toml),
            _ => Err(anyhow::anyhow!(
                "Unsupported document format for {}: expected .ron or .toml",
                path.display()
            )),
        }
    }

    /// Parses `content` in this format.
    pub fn parse<T: DeserializeOwned>(self, content: &str) -> LoadResult<T> {
        match self {
            Self::Ron => {
                ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse RON: {}", e))
            }
            Self::Toml => {
                toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse TOML: {}", e))
            }
        }
    }
}

/// Reads and parses a document whose format follows its extension.
pub(crate) fn read_document<T: DeserializeOwned>(path: &Path) -> LoadResult<T> {
    let format = DocumentFormat::from_path(path)?;
    let content = read_file(path)?;
    format
        .parse(&content)
        .map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
}
