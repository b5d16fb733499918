//! Catalog selection shared by every command that reads augments.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use augment_runtime::{AugmentRegistry, AugmentSource, EngineConfig, FileSource, StaticSource};
use clap::{Args, ValueEnum};

/// Where to read the augment catalog from.
///
/// Flags override `engine.toml` and the `AUGMENT_*` environment variables.
#[derive(Args, Debug, Clone)]
pub struct CatalogArgs {
    /// Catalog directory (defaults to AUGMENT_DATA_DIR or data/augments)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Catalog file name inside the data directory (.ron or .toml)
    #[arg(short, long, value_name = "FILE")]
    file: Option<String>,

    /// Skip modifiers with unknown filter names instead of using the wildcard
    #[arg(long)]
    strict: bool,

    /// Use the sample catalog compiled into the binary
    #[arg(long, conflicts_with_all = ["data_dir", "file"])]
    embedded: bool,
}

impl CatalogArgs {
    pub fn config(&self) -> Result<EngineConfig> {
        let mut config = EngineConfig::load().context("Failed to load engine settings")?;
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        if let Some(file) = &self.file {
            config.file_name = file.clone();
        }
        if self.strict {
            config.strict_vocabulary = true;
        }
        Ok(config)
    }

    pub fn source(&self) -> Result<Arc<dyn AugmentSource>> {
        let config = self.config()?;
        if self.embedded {
            let source = StaticSource::embedded(config.load_options())
                .context("Failed to parse embedded catalog")?;
            return Ok(Arc::new(source));
        }
        Ok(Arc::new(FileSource::from_config(&config)))
    }

    /// Builds a registry and loads the selected catalog into it.
    pub fn registry(&self) -> Result<AugmentRegistry> {
        let source = self.source()?;
        let label = source.describe();
        let registry = AugmentRegistry::new(source);
        registry
            .load_all()
            .with_context(|| format!("Failed to load augments from {}", label))?;
        Ok(registry)
    }
}

/// Output format shared by the inspection commands.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    Summary,
    /// Full JSON output
    Json,
}
