//! Data-driven augment definitions and loaders.
//!
//! This crate turns configuration documents into augment-core values:
//! - Augment catalogs (RON or TOML, chosen by extension)
//! - Engine settings (TOML)
//!
//! Vocabulary names are resolved here. Problems with single entries are
//! reported through [`loaders::LoadReport`] rather than failing the document.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    AugmentCatalog, AugmentDefinition, AugmentLoader, ConfigLoader, ContentFactory,
    DocumentFormat, EngineSettings, Fallback, LoadIssue, LoadOptions, LoadReport, LoadResult,
    ModifierDefinition,
};
