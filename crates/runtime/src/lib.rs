//! Runtime services around the augment rule engine.
//!
//! This crate owns the process-scoped [`AugmentRegistry`] and wires it to its
//! configuration and content sources. Consumers construct one registry, pass
//! it to whatever needs templates, and use [`EntityAugments`] for per-entity
//! copies.
//!
//! Modules are organized by responsibility:
//! - [`registry`] hosts the template store and its load/clear/reload lifecycle
//! - [`source`] provides the catalog sources the registry reads from
//! - [`api`] exposes the operations a scripting layer calls
//! - [`attachment`] holds augment copies attached to one entity
//! - [`config`] resolves engine settings from file and environment
pub mod api;
pub mod attachment;
pub mod config;
pub mod error;
pub mod registry;
pub mod source;

pub use api::{AugmentBindings, AugmentHandle, InitialModifiers};
pub use attachment::EntityAugments;
pub use config::{DEFAULT_DATA_DIR, DEFAULT_FILE_NAME, EngineConfig};
pub use error::{RegistryError, Result};
pub use registry::{AugmentRegistry, LoadSummary, SharedAugment};
pub use source::{AugmentSource, FileSource, StaticSource};
