//! Error types surfaced by the augment registry and its bindings.
use augment_core::{CodecError, EngineError, ErrorSeverity};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RegistryError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("failed to find augment named `{0}`")]
    UnknownAugment(String),

    #[error("augment `{0}` already exists")]
    NameTaken(String),

    #[error("augment registry lock was poisoned")]
    LockPoisoned,

    #[error("failed to load augments from {origin}: {message}")]
    Source { origin: String, message: String },

    #[error(transparent)]
    Codec(#[from] CodecError),
}

impl EngineError for RegistryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownAugment(_) => ErrorSeverity::Lookup,
            Self::NameTaken(_) => ErrorSeverity::Collision,
            Self::LockPoisoned => ErrorSeverity::Internal,
            Self::Source { .. } => ErrorSeverity::Configuration,
            Self::Codec(_) => ErrorSeverity::Serialization,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownAugment(_) => "REGISTRY_UNKNOWN_AUGMENT",
            Self::NameTaken(_) => "REGISTRY_NAME_TAKEN",
            Self::LockPoisoned => "REGISTRY_LOCK_POISONED",
            Self::Source { .. } => "REGISTRY_SOURCE",
            Self::Codec(inner) => inner.error_code(),
        }
    }
}
