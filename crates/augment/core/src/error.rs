//! Common error infrastructure for augment-core.
//!
//! This module provides the classification shared by every error type in the
//! workspace. Domain-specific errors (e.g., [`CodecError`], [`VocabularyError`])
//! are defined in their respective modules alongside the code that raises them.
//!
//! # Design Principles
//!
//! - **Never fatal**: No error in this subsystem terminates the host process;
//!   the worst outcome is an empty or partially-populated registry
//! - **Severity Classification**: Errors are categorized so callers can choose
//!   between skipping, warning and discarding without matching on variants
//!
//! [`CodecError`]: crate::codec::CodecError
//! [`VocabularyError`]: crate::combat::VocabularyError

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Configuration**: Bad document input, the offending entry is skipped
/// - **Lookup**: Unknown augment name or removal of a missing entry
/// - **Serialization**: Truncated or malformed binary stream
/// - **Collision**: Duplicate augment name, the first definition wins
/// - **Internal**: Unexpected state inconsistency that needs investigation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Missing required field or unknown vocabulary string.
    ///
    /// Examples: augment without a name, `mod = "lifestael"`
    Configuration,

    /// Name lookup that found nothing.
    ///
    /// Examples: cloning an unregistered augment
    Lookup,

    /// Binary stream could not be decoded.
    ///
    /// The record being read must be treated as absent, never partially used.
    Serialization,

    /// A second augment was registered under an existing name.
    Collision,

    /// Unexpected state inconsistency.
    ///
    /// Examples: poisoned registry lock
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Configuration => "configuration",
            Self::Lookup => "lookup",
            Self::Serialization => "serialization",
            Self::Collision => "collision",
            Self::Internal => "internal",
        }
    }

    /// Returns true if processing continues past this error by skipping one entry.
    pub const fn is_skippable(&self) -> bool {
        matches!(self, Self::Configuration | Self::Collision | Self::Lookup)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

impl core::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Common trait for all augment engine errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity by how the caller recovers, not by impact
pub trait EngineError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
