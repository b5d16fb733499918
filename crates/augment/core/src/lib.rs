//! Combat modifier rules and the augments that bundle them.
//!
//! `augment-core` defines the modifier record, its applicability predicates,
//! totals aggregation and the [`Augment`] container, plus the fixed binary
//! layout used to persist per-entity modifier state. It performs no I/O; the
//! content and runtime crates build on the types re-exported here.
pub mod augment;
pub mod codec;
pub mod combat;
pub mod error;
pub mod modifier;
pub mod totals;
pub use augment::Augment;
pub use codec::{CodecError, PropReader, PropWriter};
pub use combat::{
    CombatOrigin, CreatureKind, DamageContext, DamageKind, Race, Vocabulary, VocabularyError,
};
pub use error::{EngineError, ErrorSeverity};
pub use modifier::{
    AttackModifier, CHANCE_MAX, DamageModifier, DefenseModifier, Factor, ModifierKind, Stance,
    WILDCARD_NAME,
};
pub use totals::{ModifierTotals, PERCENT_CAP};
