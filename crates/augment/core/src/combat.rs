//! Combat vocabulary shared by modifier filters and damage events.
//!
//! Each enum here plays two roles:
//! - the string vocabulary of the configuration document, aliases included
//!   (parsed through `strum::EnumString`, case-sensitive)
//! - a fixed-width tag in the persisted modifier layout (see [`crate::modifier`])
//!
//! The first variant of every filter enum is its wildcard.

use core::str::FromStr;

use strum::IntoEnumIterator;

use crate::error::{EngineError, ErrorSeverity};

/// Failure to resolve a configuration string against a fixed vocabulary.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum VocabularyError {
    #[error("unknown {vocabulary} name `{name}`")]
    UnknownTerm {
        vocabulary: &'static str,
        name: String,
    },

    #[error("no such modifier by type name `{0}`")]
    UnknownModifier(String),
}

impl EngineError for VocabularyError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Configuration
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownTerm { .. } => "VOCABULARY_UNKNOWN_TERM",
            Self::UnknownModifier(_) => "VOCABULARY_UNKNOWN_MODIFIER",
        }
    }
}

/// String-to-tag lookup for one configuration vocabulary.
///
/// `Default` is the fallback for unknown input, which for filter dimensions
/// is the wildcard.
pub trait Vocabulary: Sized + Default + FromStr {
    /// Vocabulary name used in error messages.
    const VOCABULARY: &'static str;

    /// Resolves `name`, reporting unknown strings.
    fn lookup(name: &str) -> Result<Self, VocabularyError> {
        name.parse().map_err(|_| VocabularyError::UnknownTerm {
            vocabulary: Self::VOCABULARY,
            name: name.to_owned(),
        })
    }

    /// Resolves `name`, silently falling back to the default tag.
    fn lookup_or_default(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }
}

// ============================================================================
// Damage Kind
// ============================================================================

/// Damage kind carried by a damage event, or filtered on by a modifier.
///
/// Discriminants are the single-bit combat type values used on the wire.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum DamageKind {
    /// Wildcard; a filter of `None` matches every damage kind.
    #[default]
    #[strum(to_string = "none", serialize = "all")]
    None = 0,
    #[strum(to_string = "physical", serialize = "melee")]
    Physical = 1 << 0,
    #[strum(to_string = "energy", serialize = "electric")]
    Energy = 1 << 1,
    #[strum(to_string = "earth", serialize = "poison")]
    Earth = 1 << 2,
    #[strum(to_string = "fire")]
    Fire = 1 << 3,
    #[strum(to_string = "lifedrain", serialize = "lifesteal", serialize = "lifeleech")]
    LifeDrain = 1 << 5,
    #[strum(to_string = "manadrain", serialize = "manasteal", serialize = "manaleech")]
    ManaDrain = 1 << 6,
    #[strum(to_string = "drown", serialize = "water")]
    Drown = 1 << 8,
    #[strum(to_string = "ice")]
    Ice = 1 << 9,
    #[strum(to_string = "holy")]
    Holy = 1 << 10,
    #[strum(to_string = "death", serialize = "curse")]
    Death = 1 << 11,
}

impl DamageKind {
    /// Returns the tag written to the binary stream.
    pub const fn wire_value(self) -> u16 {
        self as u16
    }

    /// Resolves a tag read from the binary stream.
    pub fn from_wire(value: u16) -> Option<Self> {
        Self::iter().find(|kind| kind.wire_value() == value)
    }

    pub const fn is_wildcard(self) -> bool {
        matches!(self, Self::None)
    }
}

impl Vocabulary for DamageKind {
    const VOCABULARY: &'static str = "damage";
}

// ============================================================================
// Combat Origin
// ============================================================================

/// Causal source of a damage event.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
#[repr(u8)]
pub enum CombatOrigin {
    /// Wildcard; a filter of `None` matches every origin.
    #[default]
    #[strum(to_string = "none", serialize = "all")]
    None = 0,
    Condition,
    Spell,
    Melee,
    Ranged,
    Absorb,
    Restore,
    Reflect,
    Deflect,
    Ricochet,
    Piercing,
    /// Filter-only tag standing for every synthetic origin produced by an augment effect.
    Augment,
    Imbuement,
}

impl CombatOrigin {
    pub const fn wire_value(self) -> u8 {
        self as u8
    }

    pub fn from_wire(value: u8) -> Option<Self> {
        Self::iter().find(|origin| origin.wire_value() == value)
    }

    pub const fn is_wildcard(self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns true for the origins an [`CombatOrigin::Augment`] filter expands to.
    pub const fn is_augment_effect(self) -> bool {
        matches!(
            self,
            Self::Absorb
                | Self::Restore
                | Self::Reflect
                | Self::Deflect
                | Self::Ricochet
                | Self::Piercing
        )
    }
}

impl Vocabulary for CombatOrigin {
    const VOCABULARY: &'static str = "origin";
}

// ============================================================================
// Creature Kind
// ============================================================================

/// Creature class of a damage target.
///
/// This dimension has no wildcard name of its own: `none` and `all` both map
/// to [`CreatureKind::Attackable`], which matches any target.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum CreatureKind {
    #[default]
    #[strum(to_string = "none", serialize = "all")]
    Attackable = 0,
    #[strum(to_string = "player")]
    Player,
    #[strum(to_string = "monster")]
    Monster,
    #[strum(to_string = "npc")]
    Npc,
    #[strum(to_string = "allsummon", serialize = "summons")]
    SummonAll,
    #[strum(to_string = "ownedsummon", serialize = "mysummon")]
    SummonOwn,
    #[strum(to_string = "hostilesummon", serialize = "enemysummon")]
    SummonHostile,
    #[strum(to_string = "guildsummon")]
    SummonGuild,
    #[strum(to_string = "partysummon")]
    SummonParty,
    #[strum(to_string = "boss")]
    Boss,
}

impl CreatureKind {
    pub const fn wire_value(self) -> u8 {
        self as u8
    }

    pub fn from_wire(value: u8) -> Option<Self> {
        Self::iter().find(|kind| kind.wire_value() == value)
    }

    pub const fn is_wildcard(self) -> bool {
        matches!(self, Self::Attackable)
    }

    /// Filter classes that also cover every summon sub-category.
    pub const fn is_summon_aggregate(self) -> bool {
        matches!(self, Self::Monster | Self::SummonAll)
    }

    /// Targets covered by a summon-aggregate filter.
    pub const fn is_monster_or_summon(self) -> bool {
        matches!(
            self,
            Self::Monster
                | Self::SummonAll
                | Self::SummonOwn
                | Self::SummonGuild
                | Self::SummonHostile
                | Self::SummonParty
        )
    }
}

impl Vocabulary for CreatureKind {
    const VOCABULARY: &'static str = "target";
}

// ============================================================================
// Race
// ============================================================================

/// Creature race of a damage target.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
#[repr(u8)]
pub enum Race {
    /// Wildcard; a filter of `None` matches every race.
    #[default]
    None = 0,
    Venom,
    Blood,
    Undead,
    Fire,
    Energy,
}

impl Race {
    pub const fn wire_value(self) -> u8 {
        self as u8
    }

    pub fn from_wire(value: u8) -> Option<Self> {
        Self::iter().find(|race| race.wire_value() == value)
    }

    pub const fn is_wildcard(self) -> bool {
        matches!(self, Self::None)
    }
}

impl Vocabulary for Race {
    const VOCABULARY: &'static str = "race";
}

// ============================================================================
// Damage Context
// ============================================================================

/// The facts of one damage event that modifier predicates are evaluated against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamageContext<'a> {
    pub damage: DamageKind,
    pub origin: CombatOrigin,
    pub target: CreatureKind,
    pub race: Race,
    pub target_name: &'a str,
}

impl<'a> DamageContext<'a> {
    /// Creates a context against an unnamed, raceless attackable target.
    pub const fn new(damage: DamageKind, origin: CombatOrigin) -> Self {
        Self {
            damage,
            origin,
            target: CreatureKind::Attackable,
            race: Race::None,
            target_name: "",
        }
    }

    /// Attaches the target description (builder pattern).
    #[must_use]
    pub const fn against(mut self, target: CreatureKind, race: Race, target_name: &'a str) -> Self {
        self.target = target;
        self.race = race;
        self.target_name = target_name;
        self
    }
}
