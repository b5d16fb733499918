//! Augment catalog loader.
//!
//! A catalog document lists augments, each with its modifiers described by
//! vocabulary names:
//!
//! ```ron
//! (
//!     augments: [
//!         (
//!             name: "vampiric",
//!             description: "Heals the wielder on every hit",
//!             modifiers: [
//!                 (mod: "lifesteal", value: 10, factor: "percent", chance: 100),
//!             ],
//!         ),
//!     ],
//! )
//! ```
//!
//! Parsing failures of the whole document are errors. Problems confined to one
//! augment or modifier are collected in the [`LoadReport`] and the offending
//! entry is skipped (or, for unknown filter names in lenient mode, replaced by
//! the wildcard).

use core::fmt;
use std::path::Path;

use augment_core::{
    Augment, CHANCE_MAX, CombatOrigin, CreatureKind, DamageKind, DamageModifier, EngineError,
    ErrorSeverity, Factor, ModifierKind, Race, Vocabulary, VocabularyError, WILDCARD_NAME,
};
use serde::{Deserialize, Serialize};

use crate::loaders::{DocumentFormat, LoadResult, read_document};

/// Augment catalog structure for RON/TOML files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AugmentCatalog {
    #[serde(default)]
    pub augments: Vec<AugmentDefinition>,
}

/// One augment entry. A missing or empty name is reported, not a parse error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AugmentDefinition {
    pub name: String,
    pub description: String,
    pub modifiers: Vec<ModifierDefinition>,
}

/// One modifier entry, with every attribute kept as written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModifierDefinition {
    #[serde(rename = "mod")]
    pub kind: String,
    pub value: i64,
    pub factor: String,
    pub chance: i64,
    pub damage: String,
    pub origin: String,
    pub target: String,
    pub race: String,
    pub monster: String,
    /// Read only for `conversion` and `reform`.
    #[serde(rename = "toDamage")]
    pub to_damage: String,
}

impl Default for ModifierDefinition {
    fn default() -> Self {
        Self {
            kind: String::new(),
            value: 0,
            factor: "percent".to_owned(),
            chance: i64::from(CHANCE_MAX),
            damage: WILDCARD_NAME.to_owned(),
            origin: WILDCARD_NAME.to_owned(),
            target: WILDCARD_NAME.to_owned(),
            race: WILDCARD_NAME.to_owned(),
            monster: WILDCARD_NAME.to_owned(),
            to_damage: WILDCARD_NAME.to_owned(),
        }
    }
}

/// Resolution policy for catalog entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Skip a modifier with an unknown factor or filter name instead of using the default.
    pub strict_vocabulary: bool,
}

impl LoadOptions {
    pub const fn strict() -> Self {
        Self {
            strict_vocabulary: true,
        }
    }
}

/// What the loader did with an entry it could not resolve cleanly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    Skipped,
    /// The term's default was used: the wildcard for filters, `percent` for factor.
    Wildcard,
}

impl fmt::Display for Fallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skipped => f.write_str("modifier skipped"),
            Self::Wildcard => f.write_str("default used"),
        }
    }
}

/// A problem confined to one catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadIssue {
    #[error("augment #{index} has no name, skipped")]
    MissingName { index: usize },

    #[error("augment `{augment}` modifier #{index}: {source}, modifier skipped")]
    UnknownModifier {
        augment: String,
        index: usize,
        source: VocabularyError,
    },

    #[error("augment `{augment}` modifier #{index}: {source}, {fallback}")]
    UnknownTerm {
        augment: String,
        index: usize,
        source: VocabularyError,
        fallback: Fallback,
    },

    #[error("augment `{augment}` modifier #{index}: {field} {value} out of range, modifier skipped")]
    ValueOutOfRange {
        augment: String,
        index: usize,
        field: &'static str,
        value: i64,
    },

    #[error("augment `{augment}` modifier #{index}: chance {chance} clamped to {max}", max = CHANCE_MAX)]
    ChanceClamped {
        augment: String,
        index: usize,
        chance: i64,
    },
}

impl LoadIssue {
    /// Returns true if the issue dropped an entry from the result.
    pub fn skipped_entry(&self) -> bool {
        match self {
            Self::MissingName { .. } | Self::UnknownModifier { .. } | Self::ValueOutOfRange { .. } => {
                true
            }
            Self::UnknownTerm { fallback, .. } => *fallback == Fallback::Skipped,
            Self::ChanceClamped { .. } => false,
        }
    }
}

impl EngineError for LoadIssue {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Configuration
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingName { .. } => "LOAD_MISSING_NAME",
            Self::UnknownModifier { .. } => "LOAD_UNKNOWN_MODIFIER",
            Self::UnknownTerm { .. } => "LOAD_UNKNOWN_TERM",
            Self::ValueOutOfRange { .. } => "LOAD_VALUE_OUT_OF_RANGE",
            Self::ChanceClamped { .. } => "LOAD_CHANCE_CLAMPED",
        }
    }
}

/// Resolved augments and every issue met along the way.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub augments: Vec<Augment>,
    pub issues: Vec<LoadIssue>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.augments.iter().map(Augment::name)
    }
}

/// Loader for augment catalogs from RON or TOML files.
pub struct AugmentLoader;

impl AugmentLoader {
    /// Load and resolve an augment catalog.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to a `.ron` or `.toml` file containing an AugmentCatalog
    /// * `options` - Resolution policy for unknown names
    pub fn load(path: &Path, options: LoadOptions) -> LoadResult<LoadReport> {
        let catalog = Self::read_catalog(path)?;
        Ok(Self::resolve(&catalog, options))
    }

    /// Parse a catalog file without resolving it.
    pub fn read_catalog(path: &Path) -> LoadResult<AugmentCatalog> {
        read_document(path)
    }

    pub fn from_ron_str(content: &str) -> LoadResult<AugmentCatalog> {
        DocumentFormat::Ron.parse(content)
    }

    pub fn from_toml_str(content: &str) -> LoadResult<AugmentCatalog> {
        DocumentFormat::Toml.parse(content)
    }

    /// Parse the sample catalog bundled with this crate.
    pub fn embedded() -> LoadResult<AugmentCatalog> {
        Self::from_ron_str(include_str!("../../data/augments.ron"))
    }

    /// Resolve every definition of `catalog` into augments.
    ///
    /// Augments keep document order. Duplicate names are passed through; the
    /// registry decides which one wins.
    pub fn resolve(catalog: &AugmentCatalog, options: LoadOptions) -> LoadReport {
        let mut report = LoadReport::default();

        for (index, definition) in catalog.augments.iter().enumerate() {
            if definition.name.is_empty() {
                report.issues.push(LoadIssue::MissingName { index });
                continue;
            }

            let mut augment =
                Augment::new(definition.name.as_str()).with_description(definition.description.as_str());
            for (modifier_index, modifier) in definition.modifiers.iter().enumerate() {
                let mut resolver = ModifierResolver {
                    augment: &definition.name,
                    index: modifier_index,
                    options,
                    issues: &mut report.issues,
                };
                if let Some(modifier) = resolver.resolve(modifier) {
                    augment.add_modifier(modifier);
                }
            }
            report.augments.push(augment);
        }

        report
    }
}

struct ModifierResolver<'a> {
    augment: &'a str,
    index: usize,
    options: LoadOptions,
    issues: &'a mut Vec<LoadIssue>,
}

impl ModifierResolver<'_> {
    fn resolve(&mut self, definition: &ModifierDefinition) -> Option<DamageModifier> {
        let kind = match definition.kind.parse::<ModifierKind>() {
            Ok(kind) => kind,
            Err(source) => {
                self.issues.push(LoadIssue::UnknownModifier {
                    augment: self.augment.to_owned(),
                    index: self.index,
                    source,
                });
                return None;
            }
        };

        let Ok(value) = u16::try_from(definition.value) else {
            self.out_of_range("value", definition.value);
            return None;
        };
        let chance = self.chance(definition.chance)?;

        let mut rejected = false;
        let factor = self.term::<Factor>(&definition.factor, &mut rejected);
        let damage = self.term::<DamageKind>(&definition.damage, &mut rejected);
        let origin = self.term::<CombatOrigin>(&definition.origin, &mut rejected);
        let target = self.term::<CreatureKind>(&definition.target, &mut rejected);
        let race = self.term::<Race>(&definition.race, &mut rejected);
        let transform = if kind.is_conversion_class() {
            self.term::<DamageKind>(&definition.to_damage, &mut rejected)
        } else {
            DamageKind::None
        };
        if rejected {
            return None;
        }

        let mut modifier = DamageModifier::new(kind, value, factor, chance)
            .with_damage(damage)
            .with_origin(origin)
            .with_target(target, race)
            .with_transform(transform);
        if definition.monster != WILDCARD_NAME {
            modifier.set_creature_name(definition.monster.as_str());
        }

        Some(modifier)
    }

    fn chance(&mut self, chance: i64) -> Option<u8> {
        if chance < 0 {
            self.out_of_range("chance", chance);
            return None;
        }
        match u8::try_from(chance) {
            Ok(chance) if chance <= CHANCE_MAX => Some(chance),
            _ => {
                self.issues.push(LoadIssue::ChanceClamped {
                    augment: self.augment.to_owned(),
                    index: self.index,
                    chance,
                });
                Some(CHANCE_MAX)
            }
        }
    }

    fn term<T: Vocabulary>(&mut self, name: &str, rejected: &mut bool) -> T {
        match T::lookup(name) {
            Ok(term) => term,
            Err(source) => {
                let fallback = if self.options.strict_vocabulary {
                    *rejected = true;
                    Fallback::Skipped
                } else {
                    Fallback::Wildcard
                };
                self.issues.push(LoadIssue::UnknownTerm {
                    augment: self.augment.to_owned(),
                    index: self.index,
                    source,
                    fallback,
                });
                T::default()
            }
        }
    }

    fn out_of_range(&mut self, field: &'static str, value: i64) {
        self.issues.push(LoadIssue::ValueOutOfRange {
            augment: self.augment.to_owned(),
            index: self.index,
            field,
            value,
        });
    }
}
