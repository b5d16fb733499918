//! Damage modifier records.
//!
//! A [`DamageModifier`] is one parametrized rule: how much (`value` and
//! [`Factor`]), how likely (`chance`), and against what (damage, origin and
//! target filters). Its category is a [`ModifierKind`], a variant discriminated
//! by [`Stance`] so an attack record can only carry an attack type and a
//! defense record only a defense type.
//!
//! Rolling `chance` and applying the effect are consumer responsibilities; a
//! record only answers whether it applies to a [`DamageContext`].

mod wire;

use core::fmt;
use core::str::FromStr;

use strum::IntoEnumIterator;

use crate::combat::{
    CombatOrigin, CreatureKind, DamageContext, DamageKind, Race, Vocabulary, VocabularyError,
};

/// Highest trigger chance, in percent.
pub const CHANCE_MAX: u8 = 100;

/// Creature name filter value that matches every target name.
pub const WILDCARD_NAME: &str = "none";

/// Which damage flow a modifier acts on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
#[repr(u8)]
pub enum Stance {
    /// Unassigned; a record in this stance is never stored in an augment.
    #[default]
    None = 0,
    /// Outgoing damage.
    Attack = 1,
    /// Incoming damage.
    Defense = 2,
}

impl Stance {
    pub const fn wire_value(self) -> u8 {
        self as u8
    }

    pub const fn from_wire(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::None),
            1 => Some(Self::Attack),
            2 => Some(Self::Defense),
            _ => None,
        }
    }
}

/// Modifier types valid under [`Stance::Attack`].
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
pub enum AttackModifier {
    #[default]
    None = 0,
    Lifesteal,
    Manasteal,
    Staminasteal,
    Soulsteal,
    Critical,
    Piercing,
    /// Transmutes a matched hit into [`DamageModifier::conversion_type`].
    Conversion,
}

impl AttackModifier {
    pub const fn wire_value(self) -> u8 {
        self as u8
    }

    pub fn from_wire(value: u8) -> Option<Self> {
        Self::iter().find(|kind| kind.wire_value() == value)
    }
}

/// Modifier types valid under [`Stance::Defense`].
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
pub enum DefenseModifier {
    #[default]
    None = 0,
    Absorb,
    Restore,
    Replenish,
    Revive,
    Reflect,
    Deflect,
    Ricochet,
    Resist,
    /// Transmutes a matched incoming hit into [`DamageModifier::conversion_type`].
    Reform,
    Weakness,
}

impl DefenseModifier {
    pub const fn wire_value(self) -> u8 {
        self as u8
    }

    pub fn from_wire(value: u8) -> Option<Self> {
        Self::iter().find(|kind| kind.wire_value() == value)
    }
}

/// Category of a modifier, tagged by stance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModifierKind {
    /// No stance yet. Augments ignore records of this kind.
    #[default]
    Unassigned,
    Attack(AttackModifier),
    Defense(DefenseModifier),
}

impl ModifierKind {
    pub const fn stance(self) -> Stance {
        match self {
            Self::Unassigned => Stance::None,
            Self::Attack(_) => Stance::Attack,
            Self::Defense(_) => Stance::Defense,
        }
    }

    /// Numeric type tag, meaningful only together with [`Self::stance`].
    pub const fn type_tag(self) -> u8 {
        match self {
            Self::Unassigned => 0,
            Self::Attack(kind) => kind.wire_value(),
            Self::Defense(kind) => kind.wire_value(),
        }
    }

    /// Rebuilds a kind from its stance and type tag.
    ///
    /// Returns `None` when the tag is outside the stance's vocabulary. An
    /// unassigned stance accepts only tag `0`.
    pub fn from_parts(stance: Stance, tag: u8) -> Option<Self> {
        match stance {
            Stance::None => (tag == 0).then_some(Self::Unassigned),
            Stance::Attack => AttackModifier::from_wire(tag).map(Self::Attack),
            Stance::Defense => DefenseModifier::from_wire(tag).map(Self::Defense),
        }
    }

    /// Attack `conversion` and defense `reform` carry a transform target.
    pub const fn is_conversion_class(self) -> bool {
        matches!(
            self,
            Self::Attack(AttackModifier::Conversion) | Self::Defense(DefenseModifier::Reform)
        )
    }
}

impl From<AttackModifier> for ModifierKind {
    fn from(kind: AttackModifier) -> Self {
        Self::Attack(kind)
    }
}

impl From<DefenseModifier> for ModifierKind {
    fn from(kind: DefenseModifier) -> Self {
        Self::Defense(kind)
    }
}

/// Resolves a configuration `mod` name.
///
/// The attack vocabulary is consulted first, so `piercing` is an attack type.
/// `none` names no stance and is rejected like any unknown string.
impl FromStr for ModifierKind {
    type Err = VocabularyError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match AttackModifier::from_str(name) {
            Ok(kind) if kind != AttackModifier::None => return Ok(Self::Attack(kind)),
            _ => {}
        }
        match DefenseModifier::from_str(name) {
            Ok(kind) if kind != DefenseModifier::None => Ok(Self::Defense(kind)),
            _ => Err(VocabularyError::UnknownModifier(name.to_owned())),
        }
    }
}

impl fmt::Display for ModifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unassigned => f.write_str("none"),
            Self::Attack(kind) => fmt::Display::fmt(kind, f),
            Self::Defense(kind) => fmt::Display::fmt(kind, f),
        }
    }
}

/// Whether a modifier's value is a percentage or an absolute amount.
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
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
#[repr(u8)]
pub enum Factor {
    #[default]
    Percent = 0,
    Flat = 1,
}

impl Factor {
    pub const fn wire_value(self) -> u8 {
        self as u8
    }

    pub const fn from_wire(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Percent),
            1 => Some(Self::Flat),
            _ => None,
        }
    }
}

impl Vocabulary for Factor {
    const VOCABULARY: &'static str = "factor";
}

/// One damage modification rule.
///
/// Equality compares every field; [`crate::Augment::remove_modifier`] relies on it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageModifier {
    kind: ModifierKind,
    value: u16,
    factor: Factor,
    chance: u8,
    damage: DamageKind,
    transform: DamageKind,
    origin: CombatOrigin,
    target: CreatureKind,
    race: Race,
    creature_name: String,
}

impl Default for DamageModifier {
    fn default() -> Self {
        Self {
            kind: ModifierKind::Unassigned,
            value: 0,
            factor: Factor::Percent,
            chance: 0,
            damage: DamageKind::None,
            transform: DamageKind::None,
            origin: CombatOrigin::None,
            target: CreatureKind::Attackable,
            race: Race::None,
            creature_name: WILDCARD_NAME.to_owned(),
        }
    }
}

impl DamageModifier {
    /// Creates a modifier with wildcard filters.
    ///
    /// `chance` is clamped to [`CHANCE_MAX`].
    pub fn new(kind: impl Into<ModifierKind>, value: u16, factor: Factor, chance: u8) -> Self {
        Self {
            kind: kind.into(),
            value,
            factor,
            chance: chance.min(CHANCE_MAX),
            ..Self::default()
        }
    }

    /// Restricts the modifier to one damage kind (builder pattern).
    #[must_use]
    pub fn with_damage(mut self, damage: DamageKind) -> Self {
        self.damage = damage;
        self
    }

    /// Restricts the modifier to one origin (builder pattern).
    #[must_use]
    pub fn with_origin(mut self, origin: CombatOrigin) -> Self {
        self.origin = origin;
        self
    }

    /// Restricts the modifier to a target class and race (builder pattern).
    #[must_use]
    pub fn with_target(mut self, target: CreatureKind, race: Race) -> Self {
        self.target = target;
        self.race = race;
        self
    }

    /// Restricts the modifier to targets with exactly this name (builder pattern).
    #[must_use]
    pub fn with_creature_name(mut self, name: impl Into<String>) -> Self {
        self.creature_name = name.into();
        self
    }

    /// Sets the damage kind a conversion or reform transmutes into (builder pattern).
    #[must_use]
    pub fn with_transform(mut self, damage: DamageKind) -> Self {
        self.transform = damage;
        self
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn kind(&self) -> ModifierKind {
        self.kind
    }

    pub fn stance(&self) -> Stance {
        self.kind.stance()
    }

    pub fn type_tag(&self) -> u8 {
        self.kind.type_tag()
    }

    pub fn value(&self) -> u16 {
        self.value
    }

    pub fn factor(&self) -> Factor {
        self.factor
    }

    pub fn chance(&self) -> u8 {
        self.chance
    }

    pub fn damage_filter(&self) -> DamageKind {
        self.damage
    }

    pub fn origin_filter(&self) -> CombatOrigin {
        self.origin
    }

    pub fn target_filter(&self) -> CreatureKind {
        self.target
    }

    pub fn race_filter(&self) -> Race {
        self.race
    }

    pub fn creature_name(&self) -> &str {
        &self.creature_name
    }

    /// Raw transform target, as stored and persisted regardless of kind.
    pub fn transform_damage(&self) -> DamageKind {
        self.transform
    }

    /// Transform target of a conversion-class modifier.
    ///
    /// Always `None` for other kinds, whatever the stored field holds.
    pub fn conversion_type(&self) -> Option<DamageKind> {
        self.kind.is_conversion_class().then_some(self.transform)
    }

    pub fn is_percent(&self) -> bool {
        self.factor == Factor::Percent
    }

    pub fn is_flat_value(&self) -> bool {
        self.factor == Factor::Flat
    }

    pub fn is_attack_stance(&self) -> bool {
        self.stance() == Stance::Attack
    }

    pub fn is_defense_stance(&self) -> bool {
        self.stance() == Stance::Defense
    }

    // ------------------------------------------------------------------------
    // Predicates
    // ------------------------------------------------------------------------

    pub fn applies_to_damage(&self, damage: DamageKind) -> bool {
        self.damage.is_wildcard() || self.damage == damage
    }

    /// Matches wildcard and equal origins; an `augment` filter also matches
    /// every augment-effect origin (absorb, restore, reflect, deflect,
    /// ricochet, piercing).
    pub fn applies_to_origin(&self, origin: CombatOrigin) -> bool {
        let matches = self.origin.is_wildcard() || self.origin == origin;
        let expands = self.origin == CombatOrigin::Augment && origin.is_augment_effect();
        matches || expands
    }

    /// Class match (exact, wildcard, or summon-aggregate expansion) and race
    /// match and name match must all hold.
    pub fn applies_to_target(&self, target: CreatureKind, race: Race, name: &str) -> bool {
        let matches_class = self.target.is_wildcard() || self.target == target;
        let aggregate_class = self.target.is_summon_aggregate() && target.is_monster_or_summon();
        let matches_race = self.race.is_wildcard() || self.race == race;

        if !((matches_class || aggregate_class) && matches_race) {
            return false;
        }

        self.creature_name.is_empty()
            || self.creature_name == WILDCARD_NAME
            || self.creature_name == name
    }

    /// Conjunction of the damage, origin and target predicates.
    pub fn applies_to(&self, context: &DamageContext<'_>) -> bool {
        self.applies_to_damage(context.damage)
            && self.applies_to_origin(context.origin)
            && self.applies_to_target(context.target, context.race, context.target_name)
    }

    // ------------------------------------------------------------------------
    // Mutators
    // ------------------------------------------------------------------------

    /// Changes the category, which may move the record to the other stance.
    ///
    /// A record already held by an augment stays in the list it was added to.
    pub fn set_kind(&mut self, kind: impl Into<ModifierKind>) {
        self.kind = kind.into();
    }

    pub fn set_value(&mut self, value: u16) {
        self.value = value;
    }

    pub fn increase_value(&mut self, amount: u16) {
        self.value = self.value.saturating_add(amount);
    }

    pub fn decrease_value(&mut self, amount: u16) {
        self.value = self.value.saturating_sub(amount);
    }

    /// Sets the trigger chance, clamped to [`CHANCE_MAX`].
    pub fn set_chance(&mut self, chance: u8) {
        self.chance = chance.min(CHANCE_MAX);
    }

    pub fn set_factor(&mut self, factor: Factor) {
        self.factor = factor;
    }

    pub fn set_damage_filter(&mut self, damage: DamageKind) {
        self.damage = damage;
    }

    pub fn set_origin_filter(&mut self, origin: CombatOrigin) {
        self.origin = origin;
    }

    pub fn set_target_filter(&mut self, target: CreatureKind) {
        self.target = target;
    }

    pub fn set_race_filter(&mut self, race: Race) {
        self.race = race;
    }

    pub fn set_creature_name(&mut self, name: impl Into<String>) {
        self.creature_name = name.into();
    }

    pub fn set_transform_damage(&mut self, damage: DamageKind) {
        self.transform = damage;
    }
}
