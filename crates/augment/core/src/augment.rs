//! Named bundles of modifier records.

use crate::codec::{CodecError, PropReader, PropWriter};
use crate::combat::DamageContext;
use crate::modifier::{AttackModifier, DamageModifier, DefenseModifier, ModifierKind, Stance};
use crate::totals::ModifierTotals;

/// A named, described collection of modifiers partitioned by stance.
///
/// `Clone` is a deep copy: the clone owns independent records, so mutating
/// them never reaches the original. Equality compares names only.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Augment {
    name: String,
    description: String,
    attack_modifiers: Vec<DamageModifier>,
    defense_modifiers: Vec<DamageModifier>,
}

impl PartialEq for Augment {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Augment {}

impl Augment {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the description (builder pattern).
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Adds a modifier (builder pattern). See [`Self::add_modifier`].
    #[must_use]
    pub fn with_modifier(mut self, modifier: DamageModifier) -> Self {
        self.add_modifier(modifier);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Appends `modifier` to the list matching its stance.
    ///
    /// A modifier with an unassigned stance is dropped without error.
    pub fn add_modifier(&mut self, modifier: DamageModifier) {
        match modifier.stance() {
            Stance::Attack => self.attack_modifiers.push(modifier),
            Stance::Defense => self.defense_modifiers.push(modifier),
            Stance::None => {}
        }
    }

    /// Removes every record equal to `modifier` from the list matching its stance.
    ///
    /// Records are matched by value, not identity: two identical records added
    /// separately are both removed. Returns how many records were removed; a
    /// miss removes nothing.
    pub fn remove_modifier(&mut self, modifier: &DamageModifier) -> usize {
        let list = match modifier.stance() {
            Stance::Attack => &mut self.attack_modifiers,
            Stance::Defense => &mut self.defense_modifiers,
            Stance::None => return 0,
        };

        let before = list.len();
        list.retain(|held| held != modifier);
        before - list.len()
    }

    pub fn attack_modifiers(&self) -> &[DamageModifier] {
        &self.attack_modifiers
    }

    pub fn defense_modifiers(&self) -> &[DamageModifier] {
        &self.defense_modifiers
    }

    /// Live attack records, for in-place edits. Use [`Self::add_modifier`]
    /// and [`Self::remove_modifier`] to change the list itself.
    pub fn attack_modifiers_mut(&mut self) -> &mut [DamageModifier] {
        &mut self.attack_modifiers
    }

    /// Live defense records, for in-place edits.
    pub fn defense_modifiers_mut(&mut self) -> &mut [DamageModifier] {
        &mut self.defense_modifiers
    }

    /// Attack records of one type, in insertion order.
    pub fn attack_modifiers_of(&self, kind: AttackModifier) -> Vec<&DamageModifier> {
        let wanted = ModifierKind::Attack(kind);
        self.attack_modifiers
            .iter()
            .filter(|modifier| modifier.kind() == wanted)
            .collect()
    }

    /// Defense records of one type, in insertion order.
    pub fn defense_modifiers_of(&self, kind: DefenseModifier) -> Vec<&DamageModifier> {
        let wanted = ModifierKind::Defense(kind);
        self.defense_modifiers
            .iter()
            .filter(|modifier| modifier.kind() == wanted)
            .collect()
    }

    pub fn modifier_count(&self) -> usize {
        self.attack_modifiers.len() + self.defense_modifiers.len()
    }

    /// Folds every attack record of `kind` that applies to `context`.
    ///
    /// Chance is not rolled here.
    pub fn attack_totals(&self, kind: AttackModifier, context: &DamageContext<'_>) -> ModifierTotals {
        self.attack_modifiers_of(kind)
            .into_iter()
            .filter(|modifier| modifier.applies_to(context))
            .collect()
    }

    /// Folds every defense record of `kind` that applies to `context`.
    pub fn defense_totals(
        &self,
        kind: DefenseModifier,
        context: &DamageContext<'_>,
    ) -> ModifierTotals {
        self.defense_modifiers_of(kind)
            .into_iter()
            .filter(|modifier| modifier.applies_to(context))
            .collect()
    }

    // ------------------------------------------------------------------------
    // Snapshot encoding
    // ------------------------------------------------------------------------

    /// Writes name, description, then a counted list of attack records and a
    /// counted list of defense records.
    ///
    /// A held record whose stance no longer matches its list (e.g. after
    /// `set_kind` through [`Self::attack_modifiers_mut`]) fails the encode
    /// before anything is written, since [`Self::decode`] would refuse it.
    pub fn encode(&self, writer: &mut PropWriter) -> Result<(), CodecError> {
        for modifier in &self.attack_modifiers {
            check_stance(modifier, Stance::Attack)?;
        }
        for modifier in &self.defense_modifiers {
            check_stance(modifier, Stance::Defense)?;
        }

        writer.write_str("augment name", &self.name)?;
        writer.write_str("augment description", &self.description)?;
        for (field, list) in [
            ("attack modifiers", &self.attack_modifiers),
            ("defense modifiers", &self.defense_modifiers),
        ] {
            writer.write_len(field, list.len())?;
            for modifier in list {
                modifier.serialize(writer)?;
            }
        }
        Ok(())
    }

    /// Reads a snapshot written by [`Self::encode`].
    ///
    /// A record found in the wrong list fails the whole snapshot.
    pub fn decode(reader: &mut PropReader<'_>) -> Result<Self, CodecError> {
        let name = reader.read_str("augment name")?;
        let description = reader.read_str("augment description")?;
        let attack_modifiers = read_list(reader, "attack modifiers", Stance::Attack)?;
        let defense_modifiers = read_list(reader, "defense modifiers", Stance::Defense)?;

        Ok(Self {
            name,
            description,
            attack_modifiers,
            defense_modifiers,
        })
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        let mut writer = PropWriter::new();
        self.encode(&mut writer)?;
        Ok(writer.into_bytes())
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        Self::decode(&mut PropReader::new(bytes))
    }
}

fn read_list(
    reader: &mut PropReader<'_>,
    field: &'static str,
    stance: Stance,
) -> Result<Vec<DamageModifier>, CodecError> {
    let count = reader.read_len(field)?;
    let mut list = Vec::with_capacity(count.min(reader.remaining()));
    for _ in 0..count {
        let modifier = DamageModifier::unserialize(reader)?;
        check_stance(&modifier, stance)?;
        list.push(modifier);
    }
    Ok(list)
}

fn check_stance(modifier: &DamageModifier, stance: Stance) -> Result<(), CodecError> {
    if modifier.stance() == stance {
        return Ok(());
    }
    Err(CodecError::InvalidTag {
        field: "stance",
        value: modifier.stance().wire_value().into(),
    })
}
