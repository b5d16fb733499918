//! Augments attached to one game entity.
//!
//! Attaching always goes through [`AugmentRegistry::make_augment`], so each
//! entity owns independent copies and may change them freely.

use augment_core::{
    AttackModifier, Augment, CodecError, DamageContext, DamageModifier, DefenseModifier,
    ModifierTotals, PropReader, PropWriter,
};
use tracing::debug;

use crate::error::Result;
use crate::registry::AugmentRegistry;

/// Per-entity set of attached augment copies, in attach order.
#[derive(Debug, Clone, Default)]
pub struct EntityAugments {
    augments: Vec<Augment>,
}

impl EntityAugments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clones the template `name` from `registry` and attaches the copy.
    pub fn attach(&mut self, registry: &AugmentRegistry, name: &str) -> Result<&mut Augment> {
        let augment = registry.make_augment(name)?;
        debug!(augment = %name, "attached augment");
        Ok(self.attach_augment(augment))
    }

    /// Attaches an augment the caller already owns.
    pub fn attach_augment(&mut self, augment: Augment) -> &mut Augment {
        self.augments.push(augment);
        let last = self.augments.len() - 1;
        &mut self.augments[last]
    }

    /// Detaches the first augment named `name`.
    pub fn detach(&mut self, name: &str) -> Option<Augment> {
        let index = self.augments.iter().position(|augment| augment.name() == name)?;
        Some(self.augments.remove(index))
    }

    pub fn get(&self, name: &str) -> Option<&Augment> {
        self.augments.iter().find(|augment| augment.name() == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Augment> {
        self.augments.iter_mut().find(|augment| augment.name() == name)
    }

    pub fn augments(&self) -> &[Augment] {
        &self.augments
    }

    pub fn len(&self) -> usize {
        self.augments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.augments.is_empty()
    }

    /// Attack records of `kind` across every attached augment that apply to `context`.
    pub fn matching_attack<'a>(
        &'a self,
        kind: AttackModifier,
        context: &'a DamageContext<'_>,
    ) -> impl Iterator<Item = &'a DamageModifier> + 'a {
        self.augments
            .iter()
            .flat_map(move |augment| augment.attack_modifiers_of(kind))
            .filter(move |modifier| modifier.applies_to(context))
    }

    /// Defense records of `kind` across every attached augment that apply to `context`.
    pub fn matching_defense<'a>(
        &'a self,
        kind: DefenseModifier,
        context: &'a DamageContext<'_>,
    ) -> impl Iterator<Item = &'a DamageModifier> + 'a {
        self.augments
            .iter()
            .flat_map(move |augment| augment.defense_modifiers_of(kind))
            .filter(move |modifier| modifier.applies_to(context))
    }

    /// Totals of every matching attack record, folded with the capping accumulation.
    pub fn attack_totals(&self, kind: AttackModifier, context: &DamageContext<'_>) -> ModifierTotals {
        self.matching_attack(kind, context).collect()
    }

    /// Totals of every matching defense record, folded with the capping accumulation.
    pub fn defense_totals(
        &self,
        kind: DefenseModifier,
        context: &DamageContext<'_>,
    ) -> ModifierTotals {
        self.matching_defense(kind, context).collect()
    }

    // ------------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------------

    /// Writes a `u16` count followed by each augment snapshot.
    pub fn encode(&self, writer: &mut PropWriter) -> std::result::Result<(), CodecError> {
        writer.write_len("attached augments", self.augments.len())?;
        for augment in &self.augments {
            augment.encode(writer)?;
        }
        Ok(())
    }

    pub fn decode(reader: &mut PropReader<'_>) -> std::result::Result<Self, CodecError> {
        let count = reader.read_len("attached augments")?;
        let mut augments = Vec::with_capacity(count.min(reader.remaining()));
        for _ in 0..count {
            augments.push(Augment::decode(reader)?);
        }
        Ok(Self { augments })
    }

    pub fn to_bytes(&self) -> std::result::Result<Vec<u8>, CodecError> {
        let mut writer = PropWriter::new();
        self.encode(&mut writer)?;
        Ok(writer.into_bytes())
    }

    pub fn from_bytes(bytes: &[u8]) -> std::result::Result<Self, CodecError> {
        Self::decode(&mut PropReader::new(bytes))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use augment_content::LoadOptions;
    use augment_core::{CombatOrigin, CreatureKind, DamageKind, Factor, Race};

    use crate::source::StaticSource;

    fn registry() -> AugmentRegistry {
        let source = StaticSource::from_ron(
            "attachment catalog",
            r#"(augments: [
                (name: "keen", modifiers: [(mod: "critical", value: 60)]),
                (name: "keener", modifiers: [
                    (mod: "critical", value: 55),
                    (mod: "critical", value: 10, factor: "flat", target: "monster"),
                ]),
                (name: "warded", modifiers: [(mod: "absorb", value: 12, damage: "fire")]),
            ])"#,
            LoadOptions::default(),
        )
        .unwrap();
        let registry = AugmentRegistry::new(Arc::new(source));
        registry.load_all().unwrap();
        registry
    }

    #[test]
    fn attached_copies_are_independent() {
        let registry = registry();
        let mut entity = EntityAugments::new();

        entity.attach(&registry, "keen").unwrap().attack_modifiers_mut()[0].set_value(1);

        assert_eq!(entity.get("keen").unwrap().attack_modifiers()[0].value(), 1);
        assert_eq!(registry.make_augment("keen").unwrap().attack_modifiers()[0].value(), 60);
        assert!(entity.attach(&registry, "missing").is_err());
        assert_eq!(entity.len(), 1);
    }

    #[test]
    fn totals_span_attached_augments_and_cap_percent() {
        let registry = registry();
        let mut entity = EntityAugments::new();
        entity.attach(&registry, "keen").unwrap();
        entity.attach(&registry, "keener").unwrap();
        entity.attach(&registry, "warded").unwrap();

        let hit = DamageContext::new(DamageKind::Physical, CombatOrigin::Melee).against(
            CreatureKind::SummonOwn,
            Race::Blood,
            "wolf",
        );
        assert_eq!(
            entity.attack_totals(AttackModifier::Critical, &hit),
            ModifierTotals::new(10, 100)
        );

        let player = DamageContext { target: CreatureKind::Player, ..hit };
        assert_eq!(entity.matching_attack(AttackModifier::Critical, &player).count(), 2);

        let fire = DamageContext { damage: DamageKind::Fire, ..hit };
        assert_eq!(
            entity.defense_totals(DefenseModifier::Absorb, &fire),
            ModifierTotals::new(0, 12)
        );
        assert!(entity.defense_totals(DefenseModifier::Absorb, &hit).is_zero());
    }

    #[test]
    fn detach_removes_first_by_name() {
        let registry = registry();
        let mut entity = EntityAugments::new();
        entity.attach(&registry, "keen").unwrap();
        entity.attach_augment(Augment::new("keen").with_description("second"));

        let detached = entity.detach("keen").unwrap();
        assert_eq!(detached.description(), "");
        assert_eq!(entity.get("keen").unwrap().description(), "second");
        assert!(entity.detach("warded").is_none());
    }

    #[test]
    fn snapshot_restores_attached_state() {
        let registry = registry();
        let mut entity = EntityAugments::new();
        entity.attach(&registry, "keener").unwrap();
        entity
            .attach(&registry, "warded")
            .unwrap()
            .add_modifier(DamageModifier::new(DefenseModifier::Resist, 3, Factor::Flat, 100));

        let restored = EntityAugments::from_bytes(&entity.to_bytes().unwrap()).unwrap();

        assert_eq!(restored.len(), 2);
        for (left, right) in restored.augments().iter().zip(entity.augments()) {
            assert_eq!(left.name(), right.name());
            assert_eq!(left.attack_modifiers(), right.attack_modifiers());
            assert_eq!(left.defense_modifiers(), right.defense_modifiers());
        }
    }

    #[test]
    fn edited_kind_fails_entity_snapshot() {
        let registry = registry();
        let mut entity = EntityAugments::new();
        entity.attach(&registry, "keen").unwrap();
        entity.attach(&registry, "warded").unwrap();

        entity.get_mut("keen").unwrap().attack_modifiers_mut()[0]
            .set_kind(DefenseModifier::Absorb);

        let mut writer = PropWriter::new();
        assert!(matches!(
            entity.encode(&mut writer),
            Err(CodecError::InvalidTag { field: "stance", .. })
        ));

        entity.get_mut("keen").unwrap().attack_modifiers_mut()[0]
            .set_kind(AttackModifier::Critical);
        let restored = EntityAugments::from_bytes(&entity.to_bytes().unwrap()).unwrap();
        assert_eq!(restored.len(), 2);
    }

    #[test]
    fn truncated_snapshot_is_rejected() {
        let mut entity = EntityAugments::new();
        entity.attach_augment(Augment::new("lone"));
        let bytes = entity.to_bytes().unwrap();

        assert!(EntityAugments::from_bytes(&bytes[..bytes.len() - 1]).is_err());
    }
}
