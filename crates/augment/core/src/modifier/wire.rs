//! Persisted layout of a single modifier record.
//!
//! ```text
//! stance u8 | type u8 | value u16 | factor u8 | chance u8 | damage u16 |
//! transform u16 | origin u8 | target u8 | race u8 | name (u16 len + bytes)
//! ```

use crate::codec::{CodecError, PropReader, PropWriter};
use crate::combat::{CombatOrigin, CreatureKind, DamageKind, Race};

use super::{CHANCE_MAX, DamageModifier, Factor, ModifierKind, Stance};

impl DamageModifier {
    /// Appends this record to `writer`.
    ///
    /// Fails only if the creature name exceeds the `u16` length prefix, in
    /// which case nothing is written.
    pub fn serialize(&self, writer: &mut PropWriter) -> Result<(), CodecError> {
        if self.creature_name.len() > u16::MAX as usize {
            return Err(CodecError::StringTooLong {
                field: "creature name",
                len: self.creature_name.len(),
            });
        }

        writer.write_u8(self.stance().wire_value());
        writer.write_u8(self.type_tag());
        writer.write_u16(self.value);
        writer.write_u8(self.factor.wire_value());
        writer.write_u8(self.chance);
        writer.write_u16(self.damage.wire_value());
        writer.write_u16(self.transform.wire_value());
        writer.write_u8(self.origin.wire_value());
        writer.write_u8(self.target.wire_value());
        writer.write_u8(self.race.wire_value());
        writer.write_str("creature name", &self.creature_name)
    }

    /// Reads one record from `reader`.
    ///
    /// Any truncated or out-of-vocabulary field fails the whole record; no
    /// partially-read modifier is ever returned.
    pub fn unserialize(reader: &mut PropReader<'_>) -> Result<Self, CodecError> {
        let stance_tag = reader.read_u8("stance")?;
        let stance = Stance::from_wire(stance_tag).ok_or(CodecError::InvalidTag {
            field: "stance",
            value: stance_tag.into(),
        })?;

        let type_tag = reader.read_u8("modifier type")?;
        let kind = ModifierKind::from_parts(stance, type_tag).ok_or(CodecError::InvalidTag {
            field: "modifier type",
            value: type_tag.into(),
        })?;

        let value = reader.read_u16("value")?;

        let factor_tag = reader.read_u8("factor")?;
        let factor = Factor::from_wire(factor_tag).ok_or(CodecError::InvalidTag {
            field: "factor",
            value: factor_tag.into(),
        })?;

        let chance = reader.read_u8("chance")?;
        if chance > CHANCE_MAX {
            return Err(CodecError::InvalidTag {
                field: "chance",
                value: chance.into(),
            });
        }

        let damage = read_damage(reader, "damage filter")?;
        let transform = read_damage(reader, "transform damage")?;

        let origin_tag = reader.read_u8("origin filter")?;
        let origin = CombatOrigin::from_wire(origin_tag).ok_or(CodecError::InvalidTag {
            field: "origin filter",
            value: origin_tag.into(),
        })?;

        let target_tag = reader.read_u8("target filter")?;
        let target = CreatureKind::from_wire(target_tag).ok_or(CodecError::InvalidTag {
            field: "target filter",
            value: target_tag.into(),
        })?;

        let race_tag = reader.read_u8("race filter")?;
        let race = Race::from_wire(race_tag).ok_or(CodecError::InvalidTag {
            field: "race filter",
            value: race_tag.into(),
        })?;

        let creature_name = reader.read_str("creature name")?;

        Ok(Self {
            kind,
            value,
            factor,
            chance,
            damage,
            transform,
            origin,
            target,
            race,
            creature_name,
        })
    }

    /// Encodes this record into a fresh buffer.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        let mut writer = PropWriter::with_capacity(16 + self.creature_name.len());
        self.serialize(&mut writer)?;
        Ok(writer.into_bytes())
    }

    /// Decodes a record from the start of `bytes`, ignoring trailing data.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        Self::unserialize(&mut PropReader::new(bytes))
    }
}

fn read_damage(reader: &mut PropReader<'_>, field: &'static str) -> Result<DamageKind, CodecError> {
    let tag = reader.read_u16(field)?;
    DamageKind::from_wire(tag).ok_or(CodecError::InvalidTag { field, value: tag })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifier::{AttackModifier, DefenseModifier};

    fn conversion() -> DamageModifier {
        DamageModifier::new(AttackModifier::Conversion, 25, Factor::Flat, 40)
            .with_damage(DamageKind::Physical)
            .with_transform(DamageKind::Fire)
            .with_origin(CombatOrigin::Melee)
            .with_target(CreatureKind::SummonHostile, Race::Venom)
            .with_creature_name("Dragon Lord")
    }

    #[test]
    fn layout_is_fixed() {
        let bytes = conversion().to_bytes().unwrap();

        let parts: [&[u8]; 8] = [
            &[1, 7],              // stance attack, type conversion
            &25u16.to_le_bytes(), // value
            &[1, 40],             // factor flat, chance
            &1u16.to_le_bytes(),  // damage physical
            &8u16.to_le_bytes(),  // transform fire
            &[3, 6, 1],           // origin melee, target hostile summon, race venom
            &11u16.to_le_bytes(), // name length
            b"Dragon Lord",
        ];

        assert_eq!(bytes, parts.concat());
    }

    #[test]
    fn decode_restores_every_field() {
        let original = conversion();
        let decoded = DamageModifier::from_bytes(&original.to_bytes().unwrap()).unwrap();

        assert_eq!(decoded, original);
        assert_eq!(decoded.conversion_type(), Some(DamageKind::Fire));
    }

    #[test]
    fn default_record_keeps_wildcard_name() {
        let decoded =
            DamageModifier::from_bytes(&DamageModifier::default().to_bytes().unwrap()).unwrap();

        assert_eq!(decoded.stance(), Stance::None);
        assert_eq!(decoded.creature_name(), "none");
    }

    #[test]
    fn every_truncation_fails() {
        let bytes = conversion().to_bytes().unwrap();

        for len in 0..bytes.len() {
            let result = DamageModifier::from_bytes(&bytes[..len]);
            assert!(
                matches!(result, Err(CodecError::UnexpectedEof { .. })),
                "prefix of {len} bytes decoded to {result:?}"
            );
        }
    }

    #[test]
    fn type_outside_stance_vocabulary_is_rejected() {
        let mut bytes = DamageModifier::new(DefenseModifier::Weakness, 5, Factor::Percent, 100)
            .to_bytes()
            .unwrap();
        bytes[0] = Stance::Attack.wire_value();

        assert_eq!(
            DamageModifier::from_bytes(&bytes),
            Err(CodecError::InvalidTag {
                field: "modifier type",
                value: 10,
            })
        );
    }

    #[test]
    fn unknown_tags_are_rejected() {
        let good = conversion().to_bytes().unwrap();

        let mut bad_damage = good.clone();
        bad_damage[6] = 0x10; // undefined combat bit
        assert!(matches!(
            DamageModifier::from_bytes(&bad_damage),
            Err(CodecError::InvalidTag { field: "damage filter", .. })
        ));

        let mut bad_chance = good.clone();
        bad_chance[5] = 101;
        assert!(matches!(
            DamageModifier::from_bytes(&bad_chance),
            Err(CodecError::InvalidTag { field: "chance", .. })
        ));

        let mut bad_race = good;
        bad_race[12] = 9;
        assert!(matches!(
            DamageModifier::from_bytes(&bad_race),
            Err(CodecError::InvalidTag { field: "race filter", .. })
        ));
    }

    #[test]
    fn every_tagged_field_rejects_unknown_values() {
        let good = conversion().to_bytes().unwrap();

        for (offset, byte, field) in [
            (0, 3, "stance"),
            (4, 2, "factor"),
            (10, 13, "origin filter"),
            (11, 10, "target filter"),
        ] {
            let mut bad = good.clone();
            bad[offset] = byte;
            assert_eq!(
                DamageModifier::from_bytes(&bad),
                Err(CodecError::InvalidTag {
                    field,
                    value: byte.into(),
                }),
                "{field}"
            );
        }
    }
}
