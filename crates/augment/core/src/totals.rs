//! Aggregate totals of matched modifiers.
//!
//! The two combining operators differ in how they treat the percent cap:
//!
//! - `+=` folds in one more contribution and caps the percent total at
//!   [`PERCENT_CAP`] after every step
//! - `+` merges two already-computed totals and does not cap
//!
//! ```
//! # use augment_core::ModifierTotals;
//! let mut folded = ModifierTotals::default();
//! folded.add_contribution(10, true);
//! folded.add_contribution(95, true);
//! assert_eq!(folded.percent_total, 100);
//!
//! let merged = ModifierTotals::new(0, 10) + ModifierTotals::new(0, 95);
//! assert_eq!(merged.percent_total, 105);
//! ```

use core::ops::{Add, AddAssign};

use crate::modifier::DamageModifier;

/// Upper bound of an incrementally accumulated percent total.
pub const PERCENT_CAP: u16 = 100;

/// Flat and percent sums of the modifiers matched for one damage event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModifierTotals {
    pub flat_total: u16,
    pub percent_total: u16,
}

impl ModifierTotals {
    pub const fn new(flat_total: u16, percent_total: u16) -> Self {
        Self {
            flat_total,
            percent_total,
        }
    }

    /// A single contribution routed into the field its factor names.
    pub const fn contribution(amount: u16, is_percent: bool) -> Self {
        if is_percent {
            Self::new(0, amount)
        } else {
            Self::new(amount, 0)
        }
    }

    /// Folds in one independent contribution, capping the percent total.
    pub fn add_contribution(&mut self, amount: u16, is_percent: bool) {
        *self += Self::contribution(amount, is_percent);
    }

    /// Folds in one matched modifier.
    pub fn accumulate(&mut self, modifier: &DamageModifier) {
        self.add_contribution(modifier.value(), modifier.is_percent());
    }

    pub const fn is_zero(&self) -> bool {
        self.flat_total == 0 && self.percent_total == 0
    }
}

/// Structural sum of two totals. No cap is applied to the percent total.
impl Add for ModifierTotals {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(
            self.flat_total.saturating_add(other.flat_total),
            self.percent_total.saturating_add(other.percent_total),
        )
    }
}

/// Incremental accumulation. The percent total never exceeds [`PERCENT_CAP`] afterwards.
impl AddAssign for ModifierTotals {
    fn add_assign(&mut self, other: Self) {
        self.flat_total = self.flat_total.saturating_add(other.flat_total);
        self.percent_total = self
            .percent_total
            .saturating_add(other.percent_total)
            .min(PERCENT_CAP);
    }
}

/// Folds matched modifiers with incremental accumulation.
impl<'a> FromIterator<&'a DamageModifier> for ModifierTotals {
    fn from_iter<I: IntoIterator<Item = &'a DamageModifier>>(iter: I) -> Self {
        let mut totals = Self::default();
        for modifier in iter {
            totals.accumulate(modifier);
        }
        totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifier::{AttackModifier, Factor};

    #[test]
    fn incremental_accumulation_caps_percent() {
        let mut totals = ModifierTotals::default();
        totals.add_contribution(10, true);
        totals.add_contribution(95, true);

        assert_eq!(totals, ModifierTotals::new(0, 100));
    }

    #[test]
    fn structural_sum_does_not_cap() {
        let merged = ModifierTotals::new(0, 10) + ModifierTotals::new(0, 95);

        assert_eq!(merged, ModifierTotals::new(0, 105));
    }

    #[test]
    fn flat_contributions_are_not_capped() {
        let mut totals = ModifierTotals::default();
        totals.add_contribution(150, false);
        totals.add_contribution(75, false);
        totals.add_contribution(30, true);

        assert_eq!(totals, ModifierTotals::new(225, 30));
    }

    #[test]
    fn accumulating_onto_uncapped_total_caps_again() {
        let mut totals = ModifierTotals::new(0, 10) + ModifierTotals::new(0, 95);
        totals += ModifierTotals::contribution(0, true);

        assert_eq!(totals.percent_total, 100);
    }

    #[test]
    fn collecting_modifiers_routes_by_factor() {
        let modifiers = [
            DamageModifier::new(AttackModifier::Critical, 40, Factor::Percent, 100),
            DamageModifier::new(AttackModifier::Critical, 12, Factor::Flat, 100),
            DamageModifier::new(AttackModifier::Critical, 70, Factor::Percent, 100),
        ];

        let totals: ModifierTotals = modifiers.iter().collect();

        assert_eq!(totals, ModifierTotals::new(12, 100));
    }
}
