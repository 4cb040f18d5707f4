//! StatCalculator - Folds a modifier list into effective attribute values
//!
//! Effective value is calculated as:
//! `(base + Σflat) × Π(1 + percent / 100) × Π(multiplier)`
//!
//! Nothing is cached: every query rescans the live modifier list, so a
//! removed modifier can never leave a stale total behind.

use super::{AttributeModifier, ModifierType};
use crate::types::Attribute;
use serde::{Deserialize, Serialize};

/// Intermediate totals for one attribute
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatTotals {
    pub base: f64,
    /// Sum of all flat additions
    pub flat: f64,
    /// Product of all percent factors
    pub percent_factor: f64,
    /// Product of all multiplier factors
    pub multiplier_factor: f64,
}

impl StatTotals {
    pub fn with_base(base: f64) -> Self {
        StatTotals {
            base,
            flat: 0.0,
            percent_factor: 1.0,
            multiplier_factor: 1.0,
        }
    }

    /// Fold in one modifier
    pub fn add(&mut self, modifier: &AttributeModifier) {
        match modifier.modifier_type {
            ModifierType::Flat => self.flat += modifier.value,
            ModifierType::Percent => self.percent_factor *= modifier.factor(),
            ModifierType::Multiplier => self.multiplier_factor *= modifier.factor(),
        }
    }

    /// `(base + flat) × percent × multiplier`
    pub fn compute(&self) -> f64 {
        (self.base + self.flat) * self.percent_factor * self.multiplier_factor
    }
}

/// Stateless stat aggregation
pub struct StatCalculator;

impl StatCalculator {
    /// Totals for one attribute over the given modifiers
    pub fn totals<'a>(
        attribute: Attribute,
        base: f64,
        modifiers: impl IntoIterator<Item = &'a AttributeModifier>,
    ) -> StatTotals {
        let mut totals = StatTotals::with_base(base);
        for modifier in modifiers
            .into_iter()
            .filter(|m| m.attribute == attribute && !m.is_expired())
        {
            totals.add(modifier);
        }
        totals
    }

    /// Effective value for one attribute
    pub fn effective<'a>(
        attribute: Attribute,
        base: f64,
        modifiers: impl IntoIterator<Item = &'a AttributeModifier>,
    ) -> f64 {
        Self::totals(attribute, base, modifiers).compute()
    }

    /// Effective value truncated toward zero, as used by d20 bonuses and AC
    pub fn effective_int<'a>(
        attribute: Attribute,
        base: f64,
        modifiers: impl IntoIterator<Item = &'a AttributeModifier>,
    ) -> i32 {
        Self::effective(attribute, base, modifiers).trunc() as i32
    }
}
