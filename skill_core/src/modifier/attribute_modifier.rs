//! AttributeModifier - A sourced, categorised, duration-bearing stat change

use crate::types::Attribute;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Duration value marking a modifier that never expires on its own
pub const PERMANENT: i32 = -1;

/// Handle for a modifier installed on a component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModifierId(pub u64);

/// How a modifier's value combines with the base
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierType {
    /// Added to the base
    Flat,
    /// `value` percent, applied as a factor of `1 + value / 100`
    Percent,
    /// Applied as a factor of `value`
    Multiplier,
}

/// Grouping tag for bulk removal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierCategory {
    Equipment,
    Skill,
    StatusEffect,
    #[default]
    Other,
}

/// Whoever installed the modifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum ModifierSource {
    /// A skill effect, by skill id
    Skill(String),
    /// An applied status effect instance
    StatusEffect(u64),
    /// A piece of equipment, by item id
    Equipment(String),
    /// Anything else, by free-form tag
    Other(String),
}

impl fmt::Display for ModifierSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModifierSource::Skill(id) => write!(f, "skill:{}", id),
            ModifierSource::StatusEffect(id) => write!(f, "status#{}", id),
            ModifierSource::Equipment(id) => write!(f, "equipment:{}", id),
            ModifierSource::Other(tag) => write!(f, "{}", tag),
        }
    }
}

/// Authored modifier data, before it is bound to a component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifierSpec {
    pub attribute: Attribute,
    #[serde(rename = "type")]
    pub modifier_type: ModifierType,
    pub value: f64,
}

impl ModifierSpec {
    pub fn new(attribute: Attribute, modifier_type: ModifierType, value: f64) -> Self {
        ModifierSpec {
            attribute,
            modifier_type,
            value,
        }
    }

    /// Same spec with its strength scaled.
    ///
    /// Flat and percent values scale directly. A multiplier scales its
    /// deviation from 1, floored at 0, so a x0.5 at scale 2 becomes x0.0.
    pub fn scaled(&self, scale: f64) -> Self {
        let value = match self.modifier_type {
            ModifierType::Flat | ModifierType::Percent => self.value * scale,
            ModifierType::Multiplier => (1.0 + (self.value - 1.0) * scale).max(0.0),
        };
        ModifierSpec {
            value,
            ..self.clone()
        }
    }

    /// Distance from a no-op: |value| for flat and percent, |value - 1| for multipliers
    pub fn magnitude(&self) -> f64 {
        match self.modifier_type {
            ModifierType::Flat | ModifierType::Percent => self.value.abs(),
            ModifierType::Multiplier => (self.value - 1.0).abs(),
        }
    }
}

/// A live modifier owned by one component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeModifier {
    /// Assigned by the owning component on install
    pub id: ModifierId,
    pub attribute: Attribute,
    pub modifier_type: ModifierType,
    pub value: f64,
    pub source: ModifierSource,
    pub category: ModifierCategory,
    /// Turns left; [`PERMANENT`] never expires
    pub duration_turns: i32,
}

impl AttributeModifier {
    /// Create an unbound modifier; the component assigns the real id
    pub fn new(
        attribute: Attribute,
        modifier_type: ModifierType,
        value: f64,
        source: ModifierSource,
        category: ModifierCategory,
        duration_turns: i32,
    ) -> Self {
        AttributeModifier {
            id: ModifierId(0),
            attribute,
            modifier_type,
            value,
            source,
            category,
            duration_turns,
        }
    }

    /// Shorthand for a permanent flat modifier
    pub fn flat(attribute: Attribute, value: f64, source: ModifierSource) -> Self {
        Self::new(
            attribute,
            ModifierType::Flat,
            value,
            source,
            ModifierCategory::Other,
            PERMANENT,
        )
    }

    /// Build from authored data
    pub fn from_spec(
        spec: &ModifierSpec,
        source: ModifierSource,
        category: ModifierCategory,
        duration_turns: i32,
    ) -> Self {
        Self::new(
            spec.attribute,
            spec.modifier_type,
            spec.value,
            source,
            category,
            duration_turns,
        )
    }

    pub fn with_category(mut self, category: ModifierCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_duration(mut self, duration_turns: i32) -> Self {
        self.duration_turns = duration_turns;
        self
    }

    pub fn is_permanent(&self) -> bool {
        self.duration_turns == PERMANENT
    }

    /// A timed modifier that has run out
    pub fn is_expired(&self) -> bool {
        !self.is_permanent() && self.duration_turns <= 0
    }

    /// Advance one turn. Returns true if the modifier is still live.
    pub fn tick(&mut self) -> bool {
        if self.is_permanent() {
            return true;
        }
        self.duration_turns -= 1;
        self.duration_turns > 0
    }

    /// Multiplicative factor this modifier contributes (1.0 for flat)
    pub fn factor(&self) -> f64 {
        match self.modifier_type {
            ModifierType::Flat => 1.0,
            ModifierType::Percent => 1.0 + self.value / 100.0,
            ModifierType::Multiplier => self.value,
        }
    }

    /// "+2 Armor Class (3 turns)"
    pub fn describe(&self) -> String {
        let amount = match self.modifier_type {
            ModifierType::Flat => format!("{:+}", self.value),
            ModifierType::Percent => format!("{:+}%", self.value),
            ModifierType::Multiplier => format!("x{}", self.value),
        };
        if self.is_permanent() {
            format!("{} {}", amount, self.attribute)
        } else {
            format!("{} {} ({} turns)", amount, self.attribute, self.duration_turns)
        }
    }
}
