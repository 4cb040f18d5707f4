//! Attribute modifiers and stat aggregation

mod calculator;
mod attribute_modifier;

pub use calculator::{StatCalculator, StatTotals};
pub use attribute_modifier::{
    AttributeModifier, ModifierCategory, ModifierId, ModifierSource, ModifierSpec, ModifierType,
    PERMANENT,
};
