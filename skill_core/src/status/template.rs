//! StatusEffectTemplate - Authored status effect data

use crate::modifier::ModifierSpec;
use crate::types::Attribute;
use serde::{Deserialize, Serialize};

/// Duration value for a status that lasts until cleared
pub const INDEFINITE: i32 = -1;

/// A named bundle of modifiers plus behavioral flags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusEffectTemplate {
    /// Unique identifier, also the stacking key
    pub id: String,
    /// Display name
    pub name: String,
    /// Icon key for the presentation layer
    #[serde(default)]
    pub icon: String,
    /// Turns the status lasts; [`INDEFINITE`] until cleared
    #[serde(default = "default_base_duration")]
    pub base_duration: i32,
    #[serde(default)]
    pub modifiers: Vec<ModifierSpec>,
    /// The afflicted vehicle cannot use skills
    #[serde(default)]
    pub prevents_actions: bool,
    /// The afflicted vehicle cannot change position
    #[serde(default)]
    pub prevents_movement: bool,
    /// Whether this is a harmful effect
    #[serde(default)]
    pub is_debuff: bool,
}

fn default_base_duration() -> i32 {
    1
}

impl StatusEffectTemplate {
    /// Create a template with no modifiers
    pub fn new(id: &str, name: &str, base_duration: i32) -> Self {
        StatusEffectTemplate {
            id: id.to_string(),
            name: name.to_string(),
            icon: String::new(),
            base_duration,
            modifiers: Vec::new(),
            prevents_actions: false,
            prevents_movement: false,
            is_debuff: false,
        }
    }

    pub fn with_modifier(mut self, spec: ModifierSpec) -> Self {
        self.modifiers.push(spec);
        self
    }

    pub fn with_icon(mut self, icon: &str) -> Self {
        self.icon = icon.to_string();
        self
    }

    pub fn preventing_actions(mut self) -> Self {
        self.prevents_actions = true;
        self
    }

    pub fn preventing_movement(mut self) -> Self {
        self.prevents_movement = true;
        self
    }

    pub fn debuff(mut self) -> Self {
        self.is_debuff = true;
        self
    }

    /// Attribute of the first modifier, used for routing
    pub fn primary_attribute(&self) -> Option<Attribute> {
        self.modifiers.first().map(|m| m.attribute)
    }

    /// Strength of the template at the given scale, summed over its scaled modifiers
    pub fn magnitude(&self, scale: f64) -> f64 {
        self.modifiers.iter().map(|m| m.scaled(scale).magnitude()).sum()
    }
}
