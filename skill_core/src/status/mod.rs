//! Status effects - templates, live instances and the template registry

mod applied;
mod template;

pub use applied::{stacking_decision, AppliedStatusEffect, StackingDecision};
pub use template::{StatusEffectTemplate, INDEFINITE};

use crate::modifier::{ModifierSpec, ModifierType};
use crate::types::Attribute;
use std::collections::HashMap;

/// Status template registry, keyed by template id
#[derive(Debug, Clone, Default)]
pub struct StatusEffectRegistry {
    templates: HashMap<String, StatusEffectTemplate>,
}

impl StatusEffectRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        StatusEffectRegistry {
            templates: HashMap::new(),
        }
    }

    /// Register a template, replacing any previous one with the same id
    pub fn register(&mut self, template: StatusEffectTemplate) {
        self.templates.insert(template.id.clone(), template);
    }

    /// Get a template by id
    pub fn get(&self, id: &str) -> Option<&StatusEffectTemplate> {
        self.templates.get(id)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Load the bundled templates, falling back to the built-in set
    pub fn with_defaults() -> Self {
        let toml = include_str!("../../config/status_effects.toml");
        crate::config::parse_status_templates(toml).unwrap_or_else(|err| {
            tracing::warn!(%err, "bundled status templates failed to parse, using built-ins");
            Self::builtin()
        })
    }

    /// Hard-coded templates
    pub fn builtin() -> Self {
        let mut registry = Self::new();

        registry.register(
            StatusEffectTemplate::new("slow", "Slow", 2)
                .with_icon("icon_slow")
                .with_modifier(ModifierSpec::new(Attribute::Speed, ModifierType::Percent, -30.0))
                .debuff(),
        );

        registry.register(
            StatusEffectTemplate::new("stunned", "Stunned", 1)
                .with_icon("icon_stun")
                .preventing_actions()
                .debuff(),
        );

        registry.register(
            StatusEffectTemplate::new("immobilized", "Immobilized", 2)
                .with_icon("icon_immobilized")
                .with_modifier(ModifierSpec::new(Attribute::Speed, ModifierType::Multiplier, 0.0))
                .preventing_movement()
                .debuff(),
        );

        registry.register(
            StatusEffectTemplate::new("reinforced", "Reinforced Plating", 3)
                .with_icon("icon_armor_up")
                .with_modifier(ModifierSpec::new(Attribute::ArmorClass, ModifierType::Flat, 2.0)),
        );

        registry.register(
            StatusEffectTemplate::new("overcharged", "Overcharged", 2)
                .with_icon("icon_overcharge")
                .with_modifier(ModifierSpec::new(Attribute::Systems, ModifierType::Flat, 2.0))
                .with_modifier(ModifierSpec::new(Attribute::MaxEnergy, ModifierType::Percent, 20.0)),
        );

        registry.register(
            StatusEffectTemplate::new("targeting_lock", "Targeting Lock", 2)
                .with_icon("icon_lock")
                .with_modifier(ModifierSpec::new(Attribute::AttackBonus, ModifierType::Flat, 2.0)),
        );

        registry
    }
}
