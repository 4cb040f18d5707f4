//! Component - One independently damageable part of a vehicle
//!
//! A single record type carries a `kind` enum with kind-specific data; role
//! dependent behavior (`can_act`, display) is dispatched on the kind.

use crate::config::DEFAULT_INTERNAL_ACCESS_THRESHOLD;
use crate::dice::DiceSpec;
use crate::log::{CombatEvent, CombatLog, StatusChange};
use crate::modifier::{
    AttributeModifier, ModifierCategory, ModifierId, ModifierSource, StatCalculator, StatTotals,
    PERMANENT,
};
use crate::status::{stacking_decision, AppliedStatusEffect, StackingDecision, StatusEffectTemplate};
use crate::types::{
    Attribute, ComponentExposure, ComponentId, ComponentType, DamageType, ResistanceLevel, VehicleId,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Dice and bonuses of a weapon component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponProfile {
    pub dice: DiceSpec,
    /// Flat damage bonus
    #[serde(default)]
    pub bonus: i32,
    /// Added to attack rolls made with this weapon
    #[serde(default)]
    pub attack_bonus: i32,
    pub damage_type: DamageType,
}

impl WeaponProfile {
    pub fn new(dice: DiceSpec, bonus: i32, damage_type: DamageType) -> Self {
        WeaponProfile {
            dice,
            bonus,
            attack_bonus: 0,
            damage_type,
        }
    }

    pub fn with_attack_bonus(mut self, attack_bonus: i32) -> Self {
        self.attack_bonus = attack_bonus;
        self
    }
}

/// Role of the component plus role-specific data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ComponentKind {
    Chassis,
    PowerCore,
    Drive,
    Weapon(WeaponProfile),
    Utility,
}

impl ComponentKind {
    pub fn component_type(&self) -> ComponentType {
        match self {
            ComponentKind::Chassis => ComponentType::Chassis,
            ComponentKind::PowerCore => ComponentType::PowerCore,
            ComponentKind::Drive => ComponentType::Drive,
            ComponentKind::Weapon(_) => ComponentType::Weapon,
            ComponentKind::Utility => ComponentType::Utility,
        }
    }
}

/// One line of the inspection panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayStat {
    pub attribute: Attribute,
    pub base: f64,
    pub effective: f64,
    /// Descriptions of the modifiers touching this attribute
    pub modifiers: Vec<String>,
}

/// What happened when a status template was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusApplication {
    pub change: StatusChange,
    /// Live instance after the call (the existing one when refused)
    pub instance_id: Option<u64>,
}

/// A vehicle part
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
    /// Slot within the owning vehicle; assigned on install
    pub id: ComponentId,
    pub name: String,
    pub kind: ComponentKind,
    pub exposure: ComponentExposure,
    /// Component whose survival keeps this one shielded or protected
    pub shielded_by: Option<ComponentId>,
    /// Chassis damage fraction needed to reach an internal component;
    /// `None` takes the stage default
    pub internal_access_threshold: Option<f64>,
    pub is_disabled: bool,
    health: i32,
    is_destroyed: bool,
    base_stats: BTreeMap<Attribute, f64>,
    #[serde(default)]
    resistances: HashMap<DamageType, ResistanceLevel>,
    #[serde(default)]
    modifiers: Vec<AttributeModifier>,
    #[serde(default)]
    status_effects: Vec<AppliedStatusEffect>,
    next_modifier_id: u64,
    next_status_id: u64,
}

impl Component {
    /// Create a component at full health
    pub fn new(name: &str, kind: ComponentKind, max_health: i32, armor_class: i32) -> Self {
        let mut base_stats = BTreeMap::new();
        base_stats.insert(Attribute::MaxHealth, max_health as f64);
        base_stats.insert(Attribute::ArmorClass, armor_class as f64);
        Component {
            id: ComponentId(0),
            name: name.to_string(),
            kind,
            exposure: ComponentExposure::External,
            shielded_by: None,
            internal_access_threshold: None,
            is_disabled: false,
            health: max_health.max(0),
            is_destroyed: false,
            base_stats,
            resistances: HashMap::new(),
            modifiers: Vec::new(),
            status_effects: Vec::new(),
            next_modifier_id: 1,
            next_status_id: 1,
        }
    }

    pub fn chassis(name: &str, max_health: i32, armor_class: i32) -> Self {
        Self::new(name, ComponentKind::Chassis, max_health, armor_class)
    }

    pub fn power_core(name: &str, max_health: i32, armor_class: i32, max_energy: i32) -> Self {
        Self::new(name, ComponentKind::PowerCore, max_health, armor_class)
            .with_stat(Attribute::MaxEnergy, max_energy as f64)
    }

    pub fn drive(name: &str, max_health: i32, armor_class: i32) -> Self {
        Self::new(name, ComponentKind::Drive, max_health, armor_class)
    }

    pub fn weapon(name: &str, max_health: i32, armor_class: i32, profile: WeaponProfile) -> Self {
        Self::new(name, ComponentKind::Weapon(profile), max_health, armor_class)
    }

    pub fn utility(name: &str, max_health: i32, armor_class: i32) -> Self {
        Self::new(name, ComponentKind::Utility, max_health, armor_class)
    }

    // === Builders ===

    pub fn with_stat(mut self, attribute: Attribute, base: f64) -> Self {
        self.base_stats.insert(attribute, base);
        if attribute == Attribute::MaxHealth {
            self.health = base.trunc().max(0.0) as i32;
        }
        self
    }

    pub fn with_exposure(mut self, exposure: ComponentExposure) -> Self {
        self.exposure = exposure;
        self
    }

    pub fn shielded_by(mut self, shield: ComponentId) -> Self {
        self.shielded_by = Some(shield);
        self
    }

    pub fn with_internal_threshold(mut self, threshold: f64) -> Self {
        self.internal_access_threshold = Some(threshold.clamp(0.0, 1.0));
        self
    }

    /// Effective internal gate
    pub fn internal_threshold(&self) -> f64 {
        self.internal_access_threshold
            .unwrap_or(DEFAULT_INTERNAL_ACCESS_THRESHOLD)
    }

    pub fn with_resistance(mut self, damage_type: DamageType, level: ResistanceLevel) -> Self {
        self.resistances.insert(damage_type, level);
        self
    }

    // === Queries ===

    pub fn component_type(&self) -> ComponentType {
        self.kind.component_type()
    }

    pub fn weapon_profile(&self) -> Option<&WeaponProfile> {
        match &self.kind {
            ComponentKind::Weapon(profile) => Some(profile),
            _ => None,
        }
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn is_destroyed(&self) -> bool {
        self.is_destroyed
    }

    /// Authored base value (0 if unset)
    pub fn base_stat(&self, attribute: Attribute) -> f64 {
        self.base_stats.get(&attribute).copied().unwrap_or(0.0)
    }

    /// Current effective value with all live modifiers folded in
    pub fn effective(&self, attribute: Attribute) -> f64 {
        StatCalculator::effective(attribute, self.base_stat(attribute), &self.modifiers)
    }

    /// Effective value truncated toward zero
    pub fn effective_int(&self, attribute: Attribute) -> i32 {
        StatCalculator::effective_int(attribute, self.base_stat(attribute), &self.modifiers)
    }

    pub fn stat_totals(&self, attribute: Attribute) -> StatTotals {
        StatCalculator::totals(attribute, self.base_stat(attribute), &self.modifiers)
    }

    pub fn max_health(&self) -> i32 {
        self.effective_int(Attribute::MaxHealth).max(0)
    }

    pub fn armor_class(&self) -> i32 {
        self.effective_int(Attribute::ArmorClass)
    }

    /// Fraction of max health lost, 0.0..=1.0
    pub fn damage_fraction(&self) -> f64 {
        let max = self.max_health();
        if max <= 0 {
            return 1.0;
        }
        (1.0 - self.health as f64 / max as f64).clamp(0.0, 1.0)
    }

    pub fn resistance(&self, damage_type: DamageType) -> ResistanceLevel {
        self.resistances.get(&damage_type).copied().unwrap_or_default()
    }

    pub fn modifiers(&self) -> &[AttributeModifier] {
        &self.modifiers
    }

    pub fn active_status_effects(&self) -> &[AppliedStatusEffect] {
        &self.status_effects
    }

    pub fn has_status(&self, template_id: &str) -> bool {
        self.status_effects.iter().any(|s| s.template_id == template_id)
    }

    pub fn status(&self, template_id: &str) -> Option<&AppliedStatusEffect> {
        self.status_effects.iter().find(|s| s.template_id == template_id)
    }

    pub fn prevents_actions(&self) -> bool {
        self.status_effects.iter().any(|s| s.prevents_actions)
    }

    pub fn prevents_movement(&self) -> bool {
        self.status_effects.iter().any(|s| s.prevents_movement)
    }

    /// Whether this component may act as the source of a skill
    pub fn can_act(&self) -> bool {
        if self.is_destroyed || self.prevents_actions() {
            return false;
        }
        match self.kind {
            ComponentKind::Chassis => true,
            ComponentKind::PowerCore
            | ComponentKind::Drive
            | ComponentKind::Weapon(_)
            | ComponentKind::Utility => !self.is_disabled,
        }
    }

    /// Attribute rows for the inspection panel
    pub fn display_stats(&self) -> Vec<DisplayStat> {
        let mut attributes: Vec<Attribute> = self.base_stats.keys().copied().collect();
        for m in &self.modifiers {
            if !attributes.contains(&m.attribute) {
                attributes.push(m.attribute);
            }
        }
        attributes.sort();

        attributes
            .into_iter()
            .map(|attribute| {
                let totals = self.stat_totals(attribute);
                DisplayStat {
                    attribute,
                    base: totals.base,
                    effective: totals.compute(),
                    modifiers: self
                        .modifiers
                        .iter()
                        .filter(|m| m.attribute == attribute)
                        .map(|m| format!("{} [{}]", m.describe(), m.source))
                        .collect(),
                }
            })
            .collect()
    }

    // === Modifiers ===

    /// Install a modifier, returning its handle
    pub fn add_modifier(&mut self, mut modifier: AttributeModifier) -> ModifierId {
        let id = ModifierId(self.next_modifier_id);
        self.next_modifier_id += 1;
        modifier.id = id;
        self.modifiers.push(modifier);
        self.clamp_health();
        id
    }

    /// Remove one modifier by handle
    pub fn remove_modifier(&mut self, id: ModifierId) -> Option<AttributeModifier> {
        let index = self.modifiers.iter().position(|m| m.id == id)?;
        let removed = self.modifiers.remove(index);
        self.clamp_health();
        Some(removed)
    }

    /// Remove every modifier installed by `source`
    pub fn remove_modifiers_by_source(&mut self, source: &ModifierSource) -> Vec<AttributeModifier> {
        self.remove_modifiers_where(|m| &m.source == source)
    }

    /// Remove every modifier tagged with `category`
    pub fn remove_modifiers_by_category(&mut self, category: ModifierCategory) -> Vec<AttributeModifier> {
        self.remove_modifiers_where(|m| m.category == category)
    }

    fn remove_modifiers_where(
        &mut self,
        pred: impl Fn(&AttributeModifier) -> bool,
    ) -> Vec<AttributeModifier> {
        let (removed, kept): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.modifiers).into_iter().partition(|m| pred(m));
        self.modifiers = kept;
        self.clamp_health();
        removed
    }

    // === Status effects ===

    /// Apply a status template under the stacking rule
    pub fn apply_status(
        &mut self,
        template: &StatusEffectTemplate,
        duration: i32,
        scale: f64,
        applied_by: Option<VehicleId>,
    ) -> StatusApplication {
        let magnitude = template.magnitude(scale);
        let existing = self.status(&template.id);
        let existing_id = existing.map(|s| s.instance_id);

        match stacking_decision(existing, magnitude, duration) {
            StackingDecision::Refuse => {
                return StatusApplication {
                    change: StatusChange::Refused,
                    instance_id: existing_id,
                };
            }
            StackingDecision::Replace => {
                self.remove_status(&template.id);
            }
            StackingDecision::Apply => {}
        }

        let instance_id = self.next_status_id;
        self.next_status_id += 1;
        let mut instance = AppliedStatusEffect::new(instance_id, template, duration, magnitude, applied_by);

        // Owned modifiers live exactly as long as the instance
        for spec in &template.modifiers {
            let modifier = AttributeModifier::from_spec(
                &spec.scaled(scale),
                ModifierSource::StatusEffect(instance_id),
                ModifierCategory::StatusEffect,
                PERMANENT,
            );
            instance.modifier_ids.push(self.add_modifier(modifier));
        }
        self.status_effects.push(instance);

        StatusApplication {
            change: if existing_id.is_some() {
                StatusChange::Replaced
            } else {
                StatusChange::Applied
            },
            instance_id: Some(instance_id),
        }
    }

    /// Remove a status and all of its modifiers. Returns the removed instance.
    pub fn remove_status(&mut self, template_id: &str) -> Option<AppliedStatusEffect> {
        let index = self
            .status_effects
            .iter()
            .position(|s| s.template_id == template_id)?;
        let instance = self.status_effects.remove(index);
        self.remove_modifiers_by_source(&ModifierSource::StatusEffect(instance.instance_id));
        Some(instance)
    }

    /// Remove every status effect
    pub fn clear_status_effects(&mut self) -> Vec<AppliedStatusEffect> {
        let ids: Vec<String> = self.status_effects.iter().map(|s| s.template_id.clone()).collect();
        ids.iter().filter_map(|id| self.remove_status(id)).collect()
    }

    // === Health ===

    /// Reduce health; only the damage applicator calls this.
    /// Returns `(actual, destroyed_now)`.
    pub(crate) fn take_damage(&mut self, amount: i32) -> (i32, bool) {
        if self.is_destroyed || amount <= 0 {
            return (0, false);
        }
        let actual = amount.min(self.health);
        self.health -= actual;
        if self.health == 0 {
            self.destroy();
            return (actual, true);
        }
        (actual, false)
    }

    /// Change health by `delta`, clamped to `1..=max_health`. Returns the actual change.
    ///
    /// Drains never destroy; destruction only comes through damage.
    pub fn restore_health(&mut self, delta: i32) -> i32 {
        if self.is_destroyed {
            return 0;
        }
        let max = self.max_health();
        let floor = self.health.min(1);
        let target = (self.health as i64 + delta as i64).clamp(floor as i64, max as i64) as i32;
        let actual = target - self.health;
        self.health = target;
        actual
    }

    fn destroy(&mut self) {
        self.is_destroyed = true;
        self.health = 0;
        self.clear_status_effects();
    }

    /// Keep current health within the effective maximum
    fn clamp_health(&mut self) {
        let max = self.max_health();
        if self.health > max {
            self.health = max;
        }
    }

    // === Turn update ===

    /// Count down timed modifiers and status effects, removing expired ones.
    ///
    /// `owner` prefixes the names reported to the log.
    pub fn end_turn(&mut self, owner: &str, log: &mut dyn CombatLog) {
        let label = format!("{} {}", owner, self.name);

        let mut expired_ids = Vec::new();
        for modifier in self.modifiers.iter_mut() {
            if !modifier.tick() {
                expired_ids.push(modifier.id);
            }
        }
        for id in expired_ids {
            if let Some(removed) = self.remove_modifier(id) {
                tracing::debug!(component = %label, modifier = %removed.describe(), "modifier expired");
                log.emit(CombatEvent::ModifierExpired {
                    target: label.clone(),
                    description: removed.describe(),
                });
            }
        }

        let mut expired_status = Vec::new();
        for status in self.status_effects.iter_mut() {
            if !status.tick() {
                expired_status.push(status.template_id.clone());
            }
        }
        for template_id in expired_status {
            if let Some(instance) = self.remove_status(&template_id) {
                tracing::debug!(component = %label, status = %instance.name, "status expired");
                log.emit(CombatEvent::StatusExpired {
                    target: label.clone(),
                    status: instance.name,
                });
            }
        }
    }
}
