//! Concrete effect types and their application

use super::{EffectEnv, EffectOutcome};
use crate::damage::{DamageApplicator, DamageCalculator, DamageFormula, DamageResolver};
use crate::log::CombatEvent;
use crate::modifier::{AttributeModifier, ModifierCategory, ModifierSource, ModifierSpec, PERMANENT};
use crate::skill::SkillContext;
use crate::types::{ComponentRef, ResourceKind, StagePosition};
use serde::{Deserialize, Serialize};

fn default_scale() -> f64 {
    1.0
}

fn default_modifier_duration() -> i32 {
    PERMANENT
}

// ============================================================================
// Damage
// ============================================================================

/// Roll damage and hit the target component
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DamageEffect {
    #[serde(default)]
    pub formula: DamageFormula,
}

impl DamageEffect {
    pub fn new(formula: DamageFormula) -> Self {
        DamageEffect { formula }
    }

    pub(super) fn apply(&self, ctx: &SkillContext<'_>, target: ComponentRef, env: &mut EffectEnv<'_>) -> EffectOutcome {
        let weapon = env
            .stage
            .component(ctx.source_ref())
            .and_then(|c| c.weapon_profile().copied());

        let rolled = {
            let Some(component) = env.stage.component(target) else {
                return EffectOutcome::skipped("no such component");
            };
            if component.is_destroyed() {
                return EffectOutcome::skipped("already destroyed");
            }
            DamageCalculator::compute(
                &self.formula,
                weapon.as_ref(),
                |damage_type| component.resistance(damage_type),
                ctx.is_critical,
                &mut *env.roller,
            )
        };

        let resolved = DamageResolver::resolve(rolled);
        let applied = DamageApplicator::apply(
            resolved,
            env.stage,
            target,
            Some(ctx.user),
            &ctx.skill.name,
            self.formula.source(weapon.is_some()),
            &mut *env.log,
        );
        EffectOutcome::Damage(applied)
    }
}

// ============================================================================
// Status effects
// ============================================================================

/// Apply a registered status template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplyStatusEffect {
    pub status_id: String,
    /// Scale applied to the template's modifier values
    #[serde(default = "default_scale")]
    pub magnitude: f64,
    /// Overrides the template's base duration
    #[serde(default)]
    pub duration: Option<i32>,
}

impl ApplyStatusEffect {
    pub fn new(status_id: &str) -> Self {
        ApplyStatusEffect {
            status_id: status_id.to_string(),
            magnitude: 1.0,
            duration: None,
        }
    }

    pub fn with_magnitude(mut self, magnitude: f64) -> Self {
        self.magnitude = magnitude;
        self
    }

    pub fn with_duration(mut self, duration: i32) -> Self {
        self.duration = Some(duration);
        self
    }

    pub(super) fn apply(&self, ctx: &SkillContext<'_>, target: ComponentRef, env: &mut EffectEnv<'_>) -> EffectOutcome {
        let Some(template) = env.rules.statuses.get(&self.status_id) else {
            tracing::warn!(status = %self.status_id, skill = %ctx.skill.id, "unknown status template");
            return EffectOutcome::skipped(format!("unknown status '{}'", self.status_id));
        };
        let duration = self.duration.unwrap_or(template.base_duration);
        let label = env.stage.describe(target);

        let Some(component) = env.stage.component_mut(target) else {
            return EffectOutcome::skipped("no such component");
        };
        if component.is_destroyed() {
            return EffectOutcome::skipped("already destroyed");
        }

        let application = component.apply_status(template, duration, self.magnitude, Some(ctx.user));
        tracing::debug!(target = %label, status = %template.id, change = ?application.change, "status applied");
        env.log.emit(CombatEvent::StatusEffect {
            target: label,
            status: template.name.clone(),
            change: application.change,
            turns: duration,
        });
        EffectOutcome::Status(application.change)
    }
}

// ============================================================================
// Modifiers
// ============================================================================

/// Install a timed modifier sourced from the skill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeModifierEffect {
    pub modifier: ModifierSpec,
    #[serde(default = "default_modifier_duration")]
    pub duration: i32,
}

impl AttributeModifierEffect {
    pub fn new(modifier: ModifierSpec, duration: i32) -> Self {
        AttributeModifierEffect { modifier, duration }
    }

    pub(super) fn apply(&self, ctx: &SkillContext<'_>, target: ComponentRef, env: &mut EffectEnv<'_>) -> EffectOutcome {
        let label = env.stage.describe(target);
        let Some(component) = env.stage.component_mut(target) else {
            return EffectOutcome::skipped("no such component");
        };
        if component.is_destroyed() {
            return EffectOutcome::skipped("already destroyed");
        }

        let modifier = AttributeModifier::from_spec(
            &self.modifier,
            ModifierSource::Skill(ctx.skill.id.clone()),
            ModifierCategory::Skill,
            self.duration,
        );
        let description = modifier.describe();
        let id = component.add_modifier(modifier);
        env.log.emit(CombatEvent::Modifier {
            target: label,
            description,
        });
        EffectOutcome::Modifier(id)
    }
}

// ============================================================================
// Resources
// ============================================================================

/// Restore (or drain, when negative) a resource pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRestorationEffect {
    pub resource: ResourceKind,
    pub amount: i32,
}

impl ResourceRestorationEffect {
    pub fn new(resource: ResourceKind, amount: i32) -> Self {
        ResourceRestorationEffect { resource, amount }
    }

    pub(super) fn apply(&self, _ctx: &SkillContext<'_>, target: ComponentRef, env: &mut EffectEnv<'_>) -> EffectOutcome {
        let label = env.stage.describe(target);
        let Some(vehicle) = env.stage.vehicle_mut(target.vehicle) else {
            return EffectOutcome::skipped("no such vehicle");
        };

        let (actual, current) = match self.resource {
            ResourceKind::Health => {
                let Some(component) = vehicle.component_mut(target.component) else {
                    return EffectOutcome::skipped("no such component");
                };
                if component.is_destroyed() {
                    return EffectOutcome::skipped("already destroyed");
                }
                (component.restore_health(self.amount), component.health())
            }
            // The pool belongs to the whole vehicle
            ResourceKind::Energy => (vehicle.restore_energy(self.amount), vehicle.energy()),
        };

        if actual != self.amount {
            tracing::debug!(target = %label, requested = self.amount, actual, "restoration clamped");
        }
        env.log.emit(CombatEvent::Restoration {
            target: label,
            resource: self.resource,
            requested: self.amount,
            actual,
            current,
        });
        EffectOutcome::Restored {
            requested: self.amount,
            actual,
        }
    }
}

// ============================================================================
// Movement
// ============================================================================

/// Shift the vehicle along the track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PositionChangeEffect {
    #[serde(default)]
    pub stage_delta: i32,
    #[serde(default)]
    pub lane_delta: i32,
}

impl PositionChangeEffect {
    pub fn new(stage_delta: i32, lane_delta: i32) -> Self {
        PositionChangeEffect {
            stage_delta,
            lane_delta,
        }
    }

    pub(super) fn apply(&self, _ctx: &SkillContext<'_>, target: ComponentRef, env: &mut EffectEnv<'_>) -> EffectOutcome {
        let Some(vehicle) = env.stage.vehicle_mut(target.vehicle) else {
            return EffectOutcome::skipped("no such vehicle");
        };
        if !vehicle.can_move() {
            return EffectOutcome::skipped("movement prevented");
        }

        let from = vehicle.position;
        let stage = (from.stage as i64 + self.stage_delta as i64).clamp(0, u32::MAX as i64) as u32;
        let to = StagePosition::new(stage, from.lane.saturating_add(self.lane_delta));
        vehicle.position = to;

        env.log.emit(CombatEvent::PositionChanged {
            vehicle: vehicle.name.clone(),
            from,
            to,
        });
        EffectOutcome::Moved { from, to }
    }
}

// ============================================================================
// Custom commands
// ============================================================================

/// Hand off to a named game-specific handler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomCommandEffect {
    pub command: String,
    #[serde(default)]
    pub value: i32,
}

impl CustomCommandEffect {
    pub fn new(command: &str, value: i32) -> Self {
        CustomCommandEffect {
            command: command.to_string(),
            value,
        }
    }

    pub(super) fn apply(&self, ctx: &SkillContext<'_>, target: ComponentRef, env: &mut EffectEnv<'_>) -> EffectOutcome {
        let Some(handler) = env.rules.commands.get(&self.command) else {
            tracing::warn!(command = %self.command, skill = %ctx.skill.id, "unknown custom command");
            return EffectOutcome::skipped(format!("unknown command '{}'", self.command));
        };

        let label = env.stage.describe(target);
        let outcome = handler.execute(ctx, target, self.value, env.stage, &mut *env.log);
        if matches!(outcome, EffectOutcome::Command) {
            env.log.emit(CombatEvent::Command {
                command: self.command.clone(),
                target: label,
            });
        }
        outcome
    }
}
