//! Effects - the closed set of things a skill can do to a target
//!
//! Effects are stateless content. Per-call results come back as an
//! [`EffectOutcome`] and are never stored on the effect, so one effect value
//! can be shared by any number of skill uses.

mod command;
mod kinds;

pub use command::{CommandHandler, CommandRegistry, DisableComponent, ReactivateComponent};
pub use kinds::{
    ApplyStatusEffect, AttributeModifierEffect, CustomCommandEffect, DamageEffect,
    PositionChangeEffect, ResourceRestorationEffect,
};

use crate::damage::DamageResult;
use crate::dice::DiceRoller;
use crate::log::{CombatEvent, CombatLog, StatusChange};
use crate::modifier::ModifierId;
use crate::skill::{CombatRules, SkillContext};
use crate::types::{ComponentRef, StagePosition};
use crate::vehicle::Stage;
use serde::{Deserialize, Serialize};

/// Everything an effect may touch while it applies
pub struct EffectEnv<'a> {
    pub stage: &'a mut Stage,
    pub rules: &'a CombatRules,
    pub roller: &'a mut dyn DiceRoller,
    pub log: &'a mut dyn CombatLog,
}

/// What one effect application did
#[derive(Debug, Clone, PartialEq)]
pub enum EffectOutcome {
    Damage(DamageResult),
    Status(StatusChange),
    Modifier(ModifierId),
    Restored { requested: i32, actual: i32 },
    Moved { from: StagePosition, to: StagePosition },
    Command,
    /// Nothing happened; the reason is also reported to the log
    Skipped { reason: String },
}

impl EffectOutcome {
    pub fn skipped(reason: impl Into<String>) -> Self {
        EffectOutcome::Skipped {
            reason: reason.into(),
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, EffectOutcome::Skipped { .. })
    }
}

/// A skill effect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    Damage(DamageEffect),
    ApplyStatus(ApplyStatusEffect),
    AttributeModifier(AttributeModifierEffect),
    ResourceRestoration(ResourceRestorationEffect),
    PositionChange(PositionChangeEffect),
    CustomCommand(CustomCommandEffect),
}

impl Effect {
    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Effect::Damage(_) => "damage",
            Effect::ApplyStatus(_) => "apply_status",
            Effect::AttributeModifier(_) => "attribute_modifier",
            Effect::ResourceRestoration(_) => "resource_restoration",
            Effect::PositionChange(_) => "position_change",
            Effect::CustomCommand(_) => "custom_command",
        }
    }

    /// Apply to one concrete component
    pub fn apply(&self, ctx: &SkillContext<'_>, target: ComponentRef, env: &mut EffectEnv<'_>) -> EffectOutcome {
        let outcome = match self {
            Effect::Damage(effect) => effect.apply(ctx, target, env),
            Effect::ApplyStatus(effect) => effect.apply(ctx, target, env),
            Effect::AttributeModifier(effect) => effect.apply(ctx, target, env),
            Effect::ResourceRestoration(effect) => effect.apply(ctx, target, env),
            Effect::PositionChange(effect) => effect.apply(ctx, target, env),
            Effect::CustomCommand(effect) => effect.apply(ctx, target, env),
        };

        if let EffectOutcome::Skipped { reason } = &outcome {
            tracing::debug!(effect = self.name(), %reason, "effect skipped");
            env.log.emit(CombatEvent::EffectSkipped {
                target: env.stage.describe(target),
                reason: reason.clone(),
            });
        }
        outcome
    }
}

impl From<DamageEffect> for Effect {
    fn from(effect: DamageEffect) -> Self {
        Effect::Damage(effect)
    }
}

impl From<ApplyStatusEffect> for Effect {
    fn from(effect: ApplyStatusEffect) -> Self {
        Effect::ApplyStatus(effect)
    }
}

impl From<AttributeModifierEffect> for Effect {
    fn from(effect: AttributeModifierEffect) -> Self {
        Effect::AttributeModifier(effect)
    }
}

impl From<ResourceRestorationEffect> for Effect {
    fn from(effect: ResourceRestorationEffect) -> Self {
        Effect::ResourceRestoration(effect)
    }
}

impl From<PositionChangeEffect> for Effect {
    fn from(effect: PositionChangeEffect) -> Self {
        Effect::PositionChange(effect)
    }
}

impl From<CustomCommandEffect> for Effect {
    fn from(effect: CustomCommandEffect) -> Self {
        Effect::CustomCommand(effect)
    }
}
