//! AttackResolver - d20 against Armor Class, with the two-stage component attack

use super::{entity_bonus, finish, Resolver};
use crate::dice::{RollBreakdown, RollKind, RollModifier};
use crate::effect::EffectEnv;
use crate::log::{AttackStage, CombatEvent};
use crate::skill::SkillContext;
use crate::types::{Attribute, ComponentId, ComponentRef};

#[derive(Debug, Clone, Copy, Default)]
pub struct AttackResolver;

impl AttackResolver {
    /// Caster and weapon bonuses of the acting entity
    fn modifiers(ctx: &SkillContext<'_>, env: &EffectEnv<'_>) -> Vec<RollModifier> {
        let source = ctx.source_ref();
        let caster = entity_bonus(env.stage, source, Attribute::AttackBonus);
        let weapon = env
            .stage
            .component(source)
            .and_then(|c| c.weapon_profile())
            .map(|w| w.attack_bonus)
            .unwrap_or(0);
        vec![RollModifier::new("caster", caster), RollModifier::new("weapon", weapon)]
    }

    fn armor_class(env: &EffectEnv<'_>, at: ComponentRef) -> i32 {
        env.stage.component(at).map(|c| c.armor_class()).unwrap_or(0)
    }

    /// Roll once against `armor_class`. A natural at or above the critical
    /// threshold always hits and crits; the natural miss always misses.
    fn roll(env: &mut EffectEnv<'_>, stage: AttackStage, modifiers: Vec<RollModifier>, armor_class: i32) -> RollBreakdown {
        let natural = env.roller.d20();
        let constants = &env.rules.constants;
        let mut roll = RollBreakdown::new(RollKind::Attack, natural, modifiers, armor_class);
        roll.critical = natural >= constants.critical_threshold;
        roll.success = if roll.critical {
            true
        } else if natural <= constants.natural_miss {
            false
        } else {
            roll.total >= armor_class
        };

        tracing::debug!(?stage, roll = %roll.describe(), hit = roll.success, "attack roll");
        env.log.emit(CombatEvent::AttackRoll {
            stage,
            roll: roll.clone(),
        });
        roll
    }
}

impl Resolver for AttackResolver {
    fn name(&self) -> &'static str {
        "attack"
    }

    fn resolve(&self, ctx: &SkillContext<'_>, env: &mut EffectEnv<'_>) -> bool {
        let modifiers = Self::modifiers(ctx, env);

        let aimed = ctx
            .target_component
            .filter(|&c| ctx.skill.allows_component_targeting && c != ComponentId::CHASSIS);

        let Some(component) = aimed else {
            let ac = Self::armor_class(env, ctx.target_ref());
            let roll = Self::roll(env, AttackStage::Standard, modifiers, ac);
            return finish(&ctx.critical(roll.critical), env, self.name(), roll.success);
        };

        // Stage one: the chosen component, no penalty
        let component_ac = Self::armor_class(env, ComponentRef::new(ctx.target, component));
        let first = Self::roll(env, AttackStage::Component, modifiers.clone(), component_ac);
        if first.success {
            let hit = ctx.with_target_component(component).critical(first.critical);
            return finish(&hit, env, self.name(), true);
        }

        // Stage two: the chassis, with the targeting penalty
        let penalty = ctx
            .skill
            .component_targeting_penalty
            .unwrap_or(env.rules.constants.default_component_targeting_penalty);
        let mut fallback = modifiers;
        fallback.push(RollModifier::new("component targeting", -penalty));
        let chassis_ac = Self::armor_class(env, ComponentRef::chassis(ctx.target));
        let second = Self::roll(env, AttackStage::ChassisFallback, fallback, chassis_ac);

        let hit = ctx.with_target_component(ComponentId::CHASSIS).critical(second.critical);
        finish(&hit, env, self.name(), second.success)
    }
}
