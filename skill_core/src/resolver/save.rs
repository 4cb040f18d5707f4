use super::{entity_bonus, finish, Resolver};
use crate::dice::{RollBreakdown, RollKind, RollModifier};
use crate::effect::EffectEnv;
use crate::log::CombatEvent;
use crate::skill::SkillContext;
use crate::types::Attribute;

/// The target saves against the caster's DC; a successful save blocks the effects
#[derive(Debug, Clone, Copy, Default)]
pub struct SaveResolver;

impl Resolver for SaveResolver {
    fn name(&self) -> &'static str {
        "saving_throw"
    }

    fn resolve(&self, ctx: &SkillContext<'_>, env: &mut EffectEnv<'_>) -> bool {
        let spec = ctx.skill.save.unwrap_or_default();
        let dc = spec
            .dc_base
            .saturating_add(entity_bonus(env.stage, ctx.source_ref(), Attribute::SkillDcBonus));

        // The chosen component saves, else the chassis
        let saver = ctx.target_ref();
        let bonus = entity_bonus(env.stage, saver, spec.attribute);

        let natural = env.roller.d20();
        let roll = RollBreakdown::new(
            RollKind::SavingThrow,
            natural,
            vec![RollModifier::new(spec.attribute.label(), bonus)],
            dc,
        )
        .meets_target();

        tracing::debug!(roll = %roll.describe(), saved = roll.success, "saving throw");
        let saved = roll.success;
        env.log.emit(CombatEvent::SavingThrow { roll });
        finish(ctx, env, self.name(), !saved)
    }
}
