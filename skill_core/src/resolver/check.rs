use super::{entity_bonus, finish, Resolver};
use crate::dice::{RollBreakdown, RollKind, RollModifier};
use crate::effect::EffectEnv;
use crate::log::CombatEvent;
use crate::skill::SkillContext;

/// The user must meet a DC for the effects to apply
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckResolver;

impl Resolver for CheckResolver {
    fn name(&self) -> &'static str {
        "skill_check"
    }

    fn resolve(&self, ctx: &SkillContext<'_>, env: &mut EffectEnv<'_>) -> bool {
        let spec = ctx.skill.check.unwrap_or_default();
        let bonus = entity_bonus(env.stage, ctx.source_ref(), spec.attribute);

        let natural = env.roller.d20();
        let roll = RollBreakdown::new(
            RollKind::SkillCheck,
            natural,
            vec![RollModifier::new(spec.attribute.label(), bonus)],
            spec.dc,
        )
        .meets_target();

        tracing::debug!(roll = %roll.describe(), passed = roll.success, "skill check");
        let passed = roll.success;
        env.log.emit(CombatEvent::SkillCheck { roll });
        finish(ctx, env, self.name(), passed)
    }
}
