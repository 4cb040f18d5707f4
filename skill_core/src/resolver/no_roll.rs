use super::{finish, Resolver};
use crate::effect::EffectEnv;
use crate::skill::SkillContext;

/// Applies effects unconditionally
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRollResolver;

impl Resolver for NoRollResolver {
    fn name(&self) -> &'static str {
        "no_roll"
    }

    fn resolve(&self, ctx: &SkillContext<'_>, env: &mut EffectEnv<'_>) -> bool {
        let has_effects = !ctx.skill.effects.is_empty();
        finish(ctx, env, self.name(), has_effects)
    }
}
