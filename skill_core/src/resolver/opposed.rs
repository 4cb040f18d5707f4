use super::{entity_bonus, finish, Resolver};
use crate::dice::{RollBreakdown, RollKind, RollModifier};
use crate::effect::EffectEnv;
use crate::log::CombatEvent;
use crate::skill::SkillContext;

/// Both sides roll; the attacker must beat the defender outright
///
/// Ties go to the defender. The attacker's die is rolled first.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpposedCheckResolver;

impl Resolver for OpposedCheckResolver {
    fn name(&self) -> &'static str {
        "opposed_check"
    }

    fn resolve(&self, ctx: &SkillContext<'_>, env: &mut EffectEnv<'_>) -> bool {
        let spec = ctx.skill.opposed.unwrap_or_default();
        let attacker_bonus = entity_bonus(env.stage, ctx.source_ref(), spec.attacker);
        let defender_bonus = entity_bonus(env.stage, ctx.target_ref(), spec.defender);

        let attacker_natural = env.roller.d20();
        let defender_natural = env.roller.d20();

        let mut attacker = RollBreakdown::new(
            RollKind::OpposedCheck,
            attacker_natural,
            vec![RollModifier::new(spec.attacker.label(), attacker_bonus)],
            0,
        );
        let mut defender = RollBreakdown::new(
            RollKind::OpposedCheck,
            defender_natural,
            vec![RollModifier::new(spec.defender.label(), defender_bonus)],
            attacker.total,
        );
        attacker.target = defender.total;

        let attacker_wins = attacker.total > defender.total;
        attacker.success = attacker_wins;
        defender.success = !attacker_wins;

        tracing::debug!(
            attacker = %attacker.describe(),
            defender = %defender.describe(),
            attacker_wins,
            "opposed check"
        );
        env.log.emit(CombatEvent::OpposedCheck {
            attacker,
            defender,
            attacker_wins,
        });
        finish(ctx, env, self.name(), attacker_wins)
    }
}
