//! Resolvers - one per roll type, deciding whether a skill's effects land
//!
//! Exactly one resolver runs per skill use, and each emits exactly one
//! `Outcome` event before returning.

mod attack;
mod check;
mod no_roll;
mod opposed;
mod save;

pub use attack::AttackResolver;
pub use check::CheckResolver;
pub use no_roll::NoRollResolver;
pub use opposed::OpposedCheckResolver;
pub use save::SaveResolver;

use crate::effect::EffectEnv;
use crate::log::CombatEvent;
use crate::skill::{RollType, SkillContext, SkillEffectApplicator};
use crate::types::{Attribute, ComponentRef};
use crate::vehicle::Stage;

/// Roll-type specific resolution
pub trait Resolver {
    fn name(&self) -> &'static str;

    /// Resolve the use; returns whether the effects were applied
    fn resolve(&self, ctx: &SkillContext<'_>, env: &mut EffectEnv<'_>) -> bool;
}

/// Dispatch on roll type
pub fn resolver_for(roll_type: RollType) -> &'static dyn Resolver {
    match roll_type {
        RollType::None => &NoRollResolver,
        RollType::AttackRoll => &AttackResolver,
        RollType::SavingThrow => &SaveResolver,
        RollType::SkillCheck => &CheckResolver,
        RollType::OpposedCheck => &OpposedCheckResolver,
    }
}

/// Effective attribute of an entity as a d20 bonus; 0 for a dangling reference
fn entity_bonus(stage: &Stage, at: ComponentRef, attribute: Attribute) -> i32 {
    stage.component(at).map(|c| c.effective_int(attribute)).unwrap_or(0)
}

/// Apply effects on success, then emit the single outcome record
fn finish(ctx: &SkillContext<'_>, env: &mut EffectEnv<'_>, resolver: &'static str, success: bool) -> bool {
    if success {
        SkillEffectApplicator::apply_all(ctx, env);
    }
    tracing::debug!(skill = %ctx.skill.id, resolver, success, "resolved");
    env.log.emit(CombatEvent::Outcome {
        skill: ctx.skill.name.clone(),
        resolver: resolver.to_string(),
        success,
    });
    success
}
