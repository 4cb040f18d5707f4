//! SkillEffectApplicator - Fans each invocation out to concrete components

use super::{EffectInvocation, EffectTarget, SkillContext, VehicleEffectRouter};
use crate::effect::{EffectEnv, EffectOutcome};
use crate::status::StatusEffectRegistry;
use crate::types::{ComponentId, ComponentRef, VehicleId};
use crate::vehicle::Stage;

pub struct SkillEffectApplicator;

impl SkillEffectApplicator {
    /// Apply every invocation of the context's skill.
    ///
    /// Called only after a resolver has decided the effects land, inside the
    /// action scope the executor opened. Targets are resolved per invocation
    /// so earlier effects (a destroyed chassis, a moved vehicle) are seen by
    /// later ones.
    pub fn apply_all(ctx: &SkillContext<'_>, env: &mut EffectEnv<'_>) -> Vec<EffectOutcome> {
        let mut outcomes = Vec::new();
        for invocation in &ctx.skill.effects {
            let targets = Self::resolve_targets(invocation, ctx, &*env.stage, &env.rules.statuses);
            if targets.is_empty() {
                tracing::debug!(effect = invocation.effect.name(), target = ?invocation.target, "no targets");
            }
            for target in targets {
                outcomes.push(invocation.effect.apply(ctx, target, env));
            }
        }
        outcomes
    }

    /// Concrete components one invocation applies to
    pub fn resolve_targets(
        invocation: &EffectInvocation,
        ctx: &SkillContext<'_>,
        stage: &Stage,
        statuses: &StatusEffectRegistry,
    ) -> Vec<ComponentRef> {
        let route = |vehicle: VehicleId| -> Option<ComponentRef> {
            let v = stage.vehicle(vehicle)?;
            let component = VehicleEffectRouter::route(&invocation.effect, v, statuses);
            Some(ComponentRef::new(vehicle, component))
        };
        let literal_or_route = |vehicle: VehicleId, literal: Option<ComponentId>| -> Option<ComponentRef> {
            match literal {
                Some(component) => Some(ComponentRef::new(vehicle, component)),
                None => route(vehicle),
            }
        };

        match invocation.target {
            EffectTarget::SourceComponent => literal_or_route(ctx.user, ctx.source_component).into_iter().collect(),
            EffectTarget::SourceVehicle => route(ctx.user).into_iter().collect(),
            EffectTarget::SelectedTarget => literal_or_route(ctx.target, ctx.target_component).into_iter().collect(),
            EffectTarget::TargetVehicle => route(ctx.target).into_iter().collect(),
            EffectTarget::Both => {
                let mut targets: Vec<ComponentRef> = route(ctx.user).into_iter().collect();
                if let Some(selected) = literal_or_route(ctx.target, ctx.target_component) {
                    if !targets.contains(&selected) {
                        targets.push(selected);
                    }
                }
                targets
            }
            EffectTarget::AllEnemiesInStage => stage
                .enemies_in_stage(ctx.user)
                .into_iter()
                .filter_map(route)
                .collect(),
            EffectTarget::AllAlliesInStage => stage
                .allies_in_stage(ctx.user)
                .into_iter()
                .filter_map(route)
                .collect(),
        }
    }
}
