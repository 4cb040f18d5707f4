//! SkillValidator - Preconditions checked before any resolver runs

use super::{Skill, SkillError, SkillUse, TargetingMode};
use crate::types::VehicleId;
use crate::vehicle::{InaccessibilityReason, Stage};

pub struct SkillValidator;

impl SkillValidator {
    /// Check a request against the current stage. Returns the resolved target.
    pub fn validate(skill: &Skill, request: &SkillUse, stage: &Stage) -> Result<VehicleId, SkillError> {
        let target_id = request.target.ok_or(SkillError::MissingTarget)?;
        let user = stage.vehicle(request.user).ok_or(SkillError::UserNotFound)?;
        let target = stage.vehicle(target_id).ok_or(SkillError::TargetNotFound)?;

        if skill.effects.is_empty() {
            return Err(SkillError::NoEffects);
        }

        // The user must be able to act, through the acting component if one is named
        if !user.is_active() {
            return Err(SkillError::UserCannotAct(format!("{} is destroyed", user.name)));
        }
        if !user.chassis().can_act() {
            return Err(SkillError::UserCannotAct(format!("{} is incapacitated", user.name)));
        }
        if let Some(source_id) = request.source_component {
            let source = user.component(source_id).ok_or(SkillError::ComponentNotFound)?;
            if source.is_destroyed() {
                return Err(SkillError::ComponentDestroyed);
            }
            if !source.can_act() {
                return Err(SkillError::UserCannotAct(format!("{} cannot act", source.name)));
            }
        }

        if target.is_destroyed() {
            return Err(SkillError::TargetDestroyed);
        }

        let is_self = request.user == target_id;
        let allowed = match skill.targeting {
            TargetingMode::SelfOnly => is_self,
            TargetingMode::Enemy => user.team != target.team,
            TargetingMode::Ally => user.team == target.team,
            TargetingMode::Any => true,
        };
        if !allowed {
            return Err(SkillError::InvalidTarget(skill.targeting));
        }

        if let Some(component_id) = request.target_component {
            let component = target.component(component_id).ok_or(SkillError::ComponentNotFound)?;
            if component.is_destroyed() {
                return Err(SkillError::ComponentDestroyed);
            }
            if !target.is_component_accessible_to(component_id, request.user) {
                let reason = target
                    .inaccessibility_reason(component_id)
                    .unwrap_or(InaccessibilityReason::Destroyed);
                return Err(SkillError::ComponentInaccessible(reason));
            }
        }

        if skill.energy_cost > user.energy() {
            return Err(SkillError::InsufficientEnergy {
                required: skill.energy_cost,
                available: user.energy(),
            });
        }

        Ok(target_id)
    }
}
