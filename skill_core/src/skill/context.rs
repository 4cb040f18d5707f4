//! SkillUse and SkillContext - what the caller asked for, and what resolution works with

use super::Skill;
use crate::types::{ComponentId, ComponentRef, VehicleId};

/// A caller's request to use a skill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillUse {
    pub user: VehicleId,
    pub target: Option<VehicleId>,
    /// Acting component; the chassis acts when absent
    pub source_component: Option<ComponentId>,
    /// Specific component aimed at on the target
    pub target_component: Option<ComponentId>,
}

impl SkillUse {
    pub fn new(user: VehicleId, target: VehicleId) -> Self {
        SkillUse {
            user,
            target: Some(target),
            source_component: None,
            target_component: None,
        }
    }

    /// A skill used on oneself
    pub fn on_self(user: VehicleId) -> Self {
        Self::new(user, user)
    }

    /// Use by the given component
    pub fn from_component(mut self, component: ComponentId) -> Self {
        self.source_component = Some(component);
        self
    }

    /// Aim at a specific component of the target
    pub fn at_component(mut self, component: ComponentId) -> Self {
        self.target_component = Some(component);
        self
    }
}

/// Transient bundle for one resolution
#[derive(Debug, Clone, Copy)]
pub struct SkillContext<'s> {
    pub skill: &'s Skill,
    pub user: VehicleId,
    pub target: VehicleId,
    pub source_component: Option<ComponentId>,
    pub target_component: Option<ComponentId>,
    pub is_critical: bool,
}

impl<'s> SkillContext<'s> {
    pub fn new(skill: &'s Skill, user: VehicleId, target: VehicleId) -> Self {
        SkillContext {
            skill,
            user,
            target,
            source_component: None,
            target_component: None,
            is_critical: false,
        }
    }

    /// Build from a validated request
    pub fn from_use(skill: &'s Skill, request: &SkillUse, target: VehicleId) -> Self {
        SkillContext {
            skill,
            user: request.user,
            target,
            source_component: request.source_component,
            target_component: request.target_component,
            is_critical: false,
        }
    }

    /// The acting entity: source component, else the user's chassis
    pub fn source_ref(&self) -> ComponentRef {
        ComponentRef::new(self.user, self.source_component.unwrap_or(ComponentId::CHASSIS))
    }

    /// The defending entity: chosen component, else the target's chassis
    pub fn target_ref(&self) -> ComponentRef {
        ComponentRef::new(self.target, self.target_component.unwrap_or(ComponentId::CHASSIS))
    }

    pub fn is_self_target(&self) -> bool {
        self.user == self.target
    }

    pub fn with_target_component(mut self, component: ComponentId) -> Self {
        self.target_component = Some(component);
        self
    }

    pub fn critical(mut self, is_critical: bool) -> Self {
        self.is_critical = is_critical;
        self
    }
}
