//! AppliedStatusEffect - A status template bound to one component

use super::template::{StatusEffectTemplate, INDEFINITE};
use crate::modifier::ModifierId;
use crate::types::VehicleId;
use serde::{Deserialize, Serialize};

/// A live status effect instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedStatusEffect {
    /// Unique per component; also the source tag of the owned modifiers
    pub instance_id: u64,
    pub template_id: String,
    pub name: String,
    pub icon: String,
    /// Turns left; [`INDEFINITE`] until cleared
    pub turns_remaining: i32,
    /// Strength used for stacking comparisons
    pub magnitude: f64,
    /// Modifiers this instance installed on its component
    pub modifier_ids: Vec<ModifierId>,
    pub prevents_actions: bool,
    pub prevents_movement: bool,
    pub is_debuff: bool,
    /// Vehicle whose skill applied the status
    pub applied_by: Option<VehicleId>,
}

impl AppliedStatusEffect {
    /// Instantiate a template; modifiers are installed by the owning component
    pub fn new(
        instance_id: u64,
        template: &StatusEffectTemplate,
        duration: i32,
        magnitude: f64,
        applied_by: Option<VehicleId>,
    ) -> Self {
        AppliedStatusEffect {
            instance_id,
            template_id: template.id.clone(),
            name: template.name.clone(),
            icon: template.icon.clone(),
            turns_remaining: duration,
            magnitude,
            modifier_ids: Vec::new(),
            prevents_actions: template.prevents_actions,
            prevents_movement: template.prevents_movement,
            is_debuff: template.is_debuff,
            applied_by,
        }
    }

    pub fn is_indefinite(&self) -> bool {
        self.turns_remaining == INDEFINITE
    }

    pub fn is_active(&self) -> bool {
        self.is_indefinite() || self.turns_remaining > 0
    }

    /// Advance one turn. Returns true if the status is still active.
    pub fn tick(&mut self) -> bool {
        if self.is_indefinite() {
            return true;
        }
        self.turns_remaining -= 1;
        self.turns_remaining > 0
    }
}

/// Outcome of comparing an incoming application against an active instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackingDecision {
    /// No instance of the template is active
    Apply,
    /// The incoming instance wins and replaces the existing one
    Replace,
    /// The existing instance is kept unchanged
    Refuse,
}

/// Duration ordering where indefinite beats any finite count
fn duration_rank(turns: i32) -> i64 {
    if turns == INDEFINITE {
        i64::MAX
    } else {
        turns as i64
    }
}

/// Decide whether an incoming application replaces an active instance.
///
/// Stronger magnitude wins outright. On equal magnitude the longer duration
/// wins. Anything else is refused, including a weaker effect with a longer
/// duration.
pub fn stacking_decision(
    existing: Option<&AppliedStatusEffect>,
    incoming_magnitude: f64,
    incoming_duration: i32,
) -> StackingDecision {
    let Some(existing) = existing else {
        return StackingDecision::Apply;
    };

    const EPSILON: f64 = 1e-9;
    if incoming_magnitude > existing.magnitude + EPSILON {
        return StackingDecision::Replace;
    }
    let equal_magnitude = (incoming_magnitude - existing.magnitude).abs() <= EPSILON;
    if equal_magnitude
        && duration_rank(incoming_duration) > duration_rank(existing.turns_remaining)
    {
        return StackingDecision::Replace;
    }
    StackingDecision::Refuse
}
