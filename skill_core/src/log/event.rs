//! CombatEvent - Structured sub-results reported to the log sink

use crate::dice::RollBreakdown;
use crate::types::{DamageSource, DamageType, ResistanceLevel, ResourceKind, StagePosition};
use serde::{Deserialize, Serialize};

/// Which stage of an attack a roll belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackStage {
    /// Single roll against the target's AC
    Standard,
    /// First roll of a precise attack, against the chosen component
    Component,
    /// Second roll of a precise attack, against the chassis with penalty
    ChassisFallback,
}

/// What happened to an incoming status application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusChange {
    Applied,
    Replaced,
    Refused,
}

/// One reportable sub-result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CombatEvent {
    AttackRoll {
        stage: AttackStage,
        roll: RollBreakdown,
    },
    SavingThrow {
        roll: RollBreakdown,
    },
    SkillCheck {
        roll: RollBreakdown,
    },
    OpposedCheck {
        attacker: RollBreakdown,
        defender: RollBreakdown,
        attacker_wins: bool,
    },
    Damage {
        target: String,
        source: DamageSource,
        damage_type: DamageType,
        raw: i32,
        resistance: ResistanceLevel,
        requested: i32,
        actual: i32,
        critical: bool,
        destroyed: bool,
    },
    StatusEffect {
        target: String,
        status: String,
        change: StatusChange,
        turns: i32,
    },
    Restoration {
        target: String,
        resource: ResourceKind,
        requested: i32,
        actual: i32,
        current: i32,
    },
    Modifier {
        target: String,
        description: String,
    },
    ModifierExpired {
        target: String,
        description: String,
    },
    StatusExpired {
        target: String,
        status: String,
    },
    PositionChanged {
        vehicle: String,
        from: StagePosition,
        to: StagePosition,
    },
    Command {
        command: String,
        target: String,
    },
    EffectSkipped {
        target: String,
        reason: String,
    },
    /// The single outcome record every resolver emits
    Outcome {
        skill: String,
        resolver: String,
        success: bool,
    },
    ValidationFailed {
        skill: String,
        reason: String,
    },
}

impl CombatEvent {
    /// Short phrase for action summaries, if the event contributes one
    pub fn phrase(&self) -> Option<String> {
        match self {
            CombatEvent::Damage {
                actual, destroyed, target, ..
            } => {
                if *destroyed {
                    Some(format!("deals {} damage, destroying {}", actual, target))
                } else {
                    Some(format!("deals {} damage", actual))
                }
            }
            CombatEvent::Restoration {
                resource, actual, ..
            } => {
                if *actual >= 0 {
                    Some(format!("restores {} {}", actual, resource))
                } else {
                    Some(format!("drains {} {}", -actual, resource))
                }
            }
            CombatEvent::StatusEffect {
                status, change, ..
            } => match change {
                StatusChange::Applied | StatusChange::Replaced => Some(format!("applies {}", status)),
                StatusChange::Refused => None,
            },
            CombatEvent::Modifier { description, .. } => Some(format!("grants {}", description)),
            CombatEvent::PositionChanged { to, .. } => {
                Some(format!("moves to stage {} lane {}", to.stage, to.lane))
            }
            CombatEvent::Command { command, .. } => Some(format!("triggers {}", command)),
            _ => None,
        }
    }
}
