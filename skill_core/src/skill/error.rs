//! SkillError - Why a skill use was rejected before resolution

use super::TargetingMode;
use crate::vehicle::InaccessibilityReason;
use thiserror::Error;

/// Validation failure; non-fatal, the skill simply does not resolve
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SkillError {
    #[error("no target supplied")]
    MissingTarget,
    #[error("target vehicle not found")]
    TargetNotFound,
    #[error("target vehicle is destroyed")]
    TargetDestroyed,
    #[error("using vehicle not found")]
    UserNotFound,
    #[error("skill has no effects configured")]
    NoEffects,
    #[error("component not found")]
    ComponentNotFound,
    #[error("component is destroyed")]
    ComponentDestroyed,
    #[error("component is not reachable: {0}")]
    ComponentInaccessible(InaccessibilityReason),
    #[error("user cannot act: {0}")]
    UserCannotAct(String),
    #[error("target not allowed for {0:?} skills")]
    InvalidTarget(TargetingMode),
    #[error("not enough energy: needs {required}, has {available}")]
    InsufficientEnergy { required: i32, available: i32 },
}
