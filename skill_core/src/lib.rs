//! skill_core - Skill resolution and combat effects for modular vehicles
//!
//! This library provides:
//! - Vehicle / Component: Arena-owned vehicles built from targetable parts
//! - Skill: Authored, immutable skill descriptors loaded from TOML
//! - SkillExecutor: Validation, roll resolution and effect application
//! - Damage pipeline: Dice, resistance algebra and health application
//! - CombatLog: Structured event sink with per-action scopes

pub mod config;
pub mod damage;
pub mod dice;
pub mod effect;
pub mod log;
pub mod modifier;
pub mod resolver;
pub mod skill;
pub mod status;
pub mod types;
pub mod vehicle;

// Re-export core types for convenience
pub use config::{default_skills, CombatConstants, ConfigError};
pub use damage::{DamageFormula, DamageMode, DamageResult};
pub use dice::{DiceRoller, DiceSpec, RngRoller, RollBreakdown, ScriptedRoller};
pub use effect::{
    ApplyStatusEffect, AttributeModifierEffect, CommandHandler, CommandRegistry, CustomCommandEffect,
    DamageEffect, Effect, EffectOutcome, PositionChangeEffect, ResourceRestorationEffect,
};
pub use log::{ActionRecord, CombatEvent, CombatLog, MemoryLog, NullLog, TracingLog};
pub use modifier::{AttributeModifier, ModifierId, ModifierSource, ModifierSpec, ModifierType, PERMANENT};
pub use skill::{
    CombatRules, EffectTarget, RollType, Skill, SkillError, SkillExecutor, SkillUse, TargetingMode,
};
pub use status::{StatusEffectRegistry, StatusEffectTemplate, INDEFINITE};
pub use types::{
    Attribute, ComponentExposure, ComponentId, ComponentRef, ComponentType, DamageSource, DamageType,
    ResistanceLevel, ResourceKind, StagePosition, TeamId, VehicleId,
};
pub use vehicle::{Component, InaccessibilityReason, Stage, Vehicle, WeaponProfile};
