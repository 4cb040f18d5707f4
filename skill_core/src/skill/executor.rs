//! SkillExecutor - The single entry point into skill resolution

use super::{Skill, SkillContext, SkillError, SkillUse, SkillValidator};
use crate::config::CombatConstants;
use crate::dice::DiceRoller;
use crate::effect::{CommandRegistry, EffectEnv};
use crate::log::{CombatEvent, CombatLog, Importance, LogEntry, LogEventType};
use crate::resolver::resolver_for;
use crate::status::StatusEffectRegistry;
use crate::vehicle::Stage;

/// Read-only content and tunables shared by every resolution
#[derive(Debug, Default)]
pub struct CombatRules {
    pub constants: CombatConstants,
    pub statuses: StatusEffectRegistry,
    pub commands: CommandRegistry,
}

impl CombatRules {
    pub fn new(constants: CombatConstants, statuses: StatusEffectRegistry, commands: CommandRegistry) -> Self {
        CombatRules {
            constants,
            statuses,
            commands,
        }
    }

    /// Bundled constants, status templates and built-in commands
    pub fn with_defaults() -> Self {
        CombatRules {
            constants: CombatConstants::default(),
            statuses: StatusEffectRegistry::with_defaults(),
            commands: CommandRegistry::with_defaults(),
        }
    }
}

/// Validates a skill use and runs exactly one resolver for it
#[derive(Debug, Default)]
pub struct SkillExecutor {
    rules: CombatRules,
}

impl SkillExecutor {
    pub fn new(rules: CombatRules) -> Self {
        SkillExecutor { rules }
    }

    pub fn with_defaults() -> Self {
        Self::new(CombatRules::with_defaults())
    }

    pub fn rules(&self) -> &CombatRules {
        &self.rules
    }

    pub fn rules_mut(&mut self) -> &mut CombatRules {
        &mut self.rules
    }

    /// Use a skill. Returns whether its effects were applied.
    ///
    /// Validation failures are reported to the log and return `false`.
    pub fn execute(
        &self,
        skill: &Skill,
        request: &SkillUse,
        stage: &mut Stage,
        roller: &mut dyn DiceRoller,
        log: &mut dyn CombatLog,
    ) -> bool {
        self.try_execute(skill, request, stage, roller, log).unwrap_or(false)
    }

    /// Like [`execute`](Self::execute) but surfaces the validation error
    pub fn try_execute(
        &self,
        skill: &Skill,
        request: &SkillUse,
        stage: &mut Stage,
        roller: &mut dyn DiceRoller,
        log: &mut dyn CombatLog,
    ) -> Result<bool, SkillError> {
        let target = match SkillValidator::validate(skill, request, stage) {
            Ok(target) => target,
            Err(err) => {
                self.report_rejection(skill, request, stage, &err, log);
                return Err(err);
            }
        };

        let ctx = SkillContext::from_use(skill, request, target);
        let user_name = stage.vehicle(request.user).map(|v| v.name.clone()).unwrap_or_default();
        let target_name = stage.describe(ctx.target_ref());

        if skill.energy_cost > 0 {
            if let Some(user) = stage.vehicle_mut(request.user) {
                user.restore_energy(-skill.energy_cost);
            }
        }

        let resolver = resolver_for(skill.roll_type);

        log.begin_action(&user_name, &skill.name, &target_name);
        let applied = {
            let mut env = EffectEnv {
                stage,
                rules: &self.rules,
                roller,
                log: &mut *log,
            };
            resolver.resolve(&ctx, &mut env)
        };
        log.end_action();

        tracing::info!(
            skill = %skill.id,
            user = %user_name,
            target = %target_name,
            resolver = resolver.name(),
            applied,
            "skill resolved"
        );
        Ok(applied)
    }

    fn report_rejection(
        &self,
        skill: &Skill,
        request: &SkillUse,
        stage: &Stage,
        err: &SkillError,
        log: &mut dyn CombatLog,
    ) {
        let user = stage.vehicle(request.user);
        let user_name = user.map(|v| v.name.clone()).unwrap_or_else(|| "?".to_string());
        tracing::info!(skill = %skill.id, user = %user_name, reason = %err, "skill rejected");

        log.emit(CombatEvent::ValidationFailed {
            skill: skill.name.clone(),
            reason: err.to_string(),
        });
        let mut entry = LogEntry::new(
            LogEventType::Validation,
            Importance::Low,
            format!("{} cannot use {}: {}", user_name, skill.name, err),
        )
        .with_participant(user_name)
        .with_metadata("skill", skill.id.as_str());
        if let Some(user) = user {
            entry = entry.at(user.position.to_string());
        }
        log.log(entry);
    }
}
