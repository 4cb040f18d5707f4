//! Skill configuration loading

use super::ConfigError;
use crate::dice::DiceSpec;
use crate::effect::Effect;
use crate::skill::{RollType, Skill};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Container for skill configurations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillsConfig {
    #[serde(rename = "skills")]
    pub skills: Vec<Skill>,
}

impl SkillsConfig {
    fn into_map(self) -> Result<HashMap<String, Skill>, ConfigError> {
        let mut map = HashMap::new();
        for skill in self.skills {
            validate_skill(&skill)?;
            if map.contains_key(&skill.id) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate skill id '{}'",
                    skill.id
                )));
            }
            map.insert(skill.id.clone(), skill);
        }
        Ok(map)
    }
}

/// Highest DC, save DC or targeting penalty content may set
pub const MAX_DIFFICULTY: i32 = 40;
/// Largest flat damage bonus content may set
pub const MAX_DAMAGE_BONUS: i32 = 1000;
/// Largest weapon dice multiplier content may set
pub const MAX_WEAPON_MULTIPLIER: f64 = 10.0;
/// Largest status scale content may set
pub const MAX_STATUS_SCALE: f64 = 10.0;

fn invalid(skill: &Skill, problem: impl std::fmt::Display) -> ConfigError {
    ConfigError::ValidationError(format!("skill '{}' {}", skill.id, problem))
}

fn check_difficulty(skill: &Skill, what: &str, value: i32) -> Result<(), ConfigError> {
    if (0..=MAX_DIFFICULTY).contains(&value) {
        Ok(())
    } else {
        Err(invalid(skill, format_args!("{what} {value} outside 0..={MAX_DIFFICULTY}")))
    }
}

fn validate_skill(skill: &Skill) -> Result<(), ConfigError> {
    if skill.effects.is_empty() {
        return Err(invalid(skill, "has no effects"));
    }
    if skill.energy_cost < 0 {
        return Err(invalid(
            skill,
            format_args!("has negative energy cost {}", skill.energy_cost),
        ));
    }
    if let Some(penalty) = skill.component_targeting_penalty {
        check_difficulty(skill, "component targeting penalty", penalty)?;
    }
    if let Some(save) = &skill.save {
        check_difficulty(skill, "save dc", save.dc_base)?;
    }
    if let Some(check) = &skill.check {
        check_difficulty(skill, "check dc", check.dc)?;
    }

    for invocation in &skill.effects {
        match &invocation.effect {
            Effect::Damage(damage) => {
                let formula = &damage.formula;
                if !formula.skill_dice.is_bounded() {
                    return Err(invalid(
                        skill,
                        format_args!(
                            "rolls {}, more than {}d{}",
                            formula.skill_dice,
                            DiceSpec::MAX_COUNT,
                            DiceSpec::MAX_SIDES
                        ),
                    ));
                }
                if !(0.0..=MAX_WEAPON_MULTIPLIER).contains(&formula.weapon_multiplier) {
                    return Err(invalid(
                        skill,
                        format_args!(
                            "weapon multiplier {} outside 0..={MAX_WEAPON_MULTIPLIER}",
                            formula.weapon_multiplier
                        ),
                    ));
                }
                if formula.skill_bonus.abs() > MAX_DAMAGE_BONUS {
                    return Err(invalid(
                        skill,
                        format_args!(
                            "damage bonus {} beyond {MAX_DAMAGE_BONUS}",
                            formula.skill_bonus
                        ),
                    ));
                }
            }
            Effect::ApplyStatus(apply) => {
                if !(0.0..=MAX_STATUS_SCALE).contains(&apply.magnitude) {
                    return Err(invalid(
                        skill,
                        format_args!(
                            "status scale {} outside 0..={MAX_STATUS_SCALE}",
                            apply.magnitude
                        ),
                    ));
                }
            }
            _ => {}
        }
    }
    Ok(())
}

/// Load skill configurations from a TOML file
pub fn load_skill_configs(path: &Path) -> Result<HashMap<String, Skill>, ConfigError> {
    let config: SkillsConfig = super::load_toml(path)?;
    config.into_map()
}

/// Load skill configurations from a TOML string
pub fn parse_skill_configs(content: &str) -> Result<HashMap<String, Skill>, ConfigError> {
    let config: SkillsConfig = super::parse_toml(content)?;
    config.into_map()
}

/// Get default skill configurations
pub fn default_skills() -> HashMap<String, Skill> {
    let toml = include_str!("../../config/skills.toml");
    parse_skill_configs(toml).unwrap_or_else(|err| {
        tracing::warn!(%err, "bundled skills failed to parse, using the basic ram");
        let ram = basic_ram();
        let mut map = HashMap::new();
        map.insert(ram.id.clone(), ram);
        map
    })
}

fn basic_ram() -> Skill {
    use crate::damage::DamageFormula;
    use crate::effect::DamageEffect;
    use crate::skill::{EffectTarget, TargetingMode};
    use crate::types::DamageType;

    Skill::new("ram", "Ram", RollType::AttackRoll)
        .with_description("Drive straight into the target")
        .with_targeting(TargetingMode::Enemy)
        .with_effect(
            DamageEffect::new(DamageFormula::skill(DiceSpec::new(1, 8), 0, DamageType::Kinetic)),
            EffectTarget::SelectedTarget,
        )
}
