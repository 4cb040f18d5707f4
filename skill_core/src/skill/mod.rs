//! Skills - immutable descriptors plus the validation, routing, application
//! and execution machinery around them

mod applicator;
mod context;
mod error;
mod executor;
mod router;
mod validator;

pub use applicator::SkillEffectApplicator;
pub use context::{SkillContext, SkillUse};
pub use error::SkillError;
pub use executor::{CombatRules, SkillExecutor};
pub use router::VehicleEffectRouter;
pub use validator::SkillValidator;

use crate::effect::Effect;
use crate::types::Attribute;
use serde::{Deserialize, Serialize};

/// Which resolver decides whether the effects land
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollType {
    #[default]
    None,
    AttackRoll,
    SavingThrow,
    SkillCheck,
    OpposedCheck,
}

/// Who a skill may be aimed at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetingMode {
    SelfOnly,
    Enemy,
    Ally,
    #[default]
    Any,
}

/// Where one invocation's effect lands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectTarget {
    SourceComponent,
    SourceVehicle,
    #[default]
    SelectedTarget,
    TargetVehicle,
    /// The user's vehicle and the selected target
    Both,
    AllEnemiesInStage,
    AllAlliesInStage,
}

/// One effect paired with its target selector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectInvocation {
    pub effect: Effect,
    #[serde(default)]
    pub target: EffectTarget,
}

impl EffectInvocation {
    pub fn new(effect: impl Into<Effect>, target: EffectTarget) -> Self {
        EffectInvocation {
            effect: effect.into(),
            target,
        }
    }
}

/// Target rolls d20 + `attribute` against `dc_base` + the caster's DC bonus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveSpec {
    pub attribute: Attribute,
    pub dc_base: i32,
}

impl Default for SaveSpec {
    fn default() -> Self {
        SaveSpec {
            attribute: Attribute::Stability,
            dc_base: 10,
        }
    }
}

/// User rolls d20 + `attribute` against `dc`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckSpec {
    pub attribute: Attribute,
    pub dc: i32,
}

impl Default for CheckSpec {
    fn default() -> Self {
        CheckSpec {
            attribute: Attribute::Systems,
            dc: 10,
        }
    }
}

/// Both sides roll d20 + their attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpposedSpec {
    pub attacker: Attribute,
    pub defender: Attribute,
}

impl Default for OpposedSpec {
    fn default() -> Self {
        OpposedSpec {
            attacker: Attribute::Systems,
            defender: Attribute::Systems,
        }
    }
}

/// Authored skill; never mutated at runtime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub roll_type: RollType,
    #[serde(default)]
    pub effects: Vec<EffectInvocation>,
    #[serde(default)]
    pub targeting: TargetingMode,
    /// Enables the two-stage component attack
    #[serde(default)]
    pub allows_component_targeting: bool,
    /// Penalty on the chassis fallback roll; the combat constant when unset
    #[serde(default)]
    pub component_targeting_penalty: Option<i32>,
    #[serde(default)]
    pub save: Option<SaveSpec>,
    #[serde(default)]
    pub check: Option<CheckSpec>,
    #[serde(default)]
    pub opposed: Option<OpposedSpec>,
    /// Drawn from the user's energy pool when the use passes validation
    #[serde(default)]
    pub energy_cost: i32,
}

impl Skill {
    pub fn new(id: &str, name: &str, roll_type: RollType) -> Self {
        Skill {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            roll_type,
            effects: Vec::new(),
            targeting: TargetingMode::Any,
            allows_component_targeting: false,
            component_targeting_penalty: None,
            save: None,
            check: None,
            opposed: None,
            energy_cost: 0,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_effect(mut self, effect: impl Into<Effect>, target: EffectTarget) -> Self {
        self.effects.push(EffectInvocation::new(effect, target));
        self
    }

    pub fn with_targeting(mut self, targeting: TargetingMode) -> Self {
        self.targeting = targeting;
        self
    }

    pub fn with_component_targeting(mut self, penalty: i32) -> Self {
        self.allows_component_targeting = true;
        self.component_targeting_penalty = Some(penalty);
        self
    }

    pub fn with_save(mut self, attribute: Attribute, dc_base: i32) -> Self {
        self.save = Some(SaveSpec { attribute, dc_base });
        self
    }

    pub fn with_check(mut self, attribute: Attribute, dc: i32) -> Self {
        self.check = Some(CheckSpec { attribute, dc });
        self
    }

    pub fn with_opposed(mut self, attacker: Attribute, defender: Attribute) -> Self {
        self.opposed = Some(OpposedSpec { attacker, defender });
        self
    }

    pub fn with_energy_cost(mut self, cost: i32) -> Self {
        self.energy_cost = cost;
        self
    }
}
