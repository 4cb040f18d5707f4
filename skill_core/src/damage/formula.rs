//! DamageFormula - How a skill composes its damage dice

use crate::dice::DiceSpec;
use crate::types::{DamageSource, DamageType};
use serde::{Deserialize, Serialize};

/// Which dice sets contribute to the damage roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageMode {
    /// The skill's own dice only
    #[default]
    SkillOnly,
    /// The acting weapon's dice only
    WeaponOnly,
    /// Weapon dice + skill dice + both bonuses
    WeaponPlusSkill,
    /// Weapon dice count scaled by `weapon_multiplier`, bonuses unscaled
    WeaponMultiplied,
}

impl DamageMode {
    pub fn uses_weapon(&self) -> bool {
        !matches!(self, DamageMode::SkillOnly)
    }

    pub fn uses_skill_dice(&self) -> bool {
        matches!(self, DamageMode::SkillOnly | DamageMode::WeaponPlusSkill)
    }
}

fn default_multiplier() -> f64 {
    1.0
}

/// Authored damage recipe of a skill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageFormula {
    #[serde(default)]
    pub mode: DamageMode,
    #[serde(default)]
    pub skill_dice: DiceSpec,
    #[serde(default)]
    pub skill_bonus: i32,
    /// Overrides the weapon's damage type; kinetic when neither is known
    #[serde(default)]
    pub damage_type: Option<DamageType>,
    #[serde(default = "default_multiplier")]
    pub weapon_multiplier: f64,
}

impl Default for DamageFormula {
    fn default() -> Self {
        DamageFormula {
            mode: DamageMode::SkillOnly,
            skill_dice: DiceSpec::none(),
            skill_bonus: 0,
            damage_type: None,
            weapon_multiplier: 1.0,
        }
    }
}

impl DamageFormula {
    /// Skill dice plus a flat bonus
    pub fn skill(dice: DiceSpec, bonus: i32, damage_type: DamageType) -> Self {
        DamageFormula {
            mode: DamageMode::SkillOnly,
            skill_dice: dice,
            skill_bonus: bonus,
            damage_type: Some(damage_type),
            weapon_multiplier: 1.0,
        }
    }

    /// The weapon's own damage
    pub fn weapon() -> Self {
        DamageFormula {
            mode: DamageMode::WeaponOnly,
            ..Default::default()
        }
    }

    /// Weapon damage plus extra skill dice
    pub fn weapon_plus(dice: DiceSpec, bonus: i32) -> Self {
        DamageFormula {
            mode: DamageMode::WeaponPlusSkill,
            skill_dice: dice,
            skill_bonus: bonus,
            ..Default::default()
        }
    }

    /// Weapon dice count scaled, e.g. 1d8 x2.0 becomes 2d8
    pub fn weapon_multiplied(multiplier: f64) -> Self {
        DamageFormula {
            mode: DamageMode::WeaponMultiplied,
            weapon_multiplier: multiplier,
            ..Default::default()
        }
    }

    /// What a hit from this formula counts as, given whether a weapon is acting
    pub fn source(&self, weapon_present: bool) -> DamageSource {
        if weapon_present && self.mode.uses_weapon() {
            DamageSource::Weapon
        } else {
            DamageSource::Skill
        }
    }

    /// Weapon dice after the multiplier; at least one die for a positive multiplier
    pub fn scaled_weapon_dice(&self, weapon: DiceSpec) -> DiceSpec {
        if self.mode != DamageMode::WeaponMultiplied {
            return weapon;
        }
        if self.weapon_multiplier <= 0.0 || weapon.is_empty() {
            return DiceSpec::none();
        }
        let count = (weapon.count as f64 * self.weapon_multiplier)
            .round()
            .clamp(1.0, DiceSpec::MAX_COUNT as f64) as u32;
        DiceSpec::new(count, weapon.sides)
    }
}
