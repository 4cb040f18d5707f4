//! Damage pipeline - formula, roll, resistance, application
//!
//! `DamageFormula` → `DamageCalculator::compute` → `DamageResolver::resolve`
//! → `DamageApplicator::apply`. Each stage fills in more of one
//! [`DamageResult`], which is created fresh for every resolution.

mod applicator;
mod calculator;
mod formula;
mod resolver;

pub use applicator::DamageApplicator;
pub use calculator::DamageCalculator;
pub use formula::{DamageFormula, DamageMode};
pub use resolver::DamageResolver;

use crate::dice::DiceSpec;
use crate::types::{DamageType, ResistanceLevel};
use serde::{Deserialize, Serialize};

/// Breakdown of one damage resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageResult {
    pub damage_type: DamageType,

    // === Dice ===
    /// Weapon dice after any multiplier
    pub weapon_dice: DiceSpec,
    /// Every weapon die rolled, both passes on a critical
    pub weapon_rolls: Vec<u32>,
    pub weapon_bonus: i32,
    pub skill_dice: DiceSpec,
    pub skill_rolls: Vec<u32>,
    pub skill_bonus: i32,
    pub critical: bool,

    // === Totals ===
    /// Dice + bonuses, before resistance
    pub raw_total: i32,
    pub resistance: ResistanceLevel,
    /// After resistance, never negative
    pub final_damage: i32,
    /// Health actually removed
    pub applied: i32,
    pub destroyed: bool,
}

impl DamageResult {
    /// Sum of all dice rolled
    pub fn dice_total(&self) -> i64 {
        self.weapon_rolls
            .iter()
            .chain(self.skill_rolls.iter())
            .map(|&r| r as i64)
            .sum()
    }

    /// "1d8 [5] + 1d6 [4] + 2 = 11"
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if !self.weapon_rolls.is_empty() {
            parts.push(format!("{} {:?}", self.weapon_dice, self.weapon_rolls));
        }
        if !self.skill_rolls.is_empty() {
            parts.push(format!("{} {:?}", self.skill_dice, self.skill_rolls));
        }
        let bonus = self.weapon_bonus + self.skill_bonus;
        if bonus != 0 || parts.is_empty() {
            parts.push(bonus.to_string());
        }
        let mut text = format!("{} = {}", parts.join(" + "), self.raw_total);
        if self.critical {
            text.push_str(" (critical)");
        }
        if self.resistance != ResistanceLevel::Normal {
            text.push_str(&format!(" -> {:?} {}", self.resistance, self.final_damage));
        }
        text
    }
}
