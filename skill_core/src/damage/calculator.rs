//! DamageCalculator - Rolls a formula into a raw damage total

use super::{DamageFormula, DamageResult};
use crate::dice::{DiceRoller, DiceSpec};
use crate::types::{DamageType, ResistanceLevel};
use crate::vehicle::WeaponProfile;

/// Stateless damage roller
pub struct DamageCalculator;

impl DamageCalculator {
    /// Roll the dice a formula calls for and total them before resistance.
    ///
    /// A critical rolls each dice set a second time; flat bonuses are added once.
    pub fn compute(
        formula: &DamageFormula,
        weapon: Option<&WeaponProfile>,
        resistance_of: impl Fn(DamageType) -> ResistanceLevel,
        is_critical: bool,
        roller: &mut dyn DiceRoller,
    ) -> DamageResult {
        let damage_type = formula
            .damage_type
            .or_else(|| weapon.map(|w| w.damage_type))
            .unwrap_or(DamageType::Kinetic);

        let (weapon_dice, weapon_bonus) = match weapon {
            Some(profile) if formula.mode.uses_weapon() => {
                (formula.scaled_weapon_dice(profile.dice), profile.bonus)
            }
            _ => (DiceSpec::none(), 0),
        };
        let (skill_dice, skill_bonus) = if formula.mode.uses_skill_dice() {
            (formula.skill_dice, formula.skill_bonus)
        } else {
            (DiceSpec::none(), 0)
        };

        let weapon_rolls = Self::roll_set(weapon_dice, is_critical, roller);
        let skill_rolls = Self::roll_set(skill_dice, is_critical, roller);

        let dice_total: i64 = weapon_rolls.iter().chain(skill_rolls.iter()).map(|&r| r as i64).sum();
        let raw_total = (dice_total + weapon_bonus as i64 + skill_bonus as i64)
            .clamp(i32::MIN as i64, i32::MAX as i64) as i32;

        tracing::debug!(
            ?weapon_rolls,
            ?skill_rolls,
            weapon_bonus,
            skill_bonus,
            is_critical,
            raw_total,
            "damage rolled"
        );

        DamageResult {
            damage_type,
            weapon_dice,
            weapon_rolls,
            weapon_bonus,
            skill_dice,
            skill_rolls,
            skill_bonus,
            critical: is_critical,
            raw_total,
            resistance: resistance_of(damage_type),
            final_damage: 0,
            applied: 0,
            destroyed: false,
        }
    }

    fn roll_set(dice: DiceSpec, is_critical: bool, roller: &mut dyn DiceRoller) -> Vec<u32> {
        let mut rolls = dice.roll(roller);
        if is_critical {
            rolls.extend(dice.roll(roller));
        }
        rolls
    }
}
