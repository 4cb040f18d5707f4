//! DamageResolver - Resistance algebra

use super::DamageResult;
use crate::types::ResistanceLevel;

impl ResistanceLevel {
    /// Scale incoming damage by this level; never below zero
    pub fn apply(self, damage: i32) -> i32 {
        let scaled = match self {
            ResistanceLevel::Normal => damage,
            ResistanceLevel::Vulnerable => damage.saturating_mul(2),
            // integer division truncates toward zero
            ResistanceLevel::Resistant => damage / 2,
            ResistanceLevel::Immune => 0,
        };
        scaled.max(0)
    }
}

/// Turns a raw roll into final damage
pub struct DamageResolver;

impl DamageResolver {
    pub fn resolve(mut result: DamageResult) -> DamageResult {
        result.final_damage = result.resistance.apply(result.raw_total);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_levels() {
        assert_eq!(ResistanceLevel::Normal.apply(13), 13);
        assert_eq!(ResistanceLevel::Vulnerable.apply(13), 26);
        assert_eq!(ResistanceLevel::Resistant.apply(13), 6);
        assert_eq!(ResistanceLevel::Immune.apply(13), 0);
    }

    #[test]
    fn test_negative_raw_clamps_to_zero() {
        assert_eq!(ResistanceLevel::Normal.apply(-4), 0);
        assert_eq!(ResistanceLevel::Vulnerable.apply(-4), 0);
    }

    proptest! {
        #[test]
        fn prop_resistance_algebra(d in 0i32..100_000) {
            prop_assert_eq!(ResistanceLevel::Normal.apply(d), d);
            prop_assert_eq!(ResistanceLevel::Vulnerable.apply(d), 2 * d);
            prop_assert_eq!(ResistanceLevel::Resistant.apply(d), d.div_euclid(2));
            prop_assert_eq!(ResistanceLevel::Immune.apply(d), 0);
        }

        #[test]
        fn prop_never_negative(d in any::<i32>()) {
            for level in [
                ResistanceLevel::Normal,
                ResistanceLevel::Resistant,
                ResistanceLevel::Vulnerable,
                ResistanceLevel::Immune,
            ] {
                prop_assert!(level.apply(d) >= 0);
            }
        }
    }
}
