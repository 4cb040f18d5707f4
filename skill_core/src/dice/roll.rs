//! RollBreakdown - One d20 test and everything that went into it

use serde::{Deserialize, Serialize};

/// What kind of d20 test was made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollKind {
    Attack,
    SavingThrow,
    SkillCheck,
    OpposedCheck,
}

/// A labelled bonus or penalty applied to a roll
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollModifier {
    pub label: String,
    pub value: i32,
}

impl RollModifier {
    pub fn new(label: impl Into<String>, value: i32) -> Self {
        RollModifier {
            label: label.into(),
            value,
        }
    }
}

/// Result of a single d20 roll against a target number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollBreakdown {
    pub kind: RollKind,
    /// The face shown on the die
    pub natural: u32,
    pub modifiers: Vec<RollModifier>,
    /// natural + Σ modifiers
    pub total: i32,
    /// AC, DC or opposing total
    pub target: i32,
    pub success: bool,
    pub critical: bool,
}

impl RollBreakdown {
    /// Build a breakdown, computing the total; success is decided by the caller
    pub fn new(kind: RollKind, natural: u32, modifiers: Vec<RollModifier>, target: i32) -> Self {
        let natural_value = i32::try_from(natural).unwrap_or(i32::MAX);
        let total = modifiers
            .iter()
            .fold(natural_value, |total, m| total.saturating_add(m.value));
        RollBreakdown {
            kind,
            natural,
            modifiers,
            total,
            target,
            success: false,
            critical: false,
        }
    }

    /// Meet-or-beat resolution used by attacks, saves and checks
    pub fn meets_target(mut self) -> Self {
        self.success = self.total >= self.target;
        self
    }

    /// Sum of all modifiers
    pub fn modifier_total(&self) -> i32 {
        self.modifiers
            .iter()
            .fold(0i32, |total, m| total.saturating_add(m.value))
    }

    /// "d20=12 +3 = 15 vs 15"
    pub fn describe(&self) -> String {
        let mods: String = self
            .modifiers
            .iter()
            .filter(|m| m.value != 0)
            .map(|m| format!(" {:+} ({})", m.value, m.label))
            .collect();
        format!(
            "d20={}{} = {} vs {}",
            self.natural, mods, self.total, self.target
        )
    }
}
