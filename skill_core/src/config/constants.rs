//! Combat constants configuration

use super::ConfigError;
use serde::{Deserialize, Serialize};

/// Internal-component gate used when neither the component nor the stage sets one
pub const DEFAULT_INTERNAL_ACCESS_THRESHOLD: f64 = 0.5;

/// Tunable resolution constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatConstants {
    /// Natural d20 at or above this always hits and crits
    #[serde(default = "default_critical_threshold")]
    pub critical_threshold: u32,
    /// Natural d20 at or below this always misses
    #[serde(default = "default_natural_miss")]
    pub natural_miss: u32,
    /// Chassis fallback penalty for skills that don't set their own
    #[serde(default = "default_component_targeting_penalty")]
    pub default_component_targeting_penalty: i32,
    /// Internal-component damage gate for components that don't set their own
    #[serde(default = "default_internal_access_threshold")]
    pub default_internal_access_threshold: f64,
}

impl Default for CombatConstants {
    fn default() -> Self {
        CombatConstants {
            critical_threshold: default_critical_threshold(),
            natural_miss: default_natural_miss(),
            default_component_targeting_penalty: default_component_targeting_penalty(),
            default_internal_access_threshold: default_internal_access_threshold(),
        }
    }
}

impl CombatConstants {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=20).contains(&self.critical_threshold) {
            return Err(ConfigError::ValidationError(format!(
                "critical_threshold must be 1-20, got {}",
                self.critical_threshold
            )));
        }
        if self.natural_miss >= self.critical_threshold {
            return Err(ConfigError::ValidationError(format!(
                "natural_miss ({}) must be below critical_threshold ({})",
                self.natural_miss, self.critical_threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.default_internal_access_threshold) {
            return Err(ConfigError::ValidationError(format!(
                "default_internal_access_threshold must be 0.0-1.0, got {}",
                self.default_internal_access_threshold
            )));
        }
        Ok(())
    }
}

fn default_critical_threshold() -> u32 {
    20
}
fn default_natural_miss() -> u32 {
    1
}
fn default_component_targeting_penalty() -> i32 {
    5
}
fn default_internal_access_threshold() -> f64 {
    DEFAULT_INTERNAL_ACCESS_THRESHOLD
}
