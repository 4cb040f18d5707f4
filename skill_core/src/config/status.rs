//! Status template configuration loading

use super::ConfigError;
use crate::status::{StatusEffectRegistry, StatusEffectTemplate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Container for status templates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusEffectsConfig {
    #[serde(rename = "status_effects")]
    pub status_effects: Vec<StatusEffectTemplate>,
}

impl StatusEffectsConfig {
    fn into_registry(self) -> Result<StatusEffectRegistry, ConfigError> {
        let mut seen = HashSet::new();
        let mut registry = StatusEffectRegistry::new();
        for template in self.status_effects {
            if !seen.insert(template.id.clone()) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate status effect id '{}'",
                    template.id
                )));
            }
            registry.register(template);
        }
        Ok(registry)
    }
}

/// Load status templates from a TOML file
pub fn load_status_templates(path: &Path) -> Result<StatusEffectRegistry, ConfigError> {
    let config: StatusEffectsConfig = super::load_toml(path)?;
    config.into_registry()
}

/// Load status templates from a TOML string
pub fn parse_status_templates(content: &str) -> Result<StatusEffectRegistry, ConfigError> {
    let config: StatusEffectsConfig = super::parse_toml(content)?;
    config.into_registry()
}
