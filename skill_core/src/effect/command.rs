//! Named command hooks for `CustomCommand` effects

use super::EffectOutcome;
use crate::log::CombatLog;
use crate::skill::SkillContext;
use crate::types::ComponentRef;
use crate::vehicle::Stage;
use std::collections::HashMap;
use std::fmt;

/// Game-specific behavior triggered by name from skill content
pub trait CommandHandler {
    fn execute(
        &self,
        ctx: &SkillContext<'_>,
        target: ComponentRef,
        value: i32,
        stage: &mut Stage,
        log: &mut dyn CombatLog,
    ) -> EffectOutcome;
}

/// Handlers keyed by command name
#[derive(Default)]
pub struct CommandRegistry {
    handlers: HashMap<String, Box<dyn CommandHandler>>,
}

impl fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.handlers.keys().collect();
        names.sort();
        f.debug_struct("CommandRegistry").field("commands", &names).finish()
    }
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in component commands
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("disable_component", DisableComponent);
        registry.register("reactivate_component", ReactivateComponent);
        registry
    }

    /// Register a handler, replacing any previous one under that name
    pub fn register(&mut self, name: &str, handler: impl CommandHandler + 'static) {
        self.handlers.insert(name.to_string(), Box::new(handler));
    }

    pub fn get(&self, name: &str) -> Option<&dyn CommandHandler> {
        self.handlers.get(name).map(|h| h.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }
}

/// Knocks a component offline without destroying it
#[derive(Debug, Clone, Copy)]
pub struct DisableComponent;

impl CommandHandler for DisableComponent {
    fn execute(
        &self,
        _ctx: &SkillContext<'_>,
        target: ComponentRef,
        _value: i32,
        stage: &mut Stage,
        _log: &mut dyn CombatLog,
    ) -> EffectOutcome {
        match stage.component_mut(target) {
            Some(component) if !component.is_destroyed() => {
                component.is_disabled = true;
                EffectOutcome::Command
            }
            _ => EffectOutcome::skipped("component unavailable"),
        }
    }
}

/// Brings a disabled component back online
#[derive(Debug, Clone, Copy)]
pub struct ReactivateComponent;

impl CommandHandler for ReactivateComponent {
    fn execute(
        &self,
        _ctx: &SkillContext<'_>,
        target: ComponentRef,
        _value: i32,
        stage: &mut Stage,
        _log: &mut dyn CombatLog,
    ) -> EffectOutcome {
        match stage.component_mut(target) {
            Some(component) if !component.is_destroyed() => {
                component.is_disabled = false;
                EffectOutcome::Command
            }
            _ => EffectOutcome::skipped("component unavailable"),
        }
    }
}
