//! Combat log sink - the event/history collaborator of the pipeline
//!
//! The pipeline never reaches for a global logger. A `&mut dyn CombatLog` is
//! handed down from the executor to every resolver, applicator and effect.
//!
//! All effects of one skill use are emitted between `begin_action` and
//! `end_action` so a sink can present them as a single event
//! ("deals 12 damage and restores 5 energy").

mod entry;
mod event;

pub use entry::{Importance, LogEntry, LogEventType};
pub use event::{AttackStage, CombatEvent, StatusChange};

use serde::{Deserialize, Serialize};

/// Event and history sink
pub trait CombatLog {
    /// Open the action scope for one skill use
    fn begin_action(&mut self, source: &str, skill: &str, target: &str);

    /// Close the action scope opened by the matching `begin_action`
    fn end_action(&mut self);

    /// Report a sub-result
    fn emit(&mut self, event: CombatEvent);

    /// Record a history entry
    fn log(&mut self, entry: LogEntry);
}

/// Discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLog;

impl CombatLog for NullLog {
    fn begin_action(&mut self, _source: &str, _skill: &str, _target: &str) {}
    fn end_action(&mut self) {}
    fn emit(&mut self, _event: CombatEvent) {}
    fn log(&mut self, _entry: LogEntry) {}
}

/// Forwards everything to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLog;

impl CombatLog for TracingLog {
    fn begin_action(&mut self, source: &str, skill: &str, target: &str) {
        tracing::info!(source, skill, target, "action begins");
    }

    fn end_action(&mut self) {
        tracing::info!("action ends");
    }

    fn emit(&mut self, event: CombatEvent) {
        match event.phrase() {
            Some(phrase) => tracing::info!(?event, "{}", phrase),
            None => tracing::debug!(?event, "combat event"),
        }
    }

    fn log(&mut self, entry: LogEntry) {
        match entry.importance {
            Importance::Debug => tracing::debug!(kind = ?entry.event_type, "{}", entry.message),
            Importance::Low | Importance::Medium => {
                tracing::info!(kind = ?entry.event_type, "{}", entry.message)
            }
            Importance::High | Importance::Critical => {
                tracing::warn!(kind = ?entry.event_type, "{}", entry.message)
            }
        }
    }
}

/// All events aggregated from one skill use
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub source: String,
    pub skill: String,
    pub target: String,
    pub events: Vec<CombatEvent>,
}

impl ActionRecord {
    /// "Raider uses Ram on Hauler: deals 12 damage and restores 5 energy"
    pub fn summary(&self) -> String {
        let phrases: Vec<String> = self.events.iter().filter_map(|e| e.phrase()).collect();
        let body = match phrases.len() {
            0 => {
                if self.succeeded() == Some(false) {
                    "fails".to_string()
                } else {
                    "has no effect".to_string()
                }
            }
            1 => phrases[0].clone(),
            n => format!("{} and {}", phrases[..n - 1].join(", "), phrases[n - 1]),
        };
        format!("{} uses {} on {}: {}", self.source, self.skill, self.target, body)
    }

    /// Resolver verdict, if one was emitted
    pub fn succeeded(&self) -> Option<bool> {
        self.events.iter().find_map(|e| match e {
            CombatEvent::Outcome { success, .. } => Some(*success),
            _ => None,
        })
    }

    /// Total damage actually dealt
    pub fn total_damage(&self) -> i32 {
        self.events
            .iter()
            .map(|e| match e {
                CombatEvent::Damage { actual, .. } => *actual,
                _ => 0,
            })
            .sum()
    }

    /// Count events matching a predicate
    pub fn count(&self, pred: impl Fn(&CombatEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(*e)).count()
    }
}

/// In-memory sink that aggregates events per action scope
///
/// Nested scopes are flattened: a `begin_action` while a scope is open only
/// deepens the nesting count, and events keep landing in the outer record.
#[derive(Debug, Default, Clone)]
pub struct MemoryLog {
    actions: Vec<ActionRecord>,
    open: Option<ActionRecord>,
    depth: usize,
    /// Events emitted outside any action scope (turn-end expiry, etc.)
    loose_events: Vec<CombatEvent>,
    entries: Vec<LogEntry>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Completed action records, oldest first
    pub fn actions(&self) -> &[ActionRecord] {
        &self.actions
    }

    pub fn last_action(&self) -> Option<&ActionRecord> {
        self.actions.last()
    }

    pub fn loose_events(&self) -> &[CombatEvent] {
        &self.loose_events
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Whether an action scope is currently open
    pub fn in_action(&self) -> bool {
        self.depth > 0
    }

    /// History entries at or above a given importance
    pub fn entries_at_least(&self, importance: Importance) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().filter(move |e| e.importance >= importance)
    }

    /// Every event, scoped or not, in emission order per bucket
    pub fn all_events(&self) -> impl Iterator<Item = &CombatEvent> {
        self.actions
            .iter()
            .flat_map(|a| a.events.iter())
            .chain(self.open.iter().flat_map(|a| a.events.iter()))
            .chain(self.loose_events.iter())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl CombatLog for MemoryLog {
    fn begin_action(&mut self, source: &str, skill: &str, target: &str) {
        self.depth += 1;
        if self.depth > 1 {
            tracing::debug!(depth = self.depth, skill, "nested action flattened into open scope");
            return;
        }
        self.open = Some(ActionRecord {
            source: source.to_string(),
            skill: skill.to_string(),
            target: target.to_string(),
            events: Vec::new(),
        });
    }

    fn end_action(&mut self) {
        match self.depth {
            0 => tracing::warn!("end_action without an open action scope"),
            1 => {
                self.depth = 0;
                if let Some(record) = self.open.take() {
                    self.actions.push(record);
                }
            }
            _ => self.depth -= 1,
        }
    }

    fn emit(&mut self, event: CombatEvent) {
        match self.open.as_mut() {
            Some(record) => record.events.push(event),
            None => self.loose_events.push(event),
        }
    }

    fn log(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DamageSource, DamageType, ResistanceLevel, ResourceKind};

    fn damage(actual: i32) -> CombatEvent {
        CombatEvent::Damage {
            target: "Chassis".to_string(),
            source: DamageSource::Skill,
            damage_type: DamageType::Kinetic,
            raw: actual,
            resistance: ResistanceLevel::Normal,
            requested: actual,
            actual,
            critical: false,
            destroyed: false,
        }
    }

    fn energy(actual: i32) -> CombatEvent {
        CombatEvent::Restoration {
            target: "Chassis".to_string(),
            resource: ResourceKind::Energy,
            requested: actual,
            actual,
            current: actual,
        }
    }

    #[test]
    fn test_scope_aggregates_events() {
        let mut log = MemoryLog::new();
        log.begin_action("Raider", "Siphon Shot", "Hauler");
        log.emit(damage(12));
        log.emit(energy(5));
        log.end_action();

        assert_eq!(log.actions().len(), 1);
        let record = &log.actions()[0];
        assert_eq!(
            record.summary(),
            "Raider uses Siphon Shot on Hauler: deals 12 damage and restores 5 energy"
        );
        assert_eq!(record.total_damage(), 12);
    }

    #[test]
    fn test_nested_scope_is_flattened() {
        let mut log = MemoryLog::new();
        log.begin_action("A", "Outer", "B");
        log.emit(damage(3));
        log.begin_action("A", "Inner", "B");
        log.emit(damage(4));
        log.end_action();
        assert!(log.in_action());
        log.end_action();

        assert_eq!(log.actions().len(), 1);
        assert_eq!(log.actions()[0].skill, "Outer");
        assert_eq!(log.actions()[0].total_damage(), 7);
        assert!(!log.in_action());
    }

    #[test]
    fn test_events_outside_scope_are_loose() {
        let mut log = MemoryLog::new();
        log.emit(CombatEvent::StatusExpired {
            target: "Drive".to_string(),
            status: "Slow".to_string(),
        });
        log.end_action();
        assert!(log.actions().is_empty());
        assert_eq!(log.loose_events().len(), 1);
    }

    #[test]
    fn test_failed_summary() {
        let mut log = MemoryLog::new();
        log.begin_action("A", "Shot", "B");
        log.emit(CombatEvent::Outcome {
            skill: "Shot".to_string(),
            resolver: "attack".to_string(),
            success: false,
        });
        log.end_action();
        assert_eq!(log.actions()[0].summary(), "A uses Shot on B: fails");
        assert_eq!(log.actions()[0].succeeded(), Some(false));
    }

    #[test]
    fn test_three_phrase_summary() {
        let record = ActionRecord {
            source: "A".to_string(),
            skill: "S".to_string(),
            target: "B".to_string(),
            events: vec![damage(1), damage(2), energy(3)],
        };
        assert_eq!(
            record.summary(),
            "A uses S on B: deals 1 damage, deals 2 damage and restores 3 energy"
        );
    }

    #[test]
    fn test_entries_filter() {
        let mut log = MemoryLog::new();
        log.log(LogEntry::new(LogEventType::System, Importance::Debug, "noise"));
        log.log(LogEntry::new(LogEventType::Destruction, Importance::High, "boom"));
        let high: Vec<_> = log.entries_at_least(Importance::Medium).collect();
        assert_eq!(high.len(), 1);
        assert_eq!(high[0].message, "boom");
    }
}
