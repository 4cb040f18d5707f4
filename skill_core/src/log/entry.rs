//! LogEntry - Human-readable, queryable history record

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Broad classification of a history entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogEventType {
    Combat,
    Damage,
    StatusEffect,
    Modifier,
    Resource,
    Movement,
    Destruction,
    Validation,
    System,
}

/// How prominently an entry should be surfaced
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Importance {
    Debug,
    Low,
    Medium,
    High,
    Critical,
}

/// One history entry, built fluently
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub event_type: LogEventType,
    pub importance: Importance,
    pub message: String,
    pub location: Option<String>,
    pub participants: Vec<String>,
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl LogEntry {
    pub fn new(event_type: LogEventType, importance: Importance, message: impl Into<String>) -> Self {
        LogEntry {
            event_type,
            importance,
            message: message.into(),
            location: None,
            participants: Vec::new(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_participant(mut self, participant: impl Into<String>) -> Self {
        self.participants.push(participant.into());
        self
    }

    pub fn with_metadata(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }

    pub fn metadata(&self, key: &str) -> Option<&serde_json::Value> {
        self.metadata.get(key)
    }
}
