//! Session task log

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Kind of a recorded item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// A command that was issued
    Command,
    /// A human-readable outcome
    Outcome,
}

/// A single recorded item
#[derive(Debug, Clone, Serialize)]
pub struct TaskRecord {
    /// Record kind
    pub kind: RecordKind,
    /// Command text or outcome message
    pub text: String,
    /// When it was recorded
    pub recorded_at: DateTime<Utc>,
}

/// A command paired with its outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskLogEntry {
    /// Command text; empty for an outcome recorded without a command
    pub command_text: String,
    /// Outcome message, absent while the command is still pending
    pub outcome_message: Option<String>,
}

/// Append-only record of commands and outcomes
#[derive(Debug, Clone, Default)]
pub struct TaskLog {
    records: Vec<TaskRecord>,
}

impl TaskLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an issued command
    pub fn record_command(&mut self, text: impl Into<String>) {
        self.push(RecordKind::Command, text.into());
    }

    /// Record an outcome message
    pub fn record_outcome(&mut self, message: impl Into<String>) {
        self.push(RecordKind::Outcome, message.into());
    }

    fn push(&mut self, kind: RecordKind, text: String) {
        self.records.push(TaskRecord {
            kind,
            text,
            recorded_at: Utc::now(),
        });
    }

    /// Every recorded item, in recording order
    pub fn records(&self) -> &[TaskRecord] {
        &self.records
    }

    /// Commands paired with the outcome that followed each one
    pub fn entries(&self) -> Vec<TaskLogEntry> {
        let mut entries: Vec<TaskLogEntry> = Vec::new();

        for record in &self.records {
            match record.kind {
                RecordKind::Command => entries.push(TaskLogEntry {
                    command_text: record.text.clone(),
                    outcome_message: None,
                }),
                RecordKind::Outcome => match entries.last_mut() {
                    Some(entry) if entry.outcome_message.is_none() => {
                        entry.outcome_message = Some(record.text.clone());
                    }
                    _ => entries.push(TaskLogEntry {
                        command_text: String::new(),
                        outcome_message: Some(record.text.clone()),
                    }),
                },
            }
        }

        entries
    }

    /// Issued command texts, in order
    pub fn commands(&self) -> Vec<&str> {
        self.texts(RecordKind::Command)
    }

    /// Outcome messages, in order
    pub fn outcomes(&self) -> Vec<&str> {
        self.texts(RecordKind::Outcome)
    }

    fn texts(&self, kind: RecordKind) -> Vec<&str> {
        self.records
            .iter()
            .filter(|r| r.kind == kind)
            .map(|r| r.text.as_str())
            .collect()
    }

    /// Number of recorded items
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
