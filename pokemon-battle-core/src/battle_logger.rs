use crate::sim::battle::Side;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    Damage,
    Status,
    Switch,
    Faint,
    Info,
    Critical,
    Miss,
    Heal,
    Mega,
    Tera,
    Dynamax,
    Weather,
    Terrain,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub turn: u32,
    pub kind: LogKind,
    /// Side the entry is about, if any.
    pub side: Option<Side>,
    pub message: String,
}

/// Append-only typed battle log.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BattleLogger {
    entries: Vec<LogEntry>,
}

impl BattleLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(
        &mut self,
        turn: u32,
        kind: LogKind,
        side: Option<Side>,
        message: impl Into<String>,
    ) {
        self.entries.push(LogEntry {
            turn,
            kind,
            side,
            message: message.into(),
        });
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries appended at or after `start`.
    pub fn since(&self, start: usize) -> &[LogEntry] {
        &self.entries[start.min(self.entries.len())..]
    }

    pub fn count(&self, kind: LogKind) -> usize {
        self.entries.iter().filter(|entry| entry.kind == kind).count()
    }

    /// Plain-text rendering, one line per entry.
    pub fn lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| format!("[T{}] {}", entry.turn, entry.message))
            .collect()
    }

    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "entries": self.entries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_serialize_lowercase() {
        let mut log = BattleLogger::new();
        log.push(1, LogKind::Critical, Some(Side::Player1), "A critical hit!");
        let value = log.to_json();
        assert_eq!(value["entries"][0]["kind"], "critical");
        assert_eq!(value["entries"][0]["side"], "player1");
        assert_eq!(log.lines(), vec!["[T1] A critical hit!".to_string()]);
    }

    #[test]
    fn since_clamps_start() {
        let mut log = BattleLogger::new();
        log.push(1, LogKind::Info, None, "one");
        log.push(1, LogKind::Info, None, "two");
        assert_eq!(log.since(1).len(), 1);
        assert!(log.since(10).is_empty());
        assert_eq!(log.count(LogKind::Info), 2);
    }
}
