//! Narrative journal of everything that happened on the trail.

use serde::{Deserialize, Serialize};

/// Mechanical category of a journal line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogKind {
    Travel,
    Event,
    Disease,
    Recovery,
    Death,
    Starvation,
    Weather,
    Landmark,
    Crossing,
    Hunt,
    Rest,
    Trade,
}

/// One narrative line, stamped with the trail day it happened on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub day: u32,
    pub kind: LogKind,
    pub text: String,
}

/// Append-only journal owned by the session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JourneyLog {
    entries: Vec<LogEntry>,
}

impl JourneyLog {
    pub fn push(&mut self, day: u32, kind: LogKind, text: impl Into<String>) {
        self.entries.push(LogEntry {
            day,
            kind,
            text: text.into(),
        });
    }

    #[must_use]
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// The newest `count` entries, oldest first.
    #[must_use]
    pub fn recent(&self, count: usize) -> &[LogEntry] {
        let start = self.entries.len().saturating_sub(count);
        &self.entries[start..]
    }

    #[must_use]
    pub fn count_of(&self, kind: LogKind) -> usize {
        self.entries.iter().filter(|e| e.kind == kind).count()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recent_returns_tail_in_order() {
        let mut log = JourneyLog::default();
        for day in 0..5 {
            log.push(day, LogKind::Travel, format!("day {day}"));
        }
        let tail: Vec<_> = log.recent(2).iter().map(|e| e.day).collect();
        assert_eq!(tail, vec![3, 4]);
        assert_eq!(log.recent(10).len(), 5);
        assert_eq!(log.count_of(LogKind::Travel), 5);
        assert_eq!(log.count_of(LogKind::Death), 0);
    }
}
