use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::UnknownStateId;

/// Category used when a log entry arrives without one.
pub const DEFAULT_LOG_KIND: &str = "info";

// ─── State ────────────────────────────────────────────────────────

/// Activity label driving the visual indicator.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateId {
    #[default]
    Sleeping,
    Thinking,
    Coding,
    Searching,
    Pushing,
}

impl StateId {
    pub const ALL: [Self; 5] = [
        Self::Sleeping,
        Self::Thinking,
        Self::Coding,
        Self::Searching,
        Self::Pushing,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sleeping => "sleeping",
            Self::Thinking => "thinking",
            Self::Coding => "coding",
            Self::Searching => "searching",
            Self::Pushing => "pushing",
        }
    }

    /// Human-readable label shown next to the indicator.
    pub fn label(self) -> &'static str {
        match self {
            Self::Sleeping => "Sleeping",
            Self::Thinking => "Thinking",
            Self::Coding => "Writing Code",
            Self::Searching => "Researching",
            Self::Pushing => "Publishing",
        }
    }

    /// Colour token as `#rrggbb`.
    pub fn color(self) -> &'static str {
        match self {
            Self::Sleeping => "#6b7280",
            Self::Thinking => "#f59e0b",
            Self::Coding => "#6c5ce7",
            Self::Searching => "#3b82f6",
            Self::Pushing => "#34d399",
        }
    }

    /// Lenient lookup: anything that is not an exact wire name is `Sleeping`.
    pub fn resolve(candidate: &str) -> Self {
        candidate.parse().unwrap_or(Self::Sleeping)
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StateId {
    type Err = UnknownStateId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UnknownStateId(s.to_string()))
    }
}

// ─── Connection ───────────────────────────────────────────────────

/// Derived from the most recently applied status poll.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    /// No poll outcome applied yet.
    #[default]
    Connecting,
    Live,
    Offline,
}

impl ConnectionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Connecting => "connecting",
            Self::Live => "live",
            Self::Offline => "offline",
        }
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Wire schema ──────────────────────────────────────────────────

/// Body of `GET /api/status`. Every field is optional on the wire.
///
/// `logs` is the canonical name for new log lines; the older `newLogs`
/// spelling is not read.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatusSnapshot {
    pub state: Option<String>,
    pub logs: Option<Vec<LogEntryInput>>,
    pub activity: Option<String>,
    pub last_action: Option<String>,
    pub projects_shipped: Option<u64>,
}

/// A log line as supplied by the API, not yet timestamped.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogEntryInput {
    pub message: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl LogEntryInput {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            kind: None,
        }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }
}

/// One feed entry, stamped with the local wall-clock time at ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Ingestion order within one feed. Two entries with equal text and
    /// time are still told apart by this.
    #[serde(skip)]
    pub seq: u64,
    pub time: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl LogEntry {
    pub fn stamp(seq: u64, input: LogEntryInput, now: DateTime<Local>) -> Self {
        Self {
            seq,
            time: now.format("%H:%M:%S").to_string(),
            message: input.message.unwrap_or_default(),
            kind: input
                .kind
                .filter(|k| !k.is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_KIND.to_string()),
        }
    }
}

/// Element of `GET /api/projects`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectInfo {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub stack: Option<String>,
    pub date: Option<String>,
    pub repo: Option<String>,
}

/// Body of `GET /api/stats`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsInfo {
    pub projects: Option<u64>,
    pub commits: Option<u64>,
    pub loc: Option<u64>,
}

/// Free-text activity fields carried alongside the state in a status poll.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityLine {
    pub activity: Option<String>,
    pub last_action: Option<String>,
    pub projects_shipped: Option<u64>,
}

impl From<&StatusSnapshot> for ActivityLine {
    fn from(snapshot: &StatusSnapshot) -> Self {
        Self {
            activity: snapshot.activity.clone(),
            last_action: snapshot.last_action.clone(),
            projects_shipped: snapshot.projects_shipped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2026, 3, 1, h, m, s)
            .single()
            .expect("unambiguous local time")
    }

    #[test]
    fn state_id_round_trips_wire_names() {
        for id in StateId::ALL {
            assert_eq!(id.as_str().parse::<StateId>(), Ok(id));
        }
    }

    #[test]
    fn resolve_unknown_falls_back_to_sleeping() {
        assert_eq!(StateId::resolve("bogus"), StateId::Sleeping);
        assert_eq!(StateId::resolve(""), StateId::Sleeping);
        // Lookup is exact: label casing is not a wire name.
        assert_eq!(StateId::resolve("Coding"), StateId::Sleeping);
        assert_eq!(StateId::resolve("coding"), StateId::Coding);
    }

    #[test]
    fn labels_and_colors() {
        assert_eq!(StateId::Coding.label(), "Writing Code");
        assert_eq!(StateId::Searching.label(), "Researching");
        assert_eq!(StateId::Pushing.color(), "#34d399");
    }

    #[test]
    fn status_snapshot_parses_full_body() {
        let body = r#"{
            "state": "coding",
            "activity": "Writing code",
            "lastAction": "edit main.rs",
            "projectsShipped": 3,
            "logs": [{"message": "wrote main.rs", "type": "success"}, {"message": "plain"}]
        }"#;
        let snap: StatusSnapshot = serde_json::from_str(body).expect("valid status");
        assert_eq!(snap.state.as_deref(), Some("coding"));
        assert_eq!(snap.last_action.as_deref(), Some("edit main.rs"));
        assert_eq!(snap.projects_shipped, Some(3));
        let logs = snap.logs.expect("logs present");
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].kind.as_deref(), Some("success"));
        assert_eq!(logs[1].kind, None);
    }

    #[test]
    fn status_snapshot_empty_object() {
        let snap: StatusSnapshot = serde_json::from_str("{}").expect("empty status");
        assert_eq!(snap, StatusSnapshot::default());
    }

    #[test]
    fn status_snapshot_ignores_new_logs_spelling() {
        let snap: StatusSnapshot =
            serde_json::from_str(r#"{"newLogs": [{"message": "x"}]}"#).expect("valid status");
        assert!(snap.logs.is_none());
    }

    #[test]
    fn stamp_defaults_missing_fields() {
        let entry = LogEntry::stamp(0, LogEntryInput::default(), at(9, 5, 7));
        assert_eq!(entry.time, "09:05:07");
        assert_eq!(entry.message, "");
        assert_eq!(entry.kind, "info");
    }

    #[test]
    fn stamp_keeps_kind() {
        let entry = LogEntry::stamp(0, LogEntryInput::new("boom").with_kind("error"), at(23, 0, 0));
        assert_eq!(entry.message, "boom");
        assert_eq!(entry.kind, "error");
    }

    #[test]
    fn log_entry_serializes_kind_as_type() {
        let entry = LogEntry::stamp(7, LogEntryInput::new("hi"), at(12, 0, 0));
        let json = serde_json::to_value(&entry).expect("serialize");
        assert!(json.get("seq").is_none());
        assert_eq!(json["type"], "info");
        assert_eq!(json["time"], "12:00:00");
    }

    #[test]
    fn project_info_tolerates_missing_fields() {
        let p: ProjectInfo = serde_json::from_str(r#"{"name": "dash"}"#).expect("valid project");
        assert_eq!(p.name.as_deref(), Some("dash"));
        assert!(p.repo.is_none());
    }
}
