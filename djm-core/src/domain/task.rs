//! Task domain types
//!
//! Tasks are the scheduler's earlier record type. They travel with camelCase
//! field names, integer enums and unix-second timestamps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A task record as returned by the legacy `/tasks` endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub recurrence: TaskRecurrence,
    /// Unix seconds, 0 when unset
    #[serde(default)]
    pub scheduled_time: i64,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
}

impl Task {
    pub fn scheduled_at(&self) -> Option<DateTime<Utc>> {
        unix_to_datetime(self.scheduled_time)
    }

    pub fn created(&self) -> Option<DateTime<Utc>> {
        unix_to_datetime(self.created_at)
    }

    pub fn updated(&self) -> Option<DateTime<Utc>> {
        unix_to_datetime(self.updated_at)
    }

    /// Only tasks that have not started can be edited
    pub fn can_edit(&self) -> bool {
        self.status == TaskStatus::Pending
    }
}

/// Convert a unix-second timestamp, treating 0 as "not set"
pub fn unix_to_datetime(secs: i64) -> Option<DateTime<Utc>> {
    if secs == 0 {
        return None;
    }
    DateTime::from_timestamp(secs, 0)
}

/// Task status, encoded as an integer on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TaskStatus {
    Pending = 0,
    InProgress = 1,
    Completed = 2,
    Failed = 3,
    Cancelled = 4,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 5] = [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Completed,
        TaskStatus::Failed,
        TaskStatus::Cancelled,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
            TaskStatus::Failed => "Failed",
            TaskStatus::Cancelled => "Cancelled",
        }
    }

    /// Progress step shown on the detail page (1-based)
    pub fn progress_step(&self) -> usize {
        match self {
            TaskStatus::Pending => 1,
            TaskStatus::InProgress => 2,
            TaskStatus::Completed | TaskStatus::Failed | TaskStatus::Cancelled => 3,
        }
    }
}

impl TryFrom<u8> for TaskStatus {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        TaskStatus::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| format!("invalid task status {}", value))
    }
}

impl From<TaskStatus> for u8 {
    fn from(status: TaskStatus) -> Self {
        status as u8
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(n) = s.trim().parse::<u8>() {
            return TaskStatus::try_from(n);
        }
        let wanted = s.trim().to_lowercase().replace(['-', '_'], " ");
        TaskStatus::ALL
            .into_iter()
            .find(|status| status.label().to_lowercase() == wanted)
            .ok_or_else(|| format!("unknown task status '{}'", s))
    }
}

/// How often a task recurs, encoded as an integer on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TaskRecurrence {
    #[default]
    Once = 0,
    Daily = 1,
    Weekly = 2,
    Monthly = 3,
}

impl TaskRecurrence {
    pub const ALL: [TaskRecurrence; 4] = [
        TaskRecurrence::Once,
        TaskRecurrence::Daily,
        TaskRecurrence::Weekly,
        TaskRecurrence::Monthly,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TaskRecurrence::Once => "Once",
            TaskRecurrence::Daily => "Daily",
            TaskRecurrence::Weekly => "Weekly",
            TaskRecurrence::Monthly => "Monthly",
        }
    }
}

impl TryFrom<u8> for TaskRecurrence {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        TaskRecurrence::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| format!("invalid task recurrence {}", value))
    }
}

impl From<TaskRecurrence> for u8 {
    fn from(recurrence: TaskRecurrence) -> Self {
        recurrence as u8
    }
}

impl std::fmt::Display for TaskRecurrence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for TaskRecurrence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(n) = s.trim().parse::<u8>() {
            return TaskRecurrence::try_from(n);
        }
        TaskRecurrence::ALL
            .into_iter()
            .find(|r| r.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown recurrence '{}'", s))
    }
}
