//! Job domain types

use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};

/// A scheduled job as tracked by the scheduling service
///
/// Mirrors the backend record; the dashboard never mutates it locally,
/// the last fetched copy wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub job_id: String,
    pub user_id: String,
    pub job_name: String,
    #[serde(default)]
    pub job_description: String,
    #[serde(default)]
    pub job_metadata: String,
    pub frequency: JobFrequency,
    pub status: JobStatus,
    pub payload: String,
    pub retry_count: u32,
    pub max_retries: u32,
    pub execution_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    /// Whether the job may still be cancelled
    pub fn can_cancel(&self) -> bool {
        !self.status.is_terminal()
    }

    /// Whether the job may be edited (only before it has been picked up)
    pub fn can_edit(&self) -> bool {
        self.status == JobStatus::Pending
    }
}

/// Job lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobStatus {
    Ready,
    Pending,
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
    Failed,
}

impl JobStatus {
    /// Every status, in lifecycle order
    pub const ALL: [JobStatus; 7] = [
        JobStatus::Ready,
        JobStatus::Pending,
        JobStatus::Scheduled,
        JobStatus::InProgress,
        JobStatus::Completed,
        JobStatus::Cancelled,
        JobStatus::Failed,
    ];

    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Ready => "ready",
            JobStatus::Pending => "pending",
            JobStatus::Scheduled => "scheduled",
            JobStatus::InProgress => "in-progress",
            JobStatus::Completed => "completed",
            JobStatus::Cancelled => "cancelled",
            JobStatus::Failed => "failed",
        }
    }

    /// Completed, failed and cancelled jobs never change again
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobStatus::Completed | JobStatus::Failed | JobStatus::Cancelled
        )
    }

    /// Progress step shown on the detail page (1-based)
    pub fn progress_step(&self) -> usize {
        match self {
            JobStatus::Ready | JobStatus::Pending | JobStatus::Scheduled => 1,
            JobStatus::InProgress => 2,
            JobStatus::Completed | JobStatus::Failed | JobStatus::Cancelled => 3,
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        JobStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| format!("unknown job status '{}'", s))
    }
}

/// How often a job repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum JobFrequency {
    #[default]
    #[serde(rename = "one-time")]
    OneTime,
    #[serde(rename = "daily")]
    Daily,
    #[serde(rename = "weekly")]
    Weekly,
    #[serde(rename = "monthly")]
    Monthly,
}

impl JobFrequency {
    pub const ALL: [JobFrequency; 4] = [
        JobFrequency::OneTime,
        JobFrequency::Daily,
        JobFrequency::Weekly,
        JobFrequency::Monthly,
    ];

    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            JobFrequency::OneTime => "one-time",
            JobFrequency::Daily => "daily",
            JobFrequency::Weekly => "weekly",
            JobFrequency::Monthly => "monthly",
        }
    }

    /// Human label used in notifications ("to run daily")
    pub fn label(&self) -> &'static str {
        match self {
            JobFrequency::OneTime => "once",
            JobFrequency::Daily => "daily",
            JobFrequency::Weekly => "weekly",
            JobFrequency::Monthly => "monthly",
        }
    }

    /// The run following `time`, or `None` for one-time jobs
    ///
    /// Monthly runs land on the same day of the next month, clamped to the
    /// last day when that month is shorter.
    pub fn next_run_after(&self, time: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            JobFrequency::OneTime => None,
            JobFrequency::Daily => Some(time + Duration::days(1)),
            JobFrequency::Weekly => Some(time + Duration::weeks(1)),
            JobFrequency::Monthly => time.checked_add_months(Months::new(1)),
        }
    }
}

impl std::fmt::Display for JobFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for JobFrequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "one-time" | "onetime" | "once" => Ok(JobFrequency::OneTime),
            "daily" => Ok(JobFrequency::Daily),
            "weekly" => Ok(JobFrequency::Weekly),
            "monthly" => Ok(JobFrequency::Monthly),
            other => Err(format!("unknown frequency '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&JobStatus::InProgress).unwrap(),
            "\"in-progress\""
        );
        let status: JobStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(status, JobStatus::Cancelled);
        assert!(serde_json::from_str::<JobStatus>("\"exploded\"").is_err());
    }

    #[test]
    fn test_status_from_str_is_lenient() {
        assert_eq!("In Progress".parse::<JobStatus>(), Ok(JobStatus::InProgress));
        assert_eq!("in_progress".parse::<JobStatus>(), Ok(JobStatus::InProgress));
        assert!("bogus".parse::<JobStatus>().is_err());
    }

    #[test]
    fn test_terminal_statuses() {
        let terminal: Vec<_> = JobStatus::ALL
            .into_iter()
            .filter(JobStatus::is_terminal)
            .collect();
        assert_eq!(
            terminal,
            vec![JobStatus::Completed, JobStatus::Cancelled, JobStatus::Failed]
        );
    }

    #[test]
    fn test_progress_steps() {
        assert_eq!(JobStatus::Pending.progress_step(), 1);
        assert_eq!(JobStatus::Scheduled.progress_step(), 1);
        assert_eq!(JobStatus::InProgress.progress_step(), 2);
        assert_eq!(JobStatus::Failed.progress_step(), 3);
    }

    #[test]
    fn test_frequency_wire_format() {
        assert_eq!(
            serde_json::to_string(&JobFrequency::OneTime).unwrap(),
            "\"one-time\""
        );
        assert_eq!("once".parse::<JobFrequency>(), Ok(JobFrequency::OneTime));
    }

    #[test]
    fn test_next_run_after() {
        let t = Utc.with_ymd_and_hms(2025, 1, 31, 9, 0, 0).unwrap();
        assert_eq!(JobFrequency::OneTime.next_run_after(t), None);
        assert_eq!(
            JobFrequency::Daily.next_run_after(t),
            Some(Utc.with_ymd_and_hms(2025, 2, 1, 9, 0, 0).unwrap())
        );
        assert_eq!(
            JobFrequency::Weekly.next_run_after(t),
            Some(Utc.with_ymd_and_hms(2025, 2, 7, 9, 0, 0).unwrap())
        );
        assert_eq!(
            JobFrequency::Monthly.next_run_after(t),
            Some(Utc.with_ymd_and_hms(2025, 2, 28, 9, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_job_deserializes_backend_payload() {
        let json = r#"{
            "job_id": "01HZX3Q7M5K8R2T4V6W8Y0A2C4",
            "user_id": "auth0|123",
            "job_name": "nightly",
            "frequency": "daily",
            "status": "pending",
            "payload": "```go\nfmt.Println(1)\n```",
            "retry_count": 0,
            "max_retries": 3,
            "execution_time": "2025-06-01T00:00:00Z",
            "created_at": "2025-05-01T00:00:00Z",
            "updated_at": "2025-05-02T00:00:00Z"
        }"#;
        let job: Job = serde_json::from_str(json).unwrap();
        assert_eq!(job.job_description, "");
        assert!(job.can_edit());
        assert!(job.can_cancel());
    }
}
