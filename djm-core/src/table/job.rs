//! Job table columns

use std::cmp::Ordering;

use super::TableRow;
use crate::domain::job::{Job, JobStatus};

/// Sortable job columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobSortKey {
    Name,
    Status,
    ExecutionTime,
    CreatedAt,
    LastUpdated,
}

impl JobSortKey {
    pub const ALL: [JobSortKey; 5] = [
        JobSortKey::Name,
        JobSortKey::Status,
        JobSortKey::ExecutionTime,
        JobSortKey::CreatedAt,
        JobSortKey::LastUpdated,
    ];

    /// Column header
    pub fn label(&self) -> &'static str {
        match self {
            JobSortKey::Name => "Name",
            JobSortKey::Status => "Status",
            JobSortKey::ExecutionTime => "Execution Time",
            JobSortKey::CreatedAt => "Created At",
            JobSortKey::LastUpdated => "Last Updated",
        }
    }

    /// Identifier accepted on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            JobSortKey::Name => "name",
            JobSortKey::Status => "status",
            JobSortKey::ExecutionTime => "execution-time",
            JobSortKey::CreatedAt => "created-at",
            JobSortKey::LastUpdated => "last-updated",
        }
    }
}

impl std::str::FromStr for JobSortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "name" => Ok(JobSortKey::Name),
            "status" => Ok(JobSortKey::Status),
            "execution-time" | "executiontime" => Ok(JobSortKey::ExecutionTime),
            "created-at" | "createdat" | "created" => Ok(JobSortKey::CreatedAt),
            "last-updated" | "lastupdated" | "updated-at" | "updated" => {
                Ok(JobSortKey::LastUpdated)
            }
            _ => Err(format!(
                "unknown sort column '{}' (expected one of: {})",
                s,
                JobSortKey::ALL.map(|k| k.as_str()).join(", ")
            )),
        }
    }
}

impl TableRow for Job {
    type SortKey = JobSortKey;
    type Status = JobStatus;

    fn status(&self) -> JobStatus {
        self.status
    }

    fn compare(&self, other: &Self, key: JobSortKey) -> Ordering {
        match key {
            JobSortKey::Name => self.job_name.cmp(&other.job_name),
            JobSortKey::Status => self.status.as_str().cmp(other.status.as_str()),
            JobSortKey::ExecutionTime => self.execution_time.cmp(&other.execution_time),
            JobSortKey::CreatedAt => self.created_at.cmp(&other.created_at),
            JobSortKey::LastUpdated => self.updated_at.cmp(&other.updated_at),
        }
    }
}
