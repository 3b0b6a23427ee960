//! Job request bodies

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::job::{JobFrequency, JobStatus};

/// Body of `POST /jobs`
///
/// Identity, owner, status and retry count are assigned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobCreateRequest {
    pub job_name: String,
    pub job_description: String,
    pub frequency: JobFrequency,
    pub payload: String,
    pub max_retries: u32,
    pub execution_time: DateTime<Utc>,
}

/// Body of `PATCH /jobs/{id}`
///
/// Only the fields that are set are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<JobFrequency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_retries: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time: Option<DateTime<Utc>>,
}

impl JobUpdateRequest {
    /// An update that only moves the job to `cancelled`
    pub fn cancel() -> Self {
        Self {
            status: Some(JobStatus::Cancelled),
            ..Default::default()
        }
    }

    /// True when no field would be changed
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
