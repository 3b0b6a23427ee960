//! Job create/edit form

use chrono::{DateTime, Utc};

use super::{
    DESCRIPTION_MAX_LEN, FormErrors, MAX_RETRIES_LIMIT, check_future, check_name,
};
use crate::domain::job::{Job, JobFrequency};
use crate::dto::job::{JobCreateRequest, JobUpdateRequest};
use crate::payload;

pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Raw values of the job form
#[derive(Debug, Clone, PartialEq)]
pub struct JobForm {
    pub job_name: String,
    pub job_description: String,
    pub frequency: JobFrequency,
    pub payload: String,
    pub max_retries: u32,
    pub execution_time: DateTime<Utc>,
}

impl JobForm {
    /// Blank form for a new job, scheduled at `now`
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            job_name: String::new(),
            job_description: String::new(),
            frequency: JobFrequency::OneTime,
            payload: String::new(),
            max_retries: DEFAULT_MAX_RETRIES,
            execution_time: now,
        }
    }

    /// Form prefilled from an existing job
    pub fn from_job(job: &Job) -> Self {
        Self {
            job_name: job.job_name.clone(),
            job_description: job.job_description.clone(),
            frequency: job.frequency,
            payload: job.payload.clone(),
            max_retries: job.max_retries,
            execution_time: job.execution_time,
        }
    }

    /// Validate for submission as a new job
    pub fn to_create(&self, now: DateTime<Utc>) -> Result<JobCreateRequest, FormErrors> {
        let mut errors = FormErrors::new();

        let job_name = check_name("Name", &self.job_name)
            .map_err(|msg| errors.push("job_name", msg))
            .unwrap_or_default();
        let job_description = self
            .check_description()
            .map_err(|msg| errors.push("job_description", msg))
            .unwrap_or_default();
        if let Err(msg) = self.check_max_retries() {
            errors.push("max_retries", msg);
        }
        if let Err(msg) = check_future("Execution time", self.execution_time, now) {
            errors.push("execution_time", msg);
        }
        let payload = payload::normalize(&self.payload)
            .map_err(|err| errors.push("payload", err.to_string()))
            .unwrap_or_default();

        errors.into_result(JobCreateRequest {
            job_name,
            job_description,
            frequency: self.frequency,
            payload,
            max_retries: self.max_retries,
            execution_time: self.execution_time,
        })
    }

    /// Validate as an edit of `original`, keeping only the changed fields
    ///
    /// Only pending jobs can be edited. Fields are validated only when they
    /// change, so values the server already holds never block an edit.
    pub fn to_update(
        &self,
        original: &Job,
        now: DateTime<Utc>,
    ) -> Result<JobUpdateRequest, FormErrors> {
        if !original.can_edit() {
            return Err(FormErrors::single(
                "status",
                format!(
                    "Only pending jobs can be edited (job is {})",
                    original.status
                ),
            ));
        }

        let mut errors = FormErrors::new();
        let mut update = JobUpdateRequest::default();

        if self.job_name.trim() != original.job_name {
            match check_name("Name", &self.job_name) {
                Ok(name) => update.job_name = Some(name),
                Err(msg) => errors.push("job_name", msg),
            }
        }
        if self.job_description.trim() != original.job_description {
            match self.check_description() {
                Ok(desc) => update.job_description = Some(desc),
                Err(msg) => errors.push("job_description", msg),
            }
        }
        if self.frequency != original.frequency {
            update.frequency = Some(self.frequency);
        }
        if self.max_retries != original.max_retries {
            match self.check_max_retries() {
                Ok(()) => update.max_retries = Some(self.max_retries),
                Err(msg) => errors.push("max_retries", msg),
            }
        }
        if self.execution_time != original.execution_time {
            match check_future("Execution time", self.execution_time, now) {
                Ok(time) => update.execution_time = Some(time),
                Err(msg) => errors.push("execution_time", msg),
            }
        }
        if self.payload.trim_matches('\n') != original.payload.trim_matches('\n') {
            match payload::normalize(&self.payload) {
                Ok(p) if p != original.payload.trim_matches('\n') => update.payload = Some(p),
                Ok(_) => {}
                Err(err) => errors.push("payload", err.to_string()),
            }
        }

        if errors.is_empty() && update.is_empty() {
            errors.push("form", "Nothing to update");
        }

        errors.into_result(update)
    }

    fn check_description(&self) -> Result<String, String> {
        let trimmed = self.job_description.trim();
        if trimmed.chars().count() > DESCRIPTION_MAX_LEN {
            return Err(format!(
                "Description must be at most {} characters",
                DESCRIPTION_MAX_LEN
            ));
        }
        Ok(trimmed.to_string())
    }

    fn check_max_retries(&self) -> Result<(), String> {
        if self.max_retries > MAX_RETRIES_LIMIT {
            return Err(format!(
                "Max retries must be between 0 and {}",
                MAX_RETRIES_LIMIT
            ));
        }
        Ok(())
    }
}
