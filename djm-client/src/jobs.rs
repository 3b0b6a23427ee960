//! Job-related API endpoints

use crate::error::Result;
use crate::{JobManagerClient, require_id};
use djm_core::domain::job::Job;
use djm_core::dto::job::{JobCreateRequest, JobUpdateRequest};

impl JobManagerClient {
    // =============================================================================
    // Queries
    // =============================================================================

    /// List the caller's jobs
    pub async fn list_jobs(&self) -> Result<Vec<Job>> {
        let url = self.url("/jobs");
        tracing::debug!("GET {}", url);
        let response = self.with_token(self.client.get(&url))?.send().await?;

        self.handle_response(response).await
    }

    /// Get a job by ID
    ///
    /// Transport failures and server errors are retried a fixed number of
    /// times before giving up; 4xx responses fail immediately.
    pub async fn get_job(&self, job_id: &str) -> Result<Job> {
        require_id("job", job_id)?;

        let policy = self.detail_retry;
        let mut attempt = 0;
        loop {
            match self.get_job_once(job_id).await {
                Err(err) if err.is_retryable() && attempt < policy.retries => {
                    attempt += 1;
                    tracing::warn!(
                        job_id,
                        attempt,
                        retries = policy.retries,
                        "Fetching job failed, retrying: {}",
                        err
                    );
                    tokio::time::sleep(policy.backoff * attempt).await;
                }
                result => return result,
            }
        }
    }

    async fn get_job_once(&self, job_id: &str) -> Result<Job> {
        let url = self.url(&format!("/jobs/{}", job_id));
        tracing::debug!("GET {}", url);
        let response = self.with_token(self.client.get(&url))?.send().await?;

        self.handle_response(response).await
    }

    // =============================================================================
    // Mutations
    // =============================================================================

    /// Create a new job
    ///
    /// # Example
    /// ```no_run
    /// # use djm_client::JobManagerClient;
    /// # use djm_core::domain::job::JobFrequency;
    /// # use djm_core::dto::job::JobCreateRequest;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = JobManagerClient::builder("http://localhost:8080/api/v1")
    ///     .bearer_token("token")
    ///     .build()?;
    /// let job = client.create_job(&JobCreateRequest {
    ///     job_name: "nightly report".to_string(),
    ///     job_description: String::new(),
    ///     frequency: JobFrequency::Daily,
    ///     payload: "```go\nfmt.Println(\"hi\")\n```".to_string(),
    ///     max_retries: 3,
    ///     execution_time: chrono::Utc::now() + chrono::Duration::hours(1),
    /// }).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_job(&self, req: &JobCreateRequest) -> Result<Job> {
        let url = self.url("/jobs");
        tracing::debug!("POST {}", url);
        let response = self
            .with_token(self.client.post(&url).json(req))?
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Apply a partial update to a job
    pub async fn update_job(&self, job_id: &str, req: &JobUpdateRequest) -> Result<Job> {
        require_id("job", job_id)?;

        let url = self.url(&format!("/jobs/{}", job_id));
        tracing::debug!("PATCH {}", url);
        let response = self
            .with_token(self.client.patch(&url).json(req))?
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Move a job to `cancelled`
    pub async fn cancel_job(&self, job_id: &str) -> Result<Job> {
        self.update_job(job_id, &JobUpdateRequest::cancel()).await
    }

    /// Delete a job
    ///
    /// # Returns
    /// The confirmation string the service puts in the envelope
    pub async fn delete_job(&self, job_id: &str) -> Result<String> {
        require_id("job", job_id)?;

        let url = self.url(&format!("/jobs/{}", job_id));
        tracing::debug!("DELETE {}", url);
        let response = self.with_token(self.client.delete(&url))?.send().await?;

        self.handle_response(response).await
    }
}
