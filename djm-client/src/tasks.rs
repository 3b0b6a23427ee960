//! Task-related API endpoints (legacy)

use crate::error::Result;
use crate::{JobManagerClient, require_id};
use djm_core::domain::task::Task;

impl JobManagerClient {
    /// List all tasks
    pub async fn list_tasks(&self) -> Result<Vec<Task>> {
        let url = self.url("/tasks");
        tracing::debug!("GET {}", url);
        let response = self
            .with_required_api_key(self.client.get(&url))?
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Get a task by ID
    pub async fn get_task(&self, task_id: &str) -> Result<Task> {
        require_id("task", task_id)?;

        let url = self.url(&format!("/tasks/{}", task_id));
        tracing::debug!("GET {}", url);
        let response = self
            .with_required_api_key(self.client.get(&url))?
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Write a whole task back
    ///
    /// The endpoint upserts by `id`, so the body must be the complete record.
    pub async fn put_task(&self, task: &Task) -> Result<Task> {
        require_id("task", &task.id)?;

        let url = self.url("/tasks");
        tracing::debug!("PUT {}", url);
        let response = self
            .with_required_api_key(self.client.put(&url).json(task))?
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Delete a task
    pub async fn delete_task(&self, task_id: &str) -> Result<String> {
        require_id("task", task_id)?;

        let url = self.url(&format!("/tasks/{}", task_id));
        tracing::debug!("DELETE {}", url);
        let response = self
            .with_required_api_key(self.client.delete(&url))?
            .send()
            .await?;

        self.handle_response(response).await
    }
}
