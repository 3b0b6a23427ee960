//! Query cache
//!
//! Keeps the last fetched result of each query for a short while so that
//! re-rendering a page does not hit the API again. Mutations invalidate the
//! queries they affect, which makes the next read refetch.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use djm_core::domain::job::Job;
use djm_core::domain::task::Task;
use djm_core::dto::job::{JobCreateRequest, JobUpdateRequest};

use crate::JobManagerClient;
use crate::error::Result;

/// How long a fetched result is served without refetching
pub const DEFAULT_STALE_TIME: Duration = Duration::from_secs(30);

/// Identity of a cached query
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Jobs,
    Job(String),
    Tasks,
    Task(String),
}

struct Entry {
    value: Arc<dyn Any + Send + Sync>,
    fetched_at: Instant,
}

/// Typed results keyed by [`QueryKey`], each valid for `stale_after`
pub struct QueryCache {
    entries: HashMap<QueryKey, Entry>,
    stale_after: Duration,
}

impl QueryCache {
    pub fn new(stale_after: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            stale_after,
        }
    }

    /// The cached value for `key`, if present, fresh and of type `T`
    pub fn get<T: Clone + 'static>(&self, key: &QueryKey) -> Option<T> {
        let entry = self.entries.get(key)?;
        if entry.fetched_at.elapsed() >= self.stale_after {
            return None;
        }
        entry.value.downcast_ref::<T>().cloned()
    }

    /// Store `value` under `key`, dropping every entry that has gone stale
    pub fn put<T: Send + Sync + 'static>(&mut self, key: QueryKey, value: T) {
        self.evict_stale();
        self.entries.insert(
            key,
            Entry {
                value: Arc::new(value),
                fetched_at: Instant::now(),
            },
        );
    }

    pub fn evict_stale(&mut self) {
        let stale_after = self.stale_after;
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| entry.fetched_at.elapsed() < stale_after);
        if self.entries.len() < before {
            tracing::debug!(evicted = before - self.entries.len(), "Evicted stale queries");
        }
    }

    pub fn invalidate(&mut self, key: &QueryKey) {
        if self.entries.remove(key).is_some() {
            tracing::debug!(?key, "Invalidated query");
        }
    }

    pub fn invalidate_where(&mut self, predicate: impl Fn(&QueryKey) -> bool) {
        self.entries.retain(|key, _| !predicate(key));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(DEFAULT_STALE_TIME)
    }
}

impl std::fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCache")
            .field("keys", &self.entries.keys().collect::<Vec<_>>())
            .field("stale_after", &self.stale_after)
            .finish()
    }
}

/// [`JobManagerClient`] with reads served from a [`QueryCache`]
#[derive(Debug)]
pub struct CachedClient {
    client: JobManagerClient,
    cache: QueryCache,
}

impl CachedClient {
    pub fn new(client: JobManagerClient, stale_after: Duration) -> Self {
        Self {
            client,
            cache: QueryCache::new(stale_after),
        }
    }

    pub fn client(&self) -> &JobManagerClient {
        &self.client
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    // =============================================================================
    // Jobs
    // =============================================================================

    pub async fn jobs(&mut self) -> Result<Vec<Job>> {
        if let Some(jobs) = self.cache.get::<Vec<Job>>(&QueryKey::Jobs) {
            return Ok(jobs);
        }
        let jobs = self.client.list_jobs().await?;
        self.cache.put(QueryKey::Jobs, jobs.clone());
        Ok(jobs)
    }

    pub async fn job(&mut self, job_id: &str) -> Result<Job> {
        let key = QueryKey::Job(job_id.to_string());
        if let Some(job) = self.cache.get::<Job>(&key) {
            return Ok(job);
        }
        let job = self.client.get_job(job_id).await?;
        self.cache.put(key, job.clone());
        Ok(job)
    }

    /// Drop every cached job query and refetch the list
    pub async fn refresh_jobs(&mut self) -> Result<Vec<Job>> {
        self.cache
            .invalidate_where(|key| matches!(key, QueryKey::Jobs | QueryKey::Job(_)));
        self.jobs().await
    }

    pub async fn create_job(&mut self, req: &JobCreateRequest) -> Result<Job> {
        let job = self.client.create_job(req).await?;
        self.cache.invalidate(&QueryKey::Jobs);
        Ok(job)
    }

    pub async fn update_job(&mut self, job_id: &str, req: &JobUpdateRequest) -> Result<Job> {
        let job = self.client.update_job(job_id, req).await?;
        self.invalidate_job(job_id);
        Ok(job)
    }

    pub async fn cancel_job(&mut self, job_id: &str) -> Result<Job> {
        let job = self.client.cancel_job(job_id).await?;
        self.invalidate_job(job_id);
        Ok(job)
    }

    pub async fn delete_job(&mut self, job_id: &str) -> Result<String> {
        let message = self.client.delete_job(job_id).await?;
        self.invalidate_job(job_id);
        Ok(message)
    }

    fn invalidate_job(&mut self, job_id: &str) {
        self.cache.invalidate(&QueryKey::Jobs);
        self.cache.invalidate(&QueryKey::Job(job_id.to_string()));
    }

    // =============================================================================
    // Tasks
    // =============================================================================

    pub async fn tasks(&mut self) -> Result<Vec<Task>> {
        if let Some(tasks) = self.cache.get::<Vec<Task>>(&QueryKey::Tasks) {
            return Ok(tasks);
        }
        let tasks = self.client.list_tasks().await?;
        self.cache.put(QueryKey::Tasks, tasks.clone());
        Ok(tasks)
    }

    pub async fn task(&mut self, task_id: &str) -> Result<Task> {
        let key = QueryKey::Task(task_id.to_string());
        if let Some(task) = self.cache.get::<Task>(&key) {
            return Ok(task);
        }
        let task = self.client.get_task(task_id).await?;
        self.cache.put(key, task.clone());
        Ok(task)
    }

    pub async fn put_task(&mut self, task: &Task) -> Result<Task> {
        let saved = self.client.put_task(task).await?;
        self.cache.invalidate(&QueryKey::Tasks);
        self.cache.invalidate(&QueryKey::Task(task.id.clone()));
        Ok(saved)
    }

    pub async fn delete_task(&mut self, task_id: &str) -> Result<String> {
        let message = self.client.delete_task(task_id).await?;
        self.cache.invalidate(&QueryKey::Tasks);
        self.cache.invalidate(&QueryKey::Task(task_id.to_string()));
        Ok(message)
    }

    /// Forget everything, so every next read refetches
    pub fn invalidate_all(&mut self) {
        self.cache.clear();
    }
}
