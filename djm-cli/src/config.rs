//! Configuration module
//!
//! Connection settings and display options, collected from flags and the
//! environment by `clap` and checked before any request is made.

use std::time::Duration;

use djm_client::cache::DEFAULT_STALE_TIME;
use djm_client::{CachedClient, Credentials, JobManagerClient};
use djm_core::table::TABLE_PAGE_SIZE;

/// Default API base URL
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api/v1";

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the scheduling API
    pub api_url: String,
    pub credentials: Credentials,
    /// Client-side timeout for every request
    pub timeout: Duration,
    /// Rows per table page
    pub page_size: usize,
    /// How long fetched lists are reused before refetching
    pub stale_time: Duration,
}

impl Config {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            credentials: Credentials::default(),
            timeout: djm_client::DEFAULT_TIMEOUT,
            page_size: TABLE_PAGE_SIZE,
            stale_time: DEFAULT_STALE_TIME,
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_url.is_empty() {
            anyhow::bail!("api_url cannot be empty");
        }

        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            anyhow::bail!("api_url must start with http:// or https://");
        }

        if self.timeout.is_zero() {
            anyhow::bail!("timeout must be greater than 0");
        }

        if self.page_size == 0 {
            anyhow::bail!("page_size must be greater than 0");
        }

        Ok(())
    }

    /// Build an API client from this configuration
    pub fn client(&self) -> anyhow::Result<JobManagerClient> {
        Ok(JobManagerClient::builder(&self.api_url)
            .credentials(self.credentials.clone())
            .timeout(self.timeout)
            .build()?)
    }

    pub fn cached_client(&self) -> anyhow::Result<CachedClient> {
        Ok(CachedClient::new(self.client()?, self.stale_time))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}
