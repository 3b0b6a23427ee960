//! Job Manager HTTP Client
//!
//! A simple, type-safe HTTP client for the job scheduling REST API.
//!
//! Every response arrives wrapped in a `{message, data}` envelope; the client
//! unwraps it and hands back the typed `data`. Job endpoints authenticate with
//! a bearer token, the legacy task endpoints with an API key.
//!
//! # Example
//!
//! ```no_run
//! use djm_client::JobManagerClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = JobManagerClient::builder("http://localhost:8080/api/v1")
//!         .bearer_token("eyJhbGciOi...")
//!         .build()?;
//!
//!     for job in client.list_jobs().await? {
//!         println!("{} {}", job.job_id, job.job_name);
//!     }
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod error;
mod jobs;
mod tasks;

// Re-export commonly used types
pub use cache::{CachedClient, QueryCache, QueryKey};
pub use error::{ClientError, Result};

use djm_core::dto::response::{ApiErrorBody, ApiResponse};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Client-side request timeout unless configured otherwise
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Extra attempts made by the job detail query
pub const DEFAULT_DETAIL_RETRIES: u32 = 3;

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Credentials attached to outgoing requests
#[derive(Clone, Default)]
pub struct Credentials {
    pub bearer_token: Option<String>,
    pub api_key: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "<redacted>"))
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Fixed-count retry with linear backoff
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub retries: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: DEFAULT_DETAIL_RETRIES,
            backoff: Duration::from_millis(500),
        }
    }
}

/// HTTP client for the job scheduling API
///
/// Methods are organized by resource:
/// - Jobs: list, get, create, update, cancel, delete
/// - Tasks (legacy): list, get, put, delete
#[derive(Debug, Clone)]
pub struct JobManagerClient {
    /// Base URL of the API (e.g., "http://localhost:8080/api/v1")
    base_url: String,
    /// HTTP client instance
    client: Client,
    credentials: Credentials,
    detail_retry: RetryPolicy,
}

/// Builder for [`JobManagerClient`]
#[derive(Debug, Clone)]
pub struct JobManagerClientBuilder {
    base_url: String,
    credentials: Credentials,
    timeout: Duration,
    detail_retry: RetryPolicy,
}

impl JobManagerClientBuilder {
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.credentials.bearer_token = Some(token.into());
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.credentials.api_key = Some(key.into());
        self
    }

    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn detail_retry(mut self, policy: RetryPolicy) -> Self {
        self.detail_retry = policy;
        self
    }

    pub fn build(self) -> Result<JobManagerClient> {
        let client = Client::builder().timeout(self.timeout).build()?;
        Ok(JobManagerClient {
            base_url: self.base_url.trim_end_matches('/').to_string(),
            client,
            credentials: self.credentials,
            detail_retry: self.detail_retry,
        })
    }
}

impl JobManagerClient {
    /// Start configuring a client for `base_url`
    ///
    /// # Example
    /// ```
    /// use djm_client::JobManagerClient;
    /// use std::time::Duration;
    ///
    /// let client = JobManagerClient::builder("http://localhost:8080/api/v1")
    ///     .api_key("local-dev-key")
    ///     .timeout(Duration::from_secs(5))
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(client.base_url(), "http://localhost:8080/api/v1");
    /// ```
    pub fn builder(base_url: impl Into<String>) -> JobManagerClientBuilder {
        JobManagerClientBuilder {
            base_url: base_url.into(),
            credentials: Credentials::default(),
            timeout: DEFAULT_TIMEOUT,
            detail_retry: RetryPolicy::default(),
        }
    }

    /// Create a client without credentials and the default timeout
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::builder(base_url).build()
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure proxies, TLS settings, etc. The caller is
    /// responsible for the timeout in that case.
    pub fn with_client(
        base_url: impl Into<String>,
        client: Client,
        credentials: Credentials,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            credentials,
            detail_retry: RetryPolicy::default(),
        }
    }

    /// Get the base URL of the API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // =============================================================================
    // Authentication
    // =============================================================================

    fn with_api_key(&self, req: RequestBuilder) -> RequestBuilder {
        match self.credentials.api_key.as_deref().filter(|k| !k.is_empty()) {
            Some(key) => req.header(API_KEY_HEADER, key),
            None => req,
        }
    }

    /// Attach the bearer token, failing before any I/O when there is none
    fn with_token(&self, req: RequestBuilder) -> Result<RequestBuilder> {
        let token = self
            .credentials
            .bearer_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(ClientError::MissingCredential("auth token"))?;
        Ok(self.with_api_key(req.bearer_auth(token)))
    }

    /// Attach the API key, which is mandatory, plus the token when present
    fn with_required_api_key(&self, req: RequestBuilder) -> Result<RequestBuilder> {
        if self
            .credentials
            .api_key
            .as_deref()
            .is_none_or(|k| k.is_empty())
        {
            return Err(ClientError::MissingCredential("API key"));
        }
        let req = match self.credentials.bearer_token.as_deref() {
            Some(token) if !token.is_empty() => req.bearer_auth(token),
            _ => req,
        };
        Ok(self.with_api_key(req))
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Check the status, then unwrap the `{message, data}` envelope
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let message = ApiErrorBody::message_from(&error_text);
            tracing::debug!(status = status.as_u16(), %message, "API request failed");
            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(ClientError::NotFound(message));
            }
            return Err(ClientError::api_error(status.as_u16(), message));
        }

        let envelope: ApiResponse<T> = response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))?;

        if !envelope.message.is_empty() {
            tracing::debug!(message = %envelope.message, "API response");
        }
        Ok(envelope.data)
    }
}

pub(crate) fn require_id(kind: &str, id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(ClientError::InvalidRequest(format!("no {} id provided", kind)));
    }
    Ok(())
}
