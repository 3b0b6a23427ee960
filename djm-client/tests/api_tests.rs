//! Client tests against an in-process stub of the scheduling API

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Value, json};

use djm_client::{CachedClient, ClientError, JobManagerClient, RetryPolicy};
use djm_core::domain::job::{JobFrequency, JobStatus};
use djm_core::domain::task::TaskStatus;
use djm_core::dto::job::{JobCreateRequest, JobUpdateRequest};

#[derive(Debug, Clone)]
struct Recorded {
    method: Method,
    path: String,
    authorization: Option<String>,
    api_key: Option<String>,
    body: Option<Value>,
}

#[derive(Clone, Default)]
struct Stub {
    requests: Arc<Mutex<Vec<Recorded>>>,
    /// Number of 503s the job detail endpoint answers before succeeding
    detail_failures: Arc<AtomicUsize>,
}

impl Stub {
    fn record(&self, method: Method, path: String, headers: &HeaderMap, body: Option<Value>) {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        self.requests.lock().unwrap().push(Recorded {
            method,
            path,
            authorization: header("authorization"),
            api_key: header("x-api-key"),
            body,
        });
    }

    fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    fn count(&self, method: Method, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }
}

fn job_json(id: &str, name: &str, status: &str) -> Value {
    json!({
        "job_id": id,
        "user_id": "user-1",
        "job_name": name,
        "job_description": "",
        "job_metadata": "",
        "frequency": "daily",
        "status": status,
        "payload": "```go\nfmt.Println(\"hi\")\n```",
        "retry_count": 0,
        "max_retries": 3,
        "execution_time": "2030-01-01T09:00:00Z",
        "created_at": "2029-12-01T00:00:00Z",
        "updated_at": "2029-12-01T00:00:00Z"
    })
}

fn task_json(id: &str) -> Value {
    json!({
        "id": id,
        "title": "Backup",
        "description": "nightly backup",
        "status": 1,
        "recurrence": 1,
        "scheduledTime": 1893488400,
        "createdAt": 1890000000,
        "updatedAt": 1890000000
    })
}

fn envelope(data: Value) -> Response {
    Json(json!({ "message": "ok", "data": data })).into_response()
}

async fn list_jobs(State(stub): State<Stub>, headers: HeaderMap) -> Response {
    stub.record(Method::GET, "/jobs".to_string(), &headers, None);
    envelope(json!([
        job_json("01J0A", "nightly report", "pending"),
        job_json("01J0B", "cleanup", "completed"),
    ]))
}

async fn get_job(State(stub): State<Stub>, Path(id): Path<String>, headers: HeaderMap) -> Response {
    stub.record(Method::GET, format!("/jobs/{}", id), &headers, None);
    if id == "missing" {
        return (StatusCode::NOT_FOUND, Json(json!({ "error": "job not found" }))).into_response();
    }
    let remaining = stub.detail_failures.load(Ordering::SeqCst);
    if remaining > 0 {
        stub.detail_failures.store(remaining - 1, Ordering::SeqCst);
        return (StatusCode::SERVICE_UNAVAILABLE, "upstream unavailable").into_response();
    }
    envelope(job_json(&id, "nightly report", "pending"))
}

async fn create_job(State(stub): State<Stub>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    stub.record(Method::POST, "/jobs".to_string(), &headers, Some(body.clone()));
    let name = body["job_name"].as_str().unwrap_or_default();
    envelope(job_json("01J0C", name, "pending"))
}

async fn update_job(
    State(stub): State<Stub>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    stub.record(Method::PATCH, format!("/jobs/{}", id), &headers, Some(body.clone()));
    let status = body["status"].as_str().unwrap_or("pending");
    envelope(job_json(&id, "nightly report", status))
}

async fn delete_job(State(stub): State<Stub>, Path(id): Path<String>, headers: HeaderMap) -> Response {
    stub.record(Method::DELETE, format!("/jobs/{}", id), &headers, None);
    envelope(json!("job deleted"))
}

async fn list_tasks(State(stub): State<Stub>, headers: HeaderMap) -> Response {
    stub.record(Method::GET, "/tasks".to_string(), &headers, None);
    envelope(json!([task_json("t-1"), task_json("t-2")]))
}

async fn put_task(State(stub): State<Stub>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    stub.record(Method::PUT, "/tasks".to_string(), &headers, Some(body.clone()));
    envelope(body)
}

async fn get_task(State(stub): State<Stub>, Path(id): Path<String>, headers: HeaderMap) -> Response {
    stub.record(Method::GET, format!("/tasks/{}", id), &headers, None);
    envelope(task_json(&id))
}

async fn delete_task(State(stub): State<Stub>, Path(id): Path<String>, headers: HeaderMap) -> Response {
    stub.record(Method::DELETE, format!("/tasks/{}", id), &headers, None);
    (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "message": "storage offline" }))).into_response()
}

/// Serve the stub on an ephemeral port and return its API base URL
async fn spawn_stub(stub: Stub) -> String {
    let api = Router::new()
        .route("/jobs", get(list_jobs).post(create_job))
        .route("/jobs/{id}", get(get_job).patch(update_job).delete(delete_job))
        .route("/tasks", get(list_tasks).put(put_task))
        .route("/tasks/{id}", get(get_task).delete(delete_task))
        .with_state(stub);
    let app = Router::new().nest("/api/v1", api);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/api/v1", addr)
}

fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        retries: 3,
        backoff: Duration::from_millis(1),
    }
}

async fn authed_client(stub: &Stub) -> JobManagerClient {
    let base = spawn_stub(stub.clone()).await;
    JobManagerClient::builder(base)
        .bearer_token("test-token")
        .api_key("test-key")
        .detail_retry(fast_retry())
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_list_jobs_sends_credentials_and_unwraps_envelope() -> anyhow::Result<()> {
    let stub = Stub::default();
    let client = authed_client(&stub).await;

    let jobs = client.list_jobs().await?;

    assert_eq!(jobs.len(), 2);
    assert_eq!(jobs[0].job_name, "nightly report");
    assert_eq!(jobs[1].status, JobStatus::Completed);
    assert_eq!(jobs[0].frequency, JobFrequency::Daily);

    let requests = stub.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].authorization.as_deref(), Some("Bearer test-token"));
    assert_eq!(requests[0].api_key.as_deref(), Some("test-key"));
    Ok(())
}

#[tokio::test]
async fn test_missing_token_fails_without_a_request() {
    let stub = Stub::default();
    let base = spawn_stub(stub.clone()).await;
    let client = JobManagerClient::builder(base).api_key("test-key").build().unwrap();

    let err = client.list_jobs().await.unwrap_err();

    assert!(matches!(err, ClientError::MissingCredential("auth token")));
    assert_eq!(err.to_string(), "auth token missing");
    assert!(stub.requests().is_empty());
}

#[tokio::test]
async fn test_not_found_is_not_retried() {
    let stub = Stub::default();
    let client = authed_client(&stub).await;

    let err = client.get_job("missing").await.unwrap_err();

    assert!(err.is_not_found());
    assert!(err.to_string().contains("job not found"));
    assert_eq!(stub.count(Method::GET, "/jobs/missing"), 1);
}

#[tokio::test]
async fn test_job_detail_retries_server_errors() -> anyhow::Result<()> {
    let stub = Stub::default();
    stub.detail_failures.store(2, Ordering::SeqCst);
    let client = authed_client(&stub).await;

    let job = client.get_job("01J0A").await?;

    assert_eq!(job.job_id, "01J0A");
    assert_eq!(stub.count(Method::GET, "/jobs/01J0A"), 3);
    Ok(())
}

#[tokio::test]
async fn test_job_detail_gives_up_after_retries() {
    let stub = Stub::default();
    stub.detail_failures.store(10, Ordering::SeqCst);
    let client = authed_client(&stub).await;

    let err = client.get_job("01J0A").await.unwrap_err();

    match err {
        ClientError::ApiError { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "upstream unavailable");
        }
        other => panic!("unexpected error: {other}"),
    }
    // one attempt plus three retries
    assert_eq!(stub.count(Method::GET, "/jobs/01J0A"), 4);
}

#[tokio::test]
async fn test_create_job_posts_body() -> anyhow::Result<()> {
    let stub = Stub::default();
    let client = authed_client(&stub).await;

    let req = JobCreateRequest {
        job_name: "weekly digest".to_string(),
        job_description: "send digest".to_string(),
        frequency: JobFrequency::Weekly,
        payload: "```python\nprint('hi')\n```".to_string(),
        max_retries: 2,
        execution_time: "2030-01-01T09:00:00Z".parse()?,
    };
    let job = client.create_job(&req).await?;

    assert_eq!(job.job_name, "weekly digest");
    let body = stub.requests()[0].body.clone().unwrap();
    assert_eq!(body["frequency"], "weekly");
    assert_eq!(body["max_retries"], 2);
    assert_eq!(body["execution_time"], "2030-01-01T09:00:00Z");
    Ok(())
}

#[tokio::test]
async fn test_cancel_sends_only_status() -> anyhow::Result<()> {
    let stub = Stub::default();
    let client = authed_client(&stub).await;

    let job = client.cancel_job("01J0A").await?;

    assert_eq!(job.status, JobStatus::Cancelled);
    let recorded = &stub.requests()[0];
    assert_eq!(recorded.method, Method::PATCH);
    assert_eq!(recorded.body, Some(json!({ "status": "cancelled" })));
    Ok(())
}

#[tokio::test]
async fn test_partial_update_omits_unset_fields() -> anyhow::Result<()> {
    let stub = Stub::default();
    let client = authed_client(&stub).await;

    let req = JobUpdateRequest {
        job_name: Some("renamed".to_string()),
        max_retries: Some(5),
        ..Default::default()
    };
    client.update_job("01J0A", &req).await?;

    assert_eq!(
        stub.requests()[0].body,
        Some(json!({ "job_name": "renamed", "max_retries": 5 }))
    );
    Ok(())
}

#[tokio::test]
async fn test_delete_job_returns_confirmation() -> anyhow::Result<()> {
    let stub = Stub::default();
    let client = authed_client(&stub).await;

    let message = client.delete_job("01J0B").await?;

    assert_eq!(message, "job deleted");
    assert_eq!(stub.count(Method::DELETE, "/jobs/01J0B"), 1);
    Ok(())
}

#[tokio::test]
async fn test_tasks_require_api_key() {
    let stub = Stub::default();
    let base = spawn_stub(stub.clone()).await;
    let client = JobManagerClient::builder(base)
        .bearer_token("test-token")
        .build()
        .unwrap();

    let err = client.list_tasks().await.unwrap_err();

    assert_eq!(err.to_string(), "API key missing");
    assert!(stub.requests().is_empty());
}

#[tokio::test]
async fn test_task_round_trip() -> anyhow::Result<()> {
    let stub = Stub::default();
    let client = authed_client(&stub).await;

    let mut task = client.get_task("t-1").await?;
    assert_eq!(task.status, TaskStatus::InProgress);
    assert!(task.scheduled_at().is_some());

    task.title = "Offsite backup".to_string();
    let saved = client.put_task(&task).await?;

    assert_eq!(saved.title, "Offsite backup");
    let put = stub
        .requests()
        .into_iter()
        .find(|r| r.method == Method::PUT)
        .unwrap();
    assert_eq!(put.api_key.as_deref(), Some("test-key"));
    let body = put.body.unwrap();
    assert_eq!(body["title"], "Offsite backup");
    assert_eq!(body["scheduledTime"], 1893488400);
    Ok(())
}

#[tokio::test]
async fn test_server_error_message_is_surfaced() {
    let stub = Stub::default();
    let client = authed_client(&stub).await;

    let err = client.delete_task("t-1").await.unwrap_err();

    assert!(err.is_server_error());
    assert_eq!(err.to_string(), "API error (status 500): storage offline");
}

#[tokio::test]
async fn test_cached_reads_refetch_after_mutation() -> anyhow::Result<()> {
    let stub = Stub::default();
    let client = authed_client(&stub).await;
    let mut cached = CachedClient::new(client, Duration::from_secs(60));

    cached.jobs().await?;
    cached.jobs().await?;
    assert_eq!(stub.count(Method::GET, "/jobs"), 1);

    cached.job("01J0A").await?;
    cached.job("01J0A").await?;
    assert_eq!(stub.count(Method::GET, "/jobs/01J0A"), 1);

    cached.cancel_job("01J0A").await?;
    cached.jobs().await?;
    cached.job("01J0A").await?;
    assert_eq!(stub.count(Method::GET, "/jobs"), 2);
    assert_eq!(stub.count(Method::GET, "/jobs/01J0A"), 2);

    cached.tasks().await?;
    cached.invalidate_all();
    cached.tasks().await?;
    assert_eq!(stub.count(Method::GET, "/tasks"), 2);
    Ok(())
}
