//! Job command handlers
//!
//! Handles all job-related CLI commands: the dashboard table, the detail
//! page, the create/edit form and the cancel and delete actions.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::{Args, Subcommand};
use djm_client::CachedClient;
use djm_core::domain::job::{JobFrequency, JobStatus};
use djm_core::form::JobForm;
use djm_core::payload;
use djm_core::route::Route;
use djm_core::table::{JobSortKey, ListView, SortDirection};

use crate::config::Config;
use crate::id_resolver::resolve_job_id;
use crate::input::{confirm, parse_time};
use crate::notify;
use crate::pages::jobs::{print_job_detail, print_job_table};
use crate::render::format_time;
use crate::types::IdOrPrefix;

/// Job subcommands
#[derive(Subcommand)]
pub enum JobCommands {
    /// List jobs
    List {
        /// Column to sort by
        #[arg(short, long)]
        sort: Option<JobSortKey>,

        /// Sort descending
        #[arg(long)]
        desc: bool,

        /// Only show jobs with this status
        #[arg(long)]
        status: Option<JobStatus>,

        /// Page to show (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// Get job details
    Get {
        /// Job ID or unambiguous prefix
        id: String,
    },
    /// Schedule a new job
    Create {
        /// Job name
        #[arg(short, long)]
        name: String,

        /// When to run first: RFC 3339, 'YYYY-MM-DD HH:MM' (UTC) or +30m/+2h/+1d
        #[arg(short = 't', long)]
        execution_time: String,

        #[command(flatten)]
        fields: JobFieldArgs,
    },
    /// Edit a pending job
    Edit {
        /// Job ID or unambiguous prefix
        id: String,

        /// New name
        #[arg(short, long)]
        name: Option<String>,

        /// New execution time
        #[arg(short = 't', long)]
        execution_time: Option<String>,

        #[command(flatten)]
        fields: JobFieldArgs,
    },
    /// Cancel a job that has not finished
    Cancel {
        /// Job ID or unambiguous prefix
        id: String,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Delete a job
    Delete {
        /// Job ID or unambiguous prefix
        id: String,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

/// Optional job fields shared by `create` and `edit`
#[derive(Args, Debug, Default)]
pub struct JobFieldArgs {
    /// Description
    #[arg(short, long)]
    description: Option<String>,

    /// one-time, daily, weekly or monthly
    #[arg(short, long)]
    frequency: Option<JobFrequency>,

    /// Retries allowed after a failed run
    #[arg(long)]
    max_retries: Option<u32>,

    /// Code to run, either fenced markdown or bare code
    #[arg(long, conflicts_with = "payload_file")]
    payload: Option<String>,

    /// Read the code to run from a file
    #[arg(long)]
    payload_file: Option<PathBuf>,

    /// Language used to fence bare code (defaults to the file extension, then go)
    #[arg(long)]
    language: Option<String>,
}

impl JobFieldArgs {
    fn apply(&self, form: &mut JobForm) -> Result<()> {
        if let Some(description) = &self.description {
            form.job_description = description.clone();
        }
        if let Some(frequency) = self.frequency {
            form.frequency = frequency;
        }
        if let Some(max_retries) = self.max_retries {
            form.max_retries = max_retries;
        }
        if let Some(payload) = self.read_payload()? {
            form.payload = payload;
        }
        Ok(())
    }

    fn read_payload(&self) -> Result<Option<String>> {
        let (code, language) = match (&self.payload, &self.payload_file) {
            (Some(code), _) => (code.clone(), self.language.clone()),
            (None, Some(path)) => {
                let code = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read payload file: {}", path.display()))?;
                let language = self
                    .language
                    .clone()
                    .or_else(|| language_for_path(path).map(str::to_string));
                (code, language)
            }
            (None, None) => return Ok(None),
        };

        match language {
            Some(language) if !payload::is_fenced(&code) => {
                Ok(Some(payload::wrap(&code, &language.to_lowercase())))
            }
            _ => Ok(Some(code)),
        }
    }
}

/// Supported language whose source extension matches `path`
fn language_for_path(path: &Path) -> Option<&'static str> {
    let extension = format!(".{}", path.extension()?.to_str()?.to_lowercase());
    payload::SUPPORTED_LANGUAGES
        .iter()
        .find(|(_, ext)| *ext == extension)
        .map(|(language, _)| *language)
}

/// Handle job commands
///
/// Routes job subcommands to their respective handlers.
pub async fn handle_job_command(
    command: JobCommands,
    client: &mut CachedClient,
    config: &Config,
) -> Result<()> {
    match command {
        JobCommands::List {
            sort,
            desc,
            status,
            page,
        } => list_jobs(client, config, sort, desc, status, page).await,
        JobCommands::Get { id } => get_job(client, &id).await,
        JobCommands::Create {
            name,
            execution_time,
            fields,
        } => create_job(client, name, &execution_time, &fields).await,
        JobCommands::Edit {
            id,
            name,
            execution_time,
            fields,
        } => edit_job(client, &id, name, execution_time.as_deref(), &fields).await,
        JobCommands::Cancel { id, yes } => cancel_job(client, &id, yes).await,
        JobCommands::Delete { id, yes } => delete_job(client, &id, yes).await,
    }
}

async fn list_jobs(
    client: &mut CachedClient,
    config: &Config,
    sort: Option<JobSortKey>,
    desc: bool,
    status: Option<JobStatus>,
    page: usize,
) -> Result<()> {
    let jobs = client.jobs().await.context("Failed to fetch jobs")?;

    let mut view = ListView::new(jobs, config.page_size);
    view.sort_by(sort);
    if desc {
        view.set_direction(SortDirection::Descending);
    }
    if status.is_some() {
        view.filter_status(status)?;
    }
    view.set_page(page);

    print_job_table(&view);
    Ok(())
}

async fn get_job(client: &mut CachedClient, id: &str) -> Result<()> {
    let job_id = resolve_job_id(client, &IdOrPrefix::parse(id)).await?;
    let job = client.job(&job_id).await?;

    print_job_detail(&job);
    Ok(())
}

async fn create_job(
    client: &mut CachedClient,
    name: String,
    execution_time: &str,
    fields: &JobFieldArgs,
) -> Result<()> {
    let now = Utc::now();
    let mut form = JobForm::new(now);
    form.job_name = name;
    form.execution_time = parse_time(execution_time, now).map_err(anyhow::Error::msg)?;
    fields.apply(&mut form)?;

    let req = form.to_create(now)?;
    let job = client.create_job(&req).await?;

    notify::success(format!(
        "Job '{}' scheduled to run {} starting {}",
        job.job_name,
        job.frequency.label(),
        format_time(job.execution_time)
    ));
    println!("  ID:   {}", job.job_id);
    println!("  Page: {}", Route::JobDetail(job.job_id.clone()));
    Ok(())
}

async fn edit_job(
    client: &mut CachedClient,
    id: &str,
    name: Option<String>,
    execution_time: Option<&str>,
    fields: &JobFieldArgs,
) -> Result<()> {
    let job_id = resolve_job_id(client, &IdOrPrefix::parse(id)).await?;
    let original = client.job(&job_id).await?;

    let now = Utc::now();
    let mut form = JobForm::from_job(&original);
    if let Some(name) = name {
        form.job_name = name;
    }
    if let Some(time) = execution_time {
        form.execution_time = parse_time(time, now).map_err(anyhow::Error::msg)?;
    }
    fields.apply(&mut form)?;

    let update = form.to_update(&original, now)?;
    let job = client.update_job(&job_id, &update).await?;

    notify::success(format!("Job '{}' updated", job.job_name));
    Ok(())
}

async fn cancel_job(client: &mut CachedClient, id: &str, yes: bool) -> Result<()> {
    let job_id = resolve_job_id(client, &IdOrPrefix::parse(id)).await?;
    let job = client.job(&job_id).await?;

    if !job.can_cancel() {
        bail!(
            "Job '{}' is already {} and cannot be cancelled",
            job.job_name,
            job.status
        );
    }

    if !yes && !confirm(&format!("Cancel job '{}'?", job.job_name))? {
        notify::info("Cancellation aborted");
        return Ok(());
    }

    let job = client.cancel_job(&job_id).await?;
    notify::success(format!("Job '{}' cancelled", job.job_name));
    Ok(())
}

async fn delete_job(client: &mut CachedClient, id: &str, yes: bool) -> Result<()> {
    let job_id = resolve_job_id(client, &IdOrPrefix::parse(id)).await?;
    let job = client.job(&job_id).await?;

    if !yes && !confirm(&format!("Delete job '{}'? This cannot be undone.", job.job_name))? {
        notify::info("Deletion aborted");
        return Ok(());
    }

    let message = client.delete_job(&job_id).await?;
    notify::success(if message.is_empty() {
        format!("Job '{}' deleted", job.job_name)
    } else {
        message
    });
    Ok(())
}
