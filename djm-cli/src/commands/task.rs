//! Task command handlers
//!
//! Tasks are the scheduler's earlier record type and are served by the
//! legacy endpoints, which need the API key.

use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::Subcommand;
use djm_client::CachedClient;
use djm_core::domain::task::{TaskRecurrence, TaskStatus};
use djm_core::form::TaskForm;
use djm_core::table::{ListView, SortDirection, TaskSortKey};

use crate::config::Config;
use crate::id_resolver::resolve_task_id;
use crate::input::{confirm, parse_time};
use crate::notify;
use crate::pages::tasks::{print_task_detail, print_task_table};
use crate::types::IdOrPrefix;

/// Task subcommands
#[derive(Subcommand)]
pub enum TaskCommands {
    /// List tasks
    List {
        /// Column to sort by (title, created-at, updated-at, status)
        #[arg(short, long)]
        sort: Option<TaskSortKey>,

        /// Sort descending
        #[arg(long)]
        desc: bool,

        /// Only show tasks with this status
        #[arg(long)]
        status: Option<TaskStatus>,

        /// Page to show (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// Get task details
    Get {
        /// Task ID or unambiguous prefix
        id: String,
    },
    /// Edit a pending task; omitted fields keep their values
    Edit {
        /// Task ID or unambiguous prefix
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        /// once, daily, weekly or monthly
        #[arg(short, long)]
        recurrence: Option<TaskRecurrence>,

        /// RFC 3339, 'YYYY-MM-DD HH:MM' (UTC) or +30m/+2h/+1d
        #[arg(short = 't', long)]
        scheduled_time: Option<String>,
    },
    /// Delete a task
    Delete {
        /// Task ID or unambiguous prefix
        id: String,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

/// Handle task commands
pub async fn handle_task_command(
    command: TaskCommands,
    client: &mut CachedClient,
    config: &Config,
) -> Result<()> {
    match command {
        TaskCommands::List {
            sort,
            desc,
            status,
            page,
        } => {
            let tasks = client.tasks().await.context("Failed to fetch tasks")?;
            let mut view = ListView::new(tasks, config.page_size);
            view.sort_by(sort);
            if desc {
                view.set_direction(SortDirection::Descending);
            }
            if status.is_some() {
                view.filter_status(status)?;
            }
            view.set_page(page);
            print_task_table(&view);
            Ok(())
        }
        TaskCommands::Get { id } => {
            let task_id = resolve_task_id(client, &IdOrPrefix::parse(&id)).await?;
            let task = client.task(&task_id).await?;
            print_task_detail(&task);
            Ok(())
        }
        TaskCommands::Edit {
            id,
            title,
            description,
            recurrence,
            scheduled_time,
        } => {
            let now = Utc::now();
            let scheduled_time = scheduled_time
                .map(|t| parse_time(&t, now))
                .transpose()
                .map_err(anyhow::Error::msg)?;
            let form = TaskForm {
                title,
                description,
                recurrence,
                scheduled_time,
            };
            edit_task(client, &id, &form).await
        }
        TaskCommands::Delete { id, yes } => {
            let task_id = resolve_task_id(client, &IdOrPrefix::parse(&id)).await?;
            if !yes && !confirm(&format!("Delete task {}?", task_id))? {
                notify::info("Deletion aborted");
                return Ok(());
            }
            client.delete_task(&task_id).await?;
            notify::success(format!("Task {} deleted", task_id));
            Ok(())
        }
    }
}

async fn edit_task(client: &mut CachedClient, id: &str, form: &TaskForm) -> Result<()> {
    let task_id = resolve_task_id(client, &IdOrPrefix::parse(id)).await?;
    let task = client.task(&task_id).await?;

    if !task.can_edit() {
        bail!("Only pending tasks can be edited (task is {})", task.status);
    }

    let merged = form.apply(&task, Utc::now())?;
    if merged == task {
        notify::info("Nothing to update");
        return Ok(());
    }

    let saved = client.put_task(&merged).await?;
    notify::success(format!("Task '{}' updated", saved.title));
    Ok(())
}
