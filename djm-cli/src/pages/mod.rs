//! Pages
//!
//! Each page fetches what it shows through the cached client and prints it.
//! [`open`] is the entry point used for URLs and paths.

pub mod jobs;
pub mod tasks;

use anyhow::{Result, bail};
use colored::*;
use djm_client::CachedClient;
use djm_core::route::Route;
use djm_core::table::ListView;

use crate::config::Config;

/// Render the page `route` points at
pub async fn open(client: &mut CachedClient, config: &Config, route: &Route) -> Result<()> {
    tracing::debug!(%route, "Opening page");
    match route {
        Route::Landing | Route::TaskDashboard => {
            let tasks = client.tasks().await?;
            println!("{}", "Task List".bold());
            tasks::print_task_table(&ListView::new(tasks, config.page_size));
        }
        Route::TaskDetail(id) => {
            let task = client.task(id).await?;
            tasks::print_task_detail(&task);
        }
        Route::JobDashboard => {
            let jobs = client.jobs().await?;
            println!("{}", "Job Dashboard".bold());
            jobs::print_job_table(&ListView::new(jobs, config.page_size));
        }
        Route::JobDetail(id) => {
            let job = client.job(id).await?;
            jobs::print_job_detail(&job);
        }
        Route::NotFound(path) => bail!("Page not found: {}", path),
    }
    Ok(())
}
