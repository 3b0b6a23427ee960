//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod dashboard;
mod job;
mod task;

pub use job::JobCommands;
pub use task::TaskCommands;

use anyhow::Result;
use clap::Subcommand;
use djm_core::route::Route;

use crate::config::Config;
use crate::pages;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Job management
    Job {
        #[command(subcommand)]
        command: JobCommands,
    },
    /// Task management (legacy endpoints)
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Open a dashboard URL or path (e.g. /jobs/01J0ABC)
    Open {
        /// Full URL or path
        target: String,
    },
    /// Interactive job dashboard
    Dashboard,
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    let mut client = config.cached_client()?;

    match command {
        Commands::Job { command } => job::handle_job_command(command, &mut client, config).await,
        Commands::Task { command } => task::handle_task_command(command, &mut client, config).await,
        Commands::Open { target } => {
            let route = Route::parse(&target);
            pages::open(&mut client, config, &route).await
        }
        Commands::Dashboard => dashboard::run(&mut client, config).await,
    }
}
