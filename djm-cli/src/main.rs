//! djm
//!
//! Terminal dashboard for the job scheduling API: job and task tables with
//! sorting, filtering and paging, detail pages, and the create, edit and
//! cancel forms.

mod commands;
mod config;
mod id_resolver;
mod input;
mod notify;
mod pages;
mod render;
mod types;

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use djm_client::Credentials;
use djm_core::table::TABLE_PAGE_SIZE;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "djm")]
#[command(about = "Job manager dashboard", long_about = None)]
struct Cli {
    /// Base URL of the scheduling API
    #[arg(long, env = "DJM_API_URL", default_value = config::DEFAULT_API_URL)]
    api_url: String,

    /// Bearer token for the job endpoints
    #[arg(long, env = "DJM_API_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// API key, required by the task endpoints
    #[arg(long, env = "DJM_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "DJM_TIMEOUT_SECS", default_value_t = 10)]
    timeout: u64,

    /// Rows per table page
    #[arg(long, env = "DJM_PAGE_SIZE", default_value_t = TABLE_PAGE_SIZE)]
    page_size: usize,

    /// Log requests to stderr
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            credentials: Credentials {
                bearer_token: self.token.clone(),
                api_key: self.api_key.clone(),
            },
            timeout: Duration::from_secs(self.timeout),
            page_size: self.page_size,
            ..Config::new(&self.api_url)
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.config();
    if let Err(err) = run(cli.command, config).await {
        notify::report(&err);
        std::process::exit(1);
    }
}

async fn run(command: Commands, config: Config) -> Result<()> {
    config.validate()?;
    tracing::debug!(api_url = %config.api_url, "Loaded configuration");
    handle_command(command, &config).await
}

/// Log to stderr so table output on stdout stays clean
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "djm=debug,djm_client=debug"
    } else {
        "djm=warn,djm_client=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
