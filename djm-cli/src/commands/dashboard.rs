//! Interactive job dashboard
//!
//! Keeps one table on screen and applies commands read from a line editor
//! to it. Failures are reported as notifications and the session continues.

use anyhow::{Result, bail};
use colored::*;
use djm_client::CachedClient;
use djm_core::domain::job::{Job, JobStatus};
use djm_core::table::{JobSortKey, ListView, SortDirection};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::config::Config;
use crate::id_resolver::resolve_job_id;
use crate::input::is_affirmative;
use crate::notify;
use crate::pages::jobs::{print_job_detail, print_job_table};
use crate::types::IdOrPrefix;

/// Row numbers longer than this are read as ID prefixes
const MAX_ROW_DIGITS: usize = 3;

const HELP: &str = "\
Commands:
  sort <column>|none    sort by name, status, execution-time, created-at, last-updated
  asc | desc            sort direction
  filter <status>       show one status only; the same status again clears it
  clear                 remove the status filter
  next | prev           change page
  page <n>              jump to page n
  view <row|id>         open the job detail page
  cancel <row|id>       cancel a job that has not finished
  refresh               refetch the job list
  help                  show this help
  quit                  leave the dashboard";

/// A row on the current page or a job ID
#[derive(Debug, Clone, PartialEq, Eq)]
enum RowRef {
    /// 1-based position on the current page
    Row(usize),
    Id(IdOrPrefix),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Action {
    Show,
    Sort(Option<JobSortKey>),
    Direction(SortDirection),
    Filter(JobStatus),
    Clear,
    Next,
    Prev,
    Page(usize),
    View(RowRef),
    Cancel(RowRef),
    Refresh,
    Help,
    Quit,
}

impl Action {
    fn parse(line: &str) -> Result<Self, String> {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Ok(Action::Show);
        };
        let rest = words.collect::<Vec<_>>().join(" ");

        let action = match (command.to_lowercase().as_str(), rest.as_str()) {
            ("sort", "none") => Action::Sort(None),
            ("sort", key) if !key.is_empty() => Action::Sort(Some(key.parse()?)),
            ("asc" | "desc", "") => Action::Direction(command.parse()?),
            ("filter", status) if !status.is_empty() => Action::Filter(status.parse()?),
            ("clear", "") => Action::Clear,
            ("next" | "n", "") => Action::Next,
            ("prev" | "p", "") => Action::Prev,
            ("page", n) => Action::Page(
                n.parse()
                    .map_err(|_| format!("'{}' is not a page number", n))?,
            ),
            ("view" | "v", target) if !target.is_empty() => Action::View(parse_row_ref(target)),
            ("cancel", target) if !target.is_empty() => Action::Cancel(parse_row_ref(target)),
            ("refresh" | "r", "") => Action::Refresh,
            ("help" | "?", "") => Action::Help,
            ("quit" | "q" | "exit", "") => Action::Quit,
            _ => return Err(format!("Unknown command '{}', type 'help'", line.trim())),
        };
        Ok(action)
    }
}

fn parse_row_ref(target: &str) -> RowRef {
    match target.parse::<usize>() {
        Ok(row) if target.len() <= MAX_ROW_DIGITS => RowRef::Row(row),
        _ => RowRef::Id(IdOrPrefix::parse(target)),
    }
}

struct Dashboard<'a> {
    client: &'a mut CachedClient,
    view: ListView<Job>,
    editor: DefaultEditor,
}

/// Run the dashboard until `quit`, Ctrl-C or end of input
pub async fn run(client: &mut CachedClient, config: &Config) -> Result<()> {
    let jobs = client.jobs().await?;
    let mut dashboard = Dashboard {
        client,
        view: ListView::new(jobs, config.page_size),
        editor: DefaultEditor::new()?,
    };

    println!("{}", "Job Dashboard".bold());
    print_job_table(&dashboard.view);
    println!("{}", "Type 'help' for commands.".dimmed());

    while let Some(line) = dashboard.prompt("djm> ")? {
        if !line.trim().is_empty() {
            let _ = dashboard.editor.add_history_entry(line.trim());
        }
        let action = match Action::parse(&line) {
            Ok(action) => action,
            Err(message) => {
                notify::warn(message);
                continue;
            }
        };
        if action == Action::Quit {
            break;
        }
        if let Err(err) = dashboard.apply(action).await {
            notify::report(&err);
        }
    }
    Ok(())
}

impl Dashboard<'_> {
    /// Read one line; `None` on Ctrl-C or Ctrl-D
    fn prompt(&mut self, prompt: &str) -> Result<Option<String>> {
        // readline blocks until the user presses enter
        match tokio::task::block_in_place(|| self.editor.readline(prompt)) {
            Ok(line) => Ok(Some(line)),
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn apply(&mut self, action: Action) -> Result<()> {
        tracing::debug!(?action, "Dashboard action");
        match action {
            Action::Show => {}
            Action::Sort(key) => self.view.sort_by(key),
            Action::Direction(direction) => self.view.set_direction(direction),
            Action::Filter(status) => self.view.toggle_status(status)?,
            Action::Clear => self.view.filter_status(None)?,
            Action::Next => {
                if !self.view.next_page() {
                    notify::info("Already on the last page");
                }
            }
            Action::Prev => {
                if !self.view.prev_page() {
                    notify::info("Already on the first page");
                }
            }
            Action::Page(page) => self.view.set_page(page),
            Action::View(target) => {
                let job_id = self.resolve(&target).await?;
                let job = self.client.job(&job_id).await?;
                print_job_detail(&job);
                return Ok(());
            }
            Action::Cancel(target) => {
                let job_id = self.resolve(&target).await?;
                self.cancel(&job_id).await?;
            }
            Action::Refresh => {
                let jobs = self.client.refresh_jobs().await?;
                self.view.replace_rows(jobs);
            }
            Action::Help => {
                println!("{}", HELP);
                return Ok(());
            }
            Action::Quit => return Ok(()),
        }
        print_job_table(&self.view);
        Ok(())
    }

    async fn resolve(&mut self, target: &RowRef) -> Result<String> {
        match target {
            RowRef::Row(row) => {
                let rows = self.view.page_rows();
                match row.checked_sub(1).and_then(|idx| rows.get(idx)) {
                    Some(job) => Ok(job.job_id.clone()),
                    None => bail!("No row {} on this page", row),
                }
            }
            RowRef::Id(id) => resolve_job_id(&mut *self.client, id).await,
        }
    }

    async fn cancel(&mut self, job_id: &str) -> Result<()> {
        let job = self.client.job(job_id).await?;
        if !job.can_cancel() {
            bail!(
                "Job '{}' is already {} and cannot be cancelled",
                job.job_name,
                job.status
            );
        }

        let question = format!("Cancel job '{}'? [y/N] ", job.job_name);
        let answer = self.prompt(&question)?.unwrap_or_default();
        if !is_affirmative(&answer) {
            notify::info("Cancellation aborted");
            return Ok(());
        }

        let job = self.client.cancel_job(job_id).await?;
        notify::success(format!("Job '{}' cancelled", job.job_name));

        let jobs = self.client.jobs().await?;
        self.view.replace_rows(jobs);
        Ok(())
    }
}
