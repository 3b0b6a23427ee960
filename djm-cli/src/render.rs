//! Terminal rendering helpers shared by the pages

use chrono::{DateTime, Utc};
use colored::*;
use djm_core::domain::job::JobStatus;
use djm_core::domain::task::TaskStatus;
use djm_core::table::{ListView, SortDirection, TableRow};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Steps shown on detail pages, indexed by `progress_step() - 1`
pub const PROGRESS_STEPS: [&str; 3] = ["Waiting to Start", "In Progress", "Completed"];

/// Colorize job status for display
pub fn colorize_job_status(status: JobStatus) -> ColoredString {
    let label = status.as_str();
    match status {
        JobStatus::Pending => label.white(),
        JobStatus::InProgress => label.blue(),
        JobStatus::Completed => label.green(),
        JobStatus::Failed => label.red(),
        JobStatus::Ready | JobStatus::Scheduled | JobStatus::Cancelled => label.dimmed(),
    }
}

pub fn colorize_task_status(status: TaskStatus) -> ColoredString {
    let label = status.label();
    match status {
        TaskStatus::Pending => label.white(),
        TaskStatus::InProgress => label.blue(),
        TaskStatus::Completed => label.green(),
        TaskStatus::Failed => label.red(),
        TaskStatus::Cancelled => label.dimmed(),
    }
}

pub fn format_time(time: DateTime<Utc>) -> String {
    time.format(TIME_FORMAT).to_string()
}

pub fn format_optional_time(time: Option<DateTime<Utc>>) -> String {
    time.map(format_time).unwrap_or_else(|| "N/A".to_string())
}

/// Cut `text` to `width` characters, marking the cut with an ellipsis
pub fn truncate(text: &str, width: usize) -> String {
    let text = text.lines().next().unwrap_or_default();
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", kept)
}

/// Left-align `text` in a cell of `width` characters
///
/// Padding has to happen before coloring, since escape codes count towards
/// the width `format!` sees.
pub fn cell(text: &str, width: usize) -> String {
    format!("{:<width$}", truncate(text, width), width = width)
}

/// One line describing the table state: page, rows, sort and filter
pub fn table_footer<T: TableRow>(view: &ListView<T>, sort_label: Option<&str>) -> String {
    let mut parts = vec![
        format!("Page {} of {}", view.page(), view.page_count()),
        format!("{} of {} row(s)", view.visible_len(), view.total_len()),
    ];
    if let Some(label) = sort_label {
        let arrow = match view.direction() {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        };
        parts.push(format!("sorted by {} {}", label, arrow));
    }
    if let Some(status) = view.status_filter() {
        parts.push(format!("status = {}", status));
    }
    parts.join(" · ")
}

/// Vertical step indicator for a detail page
pub fn progress_steps(current: usize) -> Vec<String> {
    PROGRESS_STEPS
        .iter()
        .enumerate()
        .map(|(idx, title)| {
            let step = idx + 1;
            let marker = if step < current {
                "✓".green()
            } else if step == current {
                "●".cyan()
            } else {
                "○".dimmed()
            };
            let line = format!("Step {}  {}", step, title);
            if step == current {
                format!("{} {}", marker, line.bold())
            } else {
                format!("{} {}", marker, line)
            }
        })
        .collect()
}

/// A label/value line on a detail page
pub fn field(label: &str, value: impl std::fmt::Display) -> String {
    format!("  {:<20} {}", format!("{}:", label), value)
}
