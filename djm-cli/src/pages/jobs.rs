//! Job dashboard and job detail pages

use colored::*;
use djm_core::domain::job::Job;
use djm_core::payload;
use djm_core::table::{JobSortKey, ListView};

use crate::render::{cell, colorize_job_status, field, format_time, progress_steps, table_footer};

const ID_WIDTH: usize = 10;
const NAME_WIDTH: usize = 24;
const DESCRIPTION_WIDTH: usize = 28;
const STATUS_WIDTH: usize = 12;
const TIME_WIDTH: usize = 16;

/// Lines of the job table for the current page
pub fn job_table_lines(view: &ListView<Job>) -> Vec<String> {
    let mut lines = Vec::new();
    let header = format!(
        "{} {} {} {} {} {} {}",
        cell("ID", ID_WIDTH),
        cell(&header_label(view, JobSortKey::Name), NAME_WIDTH),
        cell("Description", DESCRIPTION_WIDTH),
        cell(&header_label(view, JobSortKey::Status), STATUS_WIDTH),
        cell(&header_label(view, JobSortKey::ExecutionTime), TIME_WIDTH),
        cell(&header_label(view, JobSortKey::CreatedAt), TIME_WIDTH),
        cell(&header_label(view, JobSortKey::LastUpdated), TIME_WIDTH),
    );
    lines.push(header.bold().to_string());

    if view.is_empty() {
        lines.push("No jobs to display".dimmed().to_string());
    }

    for job in view.page_rows() {
        lines.push(format!(
            "{} {} {} {} {} {} {}",
            cell(&job.job_id, ID_WIDTH).dimmed(),
            cell(&job.job_name, NAME_WIDTH),
            cell(&job.job_description, DESCRIPTION_WIDTH),
            colorize_job_status_cell(job),
            cell(&format_time(job.execution_time), TIME_WIDTH),
            cell(&format_time(job.created_at), TIME_WIDTH),
            cell(&format_time(job.updated_at), TIME_WIDTH),
        ));
    }

    lines.push(
        table_footer(view, view.sort_key().map(|k| k.label()))
            .dimmed()
            .to_string(),
    );
    lines
}

pub fn print_job_table(view: &ListView<Job>) {
    for line in job_table_lines(view) {
        println!("{}", line);
    }
}

fn header_label(view: &ListView<Job>, key: JobSortKey) -> String {
    if view.sort_key() == Some(key) {
        format!("{} *", key.label())
    } else {
        key.label().to_string()
    }
}

fn colorize_job_status_cell(job: &Job) -> String {
    // pad first, the escape codes would otherwise eat into the width
    let padding = STATUS_WIDTH.saturating_sub(job.status.as_str().len());
    format!("{}{}", colorize_job_status(job.status), " ".repeat(padding))
}

/// Lines of the job detail page
pub fn job_detail_lines(job: &Job) -> Vec<String> {
    let mut lines = vec![
        format!("{}  {}", job.job_name.bold(), colorize_job_status(job.status)),
        String::new(),
    ];

    lines.push("Job Details".bold().to_string());
    lines.push(field("Job ID", job.job_id.cyan()));
    lines.push(field("Owner", &job.user_id));
    lines.push(field("Recurrence", job.frequency.as_str()));
    lines.push(field("Next Execution Time", format_time(job.execution_time)));
    if let Some(next) = job.frequency.next_run_after(job.execution_time) {
        lines.push(field("Following Run", format_time(next)));
    }
    lines.push(field(
        "Retries",
        format!("{} of {}", job.retry_count, job.max_retries),
    ));
    lines.push(field("Created At", format_time(job.created_at)));
    lines.push(field("Last Updated", format_time(job.updated_at)));
    if !job.job_description.is_empty() {
        lines.push(field("Description", &job.job_description));
    }
    if !job.job_metadata.is_empty() {
        lines.push(field("Metadata", &job.job_metadata));
    }

    lines.push(String::new());
    lines.push("Progress".bold().to_string());
    lines.extend(
        progress_steps(job.status.progress_step())
            .into_iter()
            .map(|l| format!("  {}", l)),
    );

    lines.push(String::new());
    lines.push("Payload".bold().to_string());
    match payload::code_blocks(&job.payload) {
        Ok(blocks) if !blocks.is_empty() => {
            for block in blocks {
                lines.push(format!("  {}", format!("[{}]", block.language).cyan()));
                lines.extend(block.content.lines().map(|l| format!("    {}", l)));
            }
        }
        _ => lines.extend(job.payload.lines().map(|l| format!("    {}", l))),
    }

    let mut actions = Vec::new();
    if job.can_edit() {
        actions.push("edit");
    }
    if job.can_cancel() {
        actions.push("cancel");
    }
    if !actions.is_empty() {
        lines.push(String::new());
        lines.push(format!("Available actions: {}", actions.join(", ")).dimmed().to_string());
    }

    lines
}

pub fn print_job_detail(job: &Job) {
    for line in job_detail_lines(job) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use djm_core::domain::job::{JobFrequency, JobStatus};

    fn job(id: &str, name: &str, status: JobStatus) -> Job {
        let at = Utc.with_ymd_and_hms(2025, 5, 1, 9, 0, 0).unwrap();
        Job {
            job_id: id.to_string(),
            user_id: "user-1".to_string(),
            job_name: name.to_string(),
            job_description: "sends the digest".to_string(),
            job_metadata: String::new(),
            frequency: JobFrequency::Weekly,
            status,
            payload: "```python\nprint('digest')\n```".to_string(),
            retry_count: 1,
            max_retries: 3,
            execution_time: at,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn test_table_lists_current_page() {
        colored::control::set_override(false);
        let rows: Vec<Job> = (0..12)
            .map(|i| job(&format!("01J{:02}", i), &format!("job {:02}", i), JobStatus::Pending))
            .collect();
        let mut view = ListView::new(rows, 10);
        view.next_page();

        let lines = job_table_lines(&view);
        // header, two rows, footer
        assert_eq!(lines.len(), 4);
        assert!(lines[1].contains("job 10"));
        assert!(lines[3].starts_with("Page 2 of 2"));
    }

    #[test]
    fn test_empty_table() {
        colored::control::set_override(false);
        let view = ListView::<Job>::new(Vec::new(), 10);
        let lines = job_table_lines(&view);
        assert_eq!(lines[1], "No jobs to display");
    }

    #[test]
    fn test_sorted_column_is_marked() {
        colored::control::set_override(false);
        let mut view = ListView::new(vec![job("01J0", "report", JobStatus::Failed)], 10);
        view.sort_by(Some(JobSortKey::Status));
        let header = &job_table_lines(&view)[0];
        assert!(header.contains("Status *"));
        assert!(!header.contains("Name *"));
    }

    #[test]
    fn test_detail_shows_payload_and_actions() {
        colored::control::set_override(false);
        let lines = job_detail_lines(&job("01J0", "digest", JobStatus::Pending));
        assert!(lines.contains(&"  [python]".to_string()));
        assert!(lines.contains(&"    print('digest')".to_string()));
        assert!(lines.iter().any(|l| l.contains("Following Run") && l.contains("2025-05-08")));
        assert_eq!(lines.last().unwrap(), "Available actions: edit, cancel");

        let done = job_detail_lines(&job("01J1", "digest", JobStatus::Completed));
        assert!(!done.iter().any(|l| l.starts_with("Available actions")));
    }
}
