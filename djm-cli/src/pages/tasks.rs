//! Task list and task detail pages

use colored::*;
use djm_core::domain::task::Task;
use djm_core::table::{ListView, TaskSortKey};

use crate::render::{
    cell, colorize_task_status, field, format_optional_time, progress_steps, table_footer,
};

const ID_WIDTH: usize = 36;
const TITLE_WIDTH: usize = 28;
const STATUS_WIDTH: usize = 12;
const TIME_WIDTH: usize = 16;

pub fn task_table_lines(view: &ListView<Task>) -> Vec<String> {
    let mut lines = vec![
        format!(
            "{} {} {} {} {}",
            cell("Task ID", ID_WIDTH),
            cell("Title", TITLE_WIDTH),
            cell("Status", STATUS_WIDTH),
            cell("Created At", TIME_WIDTH),
            cell("Updated At", TIME_WIDTH),
        )
        .bold()
        .to_string(),
    ];

    if view.is_empty() {
        lines.push("No tasks to display".dimmed().to_string());
    }

    for task in view.page_rows() {
        let padding = STATUS_WIDTH.saturating_sub(task.status.label().len());
        lines.push(format!(
            "{} {} {}{} {} {}",
            cell(&task.id, ID_WIDTH).dimmed(),
            cell(&task.title, TITLE_WIDTH),
            colorize_task_status(task.status),
            " ".repeat(padding),
            cell(&format_optional_time(task.created()), TIME_WIDTH),
            cell(&format_optional_time(task.updated()), TIME_WIDTH),
        ));
    }

    lines.push(
        table_footer(view, view.sort_key().map(sort_label))
            .dimmed()
            .to_string(),
    );
    lines
}

pub fn print_task_table(view: &ListView<Task>) {
    for line in task_table_lines(view) {
        println!("{}", line);
    }
}

fn sort_label(key: TaskSortKey) -> &'static str {
    match key {
        TaskSortKey::Title => "Title",
        TaskSortKey::CreatedAt => "Created At",
        TaskSortKey::UpdatedAt => "Updated At",
        TaskSortKey::Status => "Status",
    }
}

pub fn task_detail_lines(task: &Task) -> Vec<String> {
    let mut lines = vec![format!(
        "{}  {}",
        task.title.bold(),
        colorize_task_status(task.status)
    )];
    if !task.description.is_empty() {
        lines.push(task.description.clone());
    }
    lines.push(String::new());

    lines.push("Task Details".bold().to_string());
    lines.push(field("Task ID", task.id.cyan()));
    lines.push(field("Recurrence", task.recurrence));
    lines.push(field(
        "Next Execution Time",
        format_optional_time(task.scheduled_at()),
    ));
    lines.push(field("Created At", format_optional_time(task.created())));
    lines.push(field("Updated At", format_optional_time(task.updated())));

    lines.push(String::new());
    lines.push("Progress".bold().to_string());
    lines.extend(
        progress_steps(task.status.progress_step())
            .into_iter()
            .map(|l| format!("  {}", l)),
    );

    if task.can_edit() {
        lines.push(String::new());
        lines.push("Available actions: edit".dimmed().to_string());
    }
    lines
}

pub fn print_task_detail(task: &Task) {
    for line in task_detail_lines(task) {
        println!("{}", line);
    }
}
