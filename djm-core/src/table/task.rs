//! Task table columns

use std::cmp::Ordering;

use super::TableRow;
use crate::domain::task::{Task, TaskStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskSortKey {
    Title,
    CreatedAt,
    UpdatedAt,
    Status,
}

impl TaskSortKey {
    pub const ALL: [TaskSortKey; 4] = [
        TaskSortKey::Title,
        TaskSortKey::CreatedAt,
        TaskSortKey::UpdatedAt,
        TaskSortKey::Status,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskSortKey::Title => "title",
            TaskSortKey::CreatedAt => "created-at",
            TaskSortKey::UpdatedAt => "updated-at",
            TaskSortKey::Status => "status",
        }
    }
}

impl std::str::FromStr for TaskSortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "title" => Ok(TaskSortKey::Title),
            "created-at" | "createdat" | "created" => Ok(TaskSortKey::CreatedAt),
            "updated-at" | "updatedat" | "updated" => Ok(TaskSortKey::UpdatedAt),
            "status" => Ok(TaskSortKey::Status),
            _ => Err(format!(
                "unknown sort column '{}' (expected one of: {})",
                s,
                TaskSortKey::ALL.map(|k| k.as_str()).join(", ")
            )),
        }
    }
}

impl TableRow for Task {
    type SortKey = TaskSortKey;
    type Status = TaskStatus;

    fn status(&self) -> TaskStatus {
        self.status
    }

    fn compare(&self, other: &Self, key: TaskSortKey) -> Ordering {
        match key {
            TaskSortKey::Title => self
                .title
                .to_lowercase()
                .cmp(&other.title.to_lowercase())
                .then_with(|| self.title.cmp(&other.title)),
            TaskSortKey::CreatedAt => self.created_at.cmp(&other.created_at),
            TaskSortKey::UpdatedAt => self.updated_at.cmp(&other.updated_at),
            TaskSortKey::Status => self.status.cmp(&other.status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::task::TaskRecurrence;
    use crate::table::ListView;

    fn task(title: &str, status: TaskStatus, created_at: i64) -> Task {
        Task {
            id: format!("task-{}", title),
            title: title.to_string(),
            description: String::new(),
            status,
            recurrence: TaskRecurrence::Once,
            scheduled_time: 0,
            created_at,
            updated_at: created_at + 10,
            version: String::new(),
        }
    }

    #[test]
    fn test_title_sort_ignores_case() {
        let mut view = ListView::new(
            vec![
                task("beta", TaskStatus::Pending, 3),
                task("Alpha", TaskStatus::Completed, 2),
                task("gamma", TaskStatus::Failed, 1),
            ],
            10,
        );
        view.sort_by(Some(TaskSortKey::Title));
        let titles: Vec<&str> = view.page_rows().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_status_sort_is_numeric() {
        let mut view = ListView::new(
            vec![
                task("a", TaskStatus::Cancelled, 1),
                task("b", TaskStatus::Pending, 2),
                task("c", TaskStatus::Failed, 3),
            ],
            10,
        );
        view.sort_by(Some(TaskSortKey::Status));
        let statuses: Vec<TaskStatus> = view.page_rows().iter().map(|t| t.status).collect();
        assert_eq!(
            statuses,
            vec![TaskStatus::Pending, TaskStatus::Failed, TaskStatus::Cancelled]
        );
    }

    #[test]
    fn test_filter_by_task_status() {
        let mut view = ListView::new(
            vec![
                task("a", TaskStatus::Pending, 1),
                task("b", TaskStatus::Completed, 2),
                task("c", TaskStatus::Pending, 3),
            ],
            10,
        );
        view.filter_status(Some(TaskStatus::Pending)).unwrap();
        assert_eq!(view.visible_len(), 2);
        assert!(view.filter_status(Some(TaskStatus::Failed)).is_err());
    }
}
