//! Task edit form

use chrono::{DateTime, Utc};

use super::{FormErrors, check_future, check_name};
use crate::domain::task::{Task, TaskRecurrence};

/// Optional edits to a task; empty inputs keep the existing values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskForm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub recurrence: Option<TaskRecurrence>,
    pub scheduled_time: Option<DateTime<Utc>>,
}

impl TaskForm {
    /// Merge the form over `task`, producing the full record to `PUT`
    pub fn apply(&self, task: &Task, now: DateTime<Utc>) -> Result<Task, FormErrors> {
        let mut errors = FormErrors::new();
        let mut merged = task.clone();

        if let Some(title) = non_blank(&self.title) {
            match check_name("Title", title) {
                Ok(title) => merged.title = title,
                Err(msg) => errors.push("title", msg),
            }
        }
        if let Some(description) = non_blank(&self.description) {
            merged.description = description.trim().to_string();
        }
        if let Some(recurrence) = self.recurrence {
            merged.recurrence = recurrence;
        }
        if let Some(time) = self.scheduled_time {
            match check_future("Scheduled time", time, now) {
                Ok(time) => merged.scheduled_time = time.timestamp(),
                Err(msg) => errors.push("scheduled_time", msg),
            }
        }

        errors.into_result(merged)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::task::TaskStatus;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 4, 1, 8, 0, 0).unwrap()
    }

    fn task() -> Task {
        Task {
            id: "t-1".to_string(),
            title: "backup".to_string(),
            description: "nightly backup".to_string(),
            status: TaskStatus::Pending,
            recurrence: TaskRecurrence::Daily,
            scheduled_time: 1_700_000_000,
            created_at: 1_600_000_000,
            updated_at: 1_600_000_000,
            version: "3".to_string(),
        }
    }

    #[test]
    fn test_blank_inputs_keep_existing_values() {
        let form = TaskForm {
            title: Some("   ".to_string()),
            description: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(form.apply(&task(), now()).unwrap(), task());
    }

    #[test]
    fn test_inputs_override_and_time_becomes_unix_seconds() {
        let when = now() + Duration::days(1);
        let form = TaskForm {
            title: Some("weekly backup".to_string()),
            recurrence: Some(TaskRecurrence::Weekly),
            scheduled_time: Some(when),
            ..Default::default()
        };
        let merged = form.apply(&task(), now()).unwrap();
        assert_eq!(merged.title, "weekly backup");
        assert_eq!(merged.recurrence, TaskRecurrence::Weekly);
        assert_eq!(merged.scheduled_time, when.timestamp());
        assert_eq!(merged.version, "3");
    }

    #[test]
    fn test_short_title_and_past_time_are_rejected() {
        let form = TaskForm {
            title: Some("ab".to_string()),
            scheduled_time: Some(now() - Duration::hours(1)),
            ..Default::default()
        };
        let errors = form.apply(&task(), now()).unwrap_err();
        assert_eq!(
            errors.for_field("title"),
            Some("Title must be at least 3 characters")
        );
        assert!(errors.for_field("scheduled_time").is_some());
    }
}
