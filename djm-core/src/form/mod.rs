//! Form validation
//!
//! Forms hold raw user input and turn it into request bodies. Validation
//! collects every field problem at once so a page can show them together.

mod job;
mod task;

pub use job::JobForm;
pub use task::TaskForm;

use chrono::{DateTime, Utc};

pub const NAME_MIN_LEN: usize = 3;
pub const NAME_MAX_LEN: usize = 100;
pub const DESCRIPTION_MAX_LEN: usize = 500;
pub const MAX_RETRIES_LIMIT: u32 = 10;

/// A validation message attached to one form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Every problem found while validating a form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    errors: Vec<FieldError>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(field, message);
        errors
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// First message for `field`, if any
    pub fn for_field(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// `Ok(value)` when nothing was recorded
    pub fn into_result<T>(self, value: T) -> Result<T, FormErrors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl std::fmt::Display for FormErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let lines: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "{}", lines.join("; "))
    }
}

impl std::error::Error for FormErrors {}

/// Trimmed name, or the message to show under the field
pub(crate) fn check_name(label: &str, value: &str) -> Result<String, String> {
    let trimmed = value.trim();
    let len = trimmed.chars().count();
    if len < NAME_MIN_LEN {
        return Err(format!(
            "{} must be at least {} characters",
            label, NAME_MIN_LEN
        ));
    }
    if len > NAME_MAX_LEN {
        return Err(format!(
            "{} must be at most {} characters",
            label, NAME_MAX_LEN
        ));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn check_future(
    label: &str,
    value: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<DateTime<Utc>, String> {
    if value <= now {
        return Err(format!("{} must be in the future", label));
    }
    Ok(value)
}
