//! One-line notifications
//!
//! Outcomes of mutations and failed queries are reported as short colored
//! lines. Failures go to stderr so they never mix with table output.

use colored::*;
use djm_client::ClientError;
use djm_core::form::FormErrors;

pub fn success(message: impl AsRef<str>) {
    println!("{} {}", "✓".green().bold(), message.as_ref().green());
}

pub fn info(message: impl AsRef<str>) {
    println!("{} {}", "ℹ".cyan(), message.as_ref());
}

pub fn warn(message: impl AsRef<str>) {
    eprintln!("{} {}", "⚠".yellow(), message.as_ref().yellow());
}

pub fn error(message: impl AsRef<str>) {
    eprintln!("{} {}", "✗".red().bold(), message.as_ref().red());
}

/// Report an error from any layer, with the most specific wording available
///
/// Rejected forms list every field message.
pub fn report(err: &anyhow::Error) {
    match err.downcast_ref::<FormErrors>() {
        Some(errors) => form_errors(errors),
        None => error(describe(err)),
    }
}

/// Print every field message of a rejected form
pub fn form_errors(errors: &FormErrors) {
    error("Please fix the following:");
    for field_error in errors.errors() {
        eprintln!("  {} {}", "•".red(), field_error.message);
    }
}

fn describe(err: &anyhow::Error) -> String {
    match err.downcast_ref::<ClientError>() {
        Some(ClientError::ApiError { message, .. }) => message.clone(),
        Some(ClientError::NotFound(message)) => format!("not found ({})", message),
        _ => format!("{:#}", err),
    }
}
