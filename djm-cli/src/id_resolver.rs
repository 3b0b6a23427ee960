//! ID resolver module
//!
//! Handles resolution of ID prefixes to full IDs by querying the API.
//! This allows users to specify short, unambiguous prefixes instead of full
//! IDs. Job ULIDs match regardless of case; task IDs match exactly.

use anyhow::{Context, Result, anyhow};
use djm_client::CachedClient;

use crate::types::IdOrPrefix;

/// Resolve a job ID or prefix to a full job ID
///
/// If the input is already a full ID, returns it immediately.
/// Otherwise, fetches the job list and finds the one matching the prefix.
///
/// # Errors
/// Returns an error if:
/// - No job matches the prefix
/// - Multiple jobs match the prefix (ambiguous)
/// - API call fails
pub async fn resolve_job_id(client: &mut CachedClient, id_or_prefix: &IdOrPrefix) -> Result<String> {
    if let Some(id) = id_or_prefix.as_full() {
        return Ok(id.to_string());
    }

    let jobs = client
        .jobs()
        .await
        .context("Failed to fetch jobs for ID resolution")?;

    pick_unique(
        "job",
        jobs.iter().map(|j| j.job_id.as_str()),
        id_or_prefix,
        IdOrPrefix::matches_ignore_case,
    )
}

/// Resolve a task ID or prefix to a full task ID
pub async fn resolve_task_id(
    client: &mut CachedClient,
    id_or_prefix: &IdOrPrefix,
) -> Result<String> {
    if let Some(id) = id_or_prefix.as_full() {
        return Ok(id.to_string());
    }

    let tasks = client
        .tasks()
        .await
        .context("Failed to fetch tasks for ID resolution")?;

    pick_unique(
        "task",
        tasks.iter().map(|t| t.id.as_str()),
        id_or_prefix,
        IdOrPrefix::matches,
    )
}

fn pick_unique<'a>(
    kind: &str,
    ids: impl Iterator<Item = &'a str>,
    id_or_prefix: &IdOrPrefix,
    is_match: fn(&IdOrPrefix, &str) -> bool,
) -> Result<String> {
    let matches: Vec<&str> = ids.filter(|id| is_match(id_or_prefix, id)).collect();

    match matches.as_slice() {
        [] => Err(anyhow!(
            "No {} found with ID starting with '{}'",
            kind,
            id_or_prefix
        )),
        [id] => Ok((*id).to_string()),
        _ => Err(anyhow!(
            "Ambiguous prefix '{}' matches multiple {}s: {}",
            id_or_prefix,
            kind,
            matches.join(", ")
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IDS: [&str; 3] = [
        "01HZX3J8Q5V7N2K4M6P8R0T2W4",
        "01HZX9A1B2C3D4E5F6G7H8J9K0",
        "01J0000000000000000000000A",
    ];

    #[test]
    fn test_unique_prefix() {
        let id = pick_unique(
            "job",
            IDS.into_iter(),
            &IdOrPrefix::parse("01j"),
            IdOrPrefix::matches_ignore_case,
        )
        .unwrap();
        assert_eq!(id, IDS[2]);
    }

    #[test]
    fn test_ambiguous_prefix() {
        let err = pick_unique(
            "job",
            IDS.into_iter(),
            &IdOrPrefix::parse("01HZX"),
            IdOrPrefix::matches_ignore_case,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Ambiguous prefix '01HZX'"));
        assert!(err.to_string().contains(IDS[0]));
    }

    #[test]
    fn test_no_match() {
        let err = pick_unique("task", IDS.into_iter(), &IdOrPrefix::parse("zz"), IdOrPrefix::matches)
            .unwrap_err();
        assert_eq!(err.to_string(), "No task found with ID starting with 'zz'");
    }

    #[test]
    fn test_task_ids_differing_in_case_are_distinct() {
        let ids = ["aB3xK9_pQ2mN7vR4tY8wZ", "Ab3xK9_pQ2mN7vR4tY8wZ"];
        let id = pick_unique(
            "task",
            ids.into_iter(),
            &IdOrPrefix::parse("aB3"),
            IdOrPrefix::matches,
        )
        .unwrap();
        assert_eq!(id, ids[0]);
    }
}
