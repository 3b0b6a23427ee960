//! Common types used across CLI modules

use uuid::Uuid;

/// Length of a ULID in its canonical Crockford base32 form
const ULID_LEN: usize = 26;

/// Identifier that can be either a full ID or an unambiguous prefix
///
/// Jobs are keyed by ULIDs. Tasks carry UUIDs (with or without hyphens) or
/// nanoids. Full IDs are kept exactly as typed since the server looks them
/// up verbatim; anything else is resolved against the list endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdOrPrefix {
    /// Full ULID or UUID
    Full(String),
    /// Prefix that should uniquely identify a resource
    Prefix(String),
}

impl IdOrPrefix {
    /// Parse a string into an IdOrPrefix
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if is_uuid(input) || is_canonical_ulid(input) {
            IdOrPrefix::Full(input.to_string())
        } else {
            IdOrPrefix::Prefix(input.to_string())
        }
    }

    /// Get the ID if this is a full ID
    pub fn as_full(&self) -> Option<&str> {
        match self {
            IdOrPrefix::Full(id) => Some(id),
            IdOrPrefix::Prefix(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            IdOrPrefix::Full(id) | IdOrPrefix::Prefix(id) => id,
        }
    }

    /// Exact prefix match against a full ID
    pub fn matches(&self, id: &str) -> bool {
        id.starts_with(self.as_str())
    }

    /// Case-insensitive prefix match, for ULIDs
    pub fn matches_ignore_case(&self, id: &str) -> bool {
        id.to_uppercase().starts_with(&self.as_str().to_uppercase())
    }
}

impl std::fmt::Display for IdOrPrefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for IdOrPrefix {
    fn from(s: &str) -> Self {
        IdOrPrefix::parse(s)
    }
}

/// Hyphenated or simple (32 hex digit) UUID
fn is_uuid(input: &str) -> bool {
    matches!(input.len(), 32 | 36) && Uuid::parse_str(input).is_ok()
}

/// ULID in its canonical uppercase form; lowercase ones are resolved by prefix
fn is_canonical_ulid(input: &str) -> bool {
    // Crockford base32 excludes I, L, O and U
    input.len() == ULID_LEN
        && input.chars().all(|c| {
            (c.is_ascii_digit() || c.is_ascii_uppercase()) && !matches!(c, 'I' | 'L' | 'O' | 'U')
        })
}
