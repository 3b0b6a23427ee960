//! Parsing of interactive answers and time arguments

use std::io::Write;

use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};

/// Whether an answer to a y/N question means yes
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Ask a y/N question on the terminal; anything but yes declines
pub fn confirm(question: &str) -> anyhow::Result<bool> {
    print!("{} [y/N] ", question);
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(is_affirmative(&answer))
}

/// Parse a point in time given on the command line
///
/// Accepts RFC 3339 (`2025-06-01T09:00:00Z`), a UTC wall clock time
/// (`2025-06-01 09:00`), or an offset from `now` such as `+30m`, `+2h`,
/// `+1d` or `+1w`.
pub fn parse_time(input: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>, String> {
    let input = input.trim();

    if let Some(offset) = input.strip_prefix('+') {
        return parse_offset(offset)?
            .and_then(|d| now.checked_add_signed(d))
            .ok_or_else(|| format!("offset '+{}' is too large", offset));
    }

    if let Ok(time) = DateTime::parse_from_rfc3339(input) {
        return Ok(time.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(naive.and_utc());
        }
    }

    Err(format!(
        "invalid time '{}' (expected RFC 3339, 'YYYY-MM-DD HH:MM' or an offset like +2h)",
        input
    ))
}

/// Amount and unit of an offset; `None` when it does not fit a timestamp
fn parse_offset(offset: &str) -> Result<Option<TimeDelta>, String> {
    let split = offset
        .find(|c: char| !c.is_ascii_digit())
        .ok_or_else(|| format!("offset '+{}' has no unit", offset))?;
    let (amount, unit) = offset.split_at(split);
    let amount: i64 = amount
        .parse()
        .map_err(|_| format!("offset '+{}' has no amount", offset))?;

    match unit {
        "m" | "min" => Ok(TimeDelta::try_minutes(amount)),
        "h" => Ok(TimeDelta::try_hours(amount)),
        "d" => Ok(TimeDelta::try_days(amount)),
        "w" => Ok(TimeDelta::try_weeks(amount)),
        other => Err(format!("unknown offset unit '{}' (use m, h, d or w)", other)),
    }
}
