use crate::activity::types::Commit;
use crate::github::types::CommitWire;
use chrono::{DateTime, NaiveDateTime, Utc};

pub const SHORT_HASH_LEN: usize = 7;
const WIRE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

pub fn short_hash(sha: &str) -> String {
    sha.chars().take(SHORT_HASH_LEN).collect()
}

pub fn first_line(message: &str) -> &str {
    message.split('\n').next().unwrap_or("")
}

/// Parses the host's `YYYY-MM-DDTHH:MM:SSZ` timestamps, accepting any
/// RFC 3339 offset as a fallback.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, WIRE_TIME_FORMAT)
        .map(|naive| naive.and_utc())
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.with_timezone(&Utc)))
        .ok()
}

/// `Today`, `Yesterday` or the ISO date, then the UTC wall-clock time.
pub fn display_timestamp(ts: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let date = ts.date_naive();
    let today = now.date_naive();
    let label = if date == today {
        "Today".to_string()
    } else if today.pred_opt() == Some(date) {
        "Yesterday".to_string()
    } else {
        date.format("%Y-%m-%d").to_string()
    };
    format!("{label}, {}", ts.format("%H:%M:%S (UTC)"))
}

/// Builds a [`Commit`] from its wire form. `None` when the timestamp is
/// missing or unreadable.
pub fn normalize_commit(wire: &CommitWire, branch: &str, now: DateTime<Utc>) -> Option<Commit> {
    let author = wire.commit.author.as_ref()?;
    let timestamp = parse_timestamp(&author.date)?;
    Some(Commit {
        hash: short_hash(&wire.sha),
        message: first_line(&wire.commit.message).to_string(),
        author: author.name.clone(),
        timestamp,
        date: display_timestamp(timestamp, now),
        branch: branch.to_string(),
        is_also_on_main: None,
    })
}
