//! Timestamp-derived branch names.
//!
//! A branch is named `<namespace>/<slug>` where the slug is the current
//! instant rendered as `Tue Jan 02 2024 15:04:05 GMT+0000`, lowercased, with
//! every space, colon, parenthesis and period turned into `-`, cut at the
//! `-gmt` zone marker. Whatever survives is filtered to `[a-z0-9-]`.

use chrono::{DateTime, Utc};

/// Characters replaced one-for-one by [`SEPARATOR`]
const REPLACED: [char; 5] = [' ', ':', '(', ')', '.'];
const SEPARATOR: char = '-';
const ZONE_MARKER: &str = "-gmt";

/// Source of the current instant, injectable for tests
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Human-readable rendering the slug is derived from
pub fn render_timestamp(instant: DateTime<Utc>) -> String {
    instant.format("%a %b %d %Y %H:%M:%S GMT%z").to_string()
}

pub fn slugify_timestamp(rendered: &str) -> String {
    let replaced: String = rendered
        .to_lowercase()
        .chars()
        .map(|c| if REPLACED.contains(&c) { SEPARATOR } else { c })
        .collect();

    let truncated = match replaced.find(ZONE_MARKER) {
        Some(index) => &replaced[..index],
        None => replaced.as_str(),
    };

    truncated
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == SEPARATOR)
        .collect()
}

pub fn branch_name(namespace: &str, instant: DateTime<Utc>) -> String {
    format!("{}/{}", namespace, slugify_timestamp(&render_timestamp(instant)))
}
