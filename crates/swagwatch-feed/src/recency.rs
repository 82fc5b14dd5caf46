//! Recency window over announcements.

use chrono::{DateTime, TimeDelta, Utc};
use swagwatch_core::Announcement;

/// Returns the announcements posted within `[now - window_minutes, now]`,
/// in input order.
///
/// Both ends are inclusive. Posts timestamped after `now` are excluded.
#[must_use]
pub fn filter_recent(
    announcements: &[Announcement],
    window_minutes: u32,
    now: DateTime<Utc>,
) -> Vec<Announcement> {
    let window = TimeDelta::minutes(i64::from(window_minutes));
    let oldest = now - window;
    announcements
        .iter()
        .filter(|a| a.posted_at >= oldest && a.posted_at <= now)
        .cloned()
        .collect()
}

/// [`filter_recent`] against the current time, captured once.
#[must_use]
pub fn recent_within(announcements: &[Announcement], window_minutes: u32) -> Vec<Announcement> {
    filter_recent(announcements, window_minutes, Utc::now())
}
