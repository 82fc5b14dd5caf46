//! Sample notification payloads for `swagwatch preview`.

use chrono::{DateTime, TimeDelta, Utc};
use swagwatch_core::{NotificationPayload, ParsedReward, SwagCode, DISPLAY_ZONE};

pub(crate) const SAMPLE_CODE: &str = "FREETEST123";

/// Builds a payload expiring one hour after `now`.
///
/// `link` wins over `code`; with neither, [`SAMPLE_CODE`] is used as a direct code.
pub(crate) fn sample_payload(
    link: Option<&str>,
    code: Option<&str>,
    amount: u32,
    now: DateTime<Utc>,
) -> NotificationPayload {
    let code = match (link, code) {
        (Some(url), _) => SwagCode::link(url),
        (None, Some(code)) => SwagCode::direct(code),
        (None, None) => SwagCode::direct(SAMPLE_CODE),
    };
    NotificationPayload {
        reward: ParsedReward {
            amount,
            expires_at: DISPLAY_ZONE.to_local(now + TimeDelta::hours(1)),
        },
        code,
    }
}
