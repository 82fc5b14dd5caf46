use std::fmt;

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use crate::zones::DISPLAY_ZONE;

/// A post announcing a new swag code, as received from the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    /// Feed-assigned post id. Empty when the feed omits it.
    #[serde(default)]
    pub id: String,
    pub raw_text: String,
    pub posted_at: DateTime<Utc>,
}

/// Reward amount and expiry extracted from an announcement's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedReward {
    /// Reward in SB points. Always greater than zero.
    pub amount: u32,
    /// Expiry instant, expressed in [`DISPLAY_ZONE`].
    pub expires_at: DateTime<FixedOffset>,
}

impl ParsedReward {
    /// Expiry as a 12-hour clock string, e.g. `09:30 PM`.
    #[must_use]
    pub fn expiry_clock(&self) -> String {
        self.expires_at.format("%I:%M %p").to_string()
    }

    /// `CDT` or `CST`, depending on the offset the expiry resolved to.
    #[must_use]
    pub fn expiry_zone_abbreviation(&self) -> &'static str {
        DISPLAY_ZONE.abbreviation_for(*self.expires_at.offset())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwagCodeKind {
    /// The value is the redeemable code itself.
    Direct,
    /// The value is a URL that grants the reward when visited.
    Link,
}

impl fmt::Display for SwagCodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwagCodeKind::Direct => write!(f, "direct"),
            SwagCodeKind::Link => write!(f, "link"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwagCode {
    pub kind: SwagCodeKind,
    pub value: String,
}

impl SwagCode {
    #[must_use]
    pub fn direct(value: impl Into<String>) -> Self {
        Self {
            kind: SwagCodeKind::Direct,
            value: value.into(),
        }
    }

    #[must_use]
    pub fn link(url: impl Into<String>) -> Self {
        Self {
            kind: SwagCodeKind::Link,
            value: url.into(),
        }
    }
}

/// Everything the notification email is rendered from. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationPayload {
    pub reward: ParsedReward,
    pub code: SwagCode,
}
