//! Extraction of the reward amount, expiry and page URL from announcement text.
//!
//! Announcements follow a fixed sentence shape, e.g.
//! `It's worth 5 SBs and expires at 07:30 PM PDT. Get it here: https://t.co/x`.
//! The pattern lives behind [`AnnouncementParser`] so it can be replaced
//! without touching callers.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveTime, Utc};
use regex::{Captures, Regex};
use swagwatch_core::{ParsedReward, UsTimeZone, DISPLAY_ZONE};

use crate::error::ParseError;

/// Default reward pattern. Custom patterns must define the same named groups.
pub const DEFAULT_REWARD_PATTERN: &str = r"(?s)\b(?P<amount>\d+)\s*(?i:sbs?)\b.*?(?i:expires?\s+at)\s+(?P<hour>\d{1,2}):(?P<minute>\d{2})\s*(?P<meridiem>[AaPp][Mm])\s+(?P<zone>[A-Za-z]{2,4})\b";

const REQUIRED_GROUPS: [&str; 5] = ["amount", "hour", "minute", "meridiem", "zone"];

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://[^\s<>]+").expect("valid url regex"));

static DEFAULT_PARSER: LazyLock<PatternParser> = LazyLock::new(PatternParser::default);

pub trait AnnouncementParser: Send + Sync {
    /// Extracts the reward amount and expiry, resolving the expiry's missing
    /// date to "today" in the announced zone as of `now`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] when the text does not match, the amount is not
    /// positive, the time is not a valid 12-hour clock time, or the zone
    /// abbreviation is unknown. No partial results.
    fn parse_reward(&self, text: &str, now: DateTime<Utc>) -> Result<ParsedReward, ParseError>;

    /// Extracts the companion page URL: the first http(s) URL after the
    /// reward clause, or anywhere in the text when the clause is absent.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingUrl`] if the text carries no http(s) URL.
    fn page_url(&self, text: &str) -> Result<String, ParseError>;
}

/// Regex-backed [`AnnouncementParser`].
#[derive(Debug, Clone)]
pub struct PatternParser {
    reward: Regex,
}

impl Default for PatternParser {
    fn default() -> Self {
        Self {
            reward: Regex::new(DEFAULT_REWARD_PATTERN).expect("valid default reward pattern"),
        }
    }
}

impl PatternParser {
    /// Builds a parser from a custom reward pattern.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidPattern`] if the pattern does not compile
    /// or lacks one of the `amount`, `hour`, `minute`, `meridiem`, `zone`
    /// named groups.
    pub fn with_pattern(pattern: &str) -> Result<Self, ParseError> {
        let reward = Regex::new(pattern).map_err(|e| ParseError::InvalidPattern(e.to_string()))?;
        let names: Vec<&str> = reward.capture_names().flatten().collect();
        if let Some(missing) = REQUIRED_GROUPS.iter().find(|g| !names.contains(g)) {
            return Err(ParseError::InvalidPattern(format!(
                "missing named group `{missing}`"
            )));
        }
        Ok(Self { reward })
    }
}

fn group<'t>(caps: &Captures<'t>, name: &str) -> Result<&'t str, ParseError> {
    caps.name(name)
        .map(|m| m.as_str())
        .ok_or(ParseError::NoMatch)
}

impl AnnouncementParser for PatternParser {
    fn parse_reward(&self, text: &str, now: DateTime<Utc>) -> Result<ParsedReward, ParseError> {
        let caps = self.reward.captures(text).ok_or(ParseError::NoMatch)?;

        let raw_amount = group(&caps, "amount")?;
        let amount = raw_amount
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| ParseError::InvalidAmount(raw_amount.to_string()))?;

        let raw_hour = group(&caps, "hour")?;
        let raw_minute = group(&caps, "minute")?;
        let meridiem = group(&caps, "meridiem")?;
        let invalid_time =
            || ParseError::InvalidTime(format!("{raw_hour}:{raw_minute} {meridiem}"));

        let hour = raw_hour.parse::<u32>().map_err(|_| invalid_time())?;
        let minute = raw_minute.parse::<u32>().map_err(|_| invalid_time())?;
        if !(1..=12).contains(&hour) {
            return Err(invalid_time());
        }
        let is_pm = meridiem.eq_ignore_ascii_case("pm");
        let hour24 = match (hour, is_pm) {
            (12, false) => 0,
            (12, true) => 12,
            (h, false) => h,
            (h, true) => h + 12,
        };
        let time = NaiveTime::from_hms_opt(hour24, minute, 0).ok_or_else(invalid_time)?;

        let raw_zone = group(&caps, "zone")?;
        let zone = UsTimeZone::from_abbreviation(raw_zone)
            .ok_or_else(|| ParseError::UnknownTimeZone(raw_zone.to_string()))?;

        // The text has no date; near midnight this can land on the wrong day.
        let today = zone.to_local(now).date_naive();
        let expires_in_source = zone.localize(today.and_time(time));
        let expires_at = DISPLAY_ZONE.to_local(expires_in_source.with_timezone(&Utc));

        tracing::debug!(
            amount,
            source_zone = zone.name(),
            expires_at = %expires_at,
            "parsed announcement reward"
        );

        Ok(ParsedReward { amount, expires_at })
    }

    fn page_url(&self, text: &str) -> Result<String, ParseError> {
        let start = self.reward.find(text).map_or(0, |m| m.end());
        URL_RE
            .find_at(text, start)
            .map(|m| {
                m.as_str()
                    .trim_end_matches(['.', ',', ')', '!', '?', ';'])
                    .to_string()
            })
            .filter(|url| !url.ends_with("://"))
            .ok_or(ParseError::MissingUrl)
    }
}

/// Parses `text` with the default pattern.
///
/// # Errors
///
/// See [`AnnouncementParser::parse_reward`].
pub fn parse_reward(text: &str, now: DateTime<Utc>) -> Result<ParsedReward, ParseError> {
    DEFAULT_PARSER.parse_reward(text, now)
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
