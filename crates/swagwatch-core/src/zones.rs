//! Fixed table of US time zones, resolved from the abbreviations used in
//! announcement text.
//!
//! An abbreviation selects a zone, not an offset: `PST` in July resolves to
//! Pacific daylight time. Daylight time follows the US rule in force since
//! 2007, from the second Sunday of March at 02:00 local to the first Sunday of
//! November at 02:00 local.

use chrono::{
    DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc, Weekday,
};

/// Zone the expiry time is converted into for display.
pub const DISPLAY_ZONE: UsTimeZone = UsTimeZone::Central;

const SECS_PER_HOUR: i32 = 3600;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsTimeZone {
    Eastern,
    Central,
    Mountain,
    Pacific,
}

impl UsTimeZone {
    /// Resolves a zone abbreviation (`PDT`, `cst`, `ET`, ...). Case-insensitive.
    #[must_use]
    pub fn from_abbreviation(abbreviation: &str) -> Option<Self> {
        match abbreviation.trim().to_ascii_uppercase().as_str() {
            "EST" | "EDT" | "ET" => Some(Self::Eastern),
            "CST" | "CDT" | "CT" => Some(Self::Central),
            "MST" | "MDT" | "MT" => Some(Self::Mountain),
            "PST" | "PDT" | "PT" => Some(Self::Pacific),
            _ => None,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Eastern => "Eastern",
            Self::Central => "Central",
            Self::Mountain => "Mountain",
            Self::Pacific => "Pacific",
        }
    }

    fn standard_hours(self) -> i32 {
        match self {
            Self::Eastern => -5,
            Self::Central => -6,
            Self::Mountain => -7,
            Self::Pacific => -8,
        }
    }

    fn abbreviations(self) -> (&'static str, &'static str) {
        match self {
            Self::Eastern => ("EST", "EDT"),
            Self::Central => ("CST", "CDT"),
            Self::Mountain => ("MST", "MDT"),
            Self::Pacific => ("PST", "PDT"),
        }
    }

    /// # Panics
    ///
    /// Does not panic: every zone's offset is well inside ±24h.
    #[must_use]
    pub fn standard_offset(self) -> FixedOffset {
        FixedOffset::east_opt(self.standard_hours() * SECS_PER_HOUR)
            .expect("US standard offsets are within range")
    }

    /// # Panics
    ///
    /// Does not panic: every zone's offset is well inside ±24h.
    #[must_use]
    pub fn daylight_offset(self) -> FixedOffset {
        FixedOffset::east_opt((self.standard_hours() + 1) * SECS_PER_HOUR)
            .expect("US daylight offsets are within range")
    }

    /// Offset in effect at `instant`.
    #[must_use]
    pub fn offset_at(self, instant: DateTime<Utc>) -> FixedOffset {
        let standard = self.standard_offset();
        let daylight = self.daylight_offset();
        let year = instant.with_timezone(&standard).year();
        let Some((start, end)) = daylight_bounds(year) else {
            return standard;
        };

        let utc = instant.naive_utc();
        let start_utc = start - TimeDelta::seconds(i64::from(standard.local_minus_utc()));
        let end_utc = end - TimeDelta::seconds(i64::from(daylight.local_minus_utc()));
        if utc >= start_utc && utc < end_utc {
            daylight
        } else {
            standard
        }
    }

    /// Offset for a wall-clock time in this zone.
    ///
    /// The repeated hour in November resolves to daylight time; the skipped
    /// hour in March resolves to daylight time as well.
    #[must_use]
    pub fn offset_for_local(self, local: NaiveDateTime) -> FixedOffset {
        match daylight_bounds(local.year()) {
            Some((start, end)) if local >= start && local < end => self.daylight_offset(),
            _ => self.standard_offset(),
        }
    }

    /// Attaches this zone's offset to a wall-clock time.
    #[must_use]
    pub fn localize(self, local: NaiveDateTime) -> DateTime<FixedOffset> {
        let offset = self.offset_for_local(local);
        let utc = local - TimeDelta::seconds(i64::from(offset.local_minus_utc()));
        DateTime::from_naive_utc_and_offset(utc, offset)
    }

    /// `instant` as wall-clock time in this zone.
    #[must_use]
    pub fn to_local(self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        instant.with_timezone(&self.offset_at(instant))
    }

    /// Abbreviation matching `offset`; falls back to the standard abbreviation
    /// for offsets that belong to neither variant.
    #[must_use]
    pub fn abbreviation_for(self, offset: FixedOffset) -> &'static str {
        let (standard, daylight) = self.abbreviations();
        if offset == self.daylight_offset() {
            daylight
        } else {
            standard
        }
    }
}

/// Local wall-clock instants bounding daylight time in `year`.
fn daylight_bounds(year: i32) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let two_am = NaiveTime::from_hms_opt(2, 0, 0)?;
    let start = NaiveDate::from_weekday_of_month_opt(year, 3, Weekday::Sun, 2)?.and_time(two_am);
    let end = NaiveDate::from_weekday_of_month_opt(year, 11, Weekday::Sun, 1)?.and_time(two_am);
    Some((start, end))
}
