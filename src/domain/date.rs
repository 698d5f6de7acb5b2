//! Unix timestamp arithmetic and formatting
//!
//! Timestamps are whole seconds since 1970-01-01T00:00:00Z. Fixed-length
//! units (seconds through weeks) are plain integer arithmetic on the
//! timestamp. Months and years go through the calendar: the day of month is
//! clamped to the length of the target month, so Jan 31 + 1 month is Feb 28
//! (or Feb 29 in a leap year).
//!
//! Because day and week steps are exact multiples of 86 400 seconds in UTC,
//! a caller reading the result in a local zone will see the wall-clock time
//! shift by the DST offset when the step crosses a transition.

use std::fmt::{self, Write as _};
use std::str::FromStr;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, Months, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::error::UtilError;

/// Default rendering: `YYYY-MM-DD HH:MM:SS`
pub const DEFAULT_FORMAT: &str = "%F %T";

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;
const SECONDS_PER_WEEK: i64 = 7 * SECONDS_PER_DAY;

/// Naive date-time layouts accepted by [`epoch`], tried in order
const DATETIME_LAYOUTS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

const DATE_LAYOUTS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Zone used to read naive input and render output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tz {
    #[default]
    Utc,
    Local,
}

/// Unit of a date offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
    Weeks,
    Months,
    Years,
}

impl DateUnit {
    pub const ALL: [DateUnit; 7] = [
        DateUnit::Seconds,
        DateUnit::Minutes,
        DateUnit::Hours,
        DateUnit::Days,
        DateUnit::Weeks,
        DateUnit::Months,
        DateUnit::Years,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DateUnit::Seconds => "seconds",
            DateUnit::Minutes => "minutes",
            DateUnit::Hours => "hours",
            DateUnit::Days => "days",
            DateUnit::Weeks => "weeks",
            DateUnit::Months => "months",
            DateUnit::Years => "years",
        }
    }

    /// Length in seconds, or `None` for calendar units
    fn fixed_seconds(self) -> Option<i64> {
        match self {
            DateUnit::Seconds => Some(1),
            DateUnit::Minutes => Some(SECONDS_PER_MINUTE),
            DateUnit::Hours => Some(SECONDS_PER_HOUR),
            DateUnit::Days => Some(SECONDS_PER_DAY),
            DateUnit::Weeks => Some(SECONDS_PER_WEEK),
            DateUnit::Months | DateUnit::Years => None,
        }
    }
}

impl fmt::Display for DateUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateUnit {
    type Err = UtilError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "s" | "sec" | "second" | "seconds" => Ok(DateUnit::Seconds),
            "min" | "minute" | "minutes" => Ok(DateUnit::Minutes),
            "h" | "hour" | "hours" => Ok(DateUnit::Hours),
            "d" | "day" | "days" => Ok(DateUnit::Days),
            "w" | "week" | "weeks" => Ok(DateUnit::Weeks),
            "month" | "months" => Ok(DateUnit::Months),
            "y" | "year" | "years" => Ok(DateUnit::Years),
            other => Err(UtilError::invalid(format!("unknown date unit '{}'", other))),
        }
    }
}

/// Current time as a UTC timestamp
pub fn now() -> i64 {
    Utc::now().timestamp()
}

/// Parses a datetime string, reading zone-less input as UTC
pub fn epoch(input: &str) -> Result<i64, UtilError> {
    epoch_in(input, Tz::Utc)
}

/// Parses a datetime string, reading zone-less input in `tz`
///
/// Accepts `@<seconds>`, RFC 3339, RFC 2822, `YYYY-MM-DD[ T]HH:MM[:SS]`,
/// slash-separated dates, bare dates (midnight) and the keywords `now`,
/// `today`, `yesterday` and `tomorrow` (relative to the current instant).
pub fn epoch_in(input: &str, tz: Tz) -> Result<i64, UtilError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(UtilError::invalid("empty datetime string"));
    }

    if let Some(raw) = input.strip_prefix('@') {
        return raw
            .parse::<i64>()
            .map_err(|_| unparseable(input));
    }

    match input.to_ascii_lowercase().as_str() {
        "now" | "today" => return Ok(now()),
        "yesterday" => return add_to(now(), DateUnit::Days, -1),
        "tomorrow" => return add_to(now(), DateUnit::Days, 1),
        _ => {}
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.timestamp());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(input) {
        return Ok(dt.timestamp());
    }

    let naive = DATETIME_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(input, layout).ok())
        .or_else(|| {
            DATE_LAYOUTS
                .iter()
                .find_map(|layout| NaiveDate::parse_from_str(input, layout).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| unparseable(input))?;

    match tz {
        Tz::Utc => Ok(naive.and_utc().timestamp()),
        Tz::Local => Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.timestamp())
            .ok_or_else(|| {
                UtilError::ExternalOperationFailed(format!(
                    "'{}' does not exist in the local time zone",
                    input
                ))
            }),
    }
}

fn unparseable(input: &str) -> UtilError {
    UtilError::ExternalOperationFailed(format!("unrecognized datetime '{}'", input))
}

fn overflow(ts: i64, unit: DateUnit, n: i64) -> UtilError {
    UtilError::ExternalOperationFailed(format!(
        "adding {} {} to {} is out of range",
        n, unit, ts
    ))
}

fn to_utc(ts: i64) -> Result<DateTime<Utc>, UtilError> {
    DateTime::from_timestamp(ts, 0).ok_or_else(|| {
        UtilError::ExternalOperationFailed(format!("timestamp {} is out of range", ts))
    })
}

/// Adds `n` units to `ts`; negative `n` moves backwards
pub fn add_to(ts: i64, unit: DateUnit, n: i64) -> Result<i64, UtilError> {
    if let Some(step) = unit.fixed_seconds() {
        return n
            .checked_mul(step)
            .and_then(|delta| ts.checked_add(delta))
            .ok_or_else(|| overflow(ts, unit, n));
    }

    let months = match unit {
        DateUnit::Years => n.checked_mul(12),
        _ => Some(n),
    }
    .ok_or_else(|| overflow(ts, unit, n))?;
    let span = u32::try_from(months.unsigned_abs()).map_err(|_| overflow(ts, unit, n))?;

    let start = to_utc(ts)?;
    let shifted = if months >= 0 {
        start.checked_add_months(Months::new(span))
    } else {
        start.checked_sub_months(Months::new(span))
    };
    shifted
        .map(|dt| dt.timestamp())
        .ok_or_else(|| overflow(ts, unit, n))
}

/// Subtracts `n` units from `ts`
pub fn sub_from(ts: i64, unit: DateUnit, n: i64) -> Result<i64, UtilError> {
    let negated = n.checked_neg().ok_or_else(|| overflow(ts, unit, n))?;
    add_to(ts, unit, negated)
}

/// Adds `n` units to the current time
pub fn add_to_now(unit: DateUnit, n: i64) -> Result<i64, UtilError> {
    add_to(now(), unit, n)
}

/// Subtracts `n` units from the current time
pub fn sub_from_now(unit: DateUnit, n: i64) -> Result<i64, UtilError> {
    sub_from(now(), unit, n)
}

macro_rules! unit_helpers {
    ($($unit:ident => $add_to:ident, $sub_from:ident, $add_now:ident, $sub_now:ident;)*) => {
        $(
            #[doc = concat!("Adds `n` ", stringify!($unit), " to `ts`")]
            pub fn $add_to(ts: i64, n: i64) -> Result<i64, UtilError> {
                add_to(ts, DateUnit::$unit, n)
            }

            #[doc = concat!("Subtracts `n` ", stringify!($unit), " from `ts`")]
            pub fn $sub_from(ts: i64, n: i64) -> Result<i64, UtilError> {
                sub_from(ts, DateUnit::$unit, n)
            }

            #[doc = concat!("Adds `n` ", stringify!($unit), " to the current time")]
            pub fn $add_now(n: i64) -> Result<i64, UtilError> {
                add_to_now(DateUnit::$unit, n)
            }

            #[doc = concat!("Subtracts `n` ", stringify!($unit), " from the current time")]
            pub fn $sub_now(n: i64) -> Result<i64, UtilError> {
                sub_from_now(DateUnit::$unit, n)
            }
        )*
    };
}

unit_helpers! {
    Seconds => add_seconds_to, sub_seconds_from, add_seconds_to_now, sub_seconds_from_now;
    Minutes => add_minutes_to, sub_minutes_from, add_minutes_to_now, sub_minutes_from_now;
    Hours => add_hours_to, sub_hours_from, add_hours_to_now, sub_hours_from_now;
    Days => add_days_to, sub_days_from, add_days_to_now, sub_days_from_now;
    Weeks => add_weeks_to, sub_weeks_from, add_weeks_to_now, sub_weeks_from_now;
    Months => add_months_to, sub_months_from, add_months_to_now, sub_months_from_now;
    Years => add_years_to, sub_years_from, add_years_to_now, sub_years_from_now;
}

/// Renders `ts` in UTC as `YYYY-MM-DD HH:MM:SS`
pub fn format(ts: i64) -> Result<String, UtilError> {
    format_in(ts, DEFAULT_FORMAT, Tz::Utc)
}

/// Renders `ts` with a strftime-style `pattern` in the given zone
pub fn format_in(ts: i64, pattern: &str, tz: Tz) -> Result<String, UtilError> {
    let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(UtilError::invalid(format!("invalid format string '{}'", pattern)));
    }

    let utc = to_utc(ts)?;
    let mut out = String::new();
    let written = match tz {
        Tz::Utc => write!(out, "{}", utc.format_with_items(items.iter())),
        Tz::Local => write!(
            out,
            "{}",
            utc.with_timezone(&Local).format_with_items(items.iter())
        ),
    };
    written.map_err(|_| {
        UtilError::ExternalOperationFailed(format!("could not render {} as '{}'", ts, pattern))
    })?;
    Ok(out)
}
