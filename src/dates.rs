//! Calendar helpers for request windows and date validation.

use chrono::{Datelike, NaiveDate, TimeDelta, Weekday};

use crate::error::{PasarError, Result};

pub const ISO_FORMAT: &str = "%Y-%m-%d";

pub fn iso(date: NaiveDate) -> String {
    date.format(ISO_FORMAT).to_string()
}

pub fn parse_iso(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), ISO_FORMAT)
        .map_err(|e| PasarError::InvalidArgument(format!("Invalid date '{raw}': {e}")))
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Reject Saturdays and Sundays; the market publishes no prices on them.
pub fn ensure_weekday(date: NaiveDate) -> Result<NaiveDate> {
    if is_weekend(date) {
        Err(PasarError::WeekendDate(date))
    } else {
        Ok(date)
    }
}

/// `[now - days, now]`.
///
/// `days` must be non-negative and the start must stay within chrono's
/// calendar range.
pub fn window(now: NaiveDate, days: i64) -> Result<(NaiveDate, NaiveDate)> {
    if days < 0 {
        return Err(PasarError::InvalidArgument(format!(
            "days must not be negative (got {days})"
        )));
    }
    let start = TimeDelta::try_days(days)
        .and_then(|delta| now.checked_sub_signed(delta))
        .ok_or_else(|| {
            PasarError::InvalidArgument(format!("{days} days before {now} is out of range"))
        })?;
    Ok((start, now))
}

/// Days to look back from `today` so that `start` is inside the window.
///
/// Never less than 2.
pub fn lookback_days(today: NaiveDate, start: NaiveDate) -> i64 {
    ((today - start).num_days() + 1).max(2)
}

/// First day of `today`'s month.
pub fn default_start(today: NaiveDate) -> NaiveDate {
    today.with_day(1).unwrap_or(today)
}

/// `2024-03-05` -> `05 Mar`. Unparseable input is returned as-is.
pub fn short_label(raw: &str) -> String {
    NaiveDate::parse_from_str(raw, ISO_FORMAT)
        .map(|d| d.format("%d %b").to_string())
        .unwrap_or_else(|_| raw.to_string())
}
