//! Calendar dates for events.
//!
//! Event dates are wall-clock days at the venue. They are read by splitting
//! `YYYY-MM-DD` into its numeric parts and building a `NaiveDate`, never by a
//! timestamp parser, so no time zone can move an event to a neighbouring day.

use chrono::{Datelike, Duration, NaiveDate};

use crate::error::{AppError, AppResult};

/// Parses a `YYYY-MM-DD` event date into a local calendar date
pub fn parse_local_date(raw: &str) -> AppResult<NaiveDate> {
    let invalid = || AppError::InvalidDate(raw.to_string());

    let parts: Vec<&str> = raw.trim().split('-').collect();
    let [year, month, day] = parts.as_slice() else {
        return Err(invalid());
    };

    let widths_ok = year.len() == 4 && month.len() == 2 && day.len() == 2;
    let digits_ok = [year, month, day]
        .iter()
        .all(|p| p.bytes().all(|b| b.is_ascii_digit()));
    if !widths_ok || !digits_ok {
        return Err(invalid());
    }

    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    let day: u32 = day.parse().map_err(|_| invalid())?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

/// Monday and Sunday of the week containing `today`
pub fn week_bounds(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let days_since_monday = i64::from(today.weekday().num_days_from_monday());
    let monday = today - Duration::days(days_since_monday);
    (monday, monday + Duration::days(6))
}

/// Whether `date` falls in the Monday..=Sunday week containing `today`
pub fn is_in_current_week(date: NaiveDate, today: NaiveDate) -> bool {
    let (monday, sunday) = week_bounds(today);
    date >= monday && date <= sunday
}

/// Short label such as "Nov 14"
pub fn short_label(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// Month bucket such as "Nov 2025"
pub fn month_label(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}
