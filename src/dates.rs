//! Date range helpers for the dashboard's today/week/month queries.
//!
//! All ranges are inclusive on both ends. Week boundaries honor the
//! configured start-of-week day; month boundaries are the calendar month.

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, Utc, Weekday};

/// Canonical date string used for daily note names: `YYYY-MM-DD`.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// First and last instant of a single day.
pub fn day_bounds(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    span_bounds(date, date)
}

/// First and last instant of the week containing `date`.
pub fn week_bounds(date: NaiveDate, week_start: Weekday) -> (DateTime<Utc>, DateTime<Utc>) {
    let week = date.week(week_start);
    span_bounds(week.first_day(), week.last_day())
}

/// First and last instant of the calendar month containing `date`.
pub fn month_bounds(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let first = date.with_day(1).unwrap_or(date);
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|d| d.checked_sub_days(Days::new(1)))
        .unwrap_or(date);
    span_bounds(first, last)
}

fn span_bounds(first: NaiveDate, last: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = first.and_hms_opt(0, 0, 0).expect("midnight is valid");
    let end = last.and_hms_opt(23, 59, 59).expect("end of day is valid");
    (start.and_utc(), end.and_utc())
}
