//! ISO week arithmetic and the week-to-quarter assignment rules.
//!
//! Weeks run Monday through Sunday and are numbered per ISO-8601. A week is
//! filed under the quarter its Monday falls in, except that a week whose
//! range covers January 1st of its own ISO year is always Q1 of that year.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use tracing::trace;

use crate::models::WeekRef;

/// # Panics
///
/// Panics when `year` lies outside the range `chrono` can represent.
fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("year within chrono's supported range")
}

pub fn week_number(date: NaiveDate) -> u32 {
    date.iso_week().week()
}

/// Number of ISO weeks in `year`: 53 when December 28th lands in week 53.
pub fn weeks_in_iso_year(year: i32) -> u32 {
    week_number(ymd(year, 12, 28))
}

/// Monday and Sunday of ISO week `week` in `year`.
///
/// January 4th always sits in week 1, so week 1 starts on the Monday on or
/// before it.
pub fn week_bounds(year: i32, week: u32) -> (NaiveDate, NaiveDate) {
    let jan4 = ymd(year, 1, 4);
    let week_one = jan4 - Duration::days(i64::from(jan4.weekday().num_days_from_monday()));
    let start = week_one + Duration::weeks(i64::from(week) - 1);
    (start, start + Duration::days(6))
}

pub fn quarter_of(date: NaiveDate) -> u32 {
    date.month0() / 3 + 1
}

/// `(year, quarter)` the given week is counted toward.
pub fn quarter_for_week(year: i32, week: u32) -> (i32, u32) {
    let (start, end) = week_bounds(year, week);
    let new_year = ymd(year, 1, 1);
    if start <= new_year && new_year <= end {
        return (year, 1);
    }
    (start.year(), quarter_of(start))
}

/// Every ISO week counted toward `(year, quarter)`, oldest first.
///
/// Week 53 is only scanned for years that actually have one. For Q1 the
/// previous year's week 53 is also considered, and sorts ahead of week 1 when
/// it qualifies.
pub fn weeks_in_quarter(year: i32, quarter: u32) -> Vec<WeekRef> {
    let mut weeks: Vec<WeekRef> = (1..=weeks_in_iso_year(year))
        .filter(|&week| quarter_for_week(year, week) == (year, quarter))
        .map(|week| WeekRef { year, week })
        .collect();

    if quarter == 1 {
        let previous = year - 1;
        if weeks_in_iso_year(previous) == 53 && quarter_for_week(previous, 53) == (year, 1) {
            weeks.push(WeekRef {
                year: previous,
                week: 53,
            });
            weeks.sort();
        }
    }

    trace!(year, quarter, count = weeks.len(), "enumerated quarter weeks");
    weeks
}

pub fn is_weekday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Monday–Friday dates in `[start, end]`, inclusive.
pub fn weekdays(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start
        .iter_days()
        .take_while(|day| *day <= end)
        .filter(|day| is_weekday(*day))
        .collect()
}

pub fn current_week(today: NaiveDate) -> WeekRef {
    let iso = today.iso_week();
    WeekRef {
        year: iso.year(),
        week: iso.week(),
    }
}

/// The quarter that the week containing `today` is counted toward.
pub fn current_quarter(today: NaiveDate) -> (i32, u32) {
    let week = current_week(today);
    quarter_for_week(week.year, week.week)
}
