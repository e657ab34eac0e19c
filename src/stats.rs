use crate::models::IntakeRecord;
use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone};

/// Sums over the current day, week, month and year, each ending now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IntakeTotals {
    pub daily: u64,
    pub weekly: u64,
    pub monthly: u64,
    pub yearly: u64,
}

/// Window start instants in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowStarts {
    pub day: i64,
    pub week: i64,
    pub month: i64,
    pub year: i64,
}

/// Total amount of records with `start <= timestamp <= end`.
pub fn calculate_intake(records: &[IntakeRecord], start: i64, end: i64) -> u64 {
    records
        .iter()
        .filter(|record| record.timestamp >= start && record.timestamp <= end)
        .fold(0u64, |total, record| total.saturating_add(record.amount))
}

pub fn build_totals<Tz: TimeZone>(records: &[IntakeRecord], now: &DateTime<Tz>) -> IntakeTotals {
    let starts = window_starts(now);
    let end = now.timestamp_millis();

    IntakeTotals {
        daily: calculate_intake(records, starts.day, end),
        weekly: calculate_intake(records, starts.week, end),
        monthly: calculate_intake(records, starts.month, end),
        yearly: calculate_intake(records, starts.year, end),
    }
}

pub fn window_starts<Tz: TimeZone>(now: &DateTime<Tz>) -> WindowStarts {
    let tz = now.timezone();
    let today = now.date_naive();

    WindowStarts {
        day: midnight_millis(&tz, today),
        week: midnight_millis(&tz, week_start(today)),
        month: midnight_millis(&tz, today - Duration::days(i64::from(today.day0()))),
        year: midnight_millis(&tz, today - Duration::days(i64::from(today.ordinal0()))),
    }
}

/// Weeks start on Sunday.
fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

fn midnight_millis<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> i64 {
    let naive = date.and_time(chrono::NaiveTime::MIN);
    match tz.from_local_datetime(&naive).earliest() {
        Some(local) => local.timestamp_millis(),
        // Midnight skipped by a DST jump.
        None => tz.from_utc_datetime(&naive).timestamp_millis(),
    }
}
