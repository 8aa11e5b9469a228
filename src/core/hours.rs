//! Minute-of-day and weekday helpers shared by the validator and the evaluator.

use chrono::{Datelike, NaiveDateTime, Timelike};

pub const MINUTES_PER_DAY: i32 = 1440;
pub const LAST_MINUTE: i32 = MINUTES_PER_DAY - 1;
pub const FIRST_WEEKDAY: i32 = 0;
pub const LAST_WEEKDAY: i32 = 6;
pub const DAYS_PER_WEEK: usize = 7;

const WEEKDAY_NAMES: [&str; DAYS_PER_WEEK] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// 0 = Sunday .. 6 = Saturday.
pub fn weekday_of(instant: &NaiveDateTime) -> i32 {
    instant.weekday().num_days_from_sunday() as i32
}

/// Seconds and below are dropped: 10:00:59 and 10:00:00 map to the same minute.
pub fn minutes_of_day(instant: &NaiveDateTime) -> i32 {
    (instant.hour() * 60 + instant.minute()) as i32
}

pub fn weekday_name(weekday: i32) -> &'static str {
    usize::try_from(weekday)
        .ok()
        .and_then(|idx| WEEKDAY_NAMES.get(idx))
        .copied()
        .unwrap_or("unknown weekday")
}

/// Parses "HH:MM" into minutes since midnight. "24:00" and above are rejected.
pub fn parse_clock(value: &str) -> Option<i32> {
    let (hours, minutes) = value.trim().split_once(':')?;
    if minutes.len() != 2 {
        return None;
    }
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if !(0..24).contains(&hours) || !(0..60).contains(&minutes) {
        return None;
    }
    Some(hours * 60 + minutes)
}

pub fn format_clock(minutes: i32) -> String {
    format!("{:02}:{:02}", minutes.div_euclid(60), minutes.rem_euclid(60))
}
