//! Point-in-time "is it open" evaluation.
//!
//! Intervals stay keyed to the weekday they start on. A Friday 22:00-02:00
//! interval is consulted only when the instant falls on a Friday, so Saturday
//! 01:00 does not match it.

use crate::core::hours::{minutes_of_day, weekday_of};
use crate::domain::model::{OpeningHour, Status};
use chrono::NaiveDateTime;

/// Whether `hour` covers `minute` on its own weekday key.
pub fn covers_minute(hour: &OpeningHour, minute: i32) -> bool {
    if hour.crosses_midnight() {
        minute >= hour.opens_at || minute < hour.closes_at
    } else {
        hour.opens_at <= minute && minute < hour.closes_at
    }
}

/// Every interval covering `instant`, ignoring status. For a validated set
/// this holds at most one element.
pub fn matching_intervals(hours: &[OpeningHour], instant: NaiveDateTime) -> Vec<&OpeningHour> {
    let weekday = weekday_of(&instant);
    let minute = minutes_of_day(&instant);

    hours
        .iter()
        .filter(|hour| hour.weekday == weekday && covers_minute(hour, minute))
        .collect()
}

pub fn is_open_at(status: Status, hours: &[OpeningHour], instant: NaiveDateTime) -> bool {
    if !status.is_active() || hours.is_empty() {
        return false;
    }

    let weekday = weekday_of(&instant);
    let minute = minutes_of_day(&instant);

    hours
        .iter()
        .any(|hour| hour.weekday == weekday && covers_minute(hour, minute))
}
