//! Admission check for a candidate set of opening hours.
//!
//! A set is accepted only when every interval is in range and no two
//! intervals keyed to the same weekday conflict. The validator judges; it
//! never stores anything. Callers replace the stored set wholesale on success.

use crate::core::hours::{DAYS_PER_WEEK, FIRST_WEEKDAY, LAST_MINUTE, LAST_WEEKDAY};
use crate::domain::model::OpeningHour;
use crate::utils::error::HoursError;

/// First conflicting pair found, as input positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conflict {
    pub weekday: i32,
    pub first: usize,
    pub second: usize,
}

fn check_field(field: &'static str, value: i32, min: i32, max: i32) -> Result<(), HoursError> {
    if value < min || value > max {
        return Err(HoursError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

pub fn check_range(hour: &OpeningHour) -> Result<(), HoursError> {
    check_field("weekday", hour.weekday, FIRST_WEEKDAY, LAST_WEEKDAY)?;
    check_field("opens_at", hour.opens_at, 0, LAST_MINUTE)?;
    check_field("closes_at", hour.closes_at, 0, LAST_MINUTE)?;
    Ok(())
}

/// Decides whether two intervals keyed to the same weekday conflict.
///
/// A midnight-crossing interval is treated as occupying both the tail of the
/// day (`opens_at..1440`) and its head (`0..closes_at`). Two crossing
/// intervals always conflict. A crossing interval against a same-day one uses
/// a four-way disjunction that can report conflicts a per-minute comparison
/// would not (zero-length intervals in particular).
pub fn hours_overlap(h1: &OpeningHour, h2: &OpeningHour) -> bool {
    if h1.is_same_day() && h2.is_same_day() {
        return !(h1.closes_at <= h2.opens_at || h2.closes_at <= h1.opens_at);
    }

    if h1.crosses_midnight() && h2.crosses_midnight() {
        return true;
    }

    if h1.crosses_midnight() {
        return wrapped_conflicts(h1, h2);
    }

    if h2.crosses_midnight() {
        return wrapped_conflicts(h2, h1);
    }

    false
}

fn wrapped_conflicts(wrapped: &OpeningHour, other: &OpeningHour) -> bool {
    other.opens_at >= wrapped.opens_at
        || other.closes_at <= wrapped.closes_at
        || other.opens_at < wrapped.closes_at
        || other.closes_at > wrapped.opens_at
}

/// Finds the first conflicting pair, scanning weekdays in ascending order and
/// pairs `(i, j)`, `i < j`, in input order within each weekday.
///
/// Expects range-checked input; intervals with an out-of-range weekday are
/// skipped.
pub fn find_overlap(hours: &[OpeningHour]) -> Option<Conflict> {
    let mut by_weekday: [Vec<usize>; DAYS_PER_WEEK] = Default::default();
    for (idx, hour) in hours.iter().enumerate() {
        if let Some(day) = usize::try_from(hour.weekday)
            .ok()
            .and_then(|w| by_weekday.get_mut(w))
        {
            day.push(idx);
        }
    }

    for (weekday, day) in by_weekday.iter().enumerate() {
        for (pos, &i) in day.iter().enumerate() {
            for &j in &day[pos + 1..] {
                if hours_overlap(&hours[i], &hours[j]) {
                    return Some(Conflict {
                        weekday: weekday as i32,
                        first: i,
                        second: j,
                    });
                }
            }
        }
    }

    None
}

/// Accepts or rejects a candidate set. Every interval is range-checked, in
/// input order, before any overlap check runs.
pub fn validate_opening_hours(hours: &[OpeningHour]) -> Result<(), HoursError> {
    for hour in hours {
        check_range(hour)?;
    }

    match find_overlap(hours) {
        Some(conflict) => {
            tracing::debug!(
                "Intervals #{} and #{} conflict on weekday {}",
                conflict.first,
                conflict.second,
                conflict.weekday
            );
            Err(HoursError::Overlap {
                weekday: conflict.weekday,
            })
        }
        None => Ok(()),
    }
}
