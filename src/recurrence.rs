//! Yearly recurrence arithmetic.
//!
//! A stored date contributes only its month and day. Every function here is
//! pure and works at date granularity; callers truncate "now" to a
//! `NaiveDate` before asking.

use crate::config::{UPCOMING_WINDOW_DAYS, URGENT_WINDOW_DAYS};
use crate::reminder::Reminder;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// The stored month/day placed in `year`.
///
/// February 29 becomes February 28 in non-leap years. Returns `None` only
/// when `year` is outside chrono's supported range.
pub fn occurrence_in_year(stored: NaiveDate, year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, stored.month(), stored.day()).or_else(|| {
        if stored.month() == 2 && stored.day() == 29 {
            NaiveDate::from_ymd_opt(year, 2, 28)
        } else {
            None
        }
    })
}

/// The first occurrence of `stored` that falls on or after `today`.
pub fn next_occurrence(stored: NaiveDate, today: NaiveDate) -> NaiveDate {
    // today's year is always representable, so the fallback never triggers
    let this_year = occurrence_in_year(stored, today.year()).unwrap_or(today);
    if this_year >= today {
        return this_year;
    }
    // Past the end of the supported calendar there is no next year to roll into.
    occurrence_in_year(stored, today.year() + 1).unwrap_or(today)
}

/// Days from `today` until the next occurrence of `stored`. Never negative;
/// an occurrence falling on `today` yields 0.
pub fn days_until_next_occurrence(stored: NaiveDate, today: NaiveDate) -> i64 {
    (next_occurrence(stored, today) - today).num_days()
}

/// Signed offset of this year's occurrence from `today`, without rolling
/// over. Negative values mean the date has already passed this year.
pub fn days_relative_this_year(stored: NaiveDate, today: NaiveDate) -> i64 {
    let this_year = occurrence_in_year(stored, today.year()).unwrap_or(today);
    (this_year - today).num_days()
}

/// How close a reminder's next occurrence is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Proximity {
    Today,
    Urgent,
    Upcoming,
    Later,
}

impl Proximity {
    pub fn from_days(days_until: i64) -> Self {
        if days_until <= 0 {
            Proximity::Today
        } else if days_until <= URGENT_WINDOW_DAYS {
            Proximity::Urgent
        } else if days_until <= UPCOMING_WINDOW_DAYS {
            Proximity::Upcoming
        } else {
            Proximity::Later
        }
    }

    pub fn is_upcoming(&self) -> bool {
        *self != Proximity::Later
    }

    pub fn is_urgent(&self) -> bool {
        matches!(self, Proximity::Today | Proximity::Urgent)
    }
}

/// Orders reminders by how soon they next occur, breaking ties by `id`.
pub fn sort_by_next_occurrence(reminders: &mut [Reminder], today: NaiveDate) {
    reminders.sort_by_cached_key(|r| (days_until_next_occurrence(r.date, today), r.id.clone()));
}
