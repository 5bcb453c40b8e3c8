//! Read-side view of the reminder collection for a given day.
//!
//! # Responsibility
//! - Filter reminders by event type.
//! - Annotate each reminder with days until its next occurrence.
//! - Keep entries ordered nearest-first with a deterministic tie-break.
//!
//! # Invariants
//! - `entries()` is sorted ascending by `days_until`, then by `id`.
//! - Every event type is treated as yearly; `days_until` is never negative.

use crate::recurrence::{days_until_next_occurrence, Proximity};
use crate::reminder::{EventType, Reminder};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Which reminders a view should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventFilter {
    #[default]
    All,
    Only(EventType),
}

impl EventFilter {
    pub fn matches(&self, reminder: &Reminder) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Only(event_type) => reminder.event_type == *event_type,
        }
    }
}

impl From<EventType> for EventFilter {
    fn from(event_type: EventType) -> Self {
        EventFilter::Only(event_type)
    }
}

/// A reminder together with where its next occurrence falls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledReminder {
    pub reminder: Reminder,
    pub days_until: i64,
    pub proximity: Proximity,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Agenda {
    entries: Vec<ScheduledReminder>,
}

impl Agenda {
    pub fn build(reminders: Vec<Reminder>, today: NaiveDate, filter: EventFilter) -> Self {
        let mut entries: Vec<ScheduledReminder> = reminders
            .into_iter()
            .filter(|r| filter.matches(r))
            .map(|reminder| {
                let days_until = days_until_next_occurrence(reminder.date, today);
                ScheduledReminder {
                    reminder,
                    days_until,
                    proximity: Proximity::from_days(days_until),
                }
            })
            .collect();

        entries.sort_by(|a, b| {
            a.days_until
                .cmp(&b.days_until)
                .then_with(|| a.reminder.id.cmp(&b.reminder.id))
        });

        Self { entries }
    }

    pub fn entries(&self) -> &[ScheduledReminder] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<ScheduledReminder> {
        self.entries
    }

    /// Entries inside the upcoming window, still nearest-first.
    pub fn upcoming(&self) -> impl Iterator<Item = &ScheduledReminder> {
        self.entries.iter().filter(|e| e.proximity.is_upcoming())
    }

    pub fn today(&self) -> impl Iterator<Item = &ScheduledReminder> {
        self.entries.iter().filter(|e| e.proximity == Proximity::Today)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Per-type tallies, including types with no entries.
    pub fn counts_by_type(&self) -> BTreeMap<EventType, usize> {
        let mut counts: BTreeMap<EventType, usize> =
            EventType::ALL.into_iter().map(|t| (t, 0)).collect();
        for entry in &self.entries {
            *counts.entry(entry.reminder.event_type).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reminder::NewReminder;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn reminder(id: &str, event_type: EventType, date: NaiveDate) -> Reminder {
        Reminder::from_new(
            id.to_string(),
            NewReminder::new(format!("person {}", id), event_type, date),
            "2024-01-01T00:00:00Z".parse().unwrap(),
        )
    }

    fn sample() -> Vec<Reminder> {
        vec![
            reminder("far", EventType::Holiday, ymd(2000, 12, 25)),
            reminder("past", EventType::Birthday, ymd(1990, 6, 5)),
            reminder("soon", EventType::Anniversary, ymd(2010, 6, 15)),
            reminder("now", EventType::Birthday, ymd(1985, 6, 10)),
            reminder("month", EventType::Other, ymd(2020, 7, 10)),
        ]
    }

    #[test]
    fn test_entries_are_nearest_first() {
        let agenda = Agenda::build(sample(), ymd(2024, 6, 10), EventFilter::All);

        let order: Vec<(&str, i64)> = agenda
            .entries()
            .iter()
            .map(|e| (e.reminder.id.as_str(), e.days_until))
            .collect();
        assert_eq!(
            order,
            [("now", 0), ("soon", 5), ("month", 30), ("far", 198), ("past", 360)]
        );
    }

    #[test]
    fn test_upcoming_window_is_inclusive() {
        let agenda = Agenda::build(sample(), ymd(2024, 6, 10), EventFilter::All);

        let upcoming: Vec<&str> = agenda.upcoming().map(|e| e.reminder.id.as_str()).collect();
        assert_eq!(upcoming, ["now", "soon", "month"]);

        let today: Vec<&str> = agenda.today().map(|e| e.reminder.id.as_str()).collect();
        assert_eq!(today, ["now"]);
        assert_eq!(agenda.entries()[1].proximity, Proximity::Urgent);
    }

    #[test]
    fn test_filter_by_event_type() {
        let agenda = Agenda::build(sample(), ymd(2024, 6, 10), EventType::Birthday.into());

        let ids: Vec<&str> = agenda.entries().iter().map(|e| e.reminder.id.as_str()).collect();
        assert_eq!(ids, ["now", "past"]);
    }

    #[test]
    fn test_counts_by_type_include_empty_types() {
        let agenda = Agenda::build(sample(), ymd(2024, 6, 10), EventFilter::All);
        let counts = agenda.counts_by_type();

        assert_eq!(counts[&EventType::Birthday], 2);
        assert_eq!(counts[&EventType::Other], 1);

        let empty = Agenda::build(Vec::new(), ymd(2024, 6, 10), EventFilter::All);
        assert!(empty.is_empty());
        assert_eq!(empty.counts_by_type().len(), EventType::ALL.len());
    }

    #[test]
    fn test_ties_break_on_id() {
        let reminders = vec![
            reminder("b", EventType::Other, ymd(2001, 8, 1)),
            reminder("a", EventType::Other, ymd(1999, 8, 1)),
        ];
        let agenda = Agenda::build(reminders, ymd(2024, 6, 10), EventFilter::All);
        assert_eq!(agenda.entries()[0].reminder.id, "a");
        assert_eq!(agenda.len(), 2);

        let owned = agenda.into_entries();
        assert_eq!(owned[1].reminder.id, "b");
    }
}
