use crate::error::AppError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Birthday,
    Anniversary,
    Holiday,
    Other,
}

impl EventType {
    pub const ALL: [EventType; 4] = [
        EventType::Birthday,
        EventType::Anniversary,
        EventType::Holiday,
        EventType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Birthday => "birthday",
            EventType::Anniversary => "anniversary",
            EventType::Holiday => "holiday",
            EventType::Other => "other",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AppError::validation(format!("unknown event type: {}", s)))
    }
}

/// A person and the yearly date worth remembering for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: String,
    pub name: String,
    pub relationship: String,
    pub event_type: EventType,
    /// Only month and day matter for scheduling.
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Reminder {
    /// Stamps caller input with an identity and creation time.
    pub fn from_new(id: String, fields: NewReminder, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: fields.name,
            relationship: fields.relationship,
            event_type: fields.event_type,
            date: fields.date,
            notes: fields.notes,
            created_at,
        }
    }
}

/// Everything a caller supplies when adding a reminder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReminder {
    pub name: String,
    pub relationship: String,
    pub event_type: EventType,
    pub date: NaiveDate,
    pub notes: Option<String>,
}

impl NewReminder {
    pub fn new(name: impl Into<String>, event_type: EventType, date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            relationship: String::new(),
            event_type,
            date,
            notes: None,
        }
    }

    pub fn with_relationship(mut self, relationship: impl Into<String>) -> Self {
        self.relationship = relationship.into();
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Form-level check for the input layer. The store itself never calls this.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("name is required"));
        }
        Ok(())
    }
}

/// Partial update. `None` leaves a field untouched; `notes: Some(None)` clears notes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReminderPatch {
    pub name: Option<String>,
    pub relationship: Option<String>,
    pub event_type: Option<EventType>,
    pub date: Option<NaiveDate>,
    pub notes: Option<Option<String>>,
}

impl ReminderPatch {
    pub fn is_empty(&self) -> bool {
        *self == ReminderPatch::default()
    }

    pub fn apply(self, reminder: &mut Reminder) {
        if let Some(name) = self.name {
            reminder.name = name;
        }
        if let Some(relationship) = self.relationship {
            reminder.relationship = relationship;
        }
        if let Some(event_type) = self.event_type {
            reminder.event_type = event_type;
        }
        if let Some(date) = self.date {
            reminder.date = date;
        }
        if let Some(notes) = self.notes {
            reminder.notes = notes;
        }
    }
}
