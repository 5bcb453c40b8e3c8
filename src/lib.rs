//! People, the yearly dates that matter to them, and how soon each comes around.

pub mod agenda;
pub mod config;
pub mod error;
pub mod logging;
pub mod recurrence;
pub mod reminder;
pub mod storage;

pub use agenda::{Agenda, EventFilter, ScheduledReminder};
pub use error::{AppError, AppResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use recurrence::{
    days_relative_this_year, days_until_next_occurrence, next_occurrence, occurrence_in_year,
    sort_by_next_occurrence, Proximity,
};
pub use reminder::{EventType, NewReminder, Reminder, ReminderPatch};
pub use storage::{FileBackend, KeyValueBackend, MemoryBackend, Storage};
