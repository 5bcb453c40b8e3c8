//! Application configuration constants
//!
//! Centralized configuration for the reminder core.

use std::path::PathBuf;

/// Key under which the whole reminder collection is persisted
pub const STORAGE_KEY: &str = "gift-reminders";

/// Suffix appended to the storage key when a pre-migration copy is kept
pub const BACKUP_SUFFIX: &str = ".backup";

/// Directory name created under the platform's local data dir
pub const APP_DIR_NAME: &str = "GiftReminder";

/// Reminders at most this many days away count as upcoming (inclusive)
pub const UPCOMING_WINDOW_DAYS: i64 = 30;

/// Reminders at most this many days away count as urgent (inclusive)
pub const URGENT_WINDOW_DAYS: i64 = 7;

/// Base name of rotated log files
pub const LOG_FILE_BASENAME: &str = "gift-reminder";

/// Where reminders live on disk when no explicit directory is given.
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join(APP_DIR_NAME))
}
