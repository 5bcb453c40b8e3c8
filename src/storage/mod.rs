mod legacy;
mod local;
mod memory;

use crate::agenda::{Agenda, EventFilter};
use crate::config::{default_data_dir, BACKUP_SUFFIX, STORAGE_KEY};
use crate::error::{AppError, AppResult};
use crate::reminder::{NewReminder, Reminder, ReminderPatch};
use chrono::{NaiveDate, Utc};
use legacy::try_migrate_legacy_data;
use log::{debug, error, info, warn};
use uuid::Uuid;

pub use local::FileBackend;
pub use memory::MemoryBackend;

/// A durable string-to-string surface the reminder collection is written to.
pub trait KeyValueBackend {
    fn read(&self, key: &str) -> AppResult<Option<String>>;
    fn write(&mut self, key: &str, value: &str) -> AppResult<()>;
}

/// What was found under the storage key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Decoded {
    Missing,
    Current,
    Migrated,
    Corrupt,
}

fn decode(content: &str) -> (Vec<Reminder>, Decoded) {
    if let Ok(reminders) = serde_json::from_str::<Vec<Reminder>>(content) {
        return (reminders, Decoded::Current);
    }

    if let Some(migrated) = try_migrate_legacy_data(content) {
        return (migrated, Decoded::Migrated);
    }

    (Vec::new(), Decoded::Corrupt)
}

/// Reminder collection persisted as one JSON blob under a single key.
///
/// Every operation reads the whole collection from the backend, changes it
/// and writes it back; nothing is cached between calls. Read problems are
/// treated as an empty collection and write problems are logged, so no
/// operation here returns an error.
pub struct Storage<B: KeyValueBackend> {
    backend: B,
    key: String,
}

impl Storage<FileBackend> {
    /// Opens the on-disk store under the platform's local data directory.
    pub fn open_default() -> AppResult<Self> {
        let dir = default_data_dir().ok_or_else(|| AppError::storage("Failed to get local data dir"))?;
        Ok(Self::open(FileBackend::new(dir)?))
    }
}

impl<B: KeyValueBackend> Storage<B> {
    pub fn open(backend: B) -> Self {
        Self::with_key(backend, STORAGE_KEY)
    }

    /// Opens the store and settles whatever is under `key`: legacy blobs are
    /// migrated in place and unreadable ones are copied aside before any
    /// later write can replace them.
    pub fn with_key(backend: B, key: impl Into<String>) -> Self {
        let mut storage = Self {
            backend,
            key: key.into(),
        };

        let raw = storage.read_raw();
        if let Some(content) = raw {
            let (reminders, decoded) = decode(&content);
            match decoded {
                Decoded::Migrated => {
                    storage.write_backup(&content);
                    storage.persist(&reminders);
                    info!(
                        "event=store_open module=storage status=migrated key={} count={}",
                        storage.key,
                        reminders.len()
                    );
                }
                Decoded::Corrupt => {
                    storage.write_backup(&content);
                    warn!(
                        "event=store_open module=storage status=corrupt key={} bytes={}",
                        storage.key,
                        content.len()
                    );
                }
                Decoded::Current | Decoded::Missing => {
                    info!(
                        "event=store_open module=storage status=ok key={} count={}",
                        storage.key,
                        reminders.len()
                    );
                }
            }
        }

        storage
    }

    /// Closes the store, handing the backend back.
    pub fn into_backend(self) -> B {
        self.backend
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    fn read_raw(&self) -> Option<String> {
        match self.backend.read(&self.key) {
            Ok(content) => content,
            Err(e) => {
                warn!(
                    "event=store_read module=storage status=error key={} error={}",
                    self.key, e
                );
                None
            }
        }
    }

    fn load(&self) -> (Vec<Reminder>, Decoded) {
        match self.read_raw() {
            Some(content) => decode(&content),
            None => (Vec::new(), Decoded::Missing),
        }
    }

    fn write_backup(&mut self, content: &str) {
        let backup_key = format!("{}{}", self.key, BACKUP_SUFFIX);
        match self.backend.write(&backup_key, content) {
            Ok(()) => info!("event=store_backup module=storage status=ok key={}", backup_key),
            Err(e) => warn!(
                "event=store_backup module=storage status=error key={} error={}",
                backup_key, e
            ),
        }
    }

    /// Writes the whole collection. Failures are logged only; callers keep
    /// their success-shaped result.
    fn persist(&mut self, reminders: &[Reminder]) {
        let content = match serde_json::to_string_pretty(reminders) {
            Ok(content) => content,
            Err(e) => {
                error!(
                    "event=store_write module=storage status=error key={} error_code=encode_failed error={}",
                    self.key, e
                );
                return;
            }
        };

        match self.backend.write(&self.key, &content) {
            Ok(()) => debug!(
                "event=store_write module=storage status=ok key={} count={}",
                self.key,
                reminders.len()
            ),
            Err(e) => error!(
                "event=store_write module=storage status=error key={} error_code=write_failed error={}",
                self.key, e
            ),
        }
    }

    // ============ Public API ============

    /// All persisted reminders; empty when nothing is stored or the blob is unreadable.
    pub fn list(&self) -> Vec<Reminder> {
        let (reminders, decoded) = self.load();
        if decoded == Decoded::Corrupt {
            warn!(
                "event=store_read module=storage status=corrupt key={} fallback=empty",
                self.key
            );
        }
        reminders
    }

    pub fn get(&self, id: &str) -> Option<Reminder> {
        self.list().into_iter().find(|r| r.id == id)
    }

    pub fn add(&mut self, fields: NewReminder) -> Reminder {
        let mut reminders = self.list();

        let id = next_id(&reminders);
        let reminder = Reminder::from_new(id, fields, Utc::now());

        reminders.push(reminder.clone());
        self.persist(&reminders);
        reminder
    }

    /// Merges `patch` into the reminder with `id`. Returns false when no such reminder exists.
    pub fn update(&mut self, id: &str, patch: ReminderPatch) -> bool {
        let mut reminders = self.list();

        let Some(reminder) = reminders.iter_mut().find(|r| r.id == id) else {
            return false;
        };
        if patch.is_empty() {
            return true;
        }
        patch.apply(reminder);

        self.persist(&reminders);
        true
    }

    /// Removes the reminder with `id` for good. Returns false when nothing was removed.
    pub fn delete(&mut self, id: &str) -> bool {
        let mut reminders = self.list();
        let before = reminders.len();

        reminders.retain(|r| r.id != id);
        if reminders.len() == before {
            return false;
        }

        self.persist(&reminders);
        true
    }

    pub fn agenda(&self, today: NaiveDate, filter: EventFilter) -> Agenda {
        Agenda::build(self.list(), today, filter)
    }
}

fn next_id(existing: &[Reminder]) -> String {
    loop {
        let id = Uuid::new_v4().to_string();
        if !existing.iter().any(|r| r.id == id) {
            return id;
        }
    }
}
