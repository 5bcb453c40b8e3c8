use crate::error::{AppError, AppResult};
use crate::storage::KeyValueBackend;
use std::collections::HashMap;

/// In-memory backend. Can be told to reject writes, standing in for a
/// medium that is full or unavailable.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    entries: HashMap<String, String>,
    fail_writes: bool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds `key` with a raw value, bypassing the store.
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl KeyValueBackend for MemoryBackend {
    fn read(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> AppResult<()> {
        if self.fail_writes {
            return Err(AppError::storage("quota exceeded"));
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
