use crate::error::AppResult;
use crate::storage::KeyValueBackend;
use std::fs;
use std::path::{Path, PathBuf};

/// Key-value backend keeping one `<key>.json` file per key in a directory.
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Uses `dir` as the store root, creating it if needed.
    pub fn new(dir: impl Into<PathBuf>) -> AppResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueBackend for FileBackend {
    fn read(&self, key: &str) -> AppResult<Option<String>> {
        let path = self.path_for(key);

        if !path.exists() {
            return Ok(None);
        }

        Ok(Some(fs::read_to_string(&path)?))
    }

    fn write(&mut self, key: &str, value: &str) -> AppResult<()> {
        fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_missing_key_returns_none() {
        let temp_dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(temp_dir.path()).unwrap();

        assert_eq!(backend.read("gift-reminders").unwrap(), None);
    }

    #[test]
    fn test_write_and_read_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut backend = FileBackend::new(temp_dir.path()).unwrap();

        backend.write("gift-reminders", "[]").unwrap();

        assert_eq!(backend.read("gift-reminders").unwrap().as_deref(), Some("[]"));
        assert!(temp_dir.path().join("gift-reminders.json").exists());
    }

    #[test]
    fn test_new_creates_nested_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested = temp_dir.path().join("a").join("b");

        let backend = FileBackend::new(&nested).unwrap();

        assert!(nested.is_dir());
        assert_eq!(backend.dir(), nested.as_path());
    }

    #[test]
    fn test_write_into_removed_directory_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir = temp_dir.path().join("gone");
        let mut backend = FileBackend::new(&dir).unwrap();
        fs::remove_dir_all(&dir).unwrap();

        assert!(backend.write("gift-reminders", "[]").is_err());
    }
}
