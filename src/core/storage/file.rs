//! Directory-backed store: one file per key

use super::{validate_key, KeyValueStore, StorageError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Store that keeps each key in its own file inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Use `dir` as the data directory. The directory is created on first write.
    #[must_use]
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Data directory of this store
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.dir.join(key))
    }
}

fn io_error(key: &str, source: std::io::Error) -> StorageError {
    StorageError::Io {
        key: key.to_string(),
        source,
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(key, e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).map_err(|e| io_error(key, e))?;

        // Write then rename so a crash never leaves a half-written value
        let tmp_path = self.dir.join(format!(".{key}.tmp"));
        fs::write(&tmp_path, value).map_err(|e| io_error(key, e))?;
        fs::rename(&tmp_path, &path).map_err(|e| io_error(key, e))?;

        logger::debug!("Stored {} bytes under '{key}'", value.len());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(key, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_round_trip_in_temp_dir() {
        let temp_dir = TempDir::new().expect("temp dir");
        let mut store = FileStore::new(temp_dir.path().join("data"));

        assert_eq!(store.get("range-filter").expect("get"), None);
        store.set("range-filter", "0-0-1-1").expect("set");
        assert_eq!(
            store.get("range-filter").expect("get"),
            Some("0-0-1-1".to_string())
        );
        assert!(store.dir().join("range-filter").exists());
        assert!(!store.dir().join(".range-filter.tmp").exists());

        store.remove("range-filter").expect("remove");
        assert_eq!(store.get("range-filter").expect("get"), None);
    }

    #[test]
    fn test_remove_missing_key() {
        let temp_dir = TempDir::new().expect("temp dir");
        let mut store = FileStore::new(temp_dir.path());
        assert!(store.remove("student-name").is_ok());
    }

    #[test]
    fn test_rejects_path_keys() {
        let temp_dir = TempDir::new().expect("temp dir");
        let mut store = FileStore::new(temp_dir.path());
        assert!(matches!(
            store.set("../outside", "x"),
            Err(StorageError::InvalidKey(_))
        ));
    }
}
