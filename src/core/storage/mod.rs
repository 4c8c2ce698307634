//! Key-value persistence for calculator state
//!
//! The calculator keeps four independent string values. Each is read and
//! written on its own so a missing or damaged value never blocks the others.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Key holding the JSON-serialized record store
pub const DATA_BLOB_KEY: &str = "data-blob";
/// Key holding the range filter descriptor
pub const RANGE_FILTER_KEY: &str = "range-filter";
/// Key holding the school name
pub const SCHOOL_NAME_KEY: &str = "school-name";
/// Key holding the student name
pub const STUDENT_NAME_KEY: &str = "student-name";

/// Every key the calculator persists
pub const ALL_KEYS: [&str; 4] = [
    DATA_BLOB_KEY,
    RANGE_FILTER_KEY,
    SCHOOL_NAME_KEY,
    STUDENT_NAME_KEY,
];

/// Errors raised by a persistence backend
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Underlying I/O failure
    #[error("I/O error for key '{key}': {source}")]
    Io {
        /// Key being accessed
        key: String,
        /// Original error
        #[source]
        source: std::io::Error,
    },

    /// Key cannot be mapped onto the backend
    #[error("invalid storage key: '{0}'")]
    InvalidKey(String),

    /// Backend refused the write (e.g., out of space)
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// A string-valued key-value store
pub trait KeyValueStore {
    /// Read a value, `Ok(None)` when the key is absent
    ///
    /// # Errors
    /// Returns an error if the backend cannot be read
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one
    ///
    /// # Errors
    /// Returns an error if the backend cannot be written
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a value; deleting an absent key succeeds
    ///
    /// # Errors
    /// Returns an error if the backend cannot be written
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Reject keys that could escape a directory or collide with hidden files
pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
