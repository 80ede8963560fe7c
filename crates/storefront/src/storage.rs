//! Durable key-value storage.
//!
//! The cart and the recent-search list are read once at startup and
//! rewritten in full after every mutation. Access is single-threaded, so
//! the trait takes `&self` with interior mutability and no locking.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Well-known storage keys.
pub mod keys {
    /// Serialized cart line items.
    pub const CART: &str = "cart";
    /// Serialized recent city searches.
    pub const RECENT_SEARCHES: &str = "recentSearches";
}

/// Errors that can occur reading or writing durable storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying file I/O failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data could not be (de)serialized.
    #[error("storage serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// JSON key-value persistence.
pub trait Storage {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read or parsed.
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn set(&self, key: &str, value: Value) -> Result<(), StorageError>;
}

/// Read a typed value from storage, `None` when the key is absent.
///
/// # Errors
///
/// Returns an error if the store or the stored value is unreadable.
pub fn read_value<T: DeserializeOwned>(
    storage: &dyn Storage,
    key: &str,
) -> Result<Option<T>, StorageError> {
    storage
        .get(key)?
        .map(|value| serde_json::from_value(value).map_err(StorageError::from))
        .transpose()
}

/// Serialize a value and write it to storage.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn write_value<T: Serialize>(
    storage: &dyn Storage,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    storage.set(key, serde_json::to_value(value)?)
}

/// File-backed storage: one JSON object per file, one entry per key.
///
/// Each `set` is a read-modify-write of the whole file; a missing file is
/// an empty store.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Create storage backed by the given file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load_map(&self) -> Result<HashMap<String, Value>, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for JsonFileStorage {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        Ok(self.load_map()?.remove(key))
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        let mut map = self.load_map()?;
        map.insert(key.to_string(), value);
        std::fs::write(&self.path, serde_json::to_vec_pretty(&map)?)?;
        Ok(())
    }
}

/// In-memory storage for tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    map: RefCell<HashMap<String, Value>>,
}

impl MemoryStorage {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        Ok(self.map.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        self.map.borrow_mut().insert(key.to_string(), value);
        Ok(())
    }
}
