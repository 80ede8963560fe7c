//! Recent city searches, most recent first.

use crate::storage::{self, Storage, StorageError, keys};

/// How many searches the ledger retains.
const MAX_ENTRIES: usize = 10;

/// How many entries callers usually display.
pub const DISPLAY_LIMIT: usize = 5;

/// A capped, deduplicated list of recently searched city names.
///
/// New entries go to the front. Re-searching a city moves it back to the
/// front rather than duplicating it; matching is case-insensitive but the
/// most recent spelling is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecentSearches {
    entries: Vec<String>,
}

impl RecentSearches {
    /// Restore the ledger from durable storage (empty when nothing stored).
    ///
    /// # Errors
    ///
    /// Returns an error if the stored list cannot be read.
    pub fn load(storage: &dyn Storage) -> Result<Self, StorageError> {
        let entries = storage::read_value(storage, keys::RECENT_SEARCHES)?.unwrap_or_default();
        Ok(Self { entries })
    }

    /// Write the ledger to durable storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn persist(&self, storage: &dyn Storage) -> Result<(), StorageError> {
        storage::write_value(storage, keys::RECENT_SEARCHES, &self.entries)
    }

    /// Record a search, moving it to the front and trimming to capacity.
    pub fn record(&mut self, city: &str) {
        let city = city.trim();
        if city.is_empty() {
            return;
        }
        self.entries
            .retain(|entry| !entry.eq_ignore_ascii_case(city));
        self.entries.insert(0, city.to_string());
        self.entries.truncate(MAX_ENTRIES);
    }

    /// The most recent entries, newest first, at most `limit`.
    #[must_use]
    pub fn list(&self, limit: usize) -> &[String] {
        self.entries
            .get(..self.entries.len().min(limit))
            .unwrap_or(&self.entries)
    }

    /// Every retained entry, newest first.
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
