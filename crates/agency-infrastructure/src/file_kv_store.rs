//! File-backed key/value slot store.
//!
//! All slots live in one JSON document (`storage.json`), keyed by slot name.
//! Each write is a locked read-modify-write on that document, so separate
//! processes sharing the file see each other's changes. Reads of a corrupt
//! document fail; the next write moves it aside and starts over.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::Duration;

use agency_core::Result;
use agency_core::clock::{Clock, SystemClock};
use agency_core::storage::{KeyValueStore, StoredSlot};

use crate::paths::AgencyPaths;
use crate::storage::AtomicJsonFile;

type SlotMap = BTreeMap<String, StoredSlot>;

pub struct FileKeyValueStore {
    file: AtomicJsonFile<SlotMap>,
    clock: Arc<dyn Clock>,
}

impl FileKeyValueStore {
    pub fn new(path: PathBuf) -> Self {
        Self::with_clock(path, Arc::new(SystemClock))
    }

    pub fn with_clock(path: PathBuf, clock: Arc<dyn Clock>) -> Self {
        Self {
            file: AtomicJsonFile::new(path),
            clock,
        }
    }

    /// Opens the store at the storage file resolved by `paths`.
    pub fn from_paths(paths: &AgencyPaths) -> Result<Self> {
        Ok(Self::new(paths.storage_file()?))
    }

    pub fn path(&self) -> &std::path::Path {
        self.file.path()
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let now = self.clock.now();
        let slots = self.file.load()?.unwrap_or_default();

        match slots.get(key) {
            Some(slot) if slot.is_expired(now) => {
                tracing::debug!(key, "Purging expired slot");
                self.file.update(SlotMap::new(), |slots| {
                    // Another writer may have refreshed the slot meanwhile.
                    if slots.get(key).is_some_and(|slot| slot.is_expired(now)) {
                        slots.remove(key);
                    }
                })?;
                Ok(None)
            }
            Some(slot) => Ok(Some(slot.value.clone())),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<()> {
        let slot = StoredSlot::new(value, self.clock.now(), ttl);
        self.file.update(SlotMap::new(), |slots| {
            slots.insert(key.to_string(), slot);
        })?;
        tracing::debug!(key, path = %self.file.path().display(), "Stored slot");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let removed = self
            .file
            .update(SlotMap::new(), |slots| slots.remove(key).is_some())?;
        tracing::debug!(key, removed, "Removed slot");
        Ok(())
    }
}
