//! In-memory key/value slot store.

use chrono::Duration;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use super::{KeyValueStore, StoredSlot};
use crate::clock::{Clock, SystemClock};
use crate::error::Result;

/// Slot store held entirely in process memory.
///
/// Lives as long as the value does, which makes it the analogue of a single
/// browser tab. Expired slots are purged lazily on read.
#[derive(Clone)]
pub struct MemoryKeyValueStore {
    slots: Arc<RwLock<HashMap<String, StoredSlot>>>,
    clock: Arc<dyn Clock>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            slots: Arc::new(RwLock::new(HashMap::new())),
            clock,
        }
    }

    /// Writes a raw value without going through serialization helpers.
    ///
    /// Useful for seeding a store with data written by an older client.
    pub fn insert_raw(&self, key: &str, value: &str) {
        let now = self.clock.now();
        self.slots
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), StoredSlot::new(value, now, None));
    }

    /// Number of live (unexpired) slots.
    pub fn len(&self) -> usize {
        let now = self.clock.now();
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|slot| !slot.is_expired(now))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryKeyValueStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let now = self.clock.now();
        {
            let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
            match slots.get(key) {
                None => return Ok(None),
                Some(slot) if !slot.is_expired(now) => return Ok(Some(slot.value.clone())),
                Some(_) => {}
            }
        }

        tracing::debug!(key, "Purging expired slot");
        self.slots
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(None)
    }

    fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<()> {
        let slot = StoredSlot::new(value, self.clock.now(), ttl);
        self.slots
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), slot);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.slots
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    #[test]
    fn test_set_and_get() {
        let store = MemoryKeyValueStore::new();
        store.set("theme", "dark", None).unwrap();
        assert_eq!(store.get("theme").unwrap(), Some("dark".to_string()));
    }

    #[test]
    fn test_get_missing_key() {
        let store = MemoryKeyValueStore::new();
        assert!(store.get("nothing").unwrap().is_none());
    }

    #[test]
    fn test_remove_missing_key_is_ok() {
        let store = MemoryKeyValueStore::new();
        assert!(store.remove("nothing").is_ok());
    }

    #[test]
    fn test_expired_slot_reads_as_absent_and_is_purged() {
        let clock = Arc::new(ManualClock::default());
        let store = MemoryKeyValueStore::with_clock(clock.clone());
        store.set("user", "{}", Some(Duration::days(7))).unwrap();
        assert_eq!(store.len(), 1);

        clock.advance(Duration::days(7));
        assert!(store.get("user").unwrap().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_overwrite_resets_expiry() {
        let clock = Arc::new(ManualClock::default());
        let store = MemoryKeyValueStore::with_clock(clock.clone());
        store.set("user", "a", Some(Duration::days(1))).unwrap();
        store.set("user", "b", None).unwrap();

        clock.advance(Duration::days(2));
        assert_eq!(store.get("user").unwrap(), Some("b".to_string()));
    }

    #[test]
    fn test_clones_share_slots() {
        let store = MemoryKeyValueStore::new();
        let other = store.clone();
        store.set("k", "v", None).unwrap();
        assert_eq!(other.get("k").unwrap(), Some("v".to_string()));
    }
}
