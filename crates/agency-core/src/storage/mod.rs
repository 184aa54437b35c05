//! Key/value slot storage.
//!
//! The site persists a handful of string slots (the signed-in user, the theme
//! preference). Each slot may carry an expiry; an expired slot reads as absent.
//!
//! # Module Structure
//!
//! - `memory`: In-process store, used for tests and ephemeral shells
//!
//! File-backed storage lives in `agency-infrastructure`.

mod memory;

pub use memory::MemoryKeyValueStore;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Abstract key/value slot store with optional per-slot expiry.
///
/// Implementations must treat an expired slot exactly like a missing one.
pub trait KeyValueStore: Send + Sync {
    /// Reads a slot. Returns `Ok(None)` for missing or expired slots.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes a slot, replacing any previous value.
    ///
    /// `ttl` of `None` means the slot never expires.
    fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<()>;

    /// Removes a slot. Removing a missing slot is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// A persisted slot value with its expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSlot {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl StoredSlot {
    /// Builds a slot that expires `ttl` after `now`.
    ///
    /// A `ttl` that reaches past the last representable instant never expires.
    pub fn new(value: impl Into<String>, now: DateTime<Utc>, ttl: Option<Duration>) -> Self {
        Self {
            value: value.into(),
            expires_at: ttl.and_then(|ttl| now.checked_add_signed(ttl)),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_without_ttl_never_expires() {
        let now = Utc::now();
        let slot = StoredSlot::new("light", now, None);
        assert!(!slot.is_expired(now + Duration::days(10_000)));
    }

    #[test]
    fn test_slot_expires_at_boundary() {
        let now = Utc::now();
        let slot = StoredSlot::new("v", now, Some(Duration::days(7)));
        assert!(!slot.is_expired(now + Duration::days(7) - Duration::seconds(1)));
        assert!(slot.is_expired(now + Duration::days(7)));
    }

    #[test]
    fn test_out_of_range_ttl_never_expires() {
        let now = Utc::now();
        let slot = StoredSlot::new("v", now, Some(Duration::days(i64::from(u32::MAX))));
        assert_eq!(slot.expires_at, None);
        assert!(!slot.is_expired(now + Duration::days(365)));
    }

    #[test]
    fn test_slot_serializes_camel_case() {
        let now = Utc::now();
        let json = serde_json::to_string(&StoredSlot::new("v", now, Some(Duration::days(1))))
            .unwrap();
        assert!(json.contains("expiresAt"));

        let json = serde_json::to_string(&StoredSlot::new("v", now, None)).unwrap();
        assert_eq!(json, r#"{"value":"v"}"#);
    }
}
