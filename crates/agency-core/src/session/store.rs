//! Persistent session store.
//!
//! Serializes the signed-in `UserIdentity` into a single key/value slot with
//! an expiry. The store performs no validation of the identity beyond
//! serializability and applies no encryption, which is acceptable only
//! because the slot never holds a credential.

use chrono::Duration;
use std::sync::Arc;

use crate::error::Result;
use crate::storage::KeyValueStore;
use crate::user::UserIdentity;

/// Slot key the identity is stored under.
pub const DEFAULT_SESSION_KEY: &str = "user";

/// How long a login stays valid.
pub const DEFAULT_SESSION_TTL_DAYS: u32 = 7;

/// save/load/clear over one slot of a `KeyValueStore`.
///
/// # Example
///
/// ```
/// use agency_core::session::SessionStore;
/// use agency_core::storage::MemoryKeyValueStore;
/// use agency_core::user::UserIdentity;
/// use std::sync::Arc;
///
/// let store = SessionStore::new(Arc::new(MemoryKeyValueStore::new()));
/// let user = UserIdentity::from_email("alice@example.com");
/// store.save(&user, 7).unwrap();
/// assert_eq!(store.load(), Some(user));
/// ```
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(store, DEFAULT_SESSION_KEY)
    }

    pub fn with_key(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Serializes `identity` and writes it with an expiry of `ttl_days`.
    pub fn save(&self, identity: &UserIdentity, ttl_days: u32) -> Result<()> {
        let json = serde_json::to_string(identity)?;
        let ttl = Duration::days(i64::from(ttl_days));
        self.store.set(&self.key, &json, Some(ttl))?;
        tracing::debug!(key = %self.key, ttl_days, "Session saved");
        Ok(())
    }

    /// Returns the stored identity if present and unexpired.
    ///
    /// Read failures and malformed values are logged and reported as absent.
    pub fn load(&self) -> Option<UserIdentity> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Failed to read session slot");
                return None;
            }
        };

        match serde_json::from_str::<UserIdentity>(&raw) {
            Ok(identity) => Some(identity),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Discarding malformed session slot");
                None
            }
        }
    }

    /// Removes the stored identity.
    pub fn clear(&self) -> Result<()> {
        self.store.remove(&self.key)?;
        tracing::debug!(key = %self.key, "Session cleared");
        Ok(())
    }
}
