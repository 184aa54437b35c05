//! Theme service.
//!
//! Resolves the theme once at construction (persisted slot, then the OS
//! preference, then light) and persists every change.

use std::str::FromStr;
use std::sync::{Arc, PoisonError, RwLock};

use super::model::ThemePreference;
use crate::error::Result;
use crate::storage::KeyValueStore;

/// Slot key the theme is stored under.
pub const DEFAULT_THEME_KEY: &str = "theme";

/// Reports the operating system's color-scheme preference, if it has one.
pub trait SystemThemeProbe: Send + Sync {
    fn preferred_theme(&self) -> Option<ThemePreference>;
}

/// A probe that always reports the same answer.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedThemeProbe(pub Option<ThemePreference>);

impl SystemThemeProbe for FixedThemeProbe {
    fn preferred_theme(&self) -> Option<ThemePreference> {
        self.0
    }
}

/// Holds the current theme and persists toggles.
pub struct ThemeService {
    store: Arc<dyn KeyValueStore>,
    key: String,
    current: RwLock<ThemePreference>,
}

impl ThemeService {
    /// Resolves the initial theme.
    ///
    /// Order: persisted slot, `probe`, then `ThemePreference::Light`. A stored
    /// value that does not parse is logged and ignored.
    pub fn new(store: Arc<dyn KeyValueStore>, probe: &dyn SystemThemeProbe) -> Self {
        Self::with_key(store, probe, DEFAULT_THEME_KEY)
    }

    pub fn with_key(
        store: Arc<dyn KeyValueStore>,
        probe: &dyn SystemThemeProbe,
        key: impl Into<String>,
    ) -> Self {
        let key = key.into();
        let initial = Self::read_persisted(store.as_ref(), &key)
            .or_else(|| probe.preferred_theme())
            .unwrap_or_default();
        tracing::debug!(theme = %initial, "Theme initialized");

        Self {
            store,
            key,
            current: RwLock::new(initial),
        }
    }

    pub fn current(&self) -> ThemePreference {
        *self.current.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Flips between dark and light, persists, and returns the new value.
    pub fn toggle(&self) -> ThemePreference {
        let next = {
            let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
            *current = current.toggled();
            *current
        };
        self.persist(next);
        next
    }

    /// Sets an explicit theme and persists it.
    pub fn set(&self, theme: ThemePreference) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = theme;
        self.persist(theme);
    }

    fn persist(&self, theme: ThemePreference) {
        if let Err(e) = self.write_slot(theme) {
            tracing::warn!(theme = %theme, error = %e, "Failed to persist theme");
        }
    }

    fn write_slot(&self, theme: ThemePreference) -> Result<()> {
        self.store.set(&self.key, theme.as_ref(), None)
    }

    fn read_persisted(store: &dyn KeyValueStore, key: &str) -> Option<ThemePreference> {
        let raw = match store.get(key) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to read theme slot");
                return None;
            }
        };

        match ThemePreference::from_str(raw.trim()) {
            Ok(theme) => Some(theme),
            Err(_) => {
                tracing::warn!(key, value = %raw, "Ignoring unknown stored theme");
                None
            }
        }
    }
}
