//! Configuration service implementation.
//!
//! Loads `SiteConfig` from `config.toml`, applies environment overrides and
//! caches the result.

use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

use agency_core::config::SiteConfig;
use agency_core::{AgencyError, Result};

use crate::paths::AgencyPaths;

/// Overrides `chatbot.base_url`.
pub const CHATBOT_URL_ENV: &str = "AGENCY_CHATBOT_URL";
/// Overrides `session.ttl_days`.
pub const SESSION_TTL_DAYS_ENV: &str = "AGENCY_SESSION_TTL_DAYS";

/// Loads and caches the site configuration.
///
/// A missing file is written out with defaults on first load. An unreadable
/// or malformed file falls back to defaults with a warning.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: Option<PathBuf>,
    config: Arc<RwLock<Option<SiteConfig>>>,
}

impl ConfigService {
    /// Uses `config.toml` under the directory resolved by `paths`.
    pub fn new(paths: &AgencyPaths) -> Self {
        let path = match paths.config_file() {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::warn!("Config file location unavailable: {}", e);
                None
            }
        };
        Self {
            path,
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path: Some(path),
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> Option<&std::path::Path> {
        self.path.as_deref()
    }

    /// Gets the configuration, loading from file if not cached.
    pub fn get_config(&self) -> SiteConfig {
        {
            let read_lock = self.config.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(ref cached) = *read_lock {
                return cached.clone();
            }
        }

        let mut loaded = match self.load_config() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Using default configuration: {}", e);
                SiteConfig::default()
            }
        };
        apply_env_overrides(&mut loaded, |name| std::env::var(name).ok());

        let mut write_lock = self.config.write().unwrap_or_else(PoisonError::into_inner);
        *write_lock = Some(loaded.clone());
        loaded
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap_or_else(PoisonError::into_inner);
        *write_lock = None;
    }

    fn load_config(&self) -> Result<SiteConfig> {
        let Some(path) = &self.path else {
            return Ok(SiteConfig::default());
        };

        if !path.exists() {
            let config = SiteConfig::default();
            if let Err(e) = Self::write_default(path, &config) {
                tracing::warn!(path = %path.display(), "Could not write default config: {}", e);
            }
            return Ok(config);
        }

        let content = std::fs::read_to_string(path)?;
        let config: SiteConfig = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    fn write_default(path: &std::path::Path, config: &SiteConfig) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(config)?)?;
        tracing::info!(path = %path.display(), "Created default configuration");
        Ok(())
    }
}

/// Applies environment overrides to `config`.
///
/// `lookup` resolves a variable name; empty values are ignored. An
/// unparsable TTL is logged and left unchanged.
pub fn apply_env_overrides<F>(config: &mut SiteConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let value_of = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

    if let Some(url) = value_of(CHATBOT_URL_ENV) {
        config.chatbot.base_url = url.trim().trim_end_matches('/').to_string();
    }

    if let Some(raw) = value_of(SESSION_TTL_DAYS_ENV) {
        match parse_ttl_days(&raw) {
            Ok(days) => config.session.ttl_days = days,
            Err(e) => tracing::warn!("Ignoring {}: {}", SESSION_TTL_DAYS_ENV, e),
        }
    }
}

fn parse_ttl_days(raw: &str) -> Result<u32> {
    raw.trim()
        .parse::<u32>()
        .map_err(|e| AgencyError::config(format!("invalid day count {:?}: {}", raw, e)))
}
