//! Unified path management for agency configuration and storage files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/agency/            # Config directory (or $AGENCY_CONFIG_DIR)
//! ├── config.toml              # Site configuration
//! ├── storage.json             # Key/value slots (session, theme)
//! └── logs/                    # Application logs
//!     └── agency.log.YYYY-MM-DD
//! ```

use std::path::PathBuf;

/// Environment variable overriding the config directory.
pub const CONFIG_DIR_ENV: &str = "AGENCY_CONFIG_DIR";

const APP_DIR_NAME: &str = "agency";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for agency_core::AgencyError {
    fn from(err: PathError) -> Self {
        agency_core::AgencyError::config(err.to_string())
    }
}

/// Resolves where the shell keeps its files.
///
/// With a base directory every path lives under it; otherwise the platform
/// config directory (`dirs::config_dir()`) joined with `agency` is used.
#[derive(Debug, Clone, Default)]
pub struct AgencyPaths {
    base: Option<PathBuf>,
}

impl AgencyPaths {
    pub fn new(base: Option<PathBuf>) -> Self {
        Self { base }
    }

    /// Returns the agency configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to config directory (e.g., `~/.config/agency/`)
    /// - `Err(PathError::ConfigDirNotFound)`: Could not determine directory
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base {
            Some(base) => Ok(base.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR_NAME))
                .ok_or(PathError::ConfigDirNotFound),
        }
    }

    /// Returns the path to `config.toml`.
    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Returns the path to the key/value slot file.
    pub fn storage_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("storage.json"))
    }

    /// Returns the path to the logs directory.
    pub fn logs_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("logs"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_override() {
        let paths = AgencyPaths::new(Some(PathBuf::from("/tmp/agency-test")));
        assert_eq!(paths.config_dir().unwrap(), PathBuf::from("/tmp/agency-test"));
        assert_eq!(
            paths.storage_file().unwrap(),
            PathBuf::from("/tmp/agency-test/storage.json")
        );
    }

    #[test]
    fn test_files_live_under_config_dir() {
        let paths = AgencyPaths::new(Some(PathBuf::from("/srv/site")));
        let config_dir = paths.config_dir().unwrap();

        let config_file = paths.config_file().unwrap();
        assert!(config_file.ends_with("config.toml"));
        assert!(config_file.starts_with(&config_dir));

        let logs_dir = paths.logs_dir().unwrap();
        assert!(logs_dir.ends_with("logs"));
        assert!(logs_dir.starts_with(&config_dir));
    }

    #[test]
    fn test_platform_dir_ends_with_app_name() {
        // Not every CI box has a config dir.
        if let Ok(config_dir) = AgencyPaths::default().config_dir() {
            assert!(config_dir.ends_with("agency"));
        }
    }
}
