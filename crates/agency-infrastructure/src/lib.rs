//! Infrastructure layer for the agency site shell.
//!
//! File-backed implementations of the core storage and configuration seams.

pub mod config_service;
pub mod file_kv_store;
pub mod paths;
pub mod storage;
pub mod theme_probe;

pub use config_service::ConfigService;
pub use file_kv_store::FileKeyValueStore;
pub use paths::AgencyPaths;
pub use theme_probe::EnvThemeProbe;
