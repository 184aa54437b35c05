//! Theme domain module.
//!
//! # Module Structure
//!
//! - `model`: `ThemePreference`
//! - `service`: `ThemeService` and the `SystemThemeProbe` seam

mod model;
mod service;

// Re-export public API
pub use model::ThemePreference;
pub use service::{DEFAULT_THEME_KEY, FixedThemeProbe, SystemThemeProbe, ThemeService};
