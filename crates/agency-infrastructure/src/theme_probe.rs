//! OS color-scheme detection from the environment.

use agency_core::theme::{SystemThemeProbe, ThemePreference};

/// Explicit `dark` / `light` preference.
pub const COLOR_SCHEME_ENV: &str = "AGENCY_COLOR_SCHEME";
/// GTK theme name; a `:dark` suffix selects the dark variant.
pub const GTK_THEME_ENV: &str = "GTK_THEME";

/// Reads the color-scheme preference from environment variables.
///
/// `AGENCY_COLOR_SCHEME` wins when it parses. Otherwise a `GTK_THEME` ending
/// in `:dark` reports dark. Anything else reports no preference.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvThemeProbe;

impl SystemThemeProbe for EnvThemeProbe {
    fn preferred_theme(&self) -> Option<ThemePreference> {
        detect(|name| std::env::var(name).ok())
    }
}

fn detect<F>(lookup: F) -> Option<ThemePreference>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(raw) = lookup(COLOR_SCHEME_ENV) {
        match raw.trim().parse::<ThemePreference>() {
            Ok(theme) => return Some(theme),
            Err(_) => tracing::debug!(value = %raw, "Unrecognized {}", COLOR_SCHEME_ENV),
        }
    }

    lookup(GTK_THEME_ENV)
        .filter(|theme| theme.to_ascii_lowercase().ends_with(":dark"))
        .map(|_| ThemePreference::Dark)
}
