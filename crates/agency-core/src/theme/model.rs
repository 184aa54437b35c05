//! ThemePreference domain model.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Color scheme the site renders in.
///
/// Persisted and displayed as lowercase `dark` / `light`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ThemePreference {
    Dark,
    #[default]
    Light,
}

impl ThemePreference {
    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    /// Class to put on the document root.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_toggle_twice_is_identity() {
        for theme in [ThemePreference::Dark, ThemePreference::Light] {
            assert_eq!(theme.toggled().toggled(), theme);
            assert_ne!(theme.toggled(), theme);
        }
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!(ThemePreference::from_str("dark").unwrap(), ThemePreference::Dark);
        assert_eq!(ThemePreference::from_str("LIGHT").unwrap(), ThemePreference::Light);
        assert!(ThemePreference::from_str("sepia").is_err());
        assert_eq!(ThemePreference::Dark.to_string(), "dark");
        assert_eq!(ThemePreference::Light.as_ref(), "light");
    }

    #[test]
    fn test_default_is_light() {
        assert_eq!(ThemePreference::default(), ThemePreference::Light);
    }
}
