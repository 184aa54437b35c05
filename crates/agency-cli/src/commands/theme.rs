use colored::Colorize;

use agency_core::theme::ThemePreference;

use crate::app::AppBootstrap;

fn describe(theme: ThemePreference) -> String {
    format!("{} (root class: {})", theme.to_string().bold(), theme.css_class())
}

pub fn show(app: &AppBootstrap) -> String {
    describe(app.theme.current())
}

pub fn toggle(app: &AppBootstrap) -> String {
    describe(app.theme.toggle())
}

pub fn set(app: &AppBootstrap, theme: ThemePreference) -> String {
    app.theme.set(theme);
    describe(app.theme.current())
}
