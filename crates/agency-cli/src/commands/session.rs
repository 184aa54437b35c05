use anyhow::Result;
use colored::Colorize;

use agency_core::session::AuthStatus;

use super::describe_navigation;
use crate::app::AppBootstrap;

pub fn login(app: &AppBootstrap, email: &str, password: &str) -> Result<String> {
    let next = app.auth.login(email, password)?;
    let user = app.auth.current_user();
    let name = user.map(|user| user.display_name).unwrap_or_default();
    Ok(format!(
        "{} Signed in as {}\n{}",
        "✓".green(),
        name.bold(),
        describe_navigation(&next)
    ))
}

pub fn logout(app: &AppBootstrap) -> String {
    let next = app.auth.logout();
    format!("{} Signed out\n{}", "✓".green(), describe_navigation(&next))
}

pub fn whoami(app: &AppBootstrap) -> String {
    match app.auth.status() {
        AuthStatus::Authenticated(user) => {
            format!("{} <{}>", user.display_name.bold(), user.email)
        }
        AuthStatus::Anonymous => "Not signed in".dimmed().to_string(),
        AuthStatus::Initializing => "Loading…".dimmed().to_string(),
    }
}
