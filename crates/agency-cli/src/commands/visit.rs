use colored::Colorize;

use agency_core::guard::{GuardDecision, Route};

use super::describe_navigation;
use crate::app::AppBootstrap;

/// Simulates opening `path`. Protected routes go through the guard.
pub fn visit(app: &AppBootstrap, path: &str) -> String {
    let route = Route::parse(path);

    if !app.guard.is_protected(route.path()) {
        return format!("{} {}", "render".green(), route);
    }

    let decision = app.guard.check_path(route.path());
    let label = match &decision {
        GuardDecision::Loading => "loading".yellow(),
        GuardDecision::Redirect(_) => "redirect".red(),
        GuardDecision::Render => "render".green(),
    };
    format!("{} {}\n{}", label, route, describe_navigation(&decision.navigation()))
}
