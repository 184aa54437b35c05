//! Subcommand handlers.
//!
//! Handlers return the text to print so they can be exercised without a
//! terminal.

pub mod chat;
pub mod session;
pub mod theme;
pub mod visit;

use agency_core::guard::NavigationIntent;
use colored::Colorize;

/// Renders a navigation intent as the shell would execute it.
pub fn describe_navigation(intent: &NavigationIntent) -> String {
    match intent {
        NavigationIntent::Stay => format!("{} stay on current page", "→".dimmed()),
        NavigationIntent::NavigateTo(route) => {
            format!("{} navigate to {}", "→".cyan(), route.path().bold())
        }
    }
}
