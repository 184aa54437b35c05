//! Route guard and navigation intents.
//!
//! The guard never navigates by itself. It returns a `GuardDecision` and the
//! calling layer performs whatever redirect the decision asks for.

use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use crate::auth::AuthService;
use crate::session::SessionState;

/// Path of the sign-in page.
pub const LOGIN_PATH: &str = "/login";

/// Path of the signed-in landing page.
pub const DASHBOARD_PATH: &str = "/dashboard";

/// A client-side route.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum Route {
    Login,
    Dashboard,
    Path(String),
}

impl Route {
    /// Parses a path, mapping the well-known ones to their variants.
    pub fn parse(path: &str) -> Self {
        match path.trim_end_matches('/') {
            LOGIN_PATH => Self::Login,
            DASHBOARD_PATH => Self::Dashboard,
            _ => Self::Path(path.to_string()),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Self::Login => LOGIN_PATH,
            Self::Dashboard => DASHBOARD_PATH,
            Self::Path(path) => path,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl From<Route> for String {
    fn from(route: Route) -> Self {
        route.path().to_string()
    }
}

/// What the caller should do with the current location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "route", rename_all = "camelCase")]
pub enum NavigationIntent {
    Stay,
    NavigateTo(Route),
}

/// Outcome of checking a protected route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", content = "route", rename_all = "camelCase")]
pub enum GuardDecision {
    /// Session not read yet. Show a placeholder; do not redirect.
    Loading,
    /// Not signed in. Render nothing and navigate to the route.
    Redirect(Route),
    /// Render the protected content unchanged.
    Render,
}

impl GuardDecision {
    /// The navigation the caller should perform for this decision.
    pub fn navigation(&self) -> NavigationIntent {
        match self {
            Self::Redirect(route) => NavigationIntent::NavigateTo(route.clone()),
            Self::Loading | Self::Render => NavigationIntent::Stay,
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect(_))
    }
}

/// Decides a protected route from a session snapshot.
///
/// While `loading`, this always yields `Loading` so a reload with a valid
/// stored session never flashes a redirect.
pub fn decide(state: &SessionState) -> GuardDecision {
    if state.loading {
        GuardDecision::Loading
    } else if state.current_user.is_some() {
        GuardDecision::Render
    } else {
        GuardDecision::Redirect(Route::Login)
    }
}

/// Gates protected routes on the auth service's state.
///
/// # Example
///
/// ```
/// use agency_core::auth::AuthService;
/// use agency_core::guard::{GuardDecision, Route, RouteGuard};
/// use agency_core::session::SessionStore;
/// use agency_core::storage::MemoryKeyValueStore;
/// use std::sync::Arc;
///
/// let auth = Arc::new(AuthService::start(SessionStore::new(Arc::new(MemoryKeyValueStore::new()))));
/// let guard = RouteGuard::new(auth);
/// assert_eq!(guard.check_path("/dashboard"), GuardDecision::Redirect(Route::Login));
/// assert_eq!(guard.check_path("/about"), GuardDecision::Render);
/// ```
#[derive(Clone)]
pub struct RouteGuard {
    auth: Arc<AuthService>,
    protected_prefixes: Vec<String>,
}

impl RouteGuard {
    /// Creates a guard protecting the dashboard.
    pub fn new(auth: Arc<AuthService>) -> Self {
        Self {
            auth,
            protected_prefixes: vec![DASHBOARD_PATH.to_string()],
        }
    }

    /// Replaces the list of protected path prefixes.
    pub fn with_protected_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.protected_prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    pub fn protected_prefixes(&self) -> &[String] {
        &self.protected_prefixes
    }

    /// Whether `path` sits under a protected prefix.
    pub fn is_protected(&self, path: &str) -> bool {
        self.protected_prefixes.iter().any(|prefix| {
            path == prefix
                || path
                    .strip_prefix(prefix.as_str())
                    .is_some_and(|rest| rest.starts_with('/'))
        })
    }

    /// Decides a protected subtree from the current auth state.
    pub fn check(&self) -> GuardDecision {
        let decision = decide(&self.auth.state());
        tracing::debug!(?decision, "Route guard evaluated");
        decision
    }

    /// Decides an arbitrary path. Unprotected paths always render.
    pub fn check_path(&self, path: &str) -> GuardDecision {
        if self.is_protected(path) {
            self.check()
        } else {
            GuardDecision::Render
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionStore;
    use crate::storage::MemoryKeyValueStore;
    use crate::user::UserIdentity;

    fn create_test_guard() -> (RouteGuard, Arc<AuthService>, Arc<MemoryKeyValueStore>) {
        let slots = Arc::new(MemoryKeyValueStore::new());
        let auth = Arc::new(AuthService::new(SessionStore::new(slots.clone())));
        (RouteGuard::new(auth.clone()), auth, slots)
    }

    #[test]
    fn test_loading_never_redirects() {
        let (guard, auth, slots) = create_test_guard();
        SessionStore::new(slots)
            .save(&UserIdentity::from_email("alice@example.com"), 7)
            .unwrap();

        assert!(auth.is_loading());
        let decision = guard.check();
        assert_eq!(decision, GuardDecision::Loading);
        assert_eq!(decision.navigation(), NavigationIntent::Stay);

        auth.initialize();
        assert_eq!(guard.check(), GuardDecision::Render);
    }

    #[test]
    fn test_anonymous_redirects_to_login() {
        let (guard, auth, _) = create_test_guard();
        auth.initialize();

        let decision = guard.check();
        assert_eq!(decision, GuardDecision::Redirect(Route::Login));
        assert_eq!(
            decision.navigation(),
            NavigationIntent::NavigateTo(Route::Login)
        );
    }

    #[test]
    fn test_authenticated_renders() {
        let (guard, auth, _) = create_test_guard();
        auth.initialize();
        auth.login("alice@example.com", "x").unwrap();
        assert_eq!(guard.check(), GuardDecision::Render);
    }

    #[test]
    fn test_decide_never_redirects_while_loading() {
        for current_user in [None, Some(UserIdentity::from_email("a@b.c"))] {
            let state = SessionState {
                current_user,
                loading: true,
            };
            assert!(!decide(&state).is_redirect());
        }
    }

    #[test]
    fn test_prefix_matching() {
        let (guard, _, _) = create_test_guard();
        let guard = guard.with_protected_prefixes(["/dashboard", "/account"]);

        assert!(guard.is_protected("/dashboard"));
        assert!(guard.is_protected("/dashboard/projects"));
        assert!(guard.is_protected("/account"));
        assert!(!guard.is_protected("/dashboards"));
        assert!(!guard.is_protected("/"));
        assert!(!guard.is_protected("/login"));
    }

    #[test]
    fn test_unprotected_path_renders_even_when_anonymous() {
        let (guard, auth, _) = create_test_guard();
        auth.initialize();
        assert_eq!(guard.check_path("/portfolio"), GuardDecision::Render);
        assert!(guard.check_path("/dashboard").is_redirect());
    }

    #[test]
    fn test_route_parse_and_display() {
        assert_eq!(Route::parse("/login"), Route::Login);
        assert_eq!(Route::parse("/dashboard/"), Route::Dashboard);
        assert_eq!(Route::parse("/about"), Route::Path("/about".to_string()));
        assert_eq!(Route::Dashboard.to_string(), "/dashboard");
    }

    #[test]
    fn test_intent_serializes_route_as_path() {
        let json = serde_json::to_value(NavigationIntent::NavigateTo(Route::Login)).unwrap();
        assert_eq!(json["action"], "navigateTo");
        assert_eq!(json["route"], "/login");
    }
}
