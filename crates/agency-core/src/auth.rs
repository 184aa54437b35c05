//! Auth service: the session state machine.
//!
//! ```text
//! Initializing ──initialize()──▶ Authenticated(user) | Anonymous
//! any settled  ──login()───────▶ Authenticated(user)
//! any settled  ──logout()──────▶ Anonymous
//! ```
//!
//! The service is the single writer of the session state. Consumers receive
//! read-only `SessionState` snapshots and mutate only through `login` and
//! `logout`, which return the navigation the caller should perform.

use std::sync::{Arc, PoisonError, RwLock};

use crate::error::Result;
use crate::guard::{NavigationIntent, Route};
use crate::session::{AuthStatus, DEFAULT_SESSION_TTL_DAYS, SessionState, SessionStore};
use crate::user::{CredentialVerifier, TrustingVerifier, UserIdentity};

/// Holds the current session and performs login/logout.
///
/// # Example
///
/// ```
/// use agency_core::auth::AuthService;
/// use agency_core::guard::{NavigationIntent, Route};
/// use agency_core::session::SessionStore;
/// use agency_core::storage::MemoryKeyValueStore;
/// use std::sync::Arc;
///
/// let auth = AuthService::start(SessionStore::new(Arc::new(MemoryKeyValueStore::new())));
/// assert!(auth.current_user().is_none());
///
/// let next = auth.login("alice@example.com", "x").unwrap();
/// assert_eq!(next, NavigationIntent::NavigateTo(Route::Dashboard));
/// assert_eq!(auth.current_user().unwrap().display_name, "alice");
/// ```
pub struct AuthService {
    store: SessionStore,
    verifier: Arc<dyn CredentialVerifier>,
    ttl_days: u32,
    status: RwLock<AuthStatus>,
}

impl AuthService {
    /// Creates a service in the `Initializing` state.
    ///
    /// Call [`AuthService::initialize`] to read the stored session.
    pub fn new(store: SessionStore) -> Self {
        Self {
            store,
            verifier: Arc::new(TrustingVerifier),
            ttl_days: DEFAULT_SESSION_TTL_DAYS,
            status: RwLock::new(AuthStatus::Initializing),
        }
    }

    /// Creates a service and immediately reads the stored session.
    pub fn start(store: SessionStore) -> Self {
        let service = Self::new(store);
        service.initialize();
        service
    }

    /// Replaces the credential verifier.
    pub fn with_verifier(mut self, verifier: Arc<dyn CredentialVerifier>) -> Self {
        self.verifier = verifier;
        self
    }

    /// Overrides how many days a login stays valid.
    pub fn with_ttl_days(mut self, ttl_days: u32) -> Self {
        self.ttl_days = ttl_days;
        self
    }

    /// Leaves `Initializing` by reading the stored session.
    ///
    /// Has no effect once the state machine has settled.
    pub fn initialize(&self) -> SessionState {
        let mut status = self.status.write().unwrap_or_else(PoisonError::into_inner);
        if status.is_settled() {
            tracing::debug!("Auth already initialized");
            return SessionState::from(&*status);
        }

        *status = self.read_stored_status();
        tracing::info!(authenticated = status.user().is_some(), "Auth initialized");
        SessionState::from(&*status)
    }

    /// Re-reads the stored session, picking up expiry or external changes.
    pub fn refresh(&self) -> SessionState {
        let next = self.read_stored_status();
        let mut status = self.status.write().unwrap_or_else(PoisonError::into_inner);
        *status = next;
        SessionState::from(&*status)
    }

    /// Signs a user in.
    ///
    /// The identity is derived from the email's local part. With the default
    /// `TrustingVerifier` this never fails. If persisting the session fails the
    /// in-memory session is still established and the failure is logged.
    ///
    /// # Errors
    ///
    /// `AgencyError::InvalidCredentials` when the verifier rejects the pair;
    /// the state is left unchanged.
    pub fn login(&self, email: &str, password: &str) -> Result<NavigationIntent> {
        self.verifier.verify(email, password)?;

        let identity = UserIdentity::from_email(email);
        if let Err(e) = self.store.save(&identity, self.ttl_days) {
            tracing::warn!(error = %e, "Failed to persist session, keeping it in memory only");
        }

        tracing::info!(display_name = %identity.display_name, "User signed in");
        *self.status.write().unwrap_or_else(PoisonError::into_inner) =
            AuthStatus::Authenticated(identity);

        Ok(NavigationIntent::NavigateTo(Route::Dashboard))
    }

    /// Signs the current user out. Always succeeds.
    pub fn logout(&self) -> NavigationIntent {
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "Failed to clear persisted session");
        }

        *self.status.write().unwrap_or_else(PoisonError::into_inner) = AuthStatus::Anonymous;
        tracing::info!("User signed out");

        NavigationIntent::NavigateTo(Route::Login)
    }

    pub fn status(&self) -> AuthStatus {
        self.status
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn state(&self) -> SessionState {
        SessionState::from(&*self.status.read().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn current_user(&self) -> Option<UserIdentity> {
        self.state().current_user
    }

    pub fn is_loading(&self) -> bool {
        self.state().loading
    }

    fn read_stored_status(&self) -> AuthStatus {
        match self.store.load() {
            Some(identity) => AuthStatus::Authenticated(identity),
            None => AuthStatus::Anonymous,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::error::AgencyError;
    use crate::session::DEFAULT_SESSION_KEY;
    use crate::storage::{KeyValueStore, MemoryKeyValueStore};
    use crate::user::RejectingVerifier;
    use chrono::Duration;

    fn create_test_service() -> (AuthService, Arc<MemoryKeyValueStore>) {
        let slots = Arc::new(MemoryKeyValueStore::new());
        (AuthService::new(SessionStore::new(slots.clone())), slots)
    }

    #[test]
    fn test_new_service_is_initializing() {
        let (auth, _) = create_test_service();
        assert_eq!(auth.status(), AuthStatus::Initializing);
        assert!(auth.is_loading());
        assert!(auth.current_user().is_none());
    }

    #[test]
    fn test_initialize_without_stored_session_is_anonymous() {
        let (auth, _) = create_test_service();
        let state = auth.initialize();
        assert!(!state.loading);
        assert_eq!(auth.status(), AuthStatus::Anonymous);
    }

    #[test]
    fn test_initialize_restores_stored_session() {
        let (auth, slots) = create_test_service();
        let user = UserIdentity::from_email("alice@example.com");
        SessionStore::new(slots).save(&user, 7).unwrap();

        let state = auth.initialize();
        assert_eq!(state.current_user, Some(user.clone()));
        assert_eq!(auth.status(), AuthStatus::Authenticated(user));
    }

    #[test]
    fn test_initialize_with_malformed_slot_is_anonymous() {
        let (auth, slots) = create_test_service();
        slots.insert_raw(DEFAULT_SESSION_KEY, "not json");

        auth.initialize();
        assert_eq!(auth.status(), AuthStatus::Anonymous);
    }

    #[test]
    fn test_initialize_twice_keeps_first_result() {
        let (auth, slots) = create_test_service();
        auth.initialize();

        SessionStore::new(slots)
            .save(&UserIdentity::from_email("late@example.com"), 7)
            .unwrap();
        auth.initialize();
        assert_eq!(auth.status(), AuthStatus::Anonymous);
    }

    #[test]
    fn test_login_then_logout_scenario() {
        let (auth, slots) = create_test_service();
        auth.initialize();

        let next = auth.login("alice@example.com", "x").unwrap();
        assert_eq!(next, NavigationIntent::NavigateTo(Route::Dashboard));
        assert_eq!(
            auth.status(),
            AuthStatus::Authenticated(UserIdentity::new("alice@example.com", "alice"))
        );
        assert!(slots.get(DEFAULT_SESSION_KEY).unwrap().is_some());

        let next = auth.logout();
        assert_eq!(next, NavigationIntent::NavigateTo(Route::Login));
        assert_eq!(auth.status(), AuthStatus::Anonymous);
        assert!(slots.get(DEFAULT_SESSION_KEY).unwrap().is_none());
    }

    #[test]
    fn test_login_settles_an_initializing_service() {
        let (auth, _) = create_test_service();
        auth.login("bob@example.com", "pw").unwrap();
        assert!(!auth.is_loading());
    }

    #[test]
    fn test_never_authenticated_while_loading() {
        let (auth, _) = create_test_service();
        let check = |auth: &AuthService| {
            let state = auth.state();
            assert!(!(state.loading && state.current_user.is_some()));
        };

        check(&auth);
        auth.initialize();
        check(&auth);
        auth.login("alice@example.com", "x").unwrap();
        check(&auth);
        auth.logout();
        check(&auth);
    }

    #[test]
    fn test_rejected_login_leaves_state_unchanged() {
        let (auth, slots) = create_test_service();
        let auth = auth.with_verifier(Arc::new(RejectingVerifier));
        auth.initialize();

        let err = auth.login("mallory@example.com", "guess").unwrap_err();
        assert!(matches!(err, AgencyError::InvalidCredentials { .. }));
        assert_eq!(auth.status(), AuthStatus::Anonymous);
        assert!(slots.is_empty());
    }

    #[test]
    fn test_refresh_picks_up_expiry() {
        let clock = Arc::new(ManualClock::default());
        let slots = Arc::new(MemoryKeyValueStore::with_clock(clock.clone()));
        let auth = AuthService::start(SessionStore::new(slots)).with_ttl_days(1);

        auth.login("alice@example.com", "x").unwrap();
        assert!(auth.refresh().current_user.is_some());

        clock.advance(Duration::days(1));
        let state = auth.refresh();
        assert!(state.current_user.is_none());
        assert!(!state.loading);
    }

    #[test]
    fn test_login_with_huge_ttl_succeeds() {
        let slots = Arc::new(MemoryKeyValueStore::new());
        let auth = AuthService::start(SessionStore::new(slots.clone())).with_ttl_days(u32::MAX);

        auth.login("alice@example.com", "x").unwrap();
        assert!(auth.current_user().is_some());
        assert!(SessionStore::new(slots).load().is_some());
    }

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(AgencyError::storage("disk on fire"))
        }

        fn set(&self, _key: &str, _value: &str, _ttl: Option<Duration>) -> Result<()> {
            Err(AgencyError::storage("disk on fire"))
        }

        fn remove(&self, _key: &str) -> Result<()> {
            Err(AgencyError::storage("disk on fire"))
        }
    }

    #[test]
    fn test_storage_failures_do_not_fail_login_or_logout() {
        let auth = AuthService::start(SessionStore::new(Arc::new(FailingStore)));
        assert_eq!(auth.status(), AuthStatus::Anonymous);

        assert!(auth.login("alice@example.com", "x").is_ok());
        assert!(auth.current_user().is_some());

        auth.logout();
        assert_eq!(auth.status(), AuthStatus::Anonymous);
    }
}
