//! Session state domain models.

use serde::Serialize;

use crate::user::UserIdentity;

/// Where the auth state machine currently is.
///
/// `Initializing` is left exactly once, when the stored session has been read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "user", rename_all = "camelCase")]
pub enum AuthStatus {
    Initializing,
    Authenticated(UserIdentity),
    Anonymous,
}

impl AuthStatus {
    pub fn is_settled(&self) -> bool {
        !matches!(self, Self::Initializing)
    }

    pub fn user(&self) -> Option<&UserIdentity> {
        match self {
            Self::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

/// Read-only snapshot of the session handed to consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub current_user: Option<UserIdentity>,
    pub loading: bool,
}

impl From<&AuthStatus> for SessionState {
    fn from(status: &AuthStatus) -> Self {
        Self {
            current_user: status.user().cloned(),
            loading: !status.is_settled(),
        }
    }
}
