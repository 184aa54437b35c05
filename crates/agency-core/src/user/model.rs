//! UserIdentity domain model.
//!
//! Represents the signed-in visitor: an email and a display name.

use serde::{Deserialize, Serialize};

/// User identity domain model.
///
/// Persisted as JSON (`{"email": ..., "displayName": ...}`) in the session
/// slot. Contains no secret material.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    /// Email address the user signed in with
    pub email: String,
    /// Name shown in the UI
    pub display_name: String,
}

impl UserIdentity {
    pub fn new(email: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            display_name: display_name.into(),
        }
    }

    /// Builds an identity whose display name is the local part of the email.
    ///
    /// The local part is everything before the first `@`. Input without an
    /// `@` is used whole.
    ///
    /// # Example
    ///
    /// ```
    /// use agency_core::user::UserIdentity;
    ///
    /// let user = UserIdentity::from_email("alice@example.com");
    /// assert_eq!(user.display_name, "alice");
    /// ```
    pub fn from_email(email: &str) -> Self {
        let display_name = email.split('@').next().unwrap_or(email);
        Self::new(email, display_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_email_uses_local_part() {
        let user = UserIdentity::from_email("alice@example.com");
        assert_eq!(user.email, "alice@example.com");
        assert_eq!(user.display_name, "alice");
    }

    #[test]
    fn test_from_email_without_at_sign() {
        let user = UserIdentity::from_email("bob");
        assert_eq!(user.display_name, "bob");
    }

    #[test]
    fn test_from_email_splits_on_first_at_sign() {
        let user = UserIdentity::from_email("first@second@example.com");
        assert_eq!(user.display_name, "first");
    }

    #[test]
    fn test_serializes_display_name_camel_case() {
        let user = UserIdentity::new("alice@example.com", "alice");
        let json = serde_json::to_string(&user).unwrap();
        assert_eq!(json, r#"{"email":"alice@example.com","displayName":"alice"}"#);
    }
}
