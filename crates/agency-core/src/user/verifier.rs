//! Credential verification seam.
//!
//! Login accepts an email and password and asks a `CredentialVerifier` whether
//! to proceed. The site currently ships only `TrustingVerifier`, which accepts
//! every pair. It is a stub and must not be treated as authentication.

use crate::error::Result;

/// Decides whether a login attempt may proceed.
pub trait CredentialVerifier: Send + Sync {
    /// Returns `Ok(())` to accept, or `AgencyError::InvalidCredentials` to reject.
    fn verify(&self, email: &str, password: &str) -> Result<()>;
}

/// Accepts every credential pair.
///
/// # Example
///
/// ```
/// use agency_core::user::{CredentialVerifier, TrustingVerifier};
///
/// assert!(TrustingVerifier.verify("anyone@example.com", "").is_ok());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TrustingVerifier;

impl CredentialVerifier for TrustingVerifier {
    fn verify(&self, email: &str, _password: &str) -> Result<()> {
        tracing::debug!(email, "Accepting credentials without verification");
        Ok(())
    }
}

/// Rejects every credential pair. Test helper for the rejection path.
#[cfg(test)]
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct RejectingVerifier;

#[cfg(test)]
impl CredentialVerifier for RejectingVerifier {
    fn verify(&self, email: &str, _password: &str) -> Result<()> {
        Err(crate::error::AgencyError::invalid_credentials(email))
    }
}
