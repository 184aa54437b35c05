//! User domain module.
//!
//! This module contains the signed-in user identity and the credential
//! verification seam used at login.
//!
//! # Module Structure
//!
//! - `model`: User identity domain model
//! - `verifier`: Credential verifier trait and the trusting stub
//!
//! # Usage
//!
//! ```ignore
//! use agency_core::user::{UserIdentity, CredentialVerifier, TrustingVerifier};
//! ```

mod model;
mod verifier;

// Re-export public API
pub use model::UserIdentity;
pub use verifier::{CredentialVerifier, TrustingVerifier};

#[cfg(test)]
pub(crate) use verifier::RejectingVerifier;
