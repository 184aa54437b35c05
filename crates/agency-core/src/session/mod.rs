//! Session domain module.
//!
//! This module contains the session state model and the persistent store that
//! backs it.
//!
//! # Module Structure
//!
//! - `model`: Auth status and the read-only `SessionState` snapshot
//! - `store`: `SessionStore`, the save/load/clear contract over one slot
//!
//! # Usage
//!
//! ```ignore
//! use agency_core::session::{AuthStatus, SessionState, SessionStore};
//! ```

mod model;
mod store;

// Re-export public API
pub use model::{AuthStatus, SessionState};
pub use store::{DEFAULT_SESSION_KEY, DEFAULT_SESSION_TTL_DAYS, SessionStore};
