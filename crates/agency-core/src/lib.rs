//! Core domain for the agency site shell.
//!
//! Session state, the route guard, the theme preference and the chatbot
//! exchange types. Every service takes its storage explicitly; nothing is
//! resolved from ambient context.

pub mod auth;
pub mod chat;
pub mod clock;
pub mod config;
pub mod error;
pub mod guard;
pub mod session;
pub mod storage;
pub mod theme;
pub mod user;

// Re-export common error type
pub use error::{AgencyError, Result};
