//! Chatbot exchange domain module.
//!
//! The chatbot runs on an external service. This module only describes the
//! wire shapes of one exchange and the seam callers depend on.
//!
//! # Module Structure
//!
//! - `model`: request/response wire types, `ChatReply`, fallback texts
//! - `service`: `ChatbotService` trait

mod model;
mod service;

// Re-export public API
pub use model::{
    CONNECTION_TROUBLE_FALLBACK, ChatErrorBody, ChatMode, ChatReply, ChatRequest, ChatResponse,
    EMPTY_REPLY_FALLBACK, SERVICE_UNAVAILABLE_FALLBACK,
};
pub use service::ChatbotService;
