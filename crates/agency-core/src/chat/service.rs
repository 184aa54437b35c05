//! Chatbot service trait.

use super::model::{ChatMode, ChatReply};

/// Sends one message to the chatbot and returns a display-ready reply.
///
/// Implementations never fail: transport and HTTP errors are turned into one
/// of the fixed fallback texts. Each call is independent. There is no retry,
/// no caching, and no session token attached.
#[async_trait::async_trait]
pub trait ChatbotService: Send + Sync {
    /// Sends `text` and returns the reply with any suggestions.
    async fn send_message_detailed(&self, text: &str, mode: ChatMode) -> ChatReply;

    /// Sends `text` and returns only the reply text.
    async fn send_message(&self, text: &str, mode: ChatMode) -> String {
        self.send_message_detailed(text, mode).await.text
    }
}
