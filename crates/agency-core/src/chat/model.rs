//! Chat exchange wire types.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Shown when the endpoint answered but had nothing to say.
pub const EMPTY_REPLY_FALLBACK: &str =
    "Sorry, I couldn't come up with a response. Could you try rephrasing?";

/// Shown when the endpoint cannot be reached at all.
pub const SERVICE_UNAVAILABLE_FALLBACK: &str =
    "Our assistant is currently unavailable. Please try again later or contact us directly.";

/// Shown for every other failure.
pub const CONNECTION_TROUBLE_FALLBACK: &str =
    "I'm having trouble connecting right now. Please try again in a moment.";

/// How the endpoint should answer.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ChatMode {
    /// Conversational reply in `message`
    #[default]
    Chat,
    /// Unprocessed model output in `rawContent`
    Raw,
}

/// Body of `POST /api/chatbot/message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub mode: ChatMode,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>, mode: ChatMode) -> Self {
        Self {
            message: message.into(),
            mode,
        }
    }
}

/// Successful response body. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
}

impl ChatResponse {
    /// Picks the display text for `mode`.
    ///
    /// Raw mode returns `rawContent` verbatim when the field is present.
    /// Otherwise `message` is used, or `EMPTY_REPLY_FALLBACK` if it is
    /// missing or empty.
    pub fn into_reply(self, mode: ChatMode) -> ChatReply {
        let suggestions = self.suggestions.unwrap_or_default();

        if mode == ChatMode::Raw {
            if let Some(raw) = self.raw_content {
                return ChatReply { text: raw, suggestions };
            }
        }

        match self.message {
            Some(message) if !message.is_empty() => ChatReply {
                text: message,
                suggestions,
            },
            _ => ChatReply::fallback(EMPTY_REPLY_FALLBACK),
        }
    }
}

/// Error body the endpoint may attach to non-2xx responses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatErrorBody {
    pub message: String,
}

/// Display-ready result of one exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatReply {
    pub text: String,
    pub suggestions: Vec<String>,
}

impl ChatReply {
    /// A reply carrying one of the fixed fallback texts.
    pub fn fallback(text: &str) -> Self {
        Self {
            text: text.to_string(),
            suggestions: Vec::new(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        [
            EMPTY_REPLY_FALLBACK,
            SERVICE_UNAVAILABLE_FALLBACK,
            CONNECTION_TROUBLE_FALLBACK,
        ]
        .contains(&self.text.as_str())
    }
}
