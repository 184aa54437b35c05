//! HttpChatbotClient - REST client for the site's chatbot endpoint.
//!
//! Sends `POST {base_url}/api/chatbot/message` with `{message, mode}` and
//! turns every outcome into display text. Failures never reach the caller.

use std::time::Duration;

use agency_core::chat::{
    CONNECTION_TROUBLE_FALLBACK, ChatErrorBody, ChatMode, ChatReply, ChatRequest, ChatResponse,
    ChatbotService, SERVICE_UNAVAILABLE_FALLBACK,
};
use agency_core::config::{ChatbotConfig, DEFAULT_CHATBOT_TIMEOUT_SECS};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};

const MESSAGE_PATH: &str = "/api/chatbot/message";

/// Chatbot client that talks to the HTTP endpoint.
#[derive(Clone)]
pub struct HttpChatbotClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpChatbotClient {
    /// Creates a client for the endpoint hosted at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
            timeout: Duration::from_secs(DEFAULT_CHATBOT_TIMEOUT_SECS),
        }
    }

    pub fn from_config(config: &ChatbotConfig) -> Self {
        Self::new(config.base_url.clone()).with_timeout(Duration::from_secs(config.timeout_secs))
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, MESSAGE_PATH)
    }

    async fn send_request(&self, body: &ChatRequest) -> Result<ChatResponse, ChatFailure> {
        let response = self
            .client
            .post(self.endpoint())
            .timeout(self.timeout)
            .json(body)
            .send()
            .await
            .map_err(|err| {
                let message = format!("Chatbot request failed: {err}");
                if err.is_connect() {
                    ChatFailure::Unreachable(message)
                } else {
                    ChatFailure::Trouble(message)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read chatbot error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        response
            .json::<ChatResponse>()
            .await
            .map_err(|err| ChatFailure::Trouble(format!("Failed to parse chatbot response: {err}")))
    }
}

#[async_trait]
impl ChatbotService for HttpChatbotClient {
    async fn send_message_detailed(&self, text: &str, mode: ChatMode) -> ChatReply {
        let request = ChatRequest::new(text, mode);
        tracing::debug!(%mode, chars = text.chars().count(), "Sending chatbot message");

        match self.send_request(&request).await {
            Ok(response) => {
                let reply = response.into_reply(mode);
                tracing::debug!(
                    fallback = reply.is_fallback(),
                    suggestions = reply.suggestions.len(),
                    "Chatbot replied"
                );
                reply
            }
            Err(failure) => {
                tracing::error!("{}", failure.message());
                ChatReply::fallback(failure.fallback_text())
            }
        }
    }
}

/// Why an exchange produced no usable response.
#[derive(Debug)]
enum ChatFailure {
    /// The endpoint could not be reached at all.
    Unreachable(String),
    Trouble(String),
}

impl ChatFailure {
    fn message(&self) -> &str {
        match self {
            ChatFailure::Unreachable(message) | ChatFailure::Trouble(message) => message,
        }
    }

    fn fallback_text(&self) -> &'static str {
        match self {
            ChatFailure::Unreachable(_) => SERVICE_UNAVAILABLE_FALLBACK,
            ChatFailure::Trouble(_) => CONNECTION_TROUBLE_FALLBACK,
        }
    }
}

fn map_http_error(status: StatusCode, body: String) -> ChatFailure {
    let detail = serde_json::from_str::<ChatErrorBody>(&body)
        .map(|error| error.message)
        .unwrap_or(body);
    let message = format!("Chatbot endpoint returned {status}: {detail}");

    // Missing route or a dead upstream behind a proxy.
    let unreachable = matches!(
        status,
        StatusCode::NOT_FOUND
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    );

    if unreachable {
        ChatFailure::Unreachable(message)
    } else {
        ChatFailure::Trouble(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = HttpChatbotClient::new("http://localhost:3000/");
        assert_eq!(client.endpoint(), "http://localhost:3000/api/chatbot/message");
    }

    #[test]
    fn test_from_config() {
        let config = ChatbotConfig {
            base_url: "https://agency.example".to_string(),
            timeout_secs: 5,
        };
        let client = HttpChatbotClient::from_config(&config);
        assert_eq!(client.base_url(), "https://agency.example");
        assert_eq!(client.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_map_http_error_classification() {
        for status in [
            StatusCode::NOT_FOUND,
            StatusCode::BAD_GATEWAY,
            StatusCode::SERVICE_UNAVAILABLE,
            StatusCode::GATEWAY_TIMEOUT,
        ] {
            let failure = map_http_error(status, String::new());
            assert_eq!(failure.fallback_text(), SERVICE_UNAVAILABLE_FALLBACK);
        }

        for status in [
            StatusCode::BAD_REQUEST,
            StatusCode::TOO_MANY_REQUESTS,
            StatusCode::INTERNAL_SERVER_ERROR,
        ] {
            let failure = map_http_error(status, String::new());
            assert_eq!(failure.fallback_text(), CONNECTION_TROUBLE_FALLBACK);
        }
    }

    #[test]
    fn test_map_http_error_prefers_error_body_message() {
        let failure = map_http_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"message":"model overloaded"}"#.to_string(),
        );
        assert!(failure.message().contains("model overloaded"));

        let failure = map_http_error(StatusCode::INTERNAL_SERVER_ERROR, "plain text".to_string());
        assert!(failure.message().contains("plain text"));
    }
}
