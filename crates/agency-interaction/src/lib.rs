//! Outbound integrations for the agency site shell.

pub mod chatbot_client;

pub use chatbot_client::HttpChatbotClient;
