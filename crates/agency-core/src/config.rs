//! Site configuration model.
//!
//! Every field has a default so a missing or partial `config.toml` still
//! yields a usable configuration.

use serde::{Deserialize, Serialize};

use crate::session::{DEFAULT_SESSION_KEY, DEFAULT_SESSION_TTL_DAYS};
use crate::theme::DEFAULT_THEME_KEY;

pub const DEFAULT_CHATBOT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_CHATBOT_TIMEOUT_SECS: u64 = 30;

/// Root of `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteConfig {
    /// Duration of the loading splash, in milliseconds. Zero disables it.
    #[serde(default)]
    pub splash_ms: u64,
    #[serde(default)]
    pub chatbot: ChatbotConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatbotConfig {
    /// Origin hosting `/api/chatbot/message`
    #[serde(default = "default_chatbot_base_url")]
    pub base_url: String,
    #[serde(default = "default_chatbot_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ChatbotConfig {
    fn default() -> Self {
        Self {
            base_url: default_chatbot_base_url(),
            timeout_secs: default_chatbot_timeout_secs(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    #[serde(default = "default_ttl_days")]
    pub ttl_days: u32,
    #[serde(default = "default_session_key")]
    pub storage_key: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_days: default_ttl_days(),
            storage_key: default_session_key(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ThemeConfig {
    #[serde(default = "default_theme_key")]
    pub storage_key: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: default_theme_key(),
        }
    }
}

fn default_chatbot_base_url() -> String {
    DEFAULT_CHATBOT_BASE_URL.to_string()
}

fn default_chatbot_timeout_secs() -> u64 {
    DEFAULT_CHATBOT_TIMEOUT_SECS
}

fn default_ttl_days() -> u32 {
    DEFAULT_SESSION_TTL_DAYS
}

fn default_session_key() -> String {
    DEFAULT_SESSION_KEY.to_string()
}

fn default_theme_key() -> String {
    DEFAULT_THEME_KEY.to_string()
}
