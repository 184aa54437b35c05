//! Composition root for the CLI shell.

use std::sync::Arc;
use std::time::Duration;

use agency_core::auth::AuthService;
use agency_core::chat::ChatbotService;
use agency_core::config::SiteConfig;
use agency_core::guard::RouteGuard;
use agency_core::session::SessionStore;
use agency_core::storage::KeyValueStore;
use agency_core::theme::ThemeService;
use agency_infrastructure::{AgencyPaths, ConfigService, EnvThemeProbe, FileKeyValueStore};
use agency_interaction::HttpChatbotClient;
use anyhow::{Context, Result};

/// Every service the shell needs, wired once per run.
pub struct AppBootstrap {
    pub config: SiteConfig,
    pub auth: Arc<AuthService>,
    pub guard: RouteGuard,
    pub theme: ThemeService,
    pub chatbot: Arc<dyn ChatbotService>,
}

impl AppBootstrap {
    /// Shows the splash for `splash_ms`, then reads the stored session.
    ///
    /// The auth service stays in `Initializing` until this runs.
    pub async fn finish_loading(&self) {
        if self.config.splash_ms > 0 {
            tracing::debug!(splash_ms = self.config.splash_ms, "Showing splash");
            tokio::time::sleep(Duration::from_millis(self.config.splash_ms)).await;
        }
        let state = self.auth.initialize();
        tracing::debug!(signed_in = state.current_user.is_some(), "Session loaded");
    }
}

/// Builds the services from `paths`.
///
/// `chatbot_url` takes precedence over the configured base URL.
pub async fn bootstrap(paths: &AgencyPaths, chatbot_url: Option<String>) -> Result<AppBootstrap> {
    let mut config = ConfigService::new(paths).get_config();
    if let Some(url) = chatbot_url {
        config.chatbot.base_url = url;
    }

    let store: Arc<dyn KeyValueStore> = Arc::new(
        FileKeyValueStore::from_paths(paths).context("Failed to locate storage file")?,
    );

    let session_store = SessionStore::with_key(store.clone(), config.session.storage_key.clone());
    let auth = Arc::new(AuthService::new(session_store).with_ttl_days(config.session.ttl_days));
    let guard = RouteGuard::new(auth.clone());

    let theme = ThemeService::with_key(store, &EnvThemeProbe, config.theme.storage_key.clone());

    let chatbot: Arc<dyn ChatbotService> =
        Arc::new(HttpChatbotClient::from_config(&config.chatbot));

    tracing::debug!(
        chatbot = %config.chatbot.base_url,
        ttl_days = config.session.ttl_days,
        "[Bootstrap] Services ready"
    );

    Ok(AppBootstrap {
        config,
        auth,
        guard,
        theme,
        chatbot,
    })
}
