use colored::Colorize;

use agency_core::chat::ChatMode;

use crate::app::AppBootstrap;

pub async fn send(app: &AppBootstrap, message: &str, mode: ChatMode) -> String {
    let reply = app.chatbot.send_message_detailed(message, mode).await;

    let mut out = if reply.is_fallback() {
        reply.text.yellow().to_string()
    } else {
        reply.text
    };
    if !reply.suggestions.is_empty() {
        out.push_str(&format!(
            "\n{} {}",
            "Try:".dimmed(),
            reply.suggestions.join(" · ")
        ));
    }
    out
}
