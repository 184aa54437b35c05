use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use agency_core::chat::ChatMode;
use agency_core::theme::ThemePreference;
use agency_infrastructure::AgencyPaths;
use agency_infrastructure::paths::CONFIG_DIR_ENV;

mod app;
mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "agency")]
#[command(about = "Agency site shell - session, route guard, theme and chatbot", long_about = None)]
struct Cli {
    /// Directory holding config.toml, storage.json and logs
    #[arg(long, global = true, env = CONFIG_DIR_ENV)]
    config_dir: Option<PathBuf>,

    /// Chatbot origin, overriding config and AGENCY_CHATBOT_URL
    #[arg(long, global = true)]
    chatbot_url: Option<String>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the session
    Login {
        email: String,
        #[arg(short, long, default_value = "")]
        password: String,
    },
    /// Sign out and clear the stored session
    Logout,
    /// Show who is signed in
    Whoami,
    /// Open a route, applying the route guard
    Visit { path: String },
    /// Show or change the color theme
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },
    /// Send one message to the site assistant
    Chat {
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
        /// Ask for the unprocessed model output
        #[arg(long)]
        raw: bool,
    },
}

#[derive(Subcommand)]
enum ThemeAction {
    /// Print the current theme
    Show,
    /// Switch between dark and light
    Toggle,
    /// Choose a theme explicitly
    Set { theme: ThemePreference },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = AgencyPaths::new(cli.config_dir.clone());
    let logs_dir = paths.logs_dir().ok();
    let _log_guard = logging::init(cli.verbose, logs_dir.as_deref());

    let app = app::bootstrap(&paths, cli.chatbot_url.clone()).await?;
    app.finish_loading().await;

    let output = match cli.command {
        Commands::Login { email, password } => commands::session::login(&app, &email, &password)?,
        Commands::Logout => commands::session::logout(&app),
        Commands::Whoami => commands::session::whoami(&app),
        Commands::Visit { path } => commands::visit::visit(&app, &path),
        Commands::Theme { action } => match action.unwrap_or(ThemeAction::Show) {
            ThemeAction::Show => commands::theme::show(&app),
            ThemeAction::Toggle => commands::theme::toggle(&app),
            ThemeAction::Set { theme } => commands::theme::set(&app, theme),
        },
        Commands::Chat { message, raw } => {
            let mode = if raw { ChatMode::Raw } else { ChatMode::Chat };
            commands::chat::send(&app, &message.join(" "), mode).await
        }
    };

    println!("{output}");
    Ok(())
}
