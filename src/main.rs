// This is the entry point of the document chat server.
//
// **Architecture Overview:**
// - `core/`   = Business logic (search, prompt assembly, session rules)
// - `infra/`  = Implementations of core traits (Google Drive, LLM endpoint)
// - `web/`    = HTTP adapters (routes, state, JSON errors)
// - `client/` = Terminal front end talking to a running server
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize logging
// 3. Wire services together (dependency injection)
// 4. Either serve HTTP or run the terminal client
//
// Usage: `drive_doc_chat [serve]` or `drive_doc_chat chat [server-url]`

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with several mod.rs files that all look the same.
#[path = "client/client_layer.rs"]
mod client;
mod config;
#[path = "core/core_layer.rs"]
mod core;
#[path = "infra/infra_layer.rs"]
mod infra;
#[path = "web/web_layer.rs"]
mod web;

use std::net::SocketAddr;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{info, warn};

use crate::client::{run_terminal, ChatClient};
use crate::config::Config;
use crate::web::AppState;

#[derive(Parser)]
#[command(name = "drive_doc_chat")]
#[command(about = "Chat with a single Google Drive document", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (the default)
    Serve,
    /// Chat with a running server from the terminal
    Chat {
        /// Base URL of the server
        #[arg(default_value = "http://localhost:3000")]
        url: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    let config = Config::from_env();
    init_tracing(&config.log_level);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::Chat { url } => chat(&url).await,
    }
}

/// `RUST_LOG` wins over `CHATBOT_LOG`. Logs go to stderr so they never mix
/// with the terminal chat.
fn init_tracing(log_level: &str) {
    let env_filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match log_level.parse::<tracing_subscriber::EnvFilter>() {
            Ok(filter) => filter,
            Err(e) => {
                eprintln!(
                    "WARN: CHATBOT_LOG='{}' is not a valid tracing filter ({}); falling back to 'info'",
                    log_level, e
                );
                tracing_subscriber::EnvFilter::new("info")
            }
        },
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn serve(config: Config) -> anyhow::Result<()> {
    info!(version = env!("CARGO_PKG_VERSION"), "drive_doc_chat starting");

    if !config.llm.is_configured() {
        warn!("GPT_OSS_API_URL / GPT_OSS_API_KEY not set; /api/chat will answer 500");
    }
    if !config.google.is_configured() {
        warn!("Google service account or GOOGLE_FOLDER_ID not set; /api/chat will answer 500");
    }

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================
    let addr: SocketAddr = config.bind_address.parse()?;
    let state = Arc::new(AppState::from_config(Arc::new(config)));
    let app = web::router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("drive_doc_chat stopped");
    Ok(())
}

async fn chat(server_url: &str) -> anyhow::Result<()> {
    let client = ChatClient::new(server_url);
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    run_terminal(&client, stdin, tokio::io::stdout()).await?;
    Ok(())
}

/// Resolves when SIGINT (Ctrl-C) or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to install CTRL+C signal handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}
