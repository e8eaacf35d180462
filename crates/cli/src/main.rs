mod config;
mod error;
mod repl;

use std::io;
use std::path::PathBuf;

use config::{CONFIG_ENV, Config};
use error::Result;
use mcp::McpClient;
use runtime::{Chatbot, Provider};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // A missing .env is fine; the environment may already be set.
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let path = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
    let mut config = Config::discover(path.as_deref())?;
    config.apply_env(|name| std::env::var(name).ok())?;

    let backend = Provider::from_settings(config.provider_settings()?)?;
    let tools = McpClient::new(&config.tools.url, config.tools_timeout())?;
    tracing::debug!(tool_url = %tools.base_url(), llm = %backend, "chat client configured");

    println!("Welcome to the Chatbot! Type 'exit' to quit.");
    println!("Using MCP server at {} and {backend}.", config.tools.url);

    let bot = Chatbot::new(backend, tools);
    let mut stdout = io::stdout();
    repl::run(&bot, io::stdin().lock(), &mut stdout).await?;
    Ok(())
}
