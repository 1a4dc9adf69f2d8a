mod cli;
mod commands;
mod mcp;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Mcp => {
            mcp::run_server().await?;
        }
        Commands::Toc { path, outline } => {
            commands::toc::run(&path, &outline.to_options()?).await?;
        }
        Commands::Json {
            path,
            compact,
            outline,
        } => {
            commands::json::run(&path, &outline.to_options()?, compact).await?;
        }
        Commands::Ids { path, outline } => {
            commands::ids::run(&path, &outline.to_options()?).await?;
        }
        Commands::Render {
            path,
            active,
            outline,
        } => {
            commands::render::run(&path, &outline.to_options()?, active.as_deref()).await?;
        }
        Commands::Active {
            path,
            scroll,
            viewport,
            outline,
        } => {
            let options = commands::active::ActiveOptions { scroll, viewport };
            commands::active::run(&path, &outline.to_options()?, &options).await?;
        }
        Commands::Scan { dir, outline } => {
            commands::scan::run(&dir, &outline.to_options()?).await?;
        }
    }

    Ok(())
}

/// Logs go to stderr; stdout carries command output and the MCP transport.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env("MDTOC_LOG")
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
