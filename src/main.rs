//! BrandLens - brand voice and tone analysis for web pages
//!
//! Main entry point for the BrandLens CLI and local message endpoint.

mod cli;
mod cmd_analyze;
mod cmd_settings;
mod context;
mod page;
mod server;

use std::process::ExitCode;

use clap::Parser;

use cli::{Cli, Commands};
use cmd_analyze::{handle_analyze, handle_extract, handle_overlay};
use cmd_settings::handle_settings_command;
use context::AppContext;
use server::{init_tracing, run_server};

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    // Initialize tracing with file and console output
    init_tracing()?;

    let cli = Cli::parse();
    let ctx = AppContext::new(cli.settings, cli.api_key);

    match cli.command {
        Commands::Analyze { source, json } => handle_analyze(&ctx, source, json).await,
        Commands::Extract { page, json } => handle_extract(&ctx, page, json).await,
        Commands::Overlay { file, url, output } => {
            handle_overlay(&ctx, &file, url.as_deref(), &output).await
        }
        Commands::Settings { action } => handle_settings_command(&ctx, action),
        Commands::Serve { host, port } => {
            run_server(&ctx, host, port).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
