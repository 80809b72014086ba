//! Logging setup and the `serve` command.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use brandlens_api::{ApiConfig, ApiServer};
use brandlens_core::MessageRouter;

use crate::context::AppContext;

/// `~/.brandlens`, or `./.brandlens` without a home directory.
pub(crate) fn brandlens_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".brandlens"))
        .unwrap_or_else(|| PathBuf::from(".brandlens"))
}

/// Initialize tracing with console and file output.
///
/// Console output goes to stderr so command output on stdout stays clean.
/// Log files are written to ~/.brandlens/logs/ with daily rotation.
pub(crate) fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = brandlens_dir().join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("brandlens")
        .filename_suffix("log")
        .max_log_files(14)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // The guard flushes the file writer on drop, so it lives for the whole process.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_ansi(true)
                .with_writer(std::io::stderr),
        )
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

/// Run the local message endpoint until the process stops.
pub(crate) async fn run_server(
    ctx: &AppContext,
    host: String,
    port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting BrandLens v{}", env!("CARGO_PKG_VERSION"));

    let settings = ctx.settings()?;
    if settings.api_key().is_none() {
        info!("No API key configured yet, analysis requests will fail until one is saved");
    }
    let analyzer = ctx.analyzer(settings)?;
    let router = Arc::new(
        MessageRouter::new(analyzer, ctx.store.clone()).with_api_key_override(ctx.api_key.clone()),
    );

    let server = ApiServer::new(ApiConfig::new(host, port), router);
    println!("BrandLens listening on http://{}", server.addr());
    println!("  POST /message  - message endpoint");
    println!("  GET  /health   - health check");

    server.run().await?;

    info!("Shutting down...");
    Ok(())
}
