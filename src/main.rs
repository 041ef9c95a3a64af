// hookspy - terminal dashboard for inspecting captured webhooks
//
// The dashboard polls a small webhook-capture backend at a fixed cadence,
// renders the recent events in a live feed, and offers per-event export
// actions plus an ad-hoc send path.
//
// Architecture:
// - Backend client (reqwest): typed access to /api/info, /api/events, /api/webhook
// - Poller: tick-driven refresh with pause and an in-flight gate
// - Filter + Renderer: pure (events, query) -> view tree, rebuilt per frame
// - TUI (ratatui): draws the view tree, dispatches key actions
// - Logging: tracing into an in-memory buffer (and optional rotating files)

mod backend;
mod cli;
mod config;
mod export;
mod filter;
mod logging;
mod model;
mod poller;
mod render;
mod theme;
mod tui;
mod util;

use anyhow::Result;
use backend::ApiClient;
use config::{Config, LogRotation};
use logging::{LogBuffer, TuiLogLayer};
use poller::Poller;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Handle CLI subcommands first (config --show, --reset, --edit, --path)
    let cli = cli::parse();
    if let Some(command) = cli.command {
        cli::handle_command(command);
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let mut config = Config::from_env();
    if let Some(url) = cli.url {
        config.backend_url = url.trim_end_matches('/').to_string();
    }

    // Log buffer for TUI mode: captured logs render in the status line
    // instead of breaking through the alternate screen
    let log_buffer = LogBuffer::new();

    // Filter precedence: RUST_LOG env var > config file > default "info"
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("hookspy={}", config.logging.level)));

    // Optional rotating file logging. The guard must stay alive for the
    // duration of the program so buffered logs flush on exit.
    let (file_writer, _file_guard) = if config.logging.file_enabled {
        match std::fs::create_dir_all(&config.logging.file_dir) {
            Ok(()) => {
                let appender = match config.logging.file_rotation {
                    LogRotation::Hourly => tracing_appender::rolling::hourly(
                        &config.logging.file_dir,
                        &config.logging.file_prefix,
                    ),
                    LogRotation::Daily => tracing_appender::rolling::daily(
                        &config.logging.file_dir,
                        &config.logging.file_prefix,
                    ),
                    LogRotation::Never => tracing_appender::rolling::never(
                        &config.logging.file_dir,
                        &config.logging.file_prefix,
                    ),
                };
                let (non_blocking, guard) = tracing_appender::non_blocking(appender);
                (Some(non_blocking), Some(guard))
            }
            Err(e) => {
                eprintln!(
                    "Warning: Could not create log directory {:?}: {}",
                    config.logging.file_dir, e
                );
                (None, None)
            }
        }
    } else {
        (None, None)
    };

    // File layer uses JSON format for structured log parsing
    let file_layer = file_writer.map(|writer| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(writer)
            .with_ansi(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(config.enable_tui.then(|| TuiLogLayer::new(log_buffer.clone())))
        .with((!config.enable_tui).then(|| tracing_subscriber::fmt::layer()))
        .with(file_layer)
        .init();

    tracing::info!(
        backend = %config.backend_url,
        interval_ms = config.poll_interval_ms,
        limit = config.event_limit,
        "starting hookspy"
    );

    if config.enable_tui {
        tui::run_tui(config, log_buffer).await?;
    } else {
        tracing::info!("TUI disabled, running in headless mode");
        run_headless(config).await?;
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Headless mode: poll on the same cadence and log refresh summaries
/// instead of drawing. Runs until Ctrl+C.
async fn run_headless(config: Config) -> Result<()> {
    let backend = ApiClient::new(&config)?;
    let mut poller = Poller::new(backend, config.event_limit);
    let mut interval =
        tokio::time::interval(std::time::Duration::from_millis(config.poll_interval_ms));

    loop {
        tokio::select! {
            _ = interval.tick() => {
                // Headless has no concurrent input to keep responsive, so
                // the cycle is awaited inline
                if let Some(cycle) = poller.begin_cycle() {
                    poller.finish_cycle(cycle.await);
                    if let Some(info) = poller.info() {
                        tracing::info!(
                            events = poller.events().len(),
                            storage = %info.storage,
                            last_bytes = poller.state().last_bytes,
                            "refresh"
                        );
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Ctrl+C received, shutting down");
                break;
            }
        }
    }

    Ok(())
}
