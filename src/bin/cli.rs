//! Seat Monitor CLI
//!
//! Polls the seat inventory until the configured runtime elapses or the
//! process is interrupted, posting webhook alerts for bookable seats.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use seat_monitor::{
    config,
    error::Result,
    pipeline::{self, CheckOutcome, NotificationStatus},
};

/// seat-monitor - Train seat availability watcher
#[derive(Parser, Debug)]
#[command(name = "seat-monitor", version, about = "Train seat availability watcher")]
struct Cli {
    /// Path to TOML config file (default: ./seat-monitor.toml, optional)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check periodically until max runtime or Ctrl+C (default)
    Run,

    /// Run a single check and exit
    Check,

    /// Validate configuration
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Wait for Ctrl+C, or SIGTERM on unix.
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                log::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => log::warn!("Received interrupt signal, stopping monitor"),
        () = terminate => log::warn!("Received SIGTERM, stopping monitor"),
    }
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    config::load_dotenv();

    let config = match config::load_validated(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Config validation failed: {}", e);
            return Err(e);
        }
    };

    match cli.command.unwrap_or(Command::Run) {
        Command::Run => {
            // Spawned so the signal handlers are installed before the first check.
            let shutdown = tokio::spawn(shutdown_signal());
            pipeline::run_monitor(&config, shutdown).await?;
        }

        Command::Check => {
            let monitor = pipeline::build_monitor(&config)?;
            match monitor.check().await {
                Ok(CheckOutcome::CarMissing) => {
                    log::info!("No data for {}", monitor.target_car());
                }
                Ok(CheckOutcome::Evaluated {
                    partition,
                    notification,
                }) => {
                    log::info!(
                        "{} available, {} blocked (threshold {})",
                        partition.available_count(),
                        partition.blocked_count(),
                        monitor.threshold()
                    );
                    if let NotificationStatus::Failed(reason) = notification {
                        log::warn!("Alert was not delivered: {}", reason);
                    }
                }
                Err(e) => log::error!("Check failed: {}", e),
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");
            log::info!("✓ Inventory: {}", config.monitor.inventory_url);
            log::info!(
                "✓ Target car: {} (threshold {})",
                config.monitor.target_car,
                config.monitor.threshold
            );
            log::info!(
                "✓ Webhook: {}",
                if config.notifier.webhook()?.is_some() {
                    "configured"
                } else {
                    "not configured"
                }
            );
            log::info!("All validations passed!");
        }
    }

    Ok(())
}
