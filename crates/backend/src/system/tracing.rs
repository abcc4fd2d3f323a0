use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::shared::config::{resolve_path, LoggingConfig};

/// Initialize tracing
///
/// Logs go to:
/// - stdout (with colors)
/// - the configured log file (without colors)
///
/// `RUST_LOG` overrides the configured level.
pub fn initialize(logging: &LoggingConfig) -> anyhow::Result<()> {
    let log_file_path = resolve_path(&logging.file);
    if let Some(log_dir) = log_file_path.parent() {
        std::fs::create_dir_all(log_dir).map_err(|e| {
            anyhow::anyhow!("Cannot create log directory {}: {}", log_dir.display(), e)
        })?;
    }

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file_path)
        .map_err(|e| {
            anyhow::anyhow!("Cannot open log file {}: {}", log_file_path.display(), e)
        })?;

    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| logging.level.clone());

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&log_level))
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::sync::Arc::new(log_file))
                .with_ansi(false),
        )
        .init();

    tracing::info!(
        "Tracing initialized (level: {}, file: {})",
        log_level,
        log_file_path.display()
    );
    Ok(())
}
