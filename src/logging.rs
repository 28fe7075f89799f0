use std::fs;
use std::path::Path;

use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::error::Result;

/// Parse a level name, case-insensitively. Unknown names fall back to INFO.
pub fn parse_level(s: &str) -> Level {
    match s.to_uppercase().as_str() {
        "TRACE" => Level::TRACE,
        "DEBUG" => Level::DEBUG,
        "INFO" => Level::INFO,
        "WARN" | "WARNING" => Level::WARN,
        "ERROR" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Send tracing output to `log_path`. The terminal belongs to the TUI, so
/// nothing is ever written to stdout/stderr.
///
/// Priority: CLI level > preferences level > `RUST_LOG` > INFO.
pub fn setup_logging(
    log_path: &Path,
    cli_log_level: Option<&str>,
    config_log_level: Option<&str>,
) -> Result<()> {
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let log_file = fs::File::create(log_path)?;

    let filter = match cli_log_level.or(config_log_level) {
        Some(s) => EnvFilter::default().add_directive(parse_level(s).into()),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::default().add_directive(Level::INFO.into())),
    };

    // A second call (tests, embedding) keeps the first subscriber.
    if let Err(e) = tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(filter)
        .try_init()
    {
        tracing::debug!(error = %e, "tracing subscriber already installed");
    }

    tracing::info!(path = %log_path.display(), "logging initialized");
    Ok(())
}
