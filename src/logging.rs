use crate::{CONFIG_DIRECTORY, config::Config};
use anyhow::{Context, Result, anyhow};
use std::{fs::OpenOptions, path::PathBuf, sync::Mutex};
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "carplay-music.log";

/// Route `tracing` output to a log file. The terminal belongs to the UI, so
/// nothing is written to stdout or stderr.
///
/// `RUST_LOG` takes precedence over the configured filter.
pub fn init_logging(config: &Config) -> Result<PathBuf> {
    let path = match &config.log_file {
        Some(path) => path.clone(),
        None => default_log_path()?,
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Could not open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .map_err(|e| anyhow!("Invalid log filter: {e}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_thread_names(true)
        .try_init()
        .map_err(|e| anyhow!("Could not install logger: {e}"))?;

    Ok(path)
}

fn default_log_path() -> Result<PathBuf> {
    let dir = dirs::data_local_dir()
        .or_else(dirs::cache_dir)
        .ok_or_else(|| anyhow!("Could not determine a data directory for logs"))?;
    Ok(dir.join(CONFIG_DIRECTORY).join(LOG_FILE))
}
