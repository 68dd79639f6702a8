use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

use super::config::LoggingConfig;

pub const LOG_FILE_NAME: &str = "runtime.log";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Console and `<dir>/runtime.log` at the same time. Falls back to console-only
/// if the file cannot be opened.
pub fn init_logging(config: &LoggingConfig) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.level));

    let (log_file, file_error) = match open_log_file(&config.dir) {
        Ok(file) => (Some(file), None),
        Err(e) => (None, Some(e)),
    };

    let console_layer =
        fmt::layer().with_timer(ChronoLocal::new(TIMESTAMP_FORMAT.to_string()));
    let file_layer = log_file.map(|file| {
        fmt::layer()
            .with_ansi(false)
            .with_timer(ChronoLocal::new(TIMESTAMP_FORMAT.to_string()))
            .with_writer(Arc::new(file))
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    match file_error {
        None => tracing::info!(
            "Logging initialized at level: {} (file: {})",
            config.level,
            config.dir.join(LOG_FILE_NAME).display()
        ),
        Some(e) => tracing::warn!(
            "Logging initialized at level: {} (console only, cannot open {}: {})",
            config.level,
            config.dir.join(LOG_FILE_NAME).display(),
            e
        ),
    }
}

fn open_log_file(dir: &Path) -> std::io::Result<File> {
    fs::create_dir_all(dir)?;
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_log_file_creates_directory() {
        let dir = std::env::temp_dir().join(format!("duckyci-watch-log-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);

        let file = open_log_file(&dir);
        assert!(file.is_ok());
        assert!(dir.join(LOG_FILE_NAME).exists());

        let _ = fs::remove_dir_all(&dir);
    }
}
